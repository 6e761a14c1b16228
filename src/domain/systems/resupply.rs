/// Designer-name fragment that identifies the tracked grenade class.
pub const GRENADE_CLASS: &str = "hegrenade";

/// Item name passed to the grant primitive.
pub const GRENADE_ITEM: &str = "weapon_hegrenade";

pub fn count_grenades<S: AsRef<str>>(weapons: &[S]) -> u32 {
    weapons
        .iter()
        .filter(|w| w.as_ref().contains(GRENADE_CLASS))
        .count() as u32
}

/// Number of grants needed to top the player up to `max_allowed`.
pub fn grenades_to_give(current: u32, max_allowed: u32) -> u32 {
    max_allowed.saturating_sub(current)
}
