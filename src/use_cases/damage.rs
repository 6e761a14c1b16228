// Damage blocking: pre-commit interception and post-hurt health refund.

use tracing::debug;

use crate::domain::errors::PluginError;
use crate::domain::ports::PlayerDirectory;
use crate::domain::state::{DamageInfo, HookResult, PlayerHurt};
use crate::domain::systems::resupply::GRENADE_CLASS;

/// Weapon name the host reports for world damage such as falling.
pub const WORLD_DAMAGE_SOURCE: &str = "worldspawn";

/// Which damage sources the refund path should undo.
#[derive(Debug, Clone, Copy, Default)]
pub struct RefundPolicy {
    pub grenade: bool,
    pub fall: bool,
}

pub fn is_tracked_explosive(weapon_class: &str) -> bool {
    weapon_class.contains(GRENADE_CLASS)
}

/// Zeroes damage from the tracked explosive class before the host commits it.
pub fn intercept_damage(info: &mut DamageInfo) -> HookResult {
    if !is_tracked_explosive(&info.weapon_class) {
        return HookResult::Continue;
    }

    debug!(
        victim_id = info.victim,
        weapon = %info.weapon_class,
        blocked = info.damage,
        "grenade damage blocked"
    );
    info.damage = 0.0;
    HookResult::Changed
}

/// Gives back health the host already removed for blocked damage sources.
pub fn refund_damage<H: PlayerDirectory + ?Sized>(
    host: &mut H,
    event: &PlayerHurt,
    policy: RefundPolicy,
) -> Result<HookResult, PluginError> {
    let victim = event
        .victim
        .ok_or(PluginError::MalformedEvent("player_hurt without victim"))?;

    let grenade = policy.grenade && event.weapon == GRENADE_CLASS;
    let fall = policy.fall
        && event.weapon == WORLD_DAMAGE_SOURCE
        && event.attacker.is_none_or(|attacker| attacker == victim);
    if !grenade && !fall {
        return Ok(HookResult::Continue);
    }

    // A victim killed by the hit stays dead.
    let alive = host.snapshot(victim).is_some_and(|p| p.alive);
    if alive {
        let armor = (grenade && event.armor > 0).then_some(event.armor);
        host.restore_health(victim, event.health_lost, armor)?;
        debug!(
            victim_id = victim,
            weapon = %event.weapon,
            refunded = event.health_lost,
            "damage refunded"
        );
    }
    Ok(HookResult::Handled)
}
