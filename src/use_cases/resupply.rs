// Round-start grenade top-up.

use tracing::{debug, warn};

use crate::domain::ports::{ItemGrants, PlayerDirectory};
use crate::domain::systems::resupply::{GRENADE_ITEM, count_grenades, grenades_to_give};

/// Tops every live player up to `max_grenades`. Returns the number of grants issued.
///
/// Must run after players have spawned; the plugin defers it by one tick.
pub fn resupply_players<H>(host: &mut H, max_grenades: u32) -> u32
where
    H: PlayerDirectory + ItemGrants + ?Sized,
{
    let mut granted = 0;
    for id in host.player_ids() {
        let alive = host.snapshot(id).is_some_and(|p| p.alive);
        if !alive {
            continue;
        }

        let held = match host.weapons(id) {
            Ok(weapons) => count_grenades(weapons.as_slice()),
            Err(e) => {
                warn!(player_id = id, error = %e, "could not read weapons");
                continue;
            }
        };

        for _ in 0..grenades_to_give(held, max_grenades) {
            match host.give_named_item(id, GRENADE_ITEM) {
                Ok(()) => granted += 1,
                Err(e) => {
                    warn!(player_id = id, error = %e, "grenade grant failed");
                    break;
                }
            }
        }
        debug!(player_id = id, held, max_grenades, "resupplied");
    }
    granted
}
