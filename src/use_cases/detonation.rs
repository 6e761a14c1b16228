// Applies one grenade blast to every live player in range.

use tracing::{debug, warn};

use crate::domain::errors::PluginError;
use crate::domain::ports::PlayerDirectory;
use crate::domain::state::{BlastEvent, PlayerId};
use crate::domain::systems::impulse::compute_boost;
use crate::domain::tuning::BoostParameters;

#[derive(Debug, Default, PartialEq)]
pub struct DetonationReport {
    pub boosted: Vec<PlayerId>,
    pub skipped: usize,
}

/// Boosts every affected player exactly once for this blast.
///
/// A player whose velocity write fails is skipped and logged; the rest of
/// the blast still resolves.
pub fn apply_blast<H: PlayerDirectory + ?Sized>(
    host: &mut H,
    blast: &BlastEvent,
    params: &BoostParameters,
) -> Result<DetonationReport, PluginError> {
    let thrower = blast
        .thrower
        .ok_or(PluginError::MalformedEvent("detonation without thrower"))?;
    let origin = blast
        .valid_origin()
        .ok_or(PluginError::MalformedEvent("detonation without origin"))?;

    // A thrower who already disconnected has no team to compare against.
    let thrower_team = host.snapshot(thrower).map(|p| p.team);

    let mut report = DetonationReport::default();
    for id in host.player_ids() {
        let Some(player) = host.snapshot(id) else {
            report.skipped += 1;
            continue;
        };
        if !player.alive || !player.position.is_finite() || !player.velocity.is_finite() {
            report.skipped += 1;
            continue;
        }

        let Some(boost) = compute_boost(origin, &player, thrower_team, params) else {
            continue;
        };

        match host.set_velocity(id, boost.velocity) {
            Ok(()) => {
                debug!(
                    blast_id = blast.id,
                    player_id = id,
                    strength = boost.strength,
                    vx = boost.velocity.x,
                    vy = boost.velocity.y,
                    vz = boost.velocity.z,
                    "player boosted"
                );
                report.boosted.push(id);
            }
            Err(e) => {
                warn!(blast_id = blast.id, player_id = id, error = %e, "failed to boost player");
                report.skipped += 1;
            }
        }
    }

    Ok(report)
}
