// Plugin lifecycle and single-threaded event dispatcher.

use std::collections::HashSet;
use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::{debug, error, info, warn};

use super::damage::{RefundPolicy, intercept_damage, refund_damage};
use super::detonation::apply_blast;
use super::overrides::RuleOverrideManager;
use super::resupply::resupply_players;
use super::types::{DeferredTask, HostEvent};
use crate::domain::config::{DamageBlockMode, PluginConfig};
use crate::domain::errors::PluginError;
use crate::domain::ports::{ConVarStore, GameHost};
use crate::domain::rules::RuleKind;
use crate::domain::state::{BlastEvent, DamageInfo, HookResult, PlayerHurt};
use crate::domain::tuning::BoostParameters;

pub const MODULE_NAME: &str = "CS2GrenadeBoost";
pub const MODULE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Owns the active config, the rule table and the next-tick queue.
///
/// Every handler runs to completion on the caller's thread. Host handles are
/// borrowed per call and never stored.
#[derive(Debug)]
pub struct GrenadeBoostPlugin {
    config: PluginConfig,
    params: BoostParameters,
    rules: RuleOverrideManager,
    deferred: Vec<DeferredTask>,
    // Blast ids already resolved this round; a redelivered blast must not stack.
    handled_blasts: HashSet<u64>,
    unloaded: bool,
}

impl Default for GrenadeBoostPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl GrenadeBoostPlugin {
    pub fn new() -> Self {
        Self {
            config: PluginConfig::default(),
            params: BoostParameters::default(),
            rules: RuleOverrideManager::new(),
            deferred: Vec::new(),
            handled_blasts: HashSet::new(),
            unloaded: false,
        }
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn params(&self) -> &BoostParameters {
        &self.params
    }

    pub fn rules(&self) -> &RuleOverrideManager {
        &self.rules
    }

    pub fn pending_tasks(&self) -> &[DeferredTask] {
        &self.deferred
    }

    /// Installs a parsed config.
    ///
    /// Parameters are validated before anything is swapped, so a rejected
    /// config leaves the previous one fully in effect. Rules enabled by the
    /// new config capture their originals here.
    pub fn on_config_parsed<S: ConVarStore + ?Sized>(
        &mut self,
        config: PluginConfig,
        host: &mut S,
    ) -> Result<(), PluginError> {
        let params = BoostParameters::try_from(&config)?;
        self.config = config;
        self.params = params;

        let enabled = enabled_rules(&self.config);
        self.rules.sync(&enabled, host);
        Ok(())
    }

    /// Logs the load banner.
    pub fn load(&self) {
        let cfg = &self.config;
        info!(
            module = MODULE_NAME,
            version = MODULE_VERSION,
            config_version = cfg.config_version,
            "plugin loaded"
        );
        if cfg.auto_give_he_grenade {
            info!(max = cfg.max_he_grenades, "auto give HE grenade enabled");
        }
        if cfg.enable_air_accuracy {
            info!("air accuracy enabled");
        }
        if cfg.disable_he_grenade_damage {
            info!(mode = ?cfg.damage_block_mode, "HE grenade damage disabled");
        }
        if cfg.disable_fall_damage {
            info!("fall damage disabled");
        }
        if cfg.only_boost_in_air {
            info!("boost only applies to airborne players");
        }
        if cfg.ignore_team_grenades {
            info!("team grenades do not boost");
        }
    }

    /// Routes one host event to its handler.
    ///
    /// Errors and panics are contained here: they are logged and the host
    /// always gets `Continue`, so a fault never aborts the host tick.
    pub fn dispatch<H: GameHost + ?Sized>(&mut self, host: &mut H, event: HostEvent) -> HookResult {
        if self.unloaded {
            return HookResult::Continue;
        }

        let name = event.name();
        contain(name, || match event {
            HostEvent::GrenadeDetonated(blast) => self.on_grenade_detonated(host, &blast),
            HostEvent::RoundStart => Ok(self.on_round_start(host)),
            HostEvent::PlayerHurt(hurt) => self.on_player_hurt(host, &hurt),
        })
    }

    /// Pre-commit damage hook. May rewrite `info.damage`.
    pub fn on_take_damage(&mut self, info: &mut DamageInfo) -> HookResult {
        if self.unloaded
            || !self
                .config
                .blocks_grenade_damage_with(DamageBlockMode::TakeDamageHook)
        {
            return HookResult::Continue;
        }
        contain("take_damage", || Ok(intercept_damage(info)))
    }

    /// Runs work deferred by earlier events.
    ///
    /// The host calls this at the start of every tick, before dispatching that
    /// tick's events, so anything queued during tick N runs at tick N+1.
    pub fn on_tick<H: GameHost + ?Sized>(&mut self, host: &mut H) {
        if self.deferred.is_empty() || self.unloaded {
            return;
        }

        for task in std::mem::take(&mut self.deferred) {
            let _ = contain("next_tick", || {
                match task {
                    DeferredTask::Resupply => {
                        if self.config.auto_give_he_grenade {
                            let granted = resupply_players(host, self.config.max_he_grenades);
                            debug!(granted, "round resupply finished");
                        }
                    }
                }
                Ok(HookResult::Continue)
            });
        }
    }

    /// Restores every overridden rule. Later events are ignored.
    pub fn unload<S: ConVarStore + ?Sized>(&mut self, host: &mut S) -> usize {
        if self.unloaded {
            return 0;
        }
        self.unloaded = true;
        self.deferred.clear();

        let restored = self.rules.restore_all(host);
        info!(restored, "plugin unloaded");
        restored
    }

    fn on_round_start<H: GameHost + ?Sized>(&mut self, host: &mut H) -> HookResult {
        self.handled_blasts.clear();

        let applied = self.rules.apply_all(host);
        debug!(applied, "round overrides applied");

        if self.config.auto_give_he_grenade && !self.deferred.contains(&DeferredTask::Resupply) {
            self.deferred.push(DeferredTask::Resupply);
        }
        HookResult::Continue
    }

    fn on_grenade_detonated<H: GameHost + ?Sized>(
        &mut self,
        host: &mut H,
        blast: &BlastEvent,
    ) -> Result<HookResult, PluginError> {
        if !self.config.enabled {
            return Ok(HookResult::Continue);
        }
        if self.handled_blasts.contains(&blast.id) {
            warn!(blast_id = blast.id, "detonation already handled");
            return Ok(HookResult::Continue);
        }

        // Marked before any write so a blast interrupted midway is not replayed.
        self.handled_blasts.insert(blast.id);
        let report = match apply_blast(host, blast, &self.params) {
            Ok(report) => report,
            Err(e) => {
                self.handled_blasts.remove(&blast.id);
                return Err(e);
            }
        };
        debug!(
            blast_id = blast.id,
            boosted = report.boosted.len(),
            skipped = report.skipped,
            "detonation resolved"
        );
        Ok(HookResult::Continue)
    }

    fn on_player_hurt<H: GameHost + ?Sized>(
        &mut self,
        host: &mut H,
        hurt: &PlayerHurt,
    ) -> Result<HookResult, PluginError> {
        if self.config.damage_block_mode != DamageBlockMode::HealthRestore {
            return Ok(HookResult::Continue);
        }
        let policy = RefundPolicy {
            grenade: self.config.disable_he_grenade_damage,
            fall: self.config.disable_fall_damage,
        };
        refund_damage(host, hurt, policy)
    }
}

/// Rules the config asks the rule manager to own.
pub fn enabled_rules(config: &PluginConfig) -> Vec<RuleKind> {
    let mut rules = Vec::new();
    if config.enable_air_accuracy {
        rules.push(RuleKind::AirAccuracy);
    }
    // HealthRestore refunds fall damage itself instead of scaling it away.
    if config.disable_fall_damage && config.damage_block_mode != DamageBlockMode::HealthRestore {
        rules.push(RuleKind::FallDamage);
    }
    if config.blocks_grenade_damage_with(DamageBlockMode::ConVar) {
        rules.push(RuleKind::GrenadeDamage);
    }
    rules
}

fn contain<F>(handler: &'static str, f: F) -> HookResult
where
    F: FnOnce() -> Result<HookResult, PluginError>,
{
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(result)) => result,
        Ok(Err(PluginError::MalformedEvent(reason))) => {
            debug!(handler, reason, "ignored malformed event");
            HookResult::Continue
        }
        Ok(Err(e)) => {
            warn!(handler, error = %e, "handler failed");
            HookResult::Continue
        }
        Err(_) => {
            error!(handler, "handler panicked");
            HookResult::Continue
        }
    }
}
