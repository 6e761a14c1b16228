// Rule override manager: owns every managed console variable override.

use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::domain::ports::{ConVarStore, ConVarValue};
use crate::domain::rules::{RuleKind, RuleOverride, RuleState};

/// Table of managed rules keyed by console variable name.
///
/// Every operation walks all rules and contains failures per rule, so one
/// missing or read-only variable never blocks the others.
#[derive(Debug, Default)]
pub struct RuleOverrideManager {
    rules: BTreeMap<&'static str, RuleOverride>,
}

impl RuleOverrideManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconciles the table with the rules enabled by the freshly parsed config.
    ///
    /// Newly enabled rules capture their original value now, not at round start.
    /// Rules switched off by a reload are restored immediately and dropped.
    pub fn sync<S: ConVarStore + ?Sized>(&mut self, enabled: &[RuleKind], store: &mut S) {
        let disabled: Vec<&'static str> = self
            .rules
            .values()
            .filter(|rule| !enabled.contains(&rule.kind))
            .map(|rule| rule.name())
            .collect();
        for name in disabled {
            if let Some(mut rule) = self.rules.remove(name) {
                restore_rule(&mut rule, store);
            }
        }

        for &kind in enabled {
            let rule = self
                .rules
                .entry(kind.convar_name())
                .or_insert_with(|| RuleOverride::new(kind));
            match rule.capture(&*store) {
                Ok(()) => {
                    if let Some(original) = rule.original() {
                        info!(convar = rule.name(), %original, "captured original value");
                    }
                }
                Err(e) => {
                    warn!(convar = rule.name(), error = %e, "rule unavailable, feature disabled");
                }
            }
        }
    }

    /// Writes every captured override. Idempotent; called on each round start.
    pub fn apply_all<S: ConVarStore + ?Sized>(&mut self, store: &mut S) -> usize {
        let mut applied = 0;
        for rule in self.rules.values_mut() {
            match rule.apply(store) {
                Ok(true) => applied += 1,
                Ok(false) => {}
                Err(e) => warn!(convar = rule.name(), error = %e, "failed to apply override"),
            }
        }
        applied
    }

    /// Puts every captured original back. Called once on unload.
    pub fn restore_all<S: ConVarStore + ?Sized>(&mut self, store: &mut S) -> usize {
        let mut restored = 0;
        for rule in self.rules.values_mut() {
            if restore_rule(rule, store) {
                restored += 1;
            }
        }
        restored
    }

    pub fn state(&self, kind: RuleKind) -> Option<RuleState> {
        self.rules.get(kind.convar_name()).map(|rule| rule.state)
    }

    pub fn original(&self, kind: RuleKind) -> Option<ConVarValue> {
        self.rules
            .get(kind.convar_name())
            .and_then(RuleOverride::original)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn restore_rule<S: ConVarStore + ?Sized>(rule: &mut RuleOverride, store: &mut S) -> bool {
    match rule.restore(store) {
        Ok(Some(value)) => {
            info!(convar = rule.name(), %value, "restored original value");
            true
        }
        Ok(None) => false,
        Err(e) => {
            warn!(convar = rule.name(), error = %e, "failed to restore original value");
            false
        }
    }
}
