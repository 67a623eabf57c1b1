use std::collections::HashMap;
use std::time::SystemTime;

use rand::Rng;
use tracing::{trace, warn};

use crate::kit::{
    config::KitConfig,
    grant::KitGrantService,
    permissions::{KitRequester, PermissionGate},
};

/// Terminal outcome of a kit request. Every variant maps to exactly one
/// user-facing message; none of them is an error worth propagating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KitOutcome {
    Denied,
    NoKitsAvailable,
    OnCooldown { remaining_seconds: u64 },
    GrantFailed,
    Granted { kit: String },
}

/// Cooldown-gated random-kit dispatcher. Holds the configured kit list and a
/// per-user table of last successful grants; permission checks and the actual
/// item grant are delegated to the injected collaborators.
pub struct KitDispatcher<P, G> {
    config: KitConfig,
    cooldowns: HashMap<u64, SystemTime>,
    permissions: P,
    grants: G,
}

impl<P, G> KitDispatcher<P, G>
where
    P: PermissionGate,
    G: KitGrantService,
{
    pub fn new(config: KitConfig, permissions: P, grants: G) -> Self {
        Self {
            config,
            cooldowns: HashMap::new(),
            permissions,
            grants,
        }
    }

    /// Swaps in a reloaded configuration. Cooldown state survives the swap.
    pub fn apply_config(&mut self, config: KitConfig) {
        self.config = config;
    }

    pub fn set_permission_gate(&mut self, permissions: P) {
        self.permissions = permissions;
    }

    pub fn set_grant_service(&mut self, grants: G) {
        self.grants = grants;
    }

    pub fn config(&self) -> &KitConfig {
        &self.config
    }

    pub async fn grant_service_available(&self) -> bool {
        self.grants.is_available().await
    }

    /// Runs the full request sequence: permission, kit availability, cooldown,
    /// uniform draw, grant. Checks short-circuit on the first failure and
    /// every failure is terminal for the call.
    pub async fn request_random_kit(
        &mut self,
        requester: &KitRequester,
        now: SystemTime,
    ) -> KitOutcome {
        if !self.permissions.has_permission(requester) {
            return KitOutcome::Denied;
        }
        if self.config.kits.is_empty() {
            return KitOutcome::NoKitsAvailable;
        }
        if let Some(remaining_seconds) = self.remaining_cooldown(requester.id, now) {
            return KitOutcome::OnCooldown { remaining_seconds };
        }

        let kit = self.draw_kit();
        if !self.grants.is_available().await {
            warn!("Kit service is unavailable, cannot grant {:?}", kit);
            return KitOutcome::GrantFailed;
        }
        match self.grants.grant(requester.id, &kit).await {
            Ok(()) => {
                // The cooldown window only starts on a successful grant; a
                // rejected grant leaves the player free to retry.
                self.cooldowns.insert(requester.id, now);
                KitOutcome::Granted { kit }
            }
            Err(e) => {
                warn!(user_id = requester.id, kit = kit.as_str(), "Kit grant failed: {:?}", e);
                KitOutcome::GrantFailed
            }
        }
    }

    fn remaining_cooldown(&self, user_id: u64, now: SystemTime) -> Option<u64> {
        let last_used = self.cooldowns.get(&user_id)?;
        // A clock that moved backwards counts as zero elapsed time.
        let elapsed = now.duration_since(*last_used).unwrap_or_default().as_secs_f64();
        if elapsed < self.config.cooldown_seconds {
            Some((self.config.cooldown_seconds - elapsed).ceil() as u64)
        } else {
            None
        }
    }

    fn draw_kit(&self) -> String {
        let mut rng = rand::rng();
        let index = rng.random_range(0..self.config.kits.len());
        trace!(index = index, "Drew kit index");
        self.config.kits[index].clone()
    }
}
