use std::collections::HashMap;

use strfmt::strfmt;
use tracing::warn;

use crate::kit::dispatcher::KitOutcome;

pub const DEFAULT_LOCALE: &str = "en";

mod keys {
    pub const NO_PERMISSION: &str = "NoPermission";
    pub const KIT_GIVEN: &str = "KitGiven";
    pub const KIT_COOLDOWN: &str = "KitCooldown";
    pub const NO_KITS_AVAILABLE: &str = "NoKitsAvailable";
    pub const KIT_GIVE_ERROR: &str = "KitGiveError";
}

/// Locale-keyed message templates for kit outcomes. Templates use named
/// placeholders (`{kit}`, `{seconds}`) substituted with `strfmt`.
pub struct MessageCatalog {
    locales: HashMap<String, HashMap<&'static str, String>>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        let mut locales = HashMap::new();
        locales.insert(DEFAULT_LOCALE.to_string(), default_en());
        Self { locales }
    }

    /// Registers (or replaces) the template set for a locale.
    pub fn register_locale(
        &mut self,
        locale: impl Into<String>,
        templates: HashMap<&'static str, String>,
    ) {
        self.locales.insert(locale.into(), templates);
    }

    pub fn render(&self, locale: &str, outcome: &KitOutcome) -> String {
        let (key, vars) = template_args(outcome);
        let template = self.template(locale, key);
        match strfmt(template, &vars) {
            Ok(message) => message,
            Err(e) => {
                warn!("Failed to format template {:?}: {}", key, e);
                template.to_string()
            }
        }
    }

    fn template<'a>(&'a self, locale: &str, key: &'a str) -> &'a str {
        self.locales
            .get(locale)
            .and_then(|templates| templates.get(key))
            .or_else(|| {
                self.locales
                    .get(DEFAULT_LOCALE)
                    .and_then(|templates| templates.get(key))
            })
            .map(String::as_str)
            .unwrap_or(key)
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn template_args(outcome: &KitOutcome) -> (&'static str, HashMap<String, String>) {
    let mut vars = HashMap::new();
    let key = match outcome {
        KitOutcome::Denied => keys::NO_PERMISSION,
        KitOutcome::NoKitsAvailable => keys::NO_KITS_AVAILABLE,
        KitOutcome::OnCooldown { remaining_seconds } => {
            vars.insert("seconds".to_string(), remaining_seconds.to_string());
            keys::KIT_COOLDOWN
        }
        KitOutcome::GrantFailed => keys::KIT_GIVE_ERROR,
        KitOutcome::Granted { kit } => {
            vars.insert("kit".to_string(), kit.clone());
            keys::KIT_GIVEN
        }
    };
    (key, vars)
}

fn default_en() -> HashMap<&'static str, String> {
    HashMap::from([
        (
            keys::NO_PERMISSION,
            "You do not have permission to use this command.".to_string(),
        ),
        (
            keys::KIT_GIVEN,
            "You have been given a random kit: **{kit}**.".to_string(),
        ),
        (
            keys::KIT_COOLDOWN,
            "You must wait **{seconds}** more seconds before requesting another kit.".to_string(),
        ),
        (
            keys::NO_KITS_AVAILABLE,
            "There are no available kits.".to_string(),
        ),
        (
            keys::KIT_GIVE_ERROR,
            "There was an issue giving you the kit. Please try again later or contact an admin."
                .to_string(),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn granted_message_contains_the_kit_name() {
        let catalog = MessageCatalog::new();
        let message = catalog.render("en", &KitOutcome::Granted { kit: "Ammo".to_string() });
        assert_eq!(message, "You have been given a random kit: **Ammo**.");
    }

    #[test]
    fn cooldown_message_contains_the_remaining_seconds() {
        let catalog = MessageCatalog::new();
        let message = catalog.render("en", &KitOutcome::OnCooldown { remaining_seconds: 12 });
        assert!(message.contains("12"), "got {:?}", message);
    }

    #[test]
    fn unknown_locale_falls_back_to_english() {
        let catalog = MessageCatalog::new();
        let message = catalog.render("de", &KitOutcome::Denied);
        assert_eq!(message, "You do not have permission to use this command.");
    }

    #[test]
    fn registered_locale_overrides_the_default() {
        let mut catalog = MessageCatalog::new();
        catalog.register_locale(
            "de",
            HashMap::from([("KitGiven", "Zufälliges Kit erhalten: {kit}.".to_string())]),
        );
        let message = catalog.render("de", &KitOutcome::Granted { kit: "Food".to_string() });
        assert_eq!(message, "Zufälliges Kit erhalten: Food.");
    }

    #[test]
    fn every_outcome_has_a_template() {
        let catalog = MessageCatalog::new();
        let outcomes = [
            KitOutcome::Denied,
            KitOutcome::NoKitsAvailable,
            KitOutcome::OnCooldown { remaining_seconds: 1 },
            KitOutcome::GrantFailed,
            KitOutcome::Granted { kit: "Resources".to_string() },
        ];
        for outcome in outcomes {
            let message = catalog.render("en", &outcome);
            assert!(!message.is_empty());
            assert!(!message.contains('{'), "unrendered template: {:?}", message);
        }
    }
}
