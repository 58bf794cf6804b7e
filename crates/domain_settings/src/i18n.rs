//! Localized default texts
//!
//! The default opt-in label and the settings page notice are rendered from
//! Fluent catalogs. The catalog is picked by the language part of the site
//! locale; unknown languages fall back to English.

use fluent::{FluentArgs, FluentBundle, FluentResource};
use tracing::warn;
use unic_langid::LanguageIdentifier;

use crate::error::SettingsError;

const FALLBACK_LANGUAGE: &str = "en";

const CATALOGS: &[(&str, &str)] = &[
    (
        "en",
        r#"opt-in-label = Yes, I’d like to sign up for the { $site } newsletter.
credentials-notice = Fill out and save the API settings first! Only then will you be able to select your contacts list.
"#,
    ),
    (
        "nl",
        r#"opt-in-label = Ja, ik wil me graag inschrijven voor de nieuwsbrief van { $site }.
credentials-notice = Vul eerst de API-instellingen in en sla ze op! Pas daarna kan je je contactenlijst kiezen.
"#,
    ),
];

/// Message ids used by the integration
pub mod messages {
    pub const OPT_IN_LABEL: &str = "opt-in-label";
    pub const CREDENTIALS_NOTICE: &str = "credentials-notice";
}

/// A message catalog for one language
pub struct Catalog {
    bundle: FluentBundle<FluentResource>,
}

impl Catalog {
    /// Loads the catalog matching the language of `locale`
    ///
    /// Accepts both `nl_BE` and `nl-BE` spellings.
    pub fn for_locale(locale: &str) -> Result<Self, SettingsError> {
        let requested: LanguageIdentifier = locale
            .replace('_', "-")
            .parse()
            .unwrap_or_default();

        let (language, source) = CATALOGS
            .iter()
            .find(|(language, _)| *language == requested.language.as_str())
            .or_else(|| CATALOGS.iter().find(|(language, _)| *language == FALLBACK_LANGUAGE))
            .copied()
            .ok_or_else(|| SettingsError::localization("no fallback catalog"))?;

        let langid: LanguageIdentifier = language.parse().map_err(SettingsError::localization)?;
        let resource = FluentResource::try_new(source.to_string())
            .map_err(|(_, errors)| SettingsError::localization(errors))?;

        let mut bundle = FluentBundle::new(vec![langid]);
        bundle.set_use_isolating(false);
        bundle
            .add_resource(resource)
            .map_err(SettingsError::localization)?;

        Ok(Self { bundle })
    }

    /// Formats a message, optionally with arguments
    pub fn format(&self, id: &str, args: Option<&FluentArgs>) -> Result<String, SettingsError> {
        let pattern = self
            .bundle
            .get_message(id)
            .and_then(|message| message.value())
            .ok_or_else(|| SettingsError::missing_message(id))?;

        let mut errors = Vec::new();
        let value = self.bundle.format_pattern(pattern, args, &mut errors);
        if !errors.is_empty() {
            return Err(SettingsError::localization(errors));
        }
        Ok(value.into_owned())
    }
}

/// Default opt-in label for a site, e.g. "Yes, I’d like to sign up for the Acme newsletter."
pub fn default_checkbox_label(site_name: &str, locale: &str) -> String {
    let mut args = FluentArgs::new();
    args.set("site", site_name.to_string());

    Catalog::for_locale(locale)
        .and_then(|catalog| catalog.format(messages::OPT_IN_LABEL, Some(&args)))
        .unwrap_or_else(|e| {
            warn!(error = %e, locale, "Falling back to built-in opt-in label");
            format!("Yes, I’d like to sign up for the {} newsletter.", site_name)
        })
}

/// Advisory shown on the settings page while no lists can be fetched
pub fn credentials_notice(locale: &str) -> String {
    Catalog::for_locale(locale)
        .and_then(|catalog| catalog.format(messages::CREDENTIALS_NOTICE, None))
        .unwrap_or_else(|e| {
            warn!(error = %e, locale, "Falling back to built-in settings notice");
            "Fill out and save the API settings first! Only then will you be able to select your contacts list.".to_string()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_label_english() {
        assert_eq!(
            default_checkbox_label("Acme", "en_US"),
            "Yes, I’d like to sign up for the Acme newsletter."
        );
    }

    #[test]
    fn test_default_label_dutch() {
        assert_eq!(
            default_checkbox_label("Acme", "nl_BE"),
            "Ja, ik wil me graag inschrijven voor de nieuwsbrief van Acme."
        );
    }

    #[test]
    fn test_unknown_language_falls_back_to_english() {
        assert!(default_checkbox_label("Acme", "de_DE").starts_with("Yes"));
        assert!(default_checkbox_label("Acme", "").starts_with("Yes"));
    }

    #[test]
    fn test_missing_message() {
        let catalog = Catalog::for_locale("en").unwrap();
        assert!(matches!(
            catalog.format("no-such-message", None),
            Err(SettingsError::MissingMessage(_))
        ));
    }

    #[test]
    fn test_credentials_notice() {
        assert!(credentials_notice("en_GB").contains("save the API settings first"));
    }
}
