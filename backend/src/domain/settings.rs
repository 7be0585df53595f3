//! Per-user notification and language settings.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::UserId;

/// Error raised for malformed language tags.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("language must be a language tag such as en or hi-IN")]
pub struct InvalidLanguage;

static LANGUAGE_RE: OnceLock<Regex> = OnceLock::new();

fn language_regex() -> &'static Regex {
    LANGUAGE_RE.get_or_init(|| {
        Regex::new(r"^[a-z]{2,3}(-[A-Za-z0-9]{2,8})*$")
            .unwrap_or_else(|error| panic!("language regex failed to compile: {error}"))
    })
}

/// BCP 47 style language tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Language(String);

impl Language {
    /// Validate a language tag.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, InvalidLanguage> {
        let tag = raw.as_ref().trim();
        if tag.len() <= 35 && language_regex().is_match(tag) {
            Ok(Self(tag.to_owned()))
        } else {
            Err(InvalidLanguage)
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Self("en".to_owned())
    }
}

impl AsRef<str> for Language {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Stored settings for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSettings {
    /// Owner.
    pub user_id: UserId,
    /// Email notifications enabled.
    pub email_notifications: bool,
    /// SMS notifications enabled.
    pub sms_notifications: bool,
    /// Booking reminders enabled.
    pub booking_reminders: bool,
    /// Marketing emails opted in.
    pub marketing_emails: bool,
    /// Interface language.
    pub language: Language,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl UserSettings {
    /// Defaults applied the first time a user's settings are read.
    #[must_use]
    pub fn defaults(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            email_notifications: true,
            sms_notifications: true,
            booking_reminders: true,
            marketing_emails: false,
            language: Language::default(),
            updated_at: now,
        }
    }
}

/// Partial settings update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSettingsChanges {
    /// Email notifications toggle.
    pub email_notifications: Option<bool>,
    /// SMS notifications toggle.
    pub sms_notifications: Option<bool>,
    /// Booking reminders toggle.
    pub booking_reminders: Option<bool>,
    /// Marketing emails toggle.
    pub marketing_emails: Option<bool>,
    /// Interface language.
    pub language: Option<Language>,
}

impl UserSettingsChanges {
    /// Apply the changes in place.
    pub fn apply_to(&self, settings: &mut UserSettings, now: DateTime<Utc>) {
        let toggles = [
            (self.email_notifications, &mut settings.email_notifications),
            (self.sms_notifications, &mut settings.sms_notifications),
            (self.booking_reminders, &mut settings.booking_reminders),
            (self.marketing_emails, &mut settings.marketing_emails),
        ];
        for (change, target) in toggles {
            if let Some(value) = change {
                *target = value;
            }
        }
        if let Some(language) = &self.language {
            settings.language = language.clone();
        }
        settings.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("en", true)]
    #[case("hi-IN", true)]
    #[case("EN", false)]
    #[case("english language", false)]
    fn language_tags(#[case] raw: &str, #[case] ok: bool) {
        assert_eq!(Language::new(raw).is_ok(), ok);
    }

    #[rstest]
    fn partial_update_only_touches_supplied_fields() {
        let now = Utc::now();
        let mut settings = UserSettings::defaults(UserId::random(), now);
        let changes = UserSettingsChanges {
            marketing_emails: Some(true),
            sms_notifications: Some(false),
            ..UserSettingsChanges::default()
        };
        changes.apply_to(&mut settings, now);
        assert!(settings.marketing_emails);
        assert!(!settings.sms_notifications);
        assert!(settings.email_notifications);
        assert_eq!(settings.language.as_ref(), "en");
    }
}
