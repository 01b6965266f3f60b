//! Account profile
//!
//! Identifies whose data an export describes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The subject of an export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    #[serde(default = "default_display_name")]
    pub display_name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub uid: String,

    /// When the export was generated
    #[serde(default = "Utc::now")]
    pub generated_at: DateTime<Utc>,
}

fn default_display_name() -> String {
    "Anonymous".to_string()
}

impl AccountProfile {
    /// Create a profile stamped with the current time
    pub fn new(
        display_name: impl Into<String>,
        email: impl Into<String>,
        uid: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            email: email.into(),
            uid: uid.into(),
            generated_at: Utc::now(),
        }
    }

    /// Profile used when none is configured
    pub fn anonymous() -> Self {
        Self::new(default_display_name(), "", "")
    }

    /// Copy of this profile restamped at `at`
    pub fn stamped(&self, at: DateTime<Utc>) -> Self {
        Self {
            generated_at: at,
            ..self.clone()
        }
    }
}

impl Default for AccountProfile {
    fn default() -> Self {
        Self::anonymous()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_fields_missing() {
        let profile: AccountProfile = serde_json::from_str(r#"{"email": "a@b.c"}"#).unwrap();
        assert_eq!(profile.display_name, "Anonymous");
        assert_eq!(profile.email, "a@b.c");
        assert!(profile.uid.is_empty());
    }

    #[test]
    fn test_camel_case_serialization() {
        let profile = AccountProfile::new("Sam", "sam@example.com", "u-1");
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["displayName"], "Sam");
        assert!(json.get("generatedAt").is_some());
    }
}
