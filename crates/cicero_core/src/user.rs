//! User identity and profile types.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::Map;

/// Verified user identity, as returned by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct UserIdentity {
    /// Stable user id
    uid: String,
    /// Verified email address
    #[builder(default)]
    email: Option<String>,
    /// Display name from the identity provider
    #[builder(default)]
    name: Option<String>,
}

impl UserIdentity {
    /// Identity with only a uid, used in tests.
    pub fn bare(uid: impl Into<String>) -> Self {
        UserIdentityBuilder::default()
            .uid(uid)
            .build()
            .expect("Valid UserIdentity")
    }
}

/// Stored user profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Stable user id
    uid: String,
    /// Email address
    #[builder(default)]
    email: Option<String>,
    /// Chosen display name
    #[builder(default)]
    display_name: Option<String>,
    /// Free-form preference map
    #[builder(default)]
    preferences: Map<String, serde_json::Value>,
    /// Profile creation time
    created_at: DateTime<Utc>,
    /// Last request time
    last_active: DateTime<Utc>,
}

impl UserProfile {
    /// Fresh profile seeded from a verified identity.
    pub fn from_identity(identity: &UserIdentity) -> Self {
        let now = Utc::now();
        UserProfileBuilder::default()
            .uid(identity.uid().clone())
            .email(identity.email().clone())
            .display_name(identity.name().clone())
            .created_at(now)
            .last_active(now)
            .build()
            .expect("Valid UserProfile")
    }

    /// Apply a partial update and bump the activity timestamp.
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(display_name) = update.display_name {
            self.display_name = Some(display_name);
        }
        if let Some(preferences) = update.preferences {
            self.preferences = preferences;
        }
        self.last_active = Utc::now();
    }
}

/// Partial profile update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// New display name, if changing
    pub display_name: Option<String>,
    /// Replacement preference map, if changing
    pub preferences: Option<Map<String, serde_json::Value>>,
}
