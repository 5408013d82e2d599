//! User profile endpoints.

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use cicero_core::{ProfileUpdate, UserProfile};
use serde_json::json;
use tracing::{info, instrument};

/// Fetch the caller's profile, creating one on first sight.
#[instrument(skip(state), fields(user = %user.0.uid()))]
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<UserProfile>, ApiError> {
    let profile = match state.profiles.fetch(user.0.uid()).await? {
        Some(profile) => profile,
        None => {
            info!("Creating profile on first fetch");
            let profile = UserProfile::from_identity(&user.0);
            state.profiles.put(profile.clone()).await?;
            profile
        }
    };
    Ok(Json(profile))
}

/// Partial profile update. Creates the profile if it does not exist yet.
#[instrument(skip(state, update), fields(user = %user.0.uid()))]
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut profile = match state.profiles.fetch(user.0.uid()).await? {
        Some(profile) => profile,
        None => UserProfile::from_identity(&user.0),
    };
    profile.apply(update);
    state.profiles.put(profile).await?;

    Ok(Json(json!({ "message": "Profile updated successfully" })))
}
