//! Profile endpoints.

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use api_types::profile::UserProfile;

use crate::{
    ServerError,
    server::{Caller, ServerState},
};

fn profile_view(profile: engine::UserProfile) -> UserProfile {
    UserProfile { name: profile.name }
}

/// The caller's own profile, `null` when none was saved.
pub async fn get(
    Extension(Caller(user_id)): Extension<Caller>,
    State(state): State<ServerState>,
) -> Result<Json<Option<UserProfile>>, ServerError> {
    let profile = state.engine.caller_profile(&user_id).await?;
    Ok(Json(profile.map(profile_view)))
}

pub async fn save(
    Extension(Caller(user_id)): Extension<Caller>,
    State(state): State<ServerState>,
    Json(payload): Json<UserProfile>,
) -> Result<Json<UserProfile>, ServerError> {
    let profile = state.engine.save_profile(&payload.name, &user_id).await?;
    Ok(Json(profile_view(profile)))
}

pub async fn get_by_identity(
    Extension(Caller(user_id)): Extension<Caller>,
    State(state): State<ServerState>,
    Path(identity): Path<String>,
) -> Result<Json<Option<UserProfile>>, ServerError> {
    let profile = state.engine.user_profile(&identity, &user_id).await?;
    Ok(Json(profile.map(profile_view)))
}
