//! Role endpoints. Assignment is admin-only.

use axum::{Extension, Json, extract::State, http::StatusCode};

use api_types::role::{IsAdminView, RoleAssign, RoleView, UserRole};

use crate::{
    ServerError,
    server::{Caller, ServerState},
};

fn to_api(role: engine::UserRole) -> UserRole {
    match role {
        engine::UserRole::Admin => UserRole::Admin,
        engine::UserRole::User => UserRole::User,
        engine::UserRole::Guest => UserRole::Guest,
    }
}

fn to_engine(role: UserRole) -> engine::UserRole {
    match role {
        UserRole::Admin => engine::UserRole::Admin,
        UserRole::User => engine::UserRole::User,
        UserRole::Guest => engine::UserRole::Guest,
    }
}

pub async fn get(
    Extension(Caller(user_id)): Extension<Caller>,
    State(state): State<ServerState>,
) -> Result<Json<RoleView>, ServerError> {
    let role = state.engine.caller_role(&user_id).await?;
    Ok(Json(RoleView {
        role: to_api(role),
    }))
}

pub async fn is_admin(
    Extension(Caller(user_id)): Extension<Caller>,
    State(state): State<ServerState>,
) -> Result<Json<IsAdminView>, ServerError> {
    let is_admin = state.engine.is_admin(&user_id).await?;
    Ok(Json(IsAdminView { is_admin }))
}

pub async fn assign(
    Extension(Caller(user_id)): Extension<Caller>,
    State(state): State<ServerState>,
    Json(payload): Json<RoleAssign>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .assign_role(&payload.identity, to_engine(payload.role), &user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
