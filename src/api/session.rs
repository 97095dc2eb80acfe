//! Admin login, logout, profile and account management.

use crate::api::extract::{parse_id, JsonBody, ListParams, QueryParams};
use crate::api::response::ApiResponse;
use crate::auth::{AdminSession, Permission, AUTH_COOKIE};
use crate::database::DocumentQuery;
use crate::error::AppResult;
use crate::models::AdminUserView;
use crate::services::{AdminUserUpdate, LoginResponse, NewAdminUser};
use crate::SharedState;
use axum::extract::{Path, State};
use axum::http::header::SET_COOKIE;
use axum::response::IntoResponse;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

fn session_cookie(value: &str, max_age_secs: i64, secure: bool) -> String {
    format!(
        "{}={}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}{}",
        AUTH_COOKIE,
        value,
        max_age_secs,
        if secure { "; Secure" } else { "" }
    )
}

/// Issue a token and mirror it into the `admin_token` cookie
pub async fn login(
    State(state): State<SharedState>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let login: LoginResponse = state.users.login(&body.email, &body.password).await?;

    let cookie = session_cookie(
        &login.token,
        state.tokens.ttl().num_seconds(),
        state.config.auth.secure_cookie,
    );

    Ok(([(SET_COOKIE, cookie)], ApiResponse::ok(login)))
}

/// Tokens are stateless; logging out only clears the cookie
pub async fn logout(State(state): State<SharedState>) -> impl IntoResponse {
    let cookie = session_cookie("", 0, state.config.auth.secure_cookie);
    ([(SET_COOKIE, cookie)], ApiResponse::ok(json!({ "logged_out": true })))
}

pub async fn me(
    session: AdminSession,
    State(state): State<SharedState>,
) -> AppResult<ApiResponse<AdminUserView>> {
    Ok(ApiResponse::ok(state.users.me(&session).await?))
}

pub async fn list_users(
    session: AdminSession,
    State(state): State<SharedState>,
    QueryParams(params): QueryParams<ListParams>,
) -> AppResult<ApiResponse<Vec<AdminUserView>>> {
    session.require(Permission::ManageUsers)?;

    let (users, total) = state
        .users
        .list(&params.paginate(DocumentQuery::new()))
        .await?;
    Ok(ApiResponse::page(users, params.meta(total)))
}

pub async fn get_user(
    session: AdminSession,
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<AdminUserView>> {
    session.require(Permission::ManageUsers)?;

    Ok(ApiResponse::ok(state.users.get(parse_id(&id)?).await?))
}

pub async fn create_user(
    session: AdminSession,
    State(state): State<SharedState>,
    JsonBody(body): JsonBody<NewAdminUser>,
) -> AppResult<ApiResponse<AdminUserView>> {
    session.require(Permission::ManageUsers)?;

    Ok(ApiResponse::created(state.users.create_user(body, &session).await?))
}

pub async fn update_user(
    session: AdminSession,
    State(state): State<SharedState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<AdminUserUpdate>,
) -> AppResult<ApiResponse<AdminUserView>> {
    session.require(Permission::ManageUsers)?;

    let user = state
        .users
        .update_user(parse_id(&id)?, body, &session)
        .await?;
    Ok(ApiResponse::ok(user))
}

pub async fn delete_user(
    session: AdminSession,
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Value>> {
    session.require(Permission::ManageUsers)?;

    let id = parse_id(&id)?;
    state.users.delete_user(id, &session).await?;
    Ok(ApiResponse::ok(json!({ "id": id, "deleted": true })))
}
