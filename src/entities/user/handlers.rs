//! User HTTP handlers: admin management, self-service profile, signup and token

use super::model::User;
use super::serializer::{
    SignupRequest, SignupResponse, TokenRequest, TokenResponse, UserCreate, UserOut, UserPatch,
};
use crate::core::auth::{AuthContext, AuthPolicy, Role};
use crate::core::error::{ApiError, ApiResult, ValidationError};
use crate::core::query::{PageParams, PaginatedResponse, SearchParams};
use crate::core::store::Store;
use crate::core::validation::ValidatedJson;
use crate::entities::{Comment, Review};
use crate::server::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::collections::{HashMap, HashSet};

/// Look a user up by username, or 404
pub async fn find_by_username(store: &Store, username: &str) -> ApiResult<User> {
    store
        .users
        .find_one(&|u: &User| u.username == username)
        .await?
        .ok_or_else(|| ApiError::not_found("user", username))
}

/// Map author ids to usernames for rendering
pub async fn usernames(store: &Store, ids: impl IntoIterator<Item = i64>) -> ApiResult<HashMap<i64, String>> {
    let ids: HashSet<i64> = ids.into_iter().collect();
    let users = store.users.find(&|u: &User| ids.contains(&u.id)).await?;
    Ok(users.into_iter().map(|u| (u.id, u.username)).collect())
}

/// Delete a user together with everything they authored
pub async fn delete_user_cascade(state: &AppState, user: &User) -> ApiResult<()> {
    let store = &state.store;
    let author_id = user.id;

    let reviews = store
        .reviews
        .find(&|r: &Review| r.author_id == author_id)
        .await?;
    let review_ids: HashSet<i64> = reviews.iter().map(|r| r.id).collect();

    let comments = store
        .comments
        .delete_where(&|c: &Comment| {
            c.author_id == author_id || review_ids.contains(&c.review_id)
        })
        .await?;
    let reviews = store
        .reviews
        .delete_where(&|r: &Review| r.author_id == author_id)
        .await?;
    store.users.delete(user.id).await?;
    state.codes.revoke(user.id);

    tracing::info!(username = %user.username, reviews, comments, "User deleted");
    Ok(())
}

// =============================================================================
// Admin endpoints
// =============================================================================

pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(page): Query<PageParams>,
    Query(search): Query<SearchParams>,
) -> ApiResult<Json<PaginatedResponse<UserOut>>> {
    AuthPolicy::AdminOnly.enforce(&auth)?;

    let users = state
        .store
        .users
        .find(&|u: &User| search.matches(&u.username))
        .await?;

    Ok(Json(
        page.paginate(users, &state.config.pagination)
            .map(|u| UserOut::from(&u)),
    ))
}

pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthContext,
    ValidatedJson(payload): ValidatedJson<UserCreate>,
) -> ApiResult<(StatusCode, Json<UserOut>)> {
    AuthPolicy::AdminOnly.enforce(&auth)?;

    let user = payload.into_user(state.config.users.reserved_name_check)?;
    let user = state.store.users.create(user).await?;

    tracing::info!(username = %user.username, role = ?user.role, "User created by admin");
    Ok((StatusCode::CREATED, Json(UserOut::from(&user))))
}

pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(username): Path<String>,
) -> ApiResult<Json<UserOut>> {
    AuthPolicy::AdminOnly.enforce(&auth)?;

    let user = find_by_username(&state.store, &username).await?;
    Ok(Json(UserOut::from(&user)))
}

pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(username): Path<String>,
    ValidatedJson(patch): ValidatedJson<UserPatch>,
) -> ApiResult<Json<UserOut>> {
    AuthPolicy::AdminOnly.enforce(&auth)?;

    let user = find_by_username(&state.store, &username).await?;
    let user = patch.apply(user, state.config.users.reserved_name_check, true)?;
    let user = state.store.users.update(user).await?;

    Ok(Json(UserOut::from(&user)))
}

pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(username): Path<String>,
) -> ApiResult<StatusCode> {
    AuthPolicy::AdminOnly.enforce(&auth)?;

    let user = find_by_username(&state.store, &username).await?;
    delete_user_cascade(&state, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Self-service
// =============================================================================

pub async fn get_me(State(state): State<AppState>, auth: AuthContext) -> ApiResult<Json<UserOut>> {
    let user_id = auth.require_user()?;
    let user = state
        .store
        .users
        .get(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("user", user_id))?;
    Ok(Json(UserOut::from(&user)))
}

pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthContext,
    ValidatedJson(patch): ValidatedJson<UserPatch>,
) -> ApiResult<Json<UserOut>> {
    let user_id = auth.require_user()?;
    let user = state
        .store
        .users
        .get(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("user", user_id))?;

    let user = patch.apply(user, state.config.users.reserved_name_check, false)?;
    let user = state.store.users.update(user).await?;
    Ok(Json(UserOut::from(&user)))
}

// =============================================================================
// Signup and token
// =============================================================================

pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignupRequest>,
) -> ApiResult<Json<SignupResponse>> {
    let users = state.store.users.as_ref();

    let data = payload.validate_against(users).await.inspect_err(|e| {
        tracing::debug!(error = %e, "Signup rejected");
    })?;
    let (user, created) = data.save(users).await?;

    let code = state.codes.generate(user.id);
    state
        .code_sender
        .send(&user.username, &user.email, &code)
        .await?;

    tracing::info!(username = %user.username, created, "Signup accepted");
    Ok(Json(SignupResponse {
        username: user.username,
        email: user.email,
    }))
}

pub async fn obtain_token(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<TokenRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let username = payload.username.unwrap_or_default();
    let code = payload.confirmation_code.unwrap_or_default();

    let user = find_by_username(&state.store, &username).await?;
    if !state.codes.verify(user.id, &code) {
        tracing::debug!(%username, "Invalid confirmation code");
        return Err(ValidationError::InvalidConfirmationCode.into());
    }

    let token = state.tokens.issue(user.id).await?;
    tracing::info!(%username, "Token issued");
    Ok(Json(TokenResponse { token }))
}

/// Create the configured admin account if it does not exist yet
pub async fn bootstrap_admin(state: &AppState) -> ApiResult<()> {
    let Some(admin) = state.config.bootstrap_admin.clone() else {
        return Ok(());
    };

    let (user, created) = state
        .store
        .users
        .get_or_create(
            &|u: &User| u.username == admin.username,
            User::new(admin.username.clone(), admin.email.clone())
                .with_role(Role::Admin),
        )
        .await?;

    if created {
        let code = state.codes.generate(user.id);
        state
            .code_sender
            .send(&user.username, &user.email, &code)
            .await?;
        tracing::info!(username = %user.username, "Bootstrap admin created");
    }
    Ok(())
}
