use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::auth::extractors::AuthUser;
use crate::auth::jwt::JwtKeys;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::users::dto::{
    SigninRequest, SignupRequest, TokenResponse, UpdateProfileRequest, UserResponse,
};
use crate::users::repo_types::User;

pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(create_user))
        .route("/signin", post(login))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/users/me", get(get_current_user).patch(update_user))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let new_user = payload.validate()?;

    let hash = hash_password(&new_user.password)?;
    let user = User::create(
        &state.db,
        &new_user.name,
        &new_user.avatar,
        &new_user.email,
        &hash,
    )
    .await
    .map_err(|e| match e.as_database_error() {
        Some(db) if db.is_unique_violation() => {
            warn!(email = %new_user.email, "signup with duplicate email");
            ApiError::Conflict("Email already exists")
        }
        _ => ApiError::from(e),
    })?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<SigninRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let creds = payload.validate()?;

    // Unknown email and wrong password are deliberately indistinguishable.
    let user = match User::find_by_email(&state.db, &creds.email).await? {
        Some(u) => u,
        None => {
            warn!(email = %creds.email, "signin with unknown email");
            return Err(ApiError::Unauthorized("Incorrect email or password"));
        }
    };

    if !verify_password(&creds.password, &user.password_hash)? {
        warn!(user_id = %user.id, "signin with wrong password");
        return Err(ApiError::Unauthorized("Incorrect email or password"));
    }

    let token = JwtKeys::from_ref(&state).sign(user.id)?;

    info!(user_id = %user.id, "user signed in");
    Ok(Json(TokenResponse { token }))
}

#[instrument(skip(state))]
pub async fn get_current_user(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(ApiError::NotFound("User not found"))?;
    Ok(Json(UserResponse::from(user)))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> ApiResult<Json<UserResponse>> {
    let update = payload.validate()?;

    let user = User::update_profile(
        &state.db,
        user_id,
        update.name.as_deref(),
        update.avatar.as_deref(),
    )
    .await?
    .ok_or(ApiError::NotFound("User not found"))?;

    info!(user_id = %user.id, "profile updated");
    Ok(Json(UserResponse::from(user)))
}
