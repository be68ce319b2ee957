use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;
use uuid::Uuid;

use crate::auth::jwt::JwtKeys;
use crate::error::ApiError;

/// Extracts and verifies the bearer token, yielding the caller's user ID.
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthorized("Authorization required"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Unauthorized("Authorization required"))?;

        let claims = keys.verify(token).map_err(|_| {
            warn!("invalid or expired token");
            ApiError::Unauthorized("Invalid token")
        })?;

        Ok(AuthUser(claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, extract::FromRef, http::Request, routing::get, Router};
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::AuthUser;
    use crate::auth::jwt::JwtKeys;
    use crate::state::AppState;

    fn test_app() -> (Router, AppState) {
        let state = AppState::fake();
        let app = Router::new()
            .route(
                "/whoami",
                get(|AuthUser(user_id): AuthUser| async move { user_id.to_string() }),
            )
            .with_state(state.clone());
        (app, state)
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        String::from_utf8(bytes.to_vec()).expect("utf8 body")
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let (app, _) = test_app();
        let response = app
            .oneshot(Request::get("/whoami").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), 401);
        assert!(body_string(response).await.contains("Authorization required"));
    }

    #[tokio::test]
    async fn wrong_scheme_is_unauthorized() {
        let (app, _) = test_app();
        let response = app
            .oneshot(
                Request::get("/whoami")
                    .header("Authorization", "Basic dXNlcjpwYXNz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), 401);
        assert!(body_string(response).await.contains("Authorization required"));
    }

    #[tokio::test]
    async fn invalid_token_is_unauthorized() {
        let (app, _) = test_app();
        let response = app
            .oneshot(
                Request::get("/whoami")
                    .header("Authorization", "Bearer garbage")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), 401);
        assert!(body_string(response).await.contains("Invalid token"));
    }

    #[tokio::test]
    async fn valid_token_reaches_the_handler() {
        let (app, state) = test_app();
        let user_id = Uuid::new_v4();
        let token = JwtKeys::from_ref(&state).sign(user_id).expect("sign");
        let response = app
            .oneshot(
                Request::get("/whoami")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(body_string(response).await, user_id.to_string());
    }
}
