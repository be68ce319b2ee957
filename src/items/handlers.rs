use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::auth::extractors::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::items::dto::{CreateItemRequest, MessageResponse};
use crate::items::repo_types::ClothingItem;
use crate::state::AppState;

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/items", get(get_items))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/items", post(create_item))
        .route("/items/:item_id", delete(delete_item))
        .route("/items/:item_id/likes", put(like_item).delete(dislike_item))
}

/// Ids arrive as raw strings so a malformed one maps to our 400 body
/// rather than the framework's path rejection.
fn parse_item_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest("Invalid item ID format."))
}

#[instrument(skip(state))]
pub async fn get_items(State(state): State<AppState>) -> ApiResult<Json<Vec<ClothingItem>>> {
    let items = ClothingItem::list_all(&state.db).await?;
    Ok(Json(items))
}

#[instrument(skip(state, payload))]
pub async fn create_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateItemRequest>,
) -> ApiResult<(StatusCode, Json<ClothingItem>)> {
    let new_item = payload.validate()?;

    let item = ClothingItem::create(
        &state.db,
        &new_item.name,
        new_item.weather,
        &new_item.image_url,
        user_id,
    )
    .await?;

    info!(item_id = %item.id, owner = %user_id, "item created");
    Ok((StatusCode::CREATED, Json(item)))
}

#[instrument(skip(state))]
pub async fn delete_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(item_id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let item_id = parse_item_id(&item_id)?;

    let item = ClothingItem::find_by_id(&state.db, item_id)
        .await?
        .ok_or(ApiError::NotFound("Clothing item not found."))?;

    // Ownership check: after the existence check, before the deletion.
    if item.owner != user_id {
        warn!(item_id = %item_id, owner = %item.owner, caller = %user_id, "delete denied");
        return Err(ApiError::Forbidden(
            "You do not have permission to delete this item.",
        ));
    }

    ClothingItem::delete(&state.db, item_id).await?;

    info!(item_id = %item_id, user_id = %user_id, "item deleted");
    Ok(Json(MessageResponse {
        message: "Clothing item deleted successfully.",
    }))
}

#[instrument(skip(state))]
pub async fn like_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(item_id): Path<String>,
) -> ApiResult<Json<ClothingItem>> {
    let item_id = parse_item_id(&item_id)?;

    ClothingItem::add_like(&state.db, item_id, user_id).await?;
    let item = ClothingItem::find_by_id(&state.db, item_id)
        .await?
        .ok_or(ApiError::NotFound("Clothing item not found."))?;

    info!(item_id = %item_id, user_id = %user_id, "item liked");
    Ok(Json(item))
}

#[instrument(skip(state))]
pub async fn dislike_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(item_id): Path<String>,
) -> ApiResult<Json<ClothingItem>> {
    let item_id = parse_item_id(&item_id)?;

    ClothingItem::remove_like(&state.db, item_id, user_id).await?;
    let item = ClothingItem::find_by_id(&state.db, item_id)
        .await?
        .ok_or(ApiError::NotFound("Clothing item not found."))?;

    info!(item_id = %item_id, user_id = %user_id, "item unliked");
    Ok(Json(item))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_ids_parse() {
        let id = Uuid::new_v4();
        assert_eq!(parse_item_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn malformed_ids_are_bad_requests() {
        for raw in ["", "123", "not-a-uuid", "66f15f8b0cd9ca6ecdd82474"] {
            match parse_item_id(raw) {
                Err(ApiError::BadRequest(msg)) => assert_eq!(msg, "Invalid item ID format."),
                other => panic!("expected BadRequest, got {other:?}"),
            }
        }
    }
}
