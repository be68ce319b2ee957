use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Weather suitability tag for a clothing item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "weather", rename_all = "lowercase")]
pub enum Weather {
    Hot,
    Warm,
    Cold,
}

impl Weather {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "hot" => Some(Self::Hot),
            "warm" => Some(Self::Warm),
            "cold" => Some(Self::Cold),
            _ => None,
        }
    }
}

/// Clothing item record with its likes aggregated from the join table.
/// Serialized directly as the item response body.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ClothingItem {
    pub id: Uuid,
    pub name: String,
    pub weather: Weather,
    pub image_url: String,
    pub owner: Uuid,
    pub likes: Vec<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
