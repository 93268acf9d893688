//! Food Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;

/// Food entity, priced to 2 decimal places
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    pub price: Decimal,
    pub food_image: String,
    /// Menu reference as a `"menu:key"` id string
    pub menu_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create food payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FoodCreate {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    pub price: Decimal,
    #[validate(length(min = 1, max = 2048))]
    pub food_image: String,
    #[validate(length(min = 1))]
    pub menu_id: String,
}

/// Update food payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FoodUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 2048))]
    pub food_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_id: Option<String>,
}

/// Paginated food listing
#[derive(Debug, Serialize)]
pub struct FoodListResponse {
    pub total_count: u64,
    pub food_items: Vec<Food>,
}
