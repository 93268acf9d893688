//! Order Item Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;

/// One food line inside an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub quantity: i32,
    /// Unit price captured from the food record at ordering time
    pub unit_price: Decimal,
    /// Food reference as a `"food:key"` id string
    pub food_id: String,
    /// Order reference as an `"order:key"` id string
    pub order_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One line of an order-item pack
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OrderItemCreate {
    #[validate(length(min = 1))]
    pub food_id: String,
    #[validate(range(min = 1, max = 100))]
    pub quantity: i32,
}

/// `POST /order-items` payload: opens an order for the table and inserts
/// every line against it
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OrderItemPack {
    #[validate(length(min = 1))]
    pub table_id: String,
    pub order_items: Vec<OrderItemCreate>,
}

/// Update order item payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 100))]
    pub quantity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_id: Option<String>,
}
