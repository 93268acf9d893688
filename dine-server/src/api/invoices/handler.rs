//! Invoice API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use rust_decimal::Decimal;
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{Invoice, InvoiceCreate, InvoiceUpdate, InvoiceView, OrderItemDetail};
use crate::db::repository::{
    DiningTableRepository, FoodRepository, InvoiceRepository, OrderItemRepository, OrderRepository,
};
use crate::utils::time::default_payment_due_date;
use crate::utils::{AppError, AppResult};

/// GET /invoices - 获取所有发票
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Invoice>>> {
    let repo = InvoiceRepository::new(state.get_db());
    let invoices = repo.find_all().await?;
    Ok(Json(invoices))
}

/// GET /invoices/{id} - 获取发票详情视图
///
/// 返回发票与其订单条目的联接视图：条目明细、桌号、
/// 以及按 `unit_price * quantity` 汇总的应付金额。
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<InvoiceView>> {
    let invoice = InvoiceRepository::new(state.get_db())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Invoice {id} not found")))?;

    let order = OrderRepository::new(state.get_db())
        .find_by_id(&invoice.order_id)
        .await?
        .ok_or_else(|| {
            AppError::internal(format!("Order {} missing for invoice", invoice.order_id))
        })?;

    let table_number = match &order.table_id {
        Some(table_id) => DiningTableRepository::new(state.get_db())
            .find_by_id(table_id)
            .await?
            .map(|t| t.table_number),
        None => None,
    };

    let items = OrderItemRepository::new(state.get_db())
        .find_by_order(&invoice.order_id)
        .await?;

    let food_repo = FoodRepository::new(state.get_db());
    let mut payment_due = Decimal::ZERO;
    let mut order_details = Vec::with_capacity(items.len());
    for item in items {
        let amount = item.unit_price * Decimal::from(item.quantity);
        payment_due += amount;

        let (food_name, food_image) = food_repo
            .find_by_id(&item.food_id)
            .await?
            .map(|f| (f.name, f.food_image))
            .unwrap_or_default();

        order_details.push(OrderItemDetail {
            food_id: item.food_id,
            food_name,
            food_image,
            quantity: item.quantity,
            unit_price: item.unit_price,
            amount,
        });
    }

    Ok(Json(InvoiceView {
        invoice_id: invoice
            .id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_default(),
        order_id: invoice.order_id,
        payment_method: invoice.payment_method,
        payment_status: invoice.payment_status,
        payment_due_date: invoice.payment_due_date,
        payment_due,
        table_number,
        order_details,
    }))
}

/// POST /invoices - 创建发票
///
/// 支付状态默认 PENDING，到期时间为创建时间 + 1 天。
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<InvoiceCreate>,
) -> AppResult<Json<Invoice>> {
    payload.validate()?;

    let order = OrderRepository::new(state.get_db())
        .find_by_id(&payload.order_id)
        .await?
        .ok_or_else(|| AppError::validation(format!("Order {} not found", payload.order_id)))?;
    let order_id = order
        .id
        .as_ref()
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("Order record has no id"))?;

    let now = Utc::now();
    let invoice = Invoice {
        id: None,
        order_id,
        payment_method: payload.payment_method,
        payment_status: payload.payment_status.unwrap_or_default(),
        payment_due_date: default_payment_due_date(now),
        created_at: now,
        updated_at: now,
    };

    let repo = InvoiceRepository::new(state.get_db());
    Ok(Json(repo.create(invoice).await?))
}

/// PATCH /invoices/{id} - 合并更新发票
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<InvoiceUpdate>,
) -> AppResult<Json<Invoice>> {
    let repo = InvoiceRepository::new(state.get_db());
    Ok(Json(repo.update(&id, payload).await?))
}
