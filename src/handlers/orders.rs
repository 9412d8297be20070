use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::application::order_service::OrderService;
use crate::domain::order::{Order, OrderSearch, OrderStatus};
use crate::errors::AppError;
use crate::infrastructure::AppStore;

use super::members::AddressResponse;
use super::CreatedResponse;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub member_id: Uuid,
    pub item_id: Uuid,
    pub count: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemResponse {
    pub id: Uuid,
    pub item_id: Uuid,
    pub order_price: String,
    pub count: i32,
    pub total_price: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeliveryResponse {
    pub id: Uuid,
    pub status: String,
    pub address: AddressResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub member_id: Uuid,
    pub status: String,
    pub order_date: String,
    pub total_price: String,
    pub delivery: DeliveryResponse,
    pub order_items: Vec<OrderItemResponse>,
}

impl From<&Order> for OrderResponse {
    fn from(o: &Order) -> Self {
        OrderResponse {
            id: o.id(),
            member_id: o.member_id(),
            status: o.status().to_string(),
            order_date: o.order_date().to_rfc3339(),
            total_price: o.total_price().to_string(),
            delivery: DeliveryResponse {
                id: o.delivery().id(),
                status: o.delivery().status().to_string(),
                address: o.delivery().address().into(),
            },
            order_items: o
                .order_items()
                .iter()
                .map(|l| OrderItemResponse {
                    id: l.id(),
                    item_id: l.item_id(),
                    order_price: l.order_price().to_string(),
                    count: l.count(),
                    total_price: l.total_price().to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListOrdersParams {
    /// Exact member name to filter by.
    pub member_name: Option<String>,
    /// `ORDER` or `CANCEL`.
    pub status: Option<String>,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders
///
/// Places an order for one item. Member lookup, stock removal and the
/// cascaded insert of order, delivery and order item share one transaction.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = CreatedResponse),
        (status = 400, description = "Invalid count"),
        (status = 404, description = "Member or item not found"),
        (status = 409, description = "Not enough stock"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    service: web::Data<OrderService<AppStore>>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let id = web::block(move || service.order(body.member_id, body.item_id, body.count))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(CreatedResponse { id }))
}

/// GET /orders/{id}
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    service: web::Data<OrderService<AppStore>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let order = web::block(move || service.find_order(order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(&order)))
}

/// GET /orders
///
/// Lists orders newest first, optionally filtered by member name and status.
#[utoipa::path(
    get,
    path = "/orders",
    params(ListOrdersParams),
    responses(
        (status = 200, description = "Matching orders", body = Vec<OrderResponse>),
        (status = 400, description = "Unknown status"),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    service: web::Data<OrderService<AppStore>>,
    query: web::Query<ListOrdersParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let order_status = params
        .status
        .as_deref()
        .map(str::parse::<OrderStatus>)
        .transpose()?;
    let search = OrderSearch {
        member_name: params.member_name.filter(|n| !n.is_empty()),
        order_status,
    };

    let orders = web::block(move || service.find_orders(&search))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let body: Vec<OrderResponse> = orders.iter().map(OrderResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /orders/{id}/cancel
///
/// Cancels the order and restores stock. Shipped orders cannot be cancelled.
#[utoipa::path(
    post,
    path = "/orders/{id}/cancel",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 204, description = "Order cancelled"),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order already shipped or cancelled"),
    ),
    tag = "orders"
)]
pub async fn cancel_order(
    service: web::Data<OrderService<AppStore>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    web::block(move || service.cancel_order(order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::NoContent().finish())
}

/// POST /orders/{id}/delivery/complete
#[utoipa::path(
    post,
    path = "/orders/{id}/delivery/complete",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 204, description = "Delivery completed"),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order cancelled or already delivered"),
    ),
    tag = "orders"
)]
pub async fn complete_delivery(
    service: web::Data<OrderService<AppStore>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    web::block(move || service.complete_delivery(order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::NoContent().finish())
}
