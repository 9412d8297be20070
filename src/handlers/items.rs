use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::item_service::{ItemService, ItemUpdate};
use crate::domain::item::{Item, ItemKind};
use crate::errors::AppError;
use crate::infrastructure::AppStore;

use super::CreatedResponse;

// ── Request / response DTOs ──────────────────────────────────────────────────

/// Variant-specific attributes, selected by `type`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemDetails {
    Book {
        author: String,
        isbn: String,
    },
    Album {
        artist: String,
        #[serde(default)]
        etc: String,
    },
    Movie {
        director: String,
        actor: String,
    },
}

impl From<ItemDetails> for ItemKind {
    fn from(d: ItemDetails) -> Self {
        match d {
            ItemDetails::Book { author, isbn } => ItemKind::Book { author, isbn },
            ItemDetails::Album { artist, etc } => ItemKind::Album { artist, etc },
            ItemDetails::Movie { director, actor } => ItemKind::Movie { director, actor },
        }
    }
}

impl From<&ItemKind> for ItemDetails {
    fn from(k: &ItemKind) -> Self {
        match k.clone() {
            ItemKind::Book { author, isbn } => ItemDetails::Book { author, isbn },
            ItemKind::Album { artist, etc } => ItemDetails::Album { artist, etc },
            ItemKind::Movie { director, actor } => ItemDetails::Movie { director, actor },
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateItemRequest {
    pub name: String,
    /// Decimal price as a string to avoid floating-point issues, e.g. "10000"
    pub price: String,
    pub stock_quantity: i32,
    #[serde(flatten)]
    pub details: ItemDetails,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateItemRequest {
    pub name: String,
    pub price: String,
    pub stock_quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ItemResponse {
    pub id: Uuid,
    pub name: String,
    pub price: String,
    pub stock_quantity: i32,
    pub description: String,
    #[serde(flatten)]
    pub details: ItemDetails,
}

impl From<&Item> for ItemResponse {
    fn from(item: &Item) -> Self {
        ItemResponse {
            id: item.id(),
            name: item.name().to_string(),
            price: item.price().to_string(),
            stock_quantity: item.stock_quantity(),
            description: item.describe(),
            details: item.kind().into(),
        }
    }
}

fn parse_price(raw: &str) -> Result<BigDecimal, AppError> {
    BigDecimal::from_str(raw)
        .map_err(|e| AppError::BadRequest(format!("Invalid price '{}': {}", raw, e)))
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /items
#[utoipa::path(
    post,
    path = "/items",
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Item saved", body = CreatedResponse),
        (status = 400, description = "Invalid name, price or stock"),
    ),
    tag = "items"
)]
pub async fn create_item(
    service: web::Data<ItemService<AppStore>>,
    body: web::Json<CreateItemRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let price = parse_price(&body.price)?;
    let item = Item::new(body.name, price, body.stock_quantity, body.details.into())?;

    let id = web::block(move || service.save_item(item))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(CreatedResponse { id }))
}

/// GET /items
#[utoipa::path(
    get,
    path = "/items",
    responses(
        (status = 200, description = "All items", body = Vec<ItemResponse>),
    ),
    tag = "items"
)]
pub async fn list_items(
    service: web::Data<ItemService<AppStore>>,
) -> Result<HttpResponse, AppError> {
    let items = web::block(move || service.find_items())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let body: Vec<ItemResponse> = items.iter().map(ItemResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /items/{id}
#[utoipa::path(
    get,
    path = "/items/{id}",
    params(
        ("id" = Uuid, Path, description = "Item UUID"),
    ),
    responses(
        (status = 200, description = "Item found", body = ItemResponse),
        (status = 404, description = "Item not found"),
    ),
    tag = "items"
)]
pub async fn get_item(
    service: web::Data<ItemService<AppStore>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let item_id = path.into_inner();

    let item = web::block(move || service.find_one(item_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ItemResponse::from(&item)))
}

/// PUT /items/{id}
///
/// Stock is moved to `stock_quantity` through the regular add/remove stock
/// operations, so it can never be set below zero.
#[utoipa::path(
    put,
    path = "/items/{id}",
    params(
        ("id" = Uuid, Path, description = "Item UUID"),
    ),
    request_body = UpdateItemRequest,
    responses(
        (status = 200, description = "Item updated", body = ItemResponse),
        (status = 400, description = "Invalid name, price or stock"),
        (status = 404, description = "Item not found"),
    ),
    tag = "items"
)]
pub async fn update_item(
    service: web::Data<ItemService<AppStore>>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateItemRequest>,
) -> Result<HttpResponse, AppError> {
    let item_id = path.into_inner();
    let body = body.into_inner();
    let update = ItemUpdate {
        price: parse_price(&body.price)?,
        name: body.name,
        stock_quantity: body.stock_quantity,
    };

    let item = web::block(move || service.update_item(item_id, update))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ItemResponse::from(&item)))
}
