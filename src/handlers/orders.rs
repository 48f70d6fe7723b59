use actix_web::{web, HttpResponse};
use bigdecimal::ToPrimitive;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::errors::DomainError;
use crate::domain::order::{Customer, LineItem, Order, OrderStatus};
use crate::errors::AppError;
use crate::quote::{quote_filename, render_quote};

use super::{blocking_error, decimal_from, Orders};

// ── Request / response DTOs ──────────────────────────────────────────────────
//
// Wire names are the Spanish field names the storefront has always spoken;
// they are part of the compatibility contract with the deployed client.

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CustomerDto {
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellidos")]
    pub last_name: String,
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "horariosEntrega", default, skip_serializing_if = "Option::is_none")]
    pub delivery_window: Option<String>,
    #[serde(rename = "metodoPago")]
    pub payment_method: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderItemDto {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "cantidad")]
    pub quantity: i32,
    #[serde(rename = "precio")]
    pub unit_price: f64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    #[serde(rename = "cliente")]
    pub customer: CustomerDto,
    #[serde(rename = "productos")]
    pub items: Vec<OrderItemDto>,
    pub total: f64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    #[serde(rename = "estado")]
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: i64,
    #[serde(rename = "cliente")]
    pub customer: CustomerDto,
    #[serde(rename = "productos")]
    pub items: Vec<OrderItemDto>,
    pub total: f64,
    #[serde(rename = "fecha")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "estado")]
    pub status: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        OrderResponse {
            id: order.number,
            customer: CustomerDto {
                first_name: order.customer.first_name,
                last_name: order.customer.last_name,
                address: order.customer.address,
                phone: order.customer.phone,
                delivery_window: order.customer.delivery_window,
                payment_method: order.customer.payment_method,
            },
            items: order
                .items
                .iter()
                .map(|item| OrderItemDto {
                    name: item.name.clone(),
                    quantity: item.quantity,
                    unit_price: item.unit_price.to_f64().unwrap_or_default(),
                })
                .collect(),
            total: order.total.to_f64().unwrap_or_default(),
            created_at: order.created_at,
            status: order.status.as_str().to_string(),
        }
    }
}

impl CustomerDto {
    fn into_domain(self) -> Customer {
        Customer {
            first_name: self.first_name,
            last_name: self.last_name,
            address: self.address,
            phone: self.phone,
            delivery_window: self.delivery_window,
            payment_method: self.payment_method,
        }
    }
}

impl OrderItemDto {
    fn into_domain(self) -> Result<LineItem, AppError> {
        Ok(LineItem {
            unit_price: decimal_from(self.unit_price, "precio")?,
            name: self.name,
            quantity: self.quantity,
        })
    }
}

fn map_domain(e: DomainError) -> AppError {
    match e {
        DomainError::NotFound => AppError::NotFound("Pedido no encontrado"),
        DomainError::InvalidInput(msg) => AppError::Validation(msg),
        DomainError::Internal(msg) => AppError::Internal(msg),
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /api/orders
///
/// Checkout submission from the storefront cart. Public: placing an order
/// needs no account. The client-computed total is stored as-is.
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "Missing or malformed fields"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    orders: web::Data<Orders>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let request = body.into_inner();
    let customer = request.customer.into_domain();
    let items = request
        .items
        .into_iter()
        .map(OrderItemDto::into_domain)
        .collect::<Result<Vec<_>, _>>()?;
    let total = decimal_from(request.total, "total")?;

    let service = orders.clone();
    let order = web::block(move || service.create_order(customer, items, total))
        .await
        .map_err(blocking_error)?
        .map_err(map_domain)?;

    log::info!("pedido {} creado", order.number);
    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}

/// GET /api/orders/{id}
///
/// Public lookup used by the quote-confirmation page.
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = i64, Path, description = "Public order number")),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    orders: web::Data<Orders>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let number = path.into_inner();

    let service = orders.clone();
    let order = web::block(move || service.get_order(number))
        .await
        .map_err(blocking_error)?
        .map_err(map_domain)?;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// GET /api/orders
///
/// Admin listing, most recent order first.
#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "All orders, newest first", body = [OrderResponse]),
        (status = 401, description = "Not logged in"),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    _admin: super::auth::AdminUser,
    orders: web::Data<Orders>,
) -> Result<HttpResponse, AppError> {
    let service = orders.clone();
    let all = web::block(move || service.list_orders())
        .await
        .map_err(blocking_error)?
        .map_err(map_domain)?;

    let response: Vec<OrderResponse> = all.into_iter().map(OrderResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// PATCH /api/orders/{id}
///
/// Status transition by an operator. The new status must be one of the four
/// known labels; anything else is rejected before touching the store.
#[utoipa::path(
    patch,
    path = "/api/orders/{id}",
    params(("id" = i64, Path, description = "Public order number")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Updated order", body = OrderResponse),
        (status = 400, description = "Unknown status label"),
        (status = 401, description = "Not logged in"),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn update_order_status(
    _admin: super::auth::AdminUser,
    orders: web::Data<Orders>,
    path: web::Path<i64>,
    body: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let number = path.into_inner();
    let status: OrderStatus = body.status.parse().map_err(map_domain)?;

    let service = orders.clone();
    let order = web::block(move || service.update_status(number, status))
        .await
        .map_err(blocking_error)?
        .map_err(map_domain)?;

    log::info!("pedido {} pasó a estado {}", order.number, order.status);
    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// GET /api/orders/{id}/pdf
///
/// Renders the quote document and streams it as a download. The 404 here is
/// plain text rather than the JSON error body: it is what the admin panel's
/// download link expects.
#[utoipa::path(
    get,
    path = "/api/orders/{id}/pdf",
    params(("id" = i64, Path, description = "Public order number")),
    responses(
        (status = 200, description = "Quote PDF stream"),
        (status = 401, description = "Not logged in"),
        (status = 404, description = "Order not found (plain text)"),
    ),
    tag = "orders"
)]
pub async fn download_order_quote(
    _admin: super::auth::AdminUser,
    orders: web::Data<Orders>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let number = path.into_inner();

    let service = orders.clone();
    let order = match web::block(move || service.get_order(number))
        .await
        .map_err(blocking_error)?
    {
        Ok(order) => order,
        Err(DomainError::NotFound) => {
            return Ok(HttpResponse::NotFound()
                .content_type("text/plain; charset=utf-8")
                .body("Pedido no encontrado"))
        }
        Err(e) => return Err(map_domain(e)),
    };

    let filename = quote_filename(order.number);
    let bytes = web::block(move || render_quote(&order))
        .await
        .map_err(blocking_error)?
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename={filename}"),
        ))
        .body(bytes))
}
