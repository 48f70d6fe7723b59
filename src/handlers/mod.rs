pub mod auth;
pub mod orders;
pub mod products;

use bigdecimal::BigDecimal;
use utoipa::OpenApi;

use crate::application::catalog_service::CatalogService;
use crate::application::order_service::OrderService;
use crate::errors::AppError;
use crate::infrastructure::order_repo::DieselOrderRepository;
use crate::infrastructure::product_repo::DieselProductRepository;

/// Concrete service types the handlers pull out of app data.
pub type Orders = OrderService<DieselOrderRepository>;
pub type Catalog = CatalogService<DieselProductRepository>;

pub(crate) fn blocking_error(e: actix_web::error::BlockingError) -> AppError {
    AppError::Internal(e.to_string())
}

/// The wire format carries money as plain JSON numbers; everything behind
/// the boundary works in `BigDecimal`.
pub(crate) fn decimal_from(value: f64, field: &str) -> Result<BigDecimal, AppError> {
    BigDecimal::try_from(value)
        .map_err(|_| AppError::Validation(format!("valor numérico inválido en '{field}'")))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::login,
        auth::logout,
        products::list_products,
        products::create_product,
        products::update_product,
        products::delete_product,
        orders::create_order,
        orders::list_orders,
        orders::get_order,
        orders::update_order_status,
        orders::download_order_quote,
    ),
    components(schemas(
        auth::LoginRequest,
        products::ProductRequest,
        products::ProductResponse,
        orders::CustomerDto,
        orders::OrderItemDto,
        orders::CreateOrderRequest,
        orders::UpdateStatusRequest,
        orders::OrderResponse,
    )),
    tags(
        (name = "auth", description = "Admin session management"),
        (name = "products", description = "Catalog CRUD"),
        (name = "orders", description = "Order lifecycle and quote documents"),
    )
)]
pub struct ApiDoc;
