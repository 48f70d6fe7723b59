use actix_web::{web, HttpResponse};
use bigdecimal::ToPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::product::{Product, ProductDraft};
use crate::errors::AppError;

use super::auth::AdminUser;
use super::{blocking_error, decimal_from, Catalog};

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "imagen")]
    pub image_url: String,
    #[serde(rename = "descripcion")]
    pub description: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: Uuid,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "imagen")]
    pub image_url: String,
    #[serde(rename = "descripcion")]
    pub description: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        ProductResponse {
            id: product.id,
            name: product.name,
            price: product.price.to_f64().unwrap_or_default(),
            image_url: product.image_url,
            description: product.description,
        }
    }
}

impl ProductRequest {
    fn into_domain(self) -> Result<ProductDraft, AppError> {
        Ok(ProductDraft {
            price: decimal_from(self.price, "precio")?,
            name: self.name,
            image_url: self.image_url,
            description: self.description,
        })
    }
}

fn map_domain(e: DomainError) -> AppError {
    match e {
        DomainError::NotFound => AppError::NotFound("Producto no encontrado"),
        DomainError::InvalidInput(msg) => AppError::Validation(msg),
        DomainError::Internal(msg) => AppError::Internal(msg),
    }
}

/// GET /api/products — public storefront listing.
#[utoipa::path(
    get,
    path = "/api/products",
    responses((status = 200, description = "Catalog", body = [ProductResponse])),
    tag = "products"
)]
pub async fn list_products(catalog: web::Data<Catalog>) -> Result<HttpResponse, AppError> {
    let service = catalog.clone();
    let products = web::block(move || service.list_products())
        .await
        .map_err(blocking_error)?
        .map_err(map_domain)?;

    let response: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// POST /api/products — admin only.
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Created product", body = ProductResponse),
        (status = 400, description = "Missing or malformed fields"),
        (status = 401, description = "Not logged in"),
    ),
    tag = "products"
)]
pub async fn create_product(
    _admin: AdminUser,
    catalog: web::Data<Catalog>,
    body: web::Json<ProductRequest>,
) -> Result<HttpResponse, AppError> {
    let draft = body.into_inner().into_domain()?;

    let service = catalog.clone();
    let product = web::block(move || service.create_product(draft))
        .await
        .map_err(blocking_error)?
        .map_err(map_domain)?;

    Ok(HttpResponse::Created().json(ProductResponse::from(product)))
}

/// PUT /api/products/{id} — full replacement of a catalog entry.
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product id")),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Updated product", body = ProductResponse),
        (status = 401, description = "Not logged in"),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn update_product(
    _admin: AdminUser,
    catalog: web::Data<Catalog>,
    path: web::Path<Uuid>,
    body: web::Json<ProductRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let draft = body.into_inner().into_domain()?;

    let service = catalog.clone();
    let product = web::block(move || service.update_product(id, draft))
        .await
        .map_err(blocking_error)?
        .map_err(map_domain)?;

    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

/// DELETE /api/products/{id}
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 401, description = "Not logged in"),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn delete_product(
    _admin: AdminUser,
    catalog: web::Data<Catalog>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let service = catalog.clone();
    web::block(move || service.delete_product(id))
        .await
        .map_err(blocking_error)?
        .map_err(map_domain)?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Producto eliminado con éxito" })))
}
