use bigdecimal::BigDecimal;
use uuid::Uuid;

/// Catalog entry shown in the storefront and managed from the admin panel.
#[derive(Debug, Clone)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: BigDecimal,
    pub image_url: String,
    pub description: String,
}

/// Field set for creating a product or fully replacing an existing one.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: String,
    pub price: BigDecimal,
    pub image_url: String,
    pub description: String,
}
