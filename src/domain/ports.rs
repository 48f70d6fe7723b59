use uuid::Uuid;

use super::errors::DomainError;
use super::order::{Order, OrderDraft, OrderStatus};
use super::product::{Product, ProductDraft};

pub trait OrderRepository: Send + Sync + 'static {
    fn create(&self, draft: OrderDraft) -> Result<Order, DomainError>;
    fn find_by_number(&self, number: i64) -> Result<Option<Order>, DomainError>;
    /// All orders, most recently created first, items in insertion order.
    fn list_recent_first(&self) -> Result<Vec<Order>, DomainError>;
    /// Replace the status of the given order. `None` when no such order
    /// exists; must never create one.
    fn update_status(&self, number: i64, status: OrderStatus)
        -> Result<Option<Order>, DomainError>;
}

pub trait ProductRepository: Send + Sync + 'static {
    fn list(&self) -> Result<Vec<Product>, DomainError>;
    fn create(&self, draft: ProductDraft) -> Result<Product, DomainError>;
    fn update(&self, id: Uuid, draft: ProductDraft) -> Result<Option<Product>, DomainError>;
    /// `true` when a product was deleted, `false` when the id was unknown.
    fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}

/// Credential check backing the admin login. Injected so the web layer never
/// hardcodes who the operator is or how the password is stored.
pub trait CredentialVerifier: Send + Sync + 'static {
    fn verify(&self, username: &str, password: &str) -> bool;
}
