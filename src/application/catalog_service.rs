use bigdecimal::{BigDecimal, Zero};
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::ports::ProductRepository;
use crate::domain::product::{Product, ProductDraft};

/// Catalog maintenance for the admin panel plus the public listing.
pub struct CatalogService<R> {
    repo: R,
}

impl<R: ProductRepository> CatalogService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        self.repo.list()
    }

    pub fn create_product(&self, draft: ProductDraft) -> Result<Product, DomainError> {
        validate_draft(&draft)?;
        self.repo.create(draft)
    }

    pub fn update_product(&self, id: Uuid, draft: ProductDraft) -> Result<Product, DomainError> {
        validate_draft(&draft)?;
        self.repo.update(id, draft)?.ok_or(DomainError::NotFound)
    }

    pub fn delete_product(&self, id: Uuid) -> Result<(), DomainError> {
        if self.repo.delete(id)? {
            Ok(())
        } else {
            Err(DomainError::NotFound)
        }
    }
}

fn validate_draft(draft: &ProductDraft) -> Result<(), DomainError> {
    let required = [
        ("nombre", &draft.name),
        ("imagen", &draft.image_url),
        ("descripcion", &draft.description),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(DomainError::InvalidInput(format!(
                "falta el campo obligatorio '{field}'"
            )));
        }
    }
    if draft.price < BigDecimal::zero() {
        return Err(DomainError::InvalidInput(
            "el precio no puede ser negativo".to_string(),
        ));
    }
    Ok(())
}
