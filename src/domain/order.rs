use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};

use super::errors::DomainError;

/// Lifecycle state of an order. The storage and wire labels are the Spanish
/// strings the storefront has always used; the enum guarantees nothing else
/// can be persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Processing => "Procesando",
            OrderStatus::Shipped => "Enviado",
            OrderStatus::Delivered => "Entregado",
            OrderStatus::Cancelled => "Cancelado",
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Processing
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Procesando" => Ok(OrderStatus::Processing),
            "Enviado" => Ok(OrderStatus::Shipped),
            "Entregado" => Ok(OrderStatus::Delivered),
            "Cancelado" => Ok(OrderStatus::Cancelled),
            other => Err(DomainError::InvalidInput(format!(
                "estado desconocido: '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Customer {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone: String,
    pub delivery_window: Option<String>,
    pub payment_method: String,
}

#[derive(Debug, Clone)]
pub struct LineItem {
    pub name: String,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

impl LineItem {
    /// Amount for this row of the quote table.
    pub fn line_total(&self) -> BigDecimal {
        BigDecimal::from(self.quantity) * &self.unit_price
    }
}

/// A persisted order. `number` is the public identifier the storefront shows
/// to customers; the storage primary key never leaves the repository layer.
#[derive(Debug, Clone)]
pub struct Order {
    pub number: i64,
    pub customer: Customer,
    pub items: Vec<LineItem>,
    pub total: BigDecimal,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
}

/// What the lifecycle controller hands to the repository on creation:
/// everything except the storage key and the creation timestamp, which the
/// store assigns.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub number: i64,
    pub customer: Customer,
    pub items: Vec<LineItem>,
    pub total: BigDecimal,
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_labels_roundtrip() {
        for status in [
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::from_str(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_label_is_rejected() {
        assert!(matches!(
            OrderStatus::from_str("Perdido"),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn default_status_is_processing() {
        assert_eq!(OrderStatus::default(), OrderStatus::Processing);
    }

    #[test]
    fn line_total_multiplies_quantity_by_unit_price() {
        let item = LineItem {
            name: "Silla".to_string(),
            quantity: 3,
            unit_price: BigDecimal::from_str("1000.50").unwrap(),
        };
        assert_eq!(item.line_total(), BigDecimal::from_str("3001.50").unwrap());
    }
}
