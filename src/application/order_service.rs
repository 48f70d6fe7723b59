use std::sync::atomic::{AtomicI64, Ordering};

use bigdecimal::{BigDecimal, Zero};
use chrono::Utc;

use crate::domain::errors::DomainError;
use crate::domain::order::{Customer, LineItem, Order, OrderDraft, OrderStatus};
use crate::domain::ports::OrderRepository;

/// Issues public order numbers derived from the creation timestamp in
/// milliseconds. Strictly increasing even when several orders arrive within
/// the same millisecond, so numbers are collision-free by construction.
struct OrderNumberSequence {
    last_issued: AtomicI64,
}

impl OrderNumberSequence {
    fn new() -> Self {
        Self {
            last_issued: AtomicI64::new(0),
        }
    }

    fn next(&self) -> i64 {
        loop {
            let now = Utc::now().timestamp_millis();
            let last = self.last_issued.load(Ordering::Relaxed);
            let candidate = now.max(last + 1);
            if self
                .last_issued
                .compare_exchange(last, candidate, Ordering::Relaxed, Ordering::Relaxed)
                .is_ok()
            {
                return candidate;
            }
        }
    }
}

/// Orchestrates the order lifecycle: creation, lookup, listing and status
/// transitions. All persistence goes through the `OrderRepository` port.
pub struct OrderService<R> {
    repo: R,
    numbers: OrderNumberSequence,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            numbers: OrderNumberSequence::new(),
        }
    }

    /// Create and persist a new order with a fresh number, the default
    /// Processing status, and a store-assigned creation timestamp.
    ///
    /// The supplied total is authoritative: it is checked for sign but never
    /// recomputed from the items.
    pub fn create_order(
        &self,
        customer: Customer,
        items: Vec<LineItem>,
        total: BigDecimal,
    ) -> Result<Order, DomainError> {
        validate_customer(&customer)?;
        validate_items(&items)?;
        if total < BigDecimal::zero() {
            return Err(DomainError::InvalidInput(
                "el total no puede ser negativo".to_string(),
            ));
        }

        self.repo.create(OrderDraft {
            number: self.numbers.next(),
            customer,
            items,
            total,
            status: OrderStatus::default(),
        })
    }

    pub fn get_order(&self, number: i64) -> Result<Order, DomainError> {
        self.repo
            .find_by_number(number)?
            .ok_or(DomainError::NotFound)
    }

    pub fn list_orders(&self) -> Result<Vec<Order>, DomainError> {
        self.repo.list_recent_first()
    }

    pub fn update_status(&self, number: i64, status: OrderStatus) -> Result<Order, DomainError> {
        self.repo
            .update_status(number, status)?
            .ok_or(DomainError::NotFound)
    }
}

fn validate_customer(customer: &Customer) -> Result<(), DomainError> {
    let required = [
        ("nombre", &customer.first_name),
        ("apellidos", &customer.last_name),
        ("direccion", &customer.address),
        ("telefono", &customer.phone),
        ("metodoPago", &customer.payment_method),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(DomainError::InvalidInput(format!(
                "falta el campo obligatorio '{field}'"
            )));
        }
    }
    Ok(())
}

fn validate_items(items: &[LineItem]) -> Result<(), DomainError> {
    for item in items {
        if item.name.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "cada producto necesita un nombre".to_string(),
            ));
        }
        if item.quantity < 1 {
            return Err(DomainError::InvalidInput(format!(
                "cantidad inválida para '{}'",
                item.name
            )));
        }
        if item.unit_price < BigDecimal::zero() {
            return Err(DomainError::InvalidInput(format!(
                "precio negativo para '{}'",
                item.name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Mutex;

    use super::*;

    /// In-memory stand-in for the diesel repository.
    struct FakeOrderRepo {
        orders: Mutex<Vec<Order>>,
    }

    impl FakeOrderRepo {
        fn new() -> Self {
            Self {
                orders: Mutex::new(Vec::new()),
            }
        }

        fn len(&self) -> usize {
            self.orders.lock().unwrap().len()
        }
    }

    impl OrderRepository for FakeOrderRepo {
        fn create(&self, draft: OrderDraft) -> Result<Order, DomainError> {
            let order = Order {
                number: draft.number,
                customer: draft.customer,
                items: draft.items,
                total: draft.total,
                created_at: Utc::now(),
                status: draft.status,
            };
            self.orders.lock().unwrap().push(order.clone());
            Ok(order)
        }

        fn find_by_number(&self, number: i64) -> Result<Option<Order>, DomainError> {
            Ok(self
                .orders
                .lock()
                .unwrap()
                .iter()
                .find(|o| o.number == number)
                .cloned())
        }

        fn list_recent_first(&self) -> Result<Vec<Order>, DomainError> {
            let mut orders = self.orders.lock().unwrap().clone();
            orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(orders)
        }

        fn update_status(
            &self,
            number: i64,
            status: OrderStatus,
        ) -> Result<Option<Order>, DomainError> {
            let mut orders = self.orders.lock().unwrap();
            match orders.iter_mut().find(|o| o.number == number) {
                Some(order) => {
                    order.status = status;
                    Ok(Some(order.clone()))
                }
                None => Ok(None),
            }
        }
    }

    fn customer() -> Customer {
        Customer {
            first_name: "Ana".to_string(),
            last_name: "Diaz".to_string(),
            address: "Calle 1".to_string(),
            phone: "123".to_string(),
            delivery_window: None,
            payment_method: "efectivo".to_string(),
        }
    }

    fn item() -> LineItem {
        LineItem {
            name: "Silla".to_string(),
            quantity: 2,
            unit_price: BigDecimal::from(1000),
        }
    }

    fn service() -> OrderService<FakeOrderRepo> {
        OrderService::new(FakeOrderRepo::new())
    }

    #[test]
    fn created_order_gets_processing_status_and_a_number() {
        let svc = service();
        let order = svc
            .create_order(customer(), vec![item()], BigDecimal::from(2000))
            .expect("create failed");
        assert_eq!(order.status, OrderStatus::Processing);
        assert!(order.number > 0);
        assert_eq!(order.total, BigDecimal::from(2000));
    }

    #[test]
    fn order_numbers_are_unique_and_increasing_under_rapid_creation() {
        let svc = service();
        let mut seen = HashSet::new();
        let mut previous = 0;
        for _ in 0..200 {
            let order = svc
                .create_order(customer(), vec![item()], BigDecimal::from(100))
                .expect("create failed");
            assert!(order.number > previous, "numbers must strictly increase");
            previous = order.number;
            assert!(seen.insert(order.number), "duplicate order number issued");
        }
    }

    #[test]
    fn blank_required_customer_fields_are_rejected() {
        let svc = service();
        for blank in ["first_name", "last_name", "address", "phone", "payment"] {
            let mut c = customer();
            match blank {
                "first_name" => c.first_name = "  ".to_string(),
                "last_name" => c.last_name = String::new(),
                "address" => c.address = String::new(),
                "phone" => c.phone = " ".to_string(),
                _ => c.payment_method = String::new(),
            }
            let result = svc.create_order(c, vec![item()], BigDecimal::from(100));
            assert!(matches!(result, Err(DomainError::InvalidInput(_))));
        }
        assert_eq!(svc.repo.len(), 0, "nothing may be persisted on rejection");
    }

    #[test]
    fn non_positive_quantity_is_rejected() {
        let svc = service();
        let mut bad = item();
        bad.quantity = 0;
        let result = svc.create_order(customer(), vec![bad], BigDecimal::from(100));
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn negative_unit_price_is_rejected() {
        let svc = service();
        let mut bad = item();
        bad.unit_price = BigDecimal::from(-1);
        let result = svc.create_order(customer(), vec![bad], BigDecimal::from(100));
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn negative_total_is_rejected() {
        let svc = service();
        let result = svc.create_order(customer(), vec![item()], BigDecimal::from(-5));
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn empty_item_list_is_allowed() {
        // The storefront never submits one, but the renderer copes, so the
        // controller does not reject it either.
        let svc = service();
        let order = svc
            .create_order(customer(), vec![], BigDecimal::from(0))
            .expect("create failed");
        assert!(order.items.is_empty());
    }

    #[test]
    fn get_order_maps_missing_to_not_found() {
        let svc = service();
        assert!(matches!(svc.get_order(42), Err(DomainError::NotFound)));
    }

    #[test]
    fn update_status_on_unknown_number_is_not_found_and_creates_nothing() {
        let svc = service();
        let result = svc.update_status(999_999_999, OrderStatus::Shipped);
        assert!(matches!(result, Err(DomainError::NotFound)));
        assert_eq!(svc.repo.len(), 0);
    }

    #[test]
    fn update_status_replaces_the_status() {
        let svc = service();
        let order = svc
            .create_order(customer(), vec![item()], BigDecimal::from(2000))
            .expect("create failed");
        let updated = svc
            .update_status(order.number, OrderStatus::Shipped)
            .expect("update failed");
        assert_eq!(updated.status, OrderStatus::Shipped);
        let fetched = svc.get_order(order.number).expect("get failed");
        assert_eq!(fetched.status, OrderStatus::Shipped);
    }
}
