use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;

use crate::domain::logger::{Logger, MockLogger};
use crate::domain::shared::entity_id::EntityId;
use crate::domain::shared::value_objects::{Caller, Role};
use crate::domain::sweet::model::Sweet;

pub fn dec(value: &str) -> Decimal {
    value.parse().unwrap()
}

pub fn mock_logger() -> Arc<dyn Logger> {
    let mut logger = MockLogger::new();
    logger.expect_info().returning(|_| ());
    logger.expect_warn().returning(|_| ());
    logger.expect_error().returning(|_| ());
    logger.expect_debug().returning(|_| ());
    Arc::new(logger)
}

pub fn admin() -> Caller {
    Caller::new("admin-user", Role::Admin)
}

pub fn customer() -> Caller {
    Caller::new("customer-user", Role::Customer)
}

pub fn sweet_fixture(name: &str, price: &str, quantity: i32) -> Sweet {
    Sweet::from_repository(
        EntityId::generate(),
        name.to_string(),
        "candy".to_string(),
        dec(price),
        quantity,
        None,
        None,
        Utc::now(),
        Utc::now(),
    )
}
