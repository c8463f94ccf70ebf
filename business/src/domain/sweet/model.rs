use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use super::errors::SweetError;
use crate::domain::shared::entity_id::EntityId;

/// Prices are kept in cents precision.
pub const PRICE_SCALE: u32 = 2;

/// Largest price a sweet can carry (twelve digits, two of them decimals).
pub const MAX_PRICE: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

#[derive(Debug, Clone, PartialEq)]
pub struct Sweet {
    pub id: EntityId,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub quantity: i32,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewSweetProps {
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub quantity: i32,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Partial update of a sweet. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweetChanges {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<i32>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl Sweet {
    pub fn new(props: NewSweetProps) -> Result<Self, SweetError> {
        let name = validate_name(props.name)?;
        let category = validate_category(props.category)?;
        let price = normalize_price(props.price)?;
        validate_stock(props.quantity)?;

        let now = Utc::now();
        Ok(Self {
            id: EntityId::generate(),
            name,
            category,
            price,
            quantity: props.quantity,
            description: props.description,
            image_url: props.image_url,
            created_at: now,
            updated_at: now,
        })
    }

    /// Constructor for data already persisted in the repository (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn from_repository(
        id: EntityId,
        name: String,
        category: String,
        price: Decimal,
        quantity: i32,
        description: Option<String>,
        image_url: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            category,
            price,
            quantity,
            description,
            image_url,
            created_at,
            updated_at,
        }
    }

    pub fn has_stock_for(&self, quantity: i32) -> bool {
        self.quantity >= quantity
    }
}

impl SweetChanges {
    /// Checks the present fields with the same rules as creation.
    pub fn validated(self) -> Result<Self, SweetError> {
        Ok(Self {
            name: self.name.map(validate_name).transpose()?,
            category: self.category.map(validate_category).transpose()?,
            price: self.price.map(normalize_price).transpose()?,
            quantity: self
                .quantity
                .map(|q| validate_stock(q).map(|()| q))
                .transpose()?,
            description: self.description,
            image_url: self.image_url,
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn validate_name(name: String) -> Result<String, SweetError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(SweetError::NameEmpty);
    }
    Ok(trimmed.to_string())
}

fn validate_category(category: String) -> Result<String, SweetError> {
    let trimmed = category.trim();
    if trimmed.is_empty() {
        return Err(SweetError::CategoryEmpty);
    }
    Ok(trimmed.to_string())
}

fn validate_stock(quantity: i32) -> Result<(), SweetError> {
    if quantity < 0 {
        return Err(SweetError::QuantityNegative);
    }
    Ok(())
}

/// Rejects negative prices, rounds the rest to cents and caps them at `MAX_PRICE`.
pub fn normalize_price(price: Decimal) -> Result<Decimal, SweetError> {
    if price < Decimal::ZERO {
        return Err(SweetError::PriceNegative);
    }
    let rounded = price.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if rounded > MAX_PRICE {
        return Err(SweetError::PriceTooLarge);
    }
    Ok(rounded)
}

/// Quantities moved by purchase or restock must be strictly positive.
pub fn validate_movement(quantity: i32) -> Result<(), SweetError> {
    if quantity <= 0 {
        return Err(SweetError::QuantityNotPositive);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use crate::test_support::dec;

    fn props(price: Decimal, quantity: i32) -> NewSweetProps {
        NewSweetProps {
            name: "Chocolate Bar".to_string(),
            category: "chocolate".to_string(),
            price,
            quantity,
            description: Some("Delicious milk chocolate".to_string()),
            image_url: None,
        }
    }

    #[test]
    fn should_create_sweet_when_valid() {
        let sweet = Sweet::new(props(dec("2.5"), 100)).unwrap();

        assert_eq!(sweet.name, "Chocolate Bar");
        assert_eq!(sweet.price, dec("2.50"));
        assert_eq!(sweet.quantity, 100);
        assert_eq!(sweet.created_at, sweet.updated_at);
    }

    #[test]
    fn should_trim_name_and_category() {
        let mut p = props(dec("1"), 1);
        p.name = "  Lollipop ".to_string();
        p.category = " candy".to_string();

        let sweet = Sweet::new(p).unwrap();
        assert_eq!(sweet.name, "Lollipop");
        assert_eq!(sweet.category, "candy");
    }

    #[test]
    fn should_reject_blank_name() {
        let mut p = props(dec("1"), 1);
        p.name = "   ".to_string();
        assert!(matches!(Sweet::new(p), Err(SweetError::NameEmpty)));
    }

    #[test]
    fn should_reject_blank_category() {
        let mut p = props(dec("1"), 1);
        p.category = String::new();
        assert!(matches!(Sweet::new(p), Err(SweetError::CategoryEmpty)));
    }

    #[test]
    fn should_accept_free_sweet_and_empty_stock() {
        let sweet = Sweet::new(props(Decimal::ZERO, 0)).unwrap();
        assert_eq!(sweet.price, Decimal::ZERO);
        assert_eq!(sweet.quantity, 0);
    }

    #[test]
    fn should_round_price_to_cents() {
        assert_eq!(normalize_price(dec("1.005")).unwrap(), dec("1.01"));
        assert_eq!(normalize_price(dec("0.994")).unwrap(), dec("0.99"));
    }

    #[test]
    fn should_accept_largest_storable_price() {
        assert_eq!(MAX_PRICE, dec("9999999999.99"));
        assert_eq!(normalize_price(dec("9999999999.99")).unwrap(), MAX_PRICE);
    }

    #[test]
    fn should_reject_price_above_storable_range() {
        assert!(matches!(
            Sweet::new(props(dec("100000000000"), 1)),
            Err(SweetError::PriceTooLarge)
        ));
        assert!(matches!(
            normalize_price(dec("9999999999.995")),
            Err(SweetError::PriceTooLarge)
        ));
    }

    #[test]
    fn should_reject_price_change_above_storable_range() {
        let result = SweetChanges {
            price: Some(dec("10000000000")),
            ..Default::default()
        }
        .validated();
        assert!(matches!(result, Err(SweetError::PriceTooLarge)));
    }

    #[test]
    fn should_validate_only_present_changes() {
        let changes = SweetChanges {
            price: Some(dec("3")),
            ..Default::default()
        }
        .validated()
        .unwrap();

        assert_eq!(changes.price, Some(dec("3.00")));
        assert!(changes.name.is_none());
        assert!(changes.quantity.is_none());
    }

    #[test]
    fn should_reject_negative_quantity_change() {
        let result = SweetChanges {
            quantity: Some(-1),
            ..Default::default()
        }
        .validated();
        assert!(matches!(result, Err(SweetError::QuantityNegative)));
    }

    #[test]
    fn should_reject_non_positive_movement() {
        assert!(matches!(validate_movement(0), Err(SweetError::QuantityNotPositive)));
        assert!(matches!(validate_movement(-3), Err(SweetError::QuantityNotPositive)));
        assert!(validate_movement(1).is_ok());
    }

    proptest! {
        #[test]
        fn negative_price_is_always_rejected(cents in i64::MIN / 2..-1i64, quantity in 0i32..10_000) {
            let price = Decimal::new(cents, 2);
            prop_assert!(matches!(Sweet::new(props(price, quantity)), Err(SweetError::PriceNegative)));
        }

        #[test]
        fn negative_quantity_is_always_rejected(cents in 0i64..1_000_000, quantity in i32::MIN..0) {
            let price = Decimal::new(cents, 2);
            prop_assert!(matches!(Sweet::new(props(price, quantity)), Err(SweetError::QuantityNegative)));
        }

        #[test]
        fn non_negative_price_and_stock_are_accepted(cents in 0i64..1_000_000, quantity in 0i32..1_000_000) {
            let sweet = Sweet::new(props(Decimal::new(cents, 2), quantity)).unwrap();
            prop_assert_eq!(sweet.price, Decimal::new(cents, 2));
            prop_assert_eq!(sweet.quantity, quantity);
        }
    }
}
