use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartStatus {
    Active,
    Completed,
}

impl std::fmt::Display for CartStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CartStatus::Active => write!(f, "active"),
            CartStatus::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for CartStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(CartStatus::Active),
            "completed" => Ok(CartStatus::Completed),
            _ => Err(format!("Invalid cart status: {}", s)),
        }
    }
}

/// Sales tax applied on top of the cart subtotal, as a fraction (0.18 = 18%).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxRate(Decimal);

impl TaxRate {
    pub fn new(rate: Decimal) -> Result<Self, String> {
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            return Err(format!("Invalid tax rate: {}", rate));
        }
        Ok(Self(rate))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        Self(Decimal::new(18, 2))
    }
}
