use business::domain::cart::value_objects::TaxRate;
use rust_decimal::Decimal;

use super::app_config::ConfigError;

#[derive(Debug, Clone, Copy, Default)]
pub struct ShopConfig {
    pub tax_rate: TaxRate,
}

impl ShopConfig {
    /// Environment variables:
    /// - CART_TAX_RATE: fraction between 0 and 1 (default: 0.18)
    pub fn from_source(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let Some(raw) = get("CART_TAX_RATE") else {
            return Ok(Self::default());
        };

        let tax_rate = raw
            .trim()
            .parse::<Decimal>()
            .ok()
            .and_then(|rate| TaxRate::new(rate).ok())
            .ok_or(ConfigError::Invalid {
                key: "CART_TAX_RATE",
                value: raw,
            })?;

        Ok(Self { tax_rate })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_eighteen_percent() {
        let config = ShopConfig::from_source(|_| None).unwrap();
        assert_eq!(config.tax_rate.value(), Decimal::new(18, 2));
    }

    #[test]
    fn should_parse_custom_rate() {
        let config = ShopConfig::from_source(|_| Some("0.07".to_string())).unwrap();
        assert_eq!(config.tax_rate.value(), Decimal::new(7, 2));
    }

    #[test]
    fn should_reject_out_of_range_or_garbage() {
        assert!(ShopConfig::from_source(|_| Some("1.5".to_string())).is_err());
        assert!(ShopConfig::from_source(|_| Some("-0.1".to_string())).is_err());
        assert!(ShopConfig::from_source(|_| Some("lots".to_string())).is_err());
    }
}
