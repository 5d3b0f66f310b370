//! Request payload validation. Field names in messages use the wire casing.

use crate::error::AppError;
use crate::models::{CustomerRequest, FoodRequest, TransactionRequest};
use regex::Regex;

const NAME_MAX: usize = 255;
const PHONE_MAX: usize = 15;
/// Digits with an optional leading +.
const PHONE_PATTERN: &str = r"^\+?[0-9]+$";

fn required(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

fn max_length(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.len() > max {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

fn at_least(field: &str, value: i32, min: i32) -> Result<(), AppError> {
    if value < min {
        return Err(AppError::Validation(format!(
            "{} must be at least {}",
            field, min
        )));
    }
    Ok(())
}

impl CustomerRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        required("name", &self.name)?;
        max_length("name", &self.name, NAME_MAX)?;
        required("phone", &self.phone)?;
        max_length("phone", &self.phone, PHONE_MAX)?;
        let re = Regex::new(PHONE_PATTERN)
            .map_err(|_| AppError::Validation("invalid pattern for phone".into()))?;
        if !re.is_match(&self.phone) {
            return Err(AppError::Validation(
                "phone does not match required pattern".into(),
            ));
        }
        Ok(())
    }
}

impl FoodRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        required("name", &self.name)?;
        max_length("name", &self.name, NAME_MAX)?;
        at_least("price", self.price, 0)?;
        at_least("stock", self.stock, 0)?;
        Ok(())
    }
}

impl TransactionRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        at_least("customerId", self.customer_id, 1)?;
        at_least("foodId", self.food_id, 1)?;
        at_least("qty", self.qty, 1)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_request_rules() {
        let ok = CustomerRequest {
            name: "Ana".into(),
            phone: "+6281234567".into(),
        };
        assert!(ok.validate().is_ok());

        let blank_name = CustomerRequest {
            name: "  ".into(),
            phone: "0812".into(),
        };
        assert!(blank_name.validate().is_err());

        let long_phone = CustomerRequest {
            name: "Ana".into(),
            phone: "0".repeat(16),
        };
        assert!(long_phone.validate().is_err());

        let letters_in_phone = CustomerRequest {
            name: "Ana".into(),
            phone: "call-me".into(),
        };
        assert!(letters_in_phone.validate().is_err());
    }

    #[test]
    fn food_request_rules() {
        let ok = FoodRequest {
            name: "satay".into(),
            price: 5,
            stock: 0,
        };
        assert!(ok.validate().is_ok());

        let negative_price = FoodRequest {
            name: "satay".into(),
            price: -1,
            stock: 0,
        };
        assert!(negative_price.validate().is_err());

        let negative_stock = FoodRequest {
            name: "satay".into(),
            price: 5,
            stock: -1,
        };
        assert!(negative_stock.validate().is_err());
    }

    #[test]
    fn transaction_request_requires_positive_qty() {
        let base = TransactionRequest {
            customer_id: 1,
            food_id: 1,
            qty: 1,
        };
        assert!(base.validate().is_ok());

        let zero_qty = TransactionRequest { qty: 0, ..base.clone() };
        assert!(matches!(zero_qty.validate(), Err(AppError::Validation(_))));

        let negative_qty = TransactionRequest { qty: -3, ..base };
        assert!(negative_qty.validate().is_err());
    }
}
