//! Validated creation inputs.
//!
//! Each `New*` type can only be obtained through its constructor, so a value
//! reaching a storage backend has already passed every field-level rule.
//! Constructors are pure: same input, same verdict, no I/O.
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{Amount, Currency, ResultStore, StoreError};

const NAME_MAX: usize = 50;
const DESCRIPTION_MAX: usize = 200;

/// A registration payload that passed validation.
#[derive(Clone, Debug, PartialEq)]
pub struct NewUser {
    pub pin: String,
    pub preferred_currency: Currency,
}

impl NewUser {
    /// Accepts exactly 4 decimal digits; the currency defaults to USD.
    pub fn new(pin: &str, preferred_currency: Option<Currency>) -> ResultStore<Self> {
        if pin.len() != 4 || !pin.chars().all(|c| c.is_ascii_digit()) {
            return Err(StoreError::Validation(
                "PIN must be exactly 4 digits".to_string(),
            ));
        }
        Ok(Self {
            pin: pin.to_string(),
            preferred_currency: preferred_currency.unwrap_or_default(),
        })
    }
}

/// A tracker creation payload that passed validation.
#[derive(Clone, Debug, PartialEq)]
pub struct NewTracker {
    pub name: String,
    pub currency: Currency,
}

impl NewTracker {
    /// Accepts a name that trims to 1-50 characters.
    pub fn new(name: &str, currency: Currency) -> ResultStore<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::Validation(
                "Tracker name is required".to_string(),
            ));
        }
        if name.chars().count() > NAME_MAX {
            return Err(StoreError::Validation(format!(
                "Tracker name must be at most {NAME_MAX} characters"
            )));
        }
        Ok(Self {
            name: name.to_string(),
            currency,
        })
    }
}

/// An expense creation payload that passed validation.
#[derive(Clone, Debug, PartialEq)]
pub struct NewExpense {
    pub tracker_id: Uuid,
    pub amount: Amount,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
}

impl NewExpense {
    /// Accepts a well-formed tracker id, a strictly positive amount with at
    /// most two decimals, a 1-50 character category, an optional description
    /// of up to 200 characters and an ISO `YYYY-MM-DD` date.
    pub fn new(
        tracker_id: &str,
        amount: f64,
        category: &str,
        description: Option<&str>,
        date: &str,
    ) -> ResultStore<Self> {
        if tracker_id.trim().is_empty() {
            return Err(StoreError::Validation("Tracker ID required".to_string()));
        }
        let tracker_id = Uuid::parse_str(tracker_id.trim())
            .map_err(|_| StoreError::Validation("Tracker ID must be a valid id".to_string()))?;

        let amount = Amount::from_f64(amount)?;
        if !amount.is_positive() {
            return Err(StoreError::Validation(
                "Amount must be positive".to_string(),
            ));
        }

        let category = category.trim();
        if category.is_empty() {
            return Err(StoreError::Validation("Category is required".to_string()));
        }
        if category.chars().count() > NAME_MAX {
            return Err(StoreError::Validation(format!(
                "Category must be at most {NAME_MAX} characters"
            )));
        }

        let description = description.unwrap_or_default();
        if description.chars().count() > DESCRIPTION_MAX {
            return Err(StoreError::Validation(format!(
                "Description must be at most {DESCRIPTION_MAX} characters"
            )));
        }

        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|_| StoreError::Validation("Date must be YYYY-MM-DD".to_string()))?;

        Ok(Self {
            tracker_id,
            amount,
            category: category.to_string(),
            description: description.to_string(),
            date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_must_be_four_digits() {
        assert!(NewUser::new("1234", None).is_ok());
        assert!(NewUser::new("0000", Some(Currency::Inr)).is_ok());
        assert!(NewUser::new("123", None).is_err());
        assert!(NewUser::new("12345", None).is_err());
        assert!(NewUser::new("12a4", None).is_err());
        assert!(NewUser::new("12.4", None).is_err());
    }

    #[test]
    fn currency_defaults_to_usd() {
        let new_user = NewUser::new("1234", None).unwrap();
        assert_eq!(new_user.preferred_currency, Currency::Usd);
    }

    #[test]
    fn tracker_name_is_trimmed_and_bounded() {
        let new_tracker = NewTracker::new("  Groceries  ", Currency::Usd).unwrap();
        assert_eq!(new_tracker.name, "Groceries");
        assert!(NewTracker::new("   ", Currency::Usd).is_err());
        assert!(NewTracker::new(&"x".repeat(51), Currency::Usd).is_err());
        assert!(NewTracker::new(&"x".repeat(50), Currency::Usd).is_ok());
    }

    #[test]
    fn expense_rules() {
        let tracker_id = Uuid::new_v4().to_string();
        let expense =
            NewExpense::new(&tracker_id, 12.34, "Food", Some("lunch"), "2024-03-01").unwrap();
        assert_eq!(expense.amount.cents(), 1234);
        assert_eq!(expense.description, "lunch");
        assert_eq!(expense.date.to_string(), "2024-03-01");

        let missing_description =
            NewExpense::new(&tracker_id, 1.0, "Food", None, "2024-03-01").unwrap();
        assert_eq!(missing_description.description, "");

        assert!(NewExpense::new("", 1.0, "Food", None, "2024-03-01").is_err());
        assert!(NewExpense::new("not-a-uuid", 1.0, "Food", None, "2024-03-01").is_err());
        assert!(NewExpense::new(&tracker_id, 0.0, "Food", None, "2024-03-01").is_err());
        assert!(NewExpense::new(&tracker_id, -5.0, "Food", None, "2024-03-01").is_err());
        assert!(NewExpense::new(&tracker_id, 1.0, "  ", None, "2024-03-01").is_err());
        assert!(NewExpense::new(&tracker_id, 1.0, "Food", None, "03/01/2024").is_err());
        assert!(NewExpense::new(&tracker_id, 1.0, "Food", None, "2024-13-01").is_err());
        assert!(
            NewExpense::new(&tracker_id, 1.0, "Food", Some(&"x".repeat(201)), "2024-03-01")
                .is_err()
        );
    }
}
