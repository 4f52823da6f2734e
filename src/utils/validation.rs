//! Validation helpers
//!
//! Custom `validator` rules plus the `FormErrors` collector used when a
//! request body is turned into a typed form. Form fields arrive as strings so
//! that a bad date or an unknown code becomes a per-field message instead of
//! a body rejection.

use std::str::FromStr;

use chrono::NaiveDate;
use validator::{Validate, ValidationError, ValidationErrors};

/// Date format accepted on every date field
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reject values that are empty once surrounding whitespace is removed
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some("This field is required.".into());
        return Err(error);
    }
    Ok(())
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error.message = Some("Enter a valid date.".into());
        error
    })
}

/// Treat a missing or whitespace-only optional string as absent
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Collects field errors while a request is converted into a typed form
#[derive(Debug)]
pub struct FormErrors {
    errors: ValidationErrors,
}

impl Default for FormErrors {
    fn default() -> Self {
        Self {
            errors: ValidationErrors::new(),
        }
    }
}

impl FormErrors {
    /// Start from the derive-based checks of a request
    pub fn from_validate<T: Validate>(request: &T) -> Self {
        Self {
            errors: request.validate().err().unwrap_or_else(ValidationErrors::new),
        }
    }

    pub fn add(&mut self, field: &'static str, error: ValidationError) {
        self.errors.add(field, error);
    }

    pub fn add_message(&mut self, field: &'static str, code: &'static str, message: &str) {
        let mut error = ValidationError::new(code);
        error.message = Some(message.to_string().into());
        self.errors.add(field, error);
    }

    /// Required date field
    pub fn date(&mut self, field: &'static str, value: &str) -> Option<NaiveDate> {
        if value.trim().is_empty() {
            self.add_message(field, "required", "This field is required.");
            return None;
        }
        match parse_date(value) {
            Ok(date) => Some(date),
            Err(error) => {
                self.add(field, error);
                None
            }
        }
    }

    /// Optional date field; blank means absent
    pub fn optional_date(&mut self, field: &'static str, value: Option<&str>) -> Option<NaiveDate> {
        let value = non_blank(value)?;
        match parse_date(value) {
            Ok(date) => Some(date),
            Err(error) => {
                self.add(field, error);
                None
            }
        }
    }

    /// Required reference to another row by id
    pub fn reference(&mut self, field: &'static str, value: Option<i64>) -> Option<i64> {
        if value.is_none() {
            self.add_message(field, "required", "This field is required.");
        }
        value
    }

    /// Row id given as text, e.g. from a query string
    pub fn id(&mut self, field: &'static str, value: &str) -> Option<i64> {
        match value.trim().parse::<i64>() {
            Ok(id) => Some(id),
            Err(_) => {
                self.add_message(field, "invalid", "Select a valid choice. That choice is not one of the available choices.");
                None
            }
        }
    }

    /// Required choice among the codes of an enum
    pub fn choice<T: FromStr>(&mut self, field: &'static str, value: &str) -> Option<T> {
        if value.trim().is_empty() {
            self.add_message(field, "required", "This field is required.");
            return None;
        }
        self.parse_choice(field, value)
    }

    /// Optional choice, falling back to `default` when blank
    pub fn choice_or<T: FromStr>(&mut self, field: &'static str, value: Option<&str>, default: T) -> Option<T> {
        match non_blank(value) {
            Some(value) => self.parse_choice(field, value),
            None => Some(default),
        }
    }

    fn parse_choice<T: FromStr>(&mut self, field: &'static str, value: &str) -> Option<T> {
        match value.trim().parse::<T>() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                let mut error = ValidationError::new("choice");
                error.add_param("value".into(), &value.to_string());
                error.message = Some(
                    format!("Select a valid choice. {} is not one of the available choices.", value).into(),
                );
                self.add(field, error);
                None
            }
        }
    }

    /// Finish collecting: `Ok(value)` only when no field failed
    pub fn finish<T>(self, value: impl FnOnce() -> Option<T>) -> Result<T, ValidationErrors> {
        if !self.errors.errors().is_empty() {
            return Err(self.errors);
        }
        value().ok_or_else(|| {
            let mut errors = ValidationErrors::new();
            errors.add("__all__", ValidationError::new("incomplete"));
            errors
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Budi").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank("   ").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-01-15").ok(),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
        assert!(parse_date("2024/01/15").is_err());
        assert!(parse_date("2024-02-30").is_err());
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some(" X1 ")), Some("X1"));
        assert_eq!(non_blank(Some("  ")), None);
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn test_form_errors_collects_each_field() {
        let mut form = FormErrors::default();
        let birth = form.date("birth_date", "15-01-1990");
        let start = form.optional_date("start_date", Some(""));
        let company = form.reference("company", None);
        assert!(birth.is_none());
        assert!(start.is_none());
        assert!(company.is_none());

        let errors = form.finish(|| Some(())).unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("birth_date"));
        assert!(fields.contains_key("company"));
        assert!(!fields.contains_key("start_date"));
    }

    #[test]
    fn test_form_errors_id() {
        let mut form = FormErrors::default();
        assert_eq!(form.id("company", " 12 "), Some(12));
        assert_eq!(form.id("worker", "x"), None);
        let errors = form.finish(|| Some(())).unwrap_err();
        assert!(errors.field_errors().contains_key("worker"));
        assert!(!errors.field_errors().contains_key("company"));
    }

    #[test]
    fn test_form_errors_finish_ok() {
        let mut form = FormErrors::default();
        let date = form.date("issue_date", "2024-03-01");
        let value = form.finish(|| date).unwrap();
        assert_eq!(value, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }
}
