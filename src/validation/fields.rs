// Presence and format helpers shared by the entity validators

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ApiError;

/// RIT-username shaped company identifier. `[0-9]` rather than `\d` so
/// non-ASCII digits are rejected.
static COMPANY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]{2,3}[0-9]{4}$").expect("company pattern is valid"));

/// The value the caller supplied, if any. An empty string counts as not supplied.
pub fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Fail with `MissingField(message)` unless every value was supplied
pub fn require_all(values: &[&Option<String>], message: &str) -> Result<(), ApiError> {
    if values.iter().all(|value| supplied(value).is_some()) {
        Ok(())
    } else {
        Err(ApiError::missing_field(message))
    }
}

pub fn is_valid_company(company: &str) -> bool {
    COMPANY_PATTERN.is_match(company)
}

pub fn check_company(company: &str) -> Result<(), ApiError> {
    if is_valid_company(company) {
        Ok(())
    } else {
        Err(ApiError::invalid_format("Company must be a valid RIT username"))
    }
}

pub fn parse_id(field: &str, raw: &str) -> Result<i32, ApiError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ApiError::invalid_format(format!("{} must be an integer", field)))
}

pub fn parse_salary(raw: &str) -> Result<f64, ApiError> {
    match raw.trim().parse::<f64>() {
        Ok(salary) if salary.is_finite() => Ok(salary),
        _ => Err(ApiError::invalid_format("Salary must be a number")),
    }
}

/// `mng_id` of "0" means the employee reports to nobody
pub fn is_no_manager(raw: &str) -> bool {
    raw.trim() == "0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn company_pattern() {
        assert!(is_valid_company("ab1234"));
        assert!(is_valid_company("abc1234"));
        assert!(!is_valid_company("a1234"));
        assert!(!is_valid_company("abcd1234"));
        assert!(!is_valid_company("AB1234"));
        assert!(!is_valid_company("ab12345"));
        assert!(!is_valid_company("ab123"));
        assert!(!is_valid_company("ab١٢٣٤"));
        assert!(!is_valid_company(" ab1234"));
    }

    #[test]
    fn empty_string_is_not_supplied() {
        assert_eq!(supplied(&Some(String::new())), None);
        assert_eq!(supplied(&None), None);
        assert_eq!(supplied(&Some("0".to_string())), Some("0"));
    }

    #[test]
    fn require_all_reports_message() {
        let present = Some("x".to_string());
        let missing = None;
        assert!(require_all(&[&present, &present], "nope").is_ok());
        assert_eq!(
            require_all(&[&present, &missing], "All fields are required"),
            Err(ApiError::missing_field("All fields are required"))
        );
    }

    #[test]
    fn zero_salary_is_a_value() {
        assert_eq!(parse_salary("0"), Ok(0.0));
        assert_eq!(parse_salary("52000.50"), Ok(52000.5));
        assert!(parse_salary("lots").is_err());
        assert!(parse_salary("NaN").is_err());
    }

    #[test]
    fn ids_must_be_integers() {
        assert_eq!(parse_id("dept_id", " 12 "), Ok(12));
        assert_eq!(
            parse_id("dept_id", "twelve"),
            Err(ApiError::invalid_format("dept_id must be an integer"))
        );
    }
}
