use crate::utils::error::{ProjectorError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub const SUPPORTED_FORMATS: &[&str] = &["csv", "tsv", "json"];

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ProjectorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ProjectorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_finite(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(ProjectorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number".to_string(),
        });
    }
    Ok(())
}

pub fn validate_positive(field_name: &str, value: f64) -> Result<()> {
    validate_finite(field_name, value)?;
    if value <= 0.0 {
        return Err(ProjectorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be greater than 0".to_string(),
        });
    }
    Ok(())
}

pub fn validate_output_formats(field_name: &str, formats: &[String]) -> Result<()> {
    let allowed_set: HashSet<&str> = SUPPORTED_FORMATS.iter().copied().collect();

    for format in formats {
        if !allowed_set.contains(format.as_str()) {
            return Err(ProjectorError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: format.clone(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    SUPPORTED_FORMATS.join(", ")
                ),
            });
        }
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| ProjectorError::MissingConfigError {
            field: field_name.to_string(),
        })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ProjectorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ProjectorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// 解析滑桿傳入的數值字串
pub fn parse_number(field_name: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|e| ProjectorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: raw.to_string(),
            reason: format!("Not a number: {}", e),
        })
}

/// 年數欄位只取整數部分，"12.7" 視為 12
pub fn parse_whole_number(field_name: &str, raw: &str) -> Result<i64> {
    let value = parse_number(field_name, raw)?;
    validate_finite(field_name, value)?;
    Ok(value.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive("base_gdp", 1000.0).is_ok());
        assert!(validate_positive("base_gdp", 0.0).is_err());
        assert!(validate_positive("base_gdp", -5.0).is_err());
        assert!(validate_positive("base_gdp", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_output_formats() {
        let formats = vec!["csv".to_string(), "json".to_string()];
        assert!(validate_output_formats("output.formats", &formats).is_ok());

        let invalid = vec!["xlsx".to_string()];
        assert!(validate_output_formats("output.formats", &invalid).is_err());
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("incomeTax", " 20.5 ").unwrap(), 20.5);
        assert!(parse_number("incomeTax", "twenty").is_err());
        assert!(parse_number("incomeTax", "").is_err());
    }

    #[test]
    fn test_parse_whole_number_truncates() {
        assert_eq!(parse_whole_number("projectionYears", "12.7").unwrap(), 12);
        assert_eq!(parse_whole_number("projectionYears", "-3").unwrap(), -3);
        assert!(parse_whole_number("projectionYears", "inf").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("incomeTax", 50.0, 0.0, 100.0).is_ok());
        assert!(validate_range("incomeTax", 150.0, 0.0, 100.0).is_err());
    }
}
