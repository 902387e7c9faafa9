//! Input validation for calculator submissions.
//!
//! Validation is a pure function over the raw input: no UI feedback, no
//! side effects, no panics. Bad input is reported as data in a
//! [`ValidationReport`], never raised as an error.
//!
//! Each field is checked independently so a single submission can report
//! every failing field at once.

use crate::types::{
    CalculatorInput, HeightUnit, InputErrorKind, InputField, ValidatedInput, ValidationReport,
};

/// Maximum accepted weight, in the entered unit
pub const MAX_WEIGHT: f64 = 1000.0;

/// Accepted height range in centimeters
pub const MIN_HEIGHT_CM: f64 = 50.0;
pub const MAX_HEIGHT_CM: f64 = 300.0;

/// Accepted feet range, both bounds inclusive
pub const MIN_HEIGHT_FT: f64 = 1.0;
pub const MAX_HEIGHT_FT: f64 = 10.0;

/// Accepted inches range in feet mode
pub const MIN_INCHES: f64 = 0.0;
pub const MAX_INCHES: f64 = 11.0;

/// Validate one raw submission
///
/// Returns the parsed values when every field passes, or a report carrying
/// one user-visible error per failing field.
pub fn validate(input: &CalculatorInput) -> Result<ValidatedInput, ValidationReport> {
    let mut report = ValidationReport::default();

    let weight = validate_weight(&input.weight, &mut report);
    let height = match input.height_unit {
        HeightUnit::Cm => validate_height_cm(&input.height, &mut report),
        HeightUnit::Ft => validate_height_ft(&input.height, &mut report),
    };
    let inches = match input.height_unit {
        HeightUnit::Cm => Some(0.0),
        HeightUnit::Ft => validate_inches(&input.inches, &mut report),
    };

    if !report.is_empty() {
        return Err(report);
    }

    // All three are Some once the report is empty
    Ok(ValidatedInput {
        weight: weight.unwrap_or_default(),
        weight_unit: input.weight_unit,
        height: height.unwrap_or_default(),
        inches: inches.unwrap_or_default(),
        height_unit: input.height_unit,
    })
}

/// Parse a field as a finite number, or None
///
/// Rejects non-finite spellings ("inf", "NaN") that `f64::from_str` would
/// otherwise accept.
fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn validate_weight(raw: &str, report: &mut ValidationReport) -> Option<f64> {
    if raw.trim().is_empty() {
        report.push(
            InputField::Weight,
            InputErrorKind::MissingField,
            "Please enter your weight",
        );
        return None;
    }

    let weight = match parse_finite(raw) {
        Some(w) => w,
        None => {
            report.push(
                InputField::Weight,
                InputErrorKind::NotANumber,
                "Weight must be a number",
            );
            return None;
        }
    };

    if weight <= 0.0 {
        report.push(
            InputField::Weight,
            InputErrorKind::OutOfRange,
            "Weight must be a positive number",
        );
        return None;
    }
    if weight > MAX_WEIGHT {
        report.push(
            InputField::Weight,
            InputErrorKind::OutOfRange,
            "Weight cannot exceed 1000 kg/lbs",
        );
        return None;
    }

    Some(weight)
}

fn validate_height_cm(raw: &str, report: &mut ValidationReport) -> Option<f64> {
    if raw.trim().is_empty() {
        report.push(
            InputField::Height,
            InputErrorKind::MissingField,
            "Please enter your height",
        );
        return None;
    }

    let height = match parse_finite(raw) {
        Some(h) => h,
        None => {
            report.push(
                InputField::Height,
                InputErrorKind::NotANumber,
                "Height must be a number",
            );
            return None;
        }
    };

    if !(MIN_HEIGHT_CM..=MAX_HEIGHT_CM).contains(&height) {
        report.push(
            InputField::Height,
            InputErrorKind::OutOfRange,
            "Height must be between 50-300 cm",
        );
        return None;
    }

    Some(height)
}

fn validate_height_ft(raw: &str, report: &mut ValidationReport) -> Option<f64> {
    if raw.trim().is_empty() {
        report.push(
            InputField::Height,
            InputErrorKind::MissingField,
            "Please enter your height",
        );
        return None;
    }

    let feet = match parse_finite(raw) {
        Some(f) => f,
        None => {
            report.push(
                InputField::Height,
                InputErrorKind::NotANumber,
                "Height must be a number",
            );
            return None;
        }
    };

    if !(MIN_HEIGHT_FT..=MAX_HEIGHT_FT).contains(&feet) {
        report.push(
            InputField::Height,
            InputErrorKind::OutOfRange,
            "Height must be between 1-10 feet",
        );
        return None;
    }

    Some(feet)
}

/// Inches are optional: an empty field defaults to 0
fn validate_inches(raw: &str, report: &mut ValidationReport) -> Option<f64> {
    if raw.trim().is_empty() {
        return Some(0.0);
    }

    let inches = match parse_finite(raw) {
        Some(i) => i,
        None => {
            report.push(
                InputField::Inches,
                InputErrorKind::NotANumber,
                "Inches must be a number",
            );
            return None;
        }
    };

    if !(MIN_INCHES..=MAX_INCHES).contains(&inches) {
        report.push(
            InputField::Inches,
            InputErrorKind::OutOfRange,
            "Inches must be between 0-11",
        );
        return None;
    }

    Some(inches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WeightUnit;

    fn metric_input(weight: &str, height: &str) -> CalculatorInput {
        CalculatorInput {
            weight: weight.into(),
            height: height.into(),
            inches: String::new(),
            weight_unit: WeightUnit::Kg,
            height_unit: HeightUnit::Cm,
        }
    }

    fn imperial_input(weight: &str, feet: &str, inches: &str) -> CalculatorInput {
        CalculatorInput {
            weight: weight.into(),
            height: feet.into(),
            inches: inches.into(),
            weight_unit: WeightUnit::Lbs,
            height_unit: HeightUnit::Ft,
        }
    }

    #[test]
    fn test_valid_metric_input() {
        let validated = validate(&metric_input("70", "175")).unwrap();
        assert_eq!(validated.weight, 70.0);
        assert_eq!(validated.height, 175.0);
        assert_eq!(validated.inches, 0.0);
    }

    #[test]
    fn test_valid_imperial_input() {
        let validated = validate(&imperial_input("150", "5", "8")).unwrap();
        assert_eq!(validated.weight, 150.0);
        assert_eq!(validated.height, 5.0);
        assert_eq!(validated.inches, 8.0);
    }

    #[test]
    fn test_empty_weight_is_missing_field() {
        let report = validate(&metric_input("", "175")).unwrap_err();
        let err = report.error_for(InputField::Weight).unwrap();
        assert_eq!(err.kind, InputErrorKind::MissingField);
    }

    #[test]
    fn test_unparsable_weight_is_not_a_number() {
        let report = validate(&metric_input("abc", "175")).unwrap_err();
        let err = report.error_for(InputField::Weight).unwrap();
        assert_eq!(err.kind, InputErrorKind::NotANumber);
    }

    #[test]
    fn test_non_finite_weight_is_not_a_number() {
        let report = validate(&metric_input("inf", "175")).unwrap_err();
        let err = report.error_for(InputField::Weight).unwrap();
        assert_eq!(err.kind, InputErrorKind::NotANumber);
    }

    #[test]
    fn test_negative_weight_is_out_of_range() {
        let report = validate(&metric_input("-5", "175")).unwrap_err();
        let err = report.error_for(InputField::Weight).unwrap();
        assert_eq!(err.kind, InputErrorKind::OutOfRange);
    }

    #[test]
    fn test_weight_over_limit_is_out_of_range() {
        let report = validate(&metric_input("1500", "175")).unwrap_err();
        let err = report.error_for(InputField::Weight).unwrap();
        assert_eq!(err.kind, InputErrorKind::OutOfRange);
        assert!(err.message.contains("1000"));
    }

    #[test]
    fn test_weight_at_limit_is_valid() {
        assert!(validate(&metric_input("1000", "175")).is_ok());
    }

    #[test]
    fn test_height_below_50cm_is_out_of_range() {
        let report = validate(&metric_input("70", "30")).unwrap_err();
        let err = report.error_for(InputField::Height).unwrap();
        assert_eq!(err.kind, InputErrorKind::OutOfRange);
    }

    #[test]
    fn test_height_bounds_inclusive_cm() {
        assert!(validate(&metric_input("70", "50")).is_ok());
        assert!(validate(&metric_input("70", "300")).is_ok());
        assert!(validate(&metric_input("70", "300.1")).is_err());
    }

    #[test]
    fn test_feet_bounds_inclusive() {
        assert!(validate(&imperial_input("150", "1", "0")).is_ok());
        assert!(validate(&imperial_input("150", "10", "0")).is_ok());
        assert!(validate(&imperial_input("150", "11", "0")).is_err());
        assert!(validate(&imperial_input("150", "0.5", "0")).is_err());
    }

    #[test]
    fn test_empty_inches_defaults_to_zero() {
        let validated = validate(&imperial_input("150", "5", "")).unwrap();
        assert_eq!(validated.inches, 0.0);
    }

    #[test]
    fn test_inches_out_of_range() {
        let report = validate(&imperial_input("150", "5", "12")).unwrap_err();
        let err = report.error_for(InputField::Inches).unwrap();
        assert_eq!(err.kind, InputErrorKind::OutOfRange);
    }

    #[test]
    fn test_unparsable_inches_rejected() {
        let report = validate(&imperial_input("150", "5", "abc")).unwrap_err();
        let err = report.error_for(InputField::Inches).unwrap();
        assert_eq!(err.kind, InputErrorKind::NotANumber);
    }

    #[test]
    fn test_inches_ignored_in_cm_mode() {
        let mut input = metric_input("70", "175");
        input.inches = "not a number".into();
        assert!(validate(&input).is_ok());
    }

    #[test]
    fn test_multiple_errors_reported_together() {
        let report = validate(&metric_input("", "500")).unwrap_err();
        assert_eq!(report.errors().len(), 2);
        assert!(report.error_for(InputField::Weight).is_some());
        assert!(report.error_for(InputField::Height).is_some());
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let validated = validate(&metric_input(" 70 ", " 175 ")).unwrap();
        assert_eq!(validated.weight, 70.0);
        assert_eq!(validated.height, 175.0);
    }
}
