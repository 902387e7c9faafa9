//! BMI computation and classification engine.
//!
//! One submission flows through validate, convert, compute, classify.
//! Validation failure is a value (`Evaluation::Invalid`), never an error;
//! the only error path is the defensive zero-height invariant check.

use crate::{
    units, validate, BmiCategory, CalculatorInput, Catalog, CategoryProfile, Error, Result,
    ValidationReport,
};

/// Classification thresholds, lower bound inclusive for each band
pub const NORMAL_MIN_BMI: f64 = 18.5;
pub const OVERWEIGHT_MIN_BMI: f64 = 25.0;
pub const OBESE_MIN_BMI: f64 = 30.0;

/// A computed BMI result with its category display profile
#[derive(Clone, Debug)]
pub struct BmiAssessment {
    /// BMI rounded to one decimal for display
    pub bmi: f64,
    pub category: BmiCategory,
    pub profile: CategoryProfile,
    pub weight_kg: f64,
    pub height_m: f64,
}

/// Outcome of one calculator submission
#[derive(Clone, Debug)]
pub enum Evaluation {
    Valid(BmiAssessment),
    Invalid(ValidationReport),
}

/// Compute BMI as kg / m²
///
/// The validator's height lower bound keeps zero out of here; this check
/// exists so a bug upstream surfaces as an error instead of a silent
/// `Infinity` or `NaN`.
pub fn compute_bmi(weight_kg: f64, height_m: f64) -> Result<f64> {
    if !height_m.is_finite() || height_m <= 0.0 {
        return Err(Error::Calculation(format!(
            "height must be a positive number of meters, got {}",
            height_m
        )));
    }
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(Error::Calculation(format!(
            "weight must be a positive number of kilograms, got {}",
            weight_kg
        )));
    }

    Ok(weight_kg / (height_m * height_m))
}

/// Classify an (unrounded) BMI value into its category band
pub fn classify(bmi: f64) -> BmiCategory {
    if bmi < NORMAL_MIN_BMI {
        BmiCategory::Underweight
    } else if bmi < OVERWEIGHT_MIN_BMI {
        BmiCategory::NormalWeight
    } else if bmi < OBESE_MIN_BMI {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Round a BMI value to one decimal for display
///
/// Ties round half away from zero, matching `f64::round`.
pub fn round_display(bmi: f64) -> f64 {
    (bmi * 10.0).round() / 10.0
}

/// Evaluate one raw submission against the given catalog
///
/// Classification uses the unrounded BMI; the assessment carries the
/// rounded display value.
pub fn evaluate(catalog: &Catalog, input: &CalculatorInput) -> Result<Evaluation> {
    let validated = match validate::validate(input) {
        Ok(v) => v,
        Err(report) => {
            tracing::debug!("Submission rejected with {} field errors", report.errors().len());
            return Ok(Evaluation::Invalid(report));
        }
    };

    let weight_kg = units::weight_to_kg(validated.weight, validated.weight_unit);
    let height_m = units::height_to_meters(validated.height, validated.inches, validated.height_unit);

    let bmi = compute_bmi(weight_kg, height_m)?;
    let category = classify(bmi);

    let profile = catalog.profile(category).cloned().ok_or_else(|| {
        Error::CatalogValidation(format!("No profile for category {:?}", category))
    })?;

    tracing::info!("Computed BMI {:.1}, category {:?}", bmi, category);

    Ok(Evaluation::Valid(BmiAssessment {
        bmi: round_display(bmi),
        category,
        profile,
        weight_kg,
        height_m,
    }))
}
