//! Default catalog of BMI category display profiles.
//!
//! This module provides the built-in labels, descriptions, healthy-range
//! text and lifestyle tips shown with a result. The catalog is explicit
//! configuration data passed into the evaluation step, not module state.

use crate::types::*;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog_internal);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog of category profiles
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns
/// a cached reference. This function is retained for testing and custom
/// catalog creation.
pub fn build_default_catalog() -> Catalog {
    build_default_catalog_internal()
}

/// The healthy BMI band, shared by every profile's range text
const HEALTHY_RANGE: &str = "18.5 - 24.9";

fn build_default_catalog_internal() -> Catalog {
    let mut profiles = HashMap::new();

    profiles.insert(
        BmiCategory::Underweight,
        CategoryProfile {
            category: BmiCategory::Underweight,
            label: "Underweight".into(),
            description: "Your BMI suggests you may be underweight. Consider consulting \
                          with a healthcare professional about healthy weight gain strategies."
                .into(),
            health_range: format!("Healthy BMI range: {}", HEALTHY_RANGE),
            tips: vec![
                "Eat nutrient-dense foods".into(),
                "Include healthy fats in your diet".into(),
                "Consider strength training".into(),
                "Consult a nutritionist".into(),
            ],
        },
    );

    profiles.insert(
        BmiCategory::NormalWeight,
        CategoryProfile {
            category: BmiCategory::NormalWeight,
            label: "Normal weight".into(),
            description: "Congratulations! Your BMI is within the healthy weight range. \
                          Maintain your current lifestyle with regular exercise and balanced \
                          nutrition."
                .into(),
            health_range: format!("You are in the healthy BMI range: {}", HEALTHY_RANGE),
            tips: vec![
                "Maintain current healthy habits".into(),
                "Stay physically active".into(),
                "Eat a balanced diet".into(),
                "Schedule regular health check-ups".into(),
            ],
        },
    );

    profiles.insert(
        BmiCategory::Overweight,
        CategoryProfile {
            category: BmiCategory::Overweight,
            label: "Overweight".into(),
            description: "Your BMI indicates you may be overweight. Consider adopting \
                          healthy lifestyle changes including regular exercise and balanced \
                          nutrition."
                .into(),
            health_range: format!("Healthy BMI range: {}", HEALTHY_RANGE),
            tips: vec![
                "Increase physical activity".into(),
                "Focus on portion control".into(),
                "Choose whole foods".into(),
                "Stay hydrated".into(),
            ],
        },
    );

    profiles.insert(
        BmiCategory::Obese,
        CategoryProfile {
            category: BmiCategory::Obese,
            label: "Obese".into(),
            description: "Your BMI suggests obesity. It's recommended to consult with \
                          healthcare professionals for personalized advice on healthy weight \
                          management."
                .into(),
            health_range: format!("Healthy BMI range: {}", HEALTHY_RANGE),
            tips: vec![
                "Consult healthcare professionals".into(),
                "Start with gradual lifestyle changes".into(),
                "Focus on sustainable habits".into(),
                "Consider professional support".into(),
            ],
        },
    );

    Catalog { profiles }
}

impl Catalog {
    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for category in BmiCategory::ALL {
            let profile = match self.profiles.get(&category) {
                Some(p) => p,
                None => {
                    errors.push(format!("Catalog has no profile for {:?}", category));
                    continue;
                }
            };

            if profile.category != category {
                errors.push(format!(
                    "Profile keyed {:?} declares category {:?}",
                    category, profile.category
                ));
            }
            if profile.label.is_empty() {
                errors.push(format!("Profile for {:?} has empty label", category));
            }
            if profile.description.is_empty() {
                errors.push(format!("Profile for {:?} has empty description", category));
            }
            if profile.health_range.is_empty() {
                errors.push(format!("Profile for {:?} has empty health range", category));
            }
            if profile.tips.is_empty() {
                errors.push(format!("Profile for {:?} has no tips", category));
            }
            for tip in &profile.tips {
                if tip.is_empty() {
                    errors.push(format!("Profile for {:?} has an empty tip", category));
                }
            }
        }

        errors
    }
}
