//! Core domain types for the BMI calculator.
//!
//! This module defines the fundamental types used throughout the system:
//! - Measurement units and raw form input
//! - Validation errors and reports
//! - BMI categories and their display profiles
//! - Calculation records (analytics events)
//! - Persisted user preferences

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

// ============================================================================
// Measurement Units
// ============================================================================

/// Unit a weight value was entered in
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

/// Unit a height value was entered in
///
/// In `Ft` mode the height field holds whole feet and a separate inches
/// field holds the remainder.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum HeightUnit {
    #[default]
    Cm,
    Ft,
}

impl WeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
        }
    }

    /// Parse a unit selector string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "kg" | "kgs" | "kilograms" => Some(WeightUnit::Kg),
            "lb" | "lbs" | "pounds" => Some(WeightUnit::Lbs),
            _ => None,
        }
    }
}

impl HeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeightUnit::Cm => "cm",
            HeightUnit::Ft => "ft",
        }
    }

    /// Parse a unit selector string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cm" | "centimeters" => Some(HeightUnit::Cm),
            "ft" | "feet" => Some(HeightUnit::Ft),
            _ => None,
        }
    }
}

// ============================================================================
// Form Input Types
// ============================================================================

/// One raw calculator submission, exactly as entered
///
/// Values are kept as strings so that "empty", "not a number" and
/// "out of range" remain distinguishable during validation. The inches
/// field is only meaningful when `height_unit` is `Ft`.
#[derive(Clone, Debug, Default)]
pub struct CalculatorInput {
    pub weight: String,
    pub height: String,
    pub inches: String,
    pub weight_unit: WeightUnit,
    pub height_unit: HeightUnit,
}

/// Input fields that validation errors are keyed by
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    Weight,
    Height,
    Inches,
}

/// Why a field failed validation
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InputErrorKind {
    /// A required field was empty
    MissingField,
    /// The field did not parse as a finite number
    NotANumber,
    /// The parsed value violates its bound
    OutOfRange,
}

/// A single user-visible validation failure
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: InputField,
    pub kind: InputErrorKind,
    pub message: String,
}

/// All validation failures for one submission
///
/// Fields are validated independently, so a report can carry one error
/// per field at once.
#[derive(Clone, Debug, Default)]
pub struct ValidationReport {
    errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn push(&mut self, field: InputField, kind: InputErrorKind, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            kind,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Get the error for a specific field, if any
    pub fn error_for(&self, field: InputField) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }
}

/// A submission that passed validation, with parsed numeric values
///
/// Inches default to 0 when the field was left empty in feet mode and are
/// forced to 0 in cm mode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValidatedInput {
    pub weight: f64,
    pub weight_unit: WeightUnit,
    pub height: f64,
    pub inches: f64,
    pub height_unit: HeightUnit,
}

// ============================================================================
// Category Types
// ============================================================================

/// BMI classification band
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    NormalWeight,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// All categories, in ascending BMI order
    pub const ALL: [BmiCategory; 4] = [
        BmiCategory::Underweight,
        BmiCategory::NormalWeight,
        BmiCategory::Overweight,
        BmiCategory::Obese,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "underweight",
            BmiCategory::NormalWeight => "normal_weight",
            BmiCategory::Overweight => "overweight",
            BmiCategory::Obese => "obese",
        }
    }

    /// Parse a category identifier string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "underweight" => Some(BmiCategory::Underweight),
            "normal" | "normal_weight" => Some(BmiCategory::NormalWeight),
            "overweight" => Some(BmiCategory::Overweight),
            "obese" => Some(BmiCategory::Obese),
            _ => None,
        }
    }
}

/// Display data for one BMI category
///
/// This is static lookup content, not logic: the label shown on the result
/// card, the longer description, the healthy-range reminder and a handful
/// of lifestyle tips.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CategoryProfile {
    pub category: BmiCategory,
    pub label: String,
    pub description: String,
    pub health_range: String,
    pub tips: Vec<String>,
}

// ============================================================================
// Calculation Record (analytics event)
// ============================================================================

/// A recorded `bmi_calculation` event
///
/// Carries the values the analytics collaborator needs; delivery and
/// transport are out of scope, the local event log is the handoff point.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CalculationRecord {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    /// BMI rounded to one decimal, as displayed
    pub bmi: f64,
    pub category: BmiCategory,
    pub weight_kg: f64,
    pub height_m: f64,
    pub weight_unit: WeightUnit,
    pub height_unit: HeightUnit,
}

// ============================================================================
// User Preferences
// ============================================================================

/// Persisted user preferences across invocations
///
/// Holds the last-used units so the next calculation defaults to them.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UserPrefs {
    #[serde(default)]
    pub weight_unit: WeightUnit,
    #[serde(default)]
    pub height_unit: HeightUnit,
}

// ============================================================================
// Catalog Type
// ============================================================================

/// The complete catalog of category display profiles
#[derive(Clone, Debug)]
pub struct Catalog {
    pub profiles: HashMap<BmiCategory, CategoryProfile>,
}

impl Catalog {
    /// Look up the profile for a category
    pub fn profile(&self, category: BmiCategory) -> Option<&CategoryProfile> {
        self.profiles.get(&category)
    }
}
