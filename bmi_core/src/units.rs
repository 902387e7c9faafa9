//! Unit conversion for weight and height measurements.
//!
//! Conversions are pure, total functions: given validated input they have
//! no failure modes. Constants are named so the engine carries no magic
//! numbers.

use crate::{HeightUnit, WeightUnit};

/// Kilograms per pound
pub const KG_PER_POUND: f64 = 0.453592;

/// Meters per inch
pub const METERS_PER_INCH: f64 = 0.0254;

/// Inches per foot
pub const INCHES_PER_FOOT: f64 = 12.0;

/// Centimeters per meter
pub const CM_PER_METER: f64 = 100.0;

/// Normalize a weight value to kilograms
pub fn weight_to_kg(value: f64, unit: WeightUnit) -> f64 {
    match unit {
        WeightUnit::Kg => value,
        WeightUnit::Lbs => value * KG_PER_POUND,
    }
}

/// Normalize a height value to meters
///
/// `inches` is only read in feet mode, where the total height is
/// `feet * 12 + inches` converted at 0.0254 m per inch.
pub fn height_to_meters(value: f64, inches: f64, unit: HeightUnit) -> f64 {
    match unit {
        HeightUnit::Cm => value / CM_PER_METER,
        HeightUnit::Ft => (value * INCHES_PER_FOOT + inches) * METERS_PER_INCH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "expected {} ~ {}", a, b);
    }

    #[test]
    fn test_kg_passes_through() {
        assert_close(weight_to_kg(70.0, WeightUnit::Kg), 70.0);
    }

    #[test]
    fn test_lbs_to_kg() {
        assert_close(weight_to_kg(150.0, WeightUnit::Lbs), 68.0388);
    }

    #[test]
    fn test_cm_to_meters() {
        assert_close(height_to_meters(175.0, 0.0, HeightUnit::Cm), 1.75);
    }

    #[test]
    fn test_feet_and_inches_to_meters() {
        // 5 ft 8 in = 68 in = 1.7272 m
        assert_close(height_to_meters(5.0, 8.0, HeightUnit::Ft), 1.7272);
    }

    #[test]
    fn test_feet_without_inches() {
        // 6 ft = 72 in = 1.8288 m
        assert_close(height_to_meters(6.0, 0.0, HeightUnit::Ft), 1.8288);
    }

    #[test]
    fn test_inches_ignored_in_cm_mode() {
        assert_close(
            height_to_meters(170.0, 8.0, HeightUnit::Cm),
            height_to_meters(170.0, 0.0, HeightUnit::Cm),
        );
    }

    #[test]
    fn test_cm_and_feet_agree_near_170cm() {
        // 5 ft 6.93 in is 1.700022 m, within a hair of 170 cm
        let from_cm = height_to_meters(170.0, 0.0, HeightUnit::Cm);
        let from_ft = height_to_meters(5.0, 6.93, HeightUnit::Ft);
        assert!((from_cm - from_ft).abs() < 1e-3);
    }
}
