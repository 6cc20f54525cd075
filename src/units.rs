//! Kitchen unit table and converter.
//!
//! Every unit belongs to one dimension and carries a factor relative to the
//! dimension's base unit (milliliter for volume, gram for weight). A value
//! converts as `value * factor(from) / factor(to)`.

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::error::ConversionError;

/// A family of units that can be converted between each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Volume,
    Weight,
}

/// Units known to the converter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Milliliter,
    Liter,
    Cup,
    Tablespoon,
    Teaspoon,
    FluidOunce,
    Pint,
    Quart,
    Gallon,
    Gram,
    Kilogram,
    Ounce,
    Pound,
}

impl Unit {
    pub const ALL: [Unit; 13] = [
        Unit::Milliliter,
        Unit::Liter,
        Unit::Cup,
        Unit::Tablespoon,
        Unit::Teaspoon,
        Unit::FluidOunce,
        Unit::Pint,
        Unit::Quart,
        Unit::Gallon,
        Unit::Gram,
        Unit::Kilogram,
        Unit::Ounce,
        Unit::Pound,
    ];

    pub fn dimension(self) -> Dimension {
        match self {
            Unit::Gram | Unit::Kilogram | Unit::Ounce | Unit::Pound => Dimension::Weight,
            _ => Dimension::Volume,
        }
    }

    /// Size of one unit expressed in the dimension's base unit
    pub fn factor(self) -> f64 {
        match self {
            Unit::Milliliter => 1.0,
            Unit::Liter => 1000.0,
            Unit::Cup => 240.0,
            Unit::Tablespoon => 15.0,
            Unit::Teaspoon => 5.0,
            Unit::FluidOunce => 29.5735,
            Unit::Pint => 473.176,
            Unit::Quart => 946.353,
            Unit::Gallon => 3785.41,
            Unit::Gram => 1.0,
            Unit::Kilogram => 1000.0,
            Unit::Ounce => 28.3495,
            Unit::Pound => 453.592,
        }
    }

    /// Short code shown in the calculator
    pub fn code(self) -> &'static str {
        match self {
            Unit::Milliliter => "ml",
            Unit::Liter => "l",
            Unit::Cup => "cup",
            Unit::Tablespoon => "tbsp",
            Unit::Teaspoon => "tsp",
            Unit::FluidOunce => "fl-oz",
            Unit::Pint => "pint",
            Unit::Quart => "quart",
            Unit::Gallon => "gallon",
            Unit::Gram => "g",
            Unit::Kilogram => "kg",
            Unit::Ounce => "oz",
            Unit::Pound => "lb",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Unit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', '.'], "");
        let unit = match normalized.as_str() {
            "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => Unit::Milliliter,
            "l" | "liter" | "liters" | "litre" | "litres" => Unit::Liter,
            "cup" | "cups" | "c" => Unit::Cup,
            "tbsp" | "tablespoon" | "tablespoons" | "tbs" => Unit::Tablespoon,
            "tsp" | "teaspoon" | "teaspoons" => Unit::Teaspoon,
            "fl-oz" | "floz" | "fl oz" | "fluid ounce" | "fluid ounces" | "fluid-ounce" => {
                Unit::FluidOunce
            }
            "pint" | "pints" | "pt" => Unit::Pint,
            "quart" | "quarts" | "qt" => Unit::Quart,
            "gallon" | "gallons" | "gal" => Unit::Gallon,
            "g" | "gram" | "grams" | "gramme" | "grammes" => Unit::Gram,
            "kg" | "kilogram" | "kilograms" | "kilo" | "kilos" => Unit::Kilogram,
            "oz" | "ounce" | "ounces" => Unit::Ounce,
            "lb" | "lbs" | "pound" | "pounds" => Unit::Pound,
            _ => return Err(ConversionError::UnknownUnit(s.trim().to_string())),
        };
        Ok(unit)
    }
}

/// Result of a successful conversion
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub value: f64,
    pub unit: Unit,
    pub display: String,
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.display, self.unit)
    }
}

/// Convert a non-negative value between two units of the same dimension.
pub fn convert(value: f64, from: Unit, to: Unit) -> Result<f64, ConversionError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConversionError::InvalidInput);
    }
    if from.dimension() != to.dimension() {
        return Err(ConversionError::IncompatibleDimensions {
            from: from.code().to_string(),
            to: to.code().to_string(),
        });
    }
    Ok(value * from.factor() / to.factor())
}

/// Convert the raw text of the calculator's input field.
///
/// Unit names accept the short codes as well as common long forms.
pub fn convert_units(input: &str, from: &str, to: &str) -> Result<Conversion, ConversionError> {
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| ConversionError::InvalidInput)?;
    if !value.is_finite() || value < 0.0 {
        return Err(ConversionError::InvalidInput);
    }
    let from: Unit = from.parse()?;
    let to: Unit = to.parse()?;

    let result = convert(value, from, to)?;
    debug!("converted {} {} -> {} {}", value, from, result, to);

    Ok(Conversion {
        value: result,
        unit: to,
        display: format_converted(result),
    })
}

/// Precision policy for converted values: large values lose their decimals,
/// small ones keep up to three.
pub fn format_converted(value: f64) -> String {
    let magnitude = value.abs();
    let decimals = if magnitude >= 1000.0 {
        0
    } else if magnitude >= 10.0 {
        1
    } else if magnitude >= 1.0 {
        2
    } else {
        3
    };
    format!("{:.*}", decimals, round_to(value, decimals as i32))
}

/// Round half away from zero at `decimals` places. `format!` alone rounds
/// exact ties to even.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cups_to_milliliters() {
        let conversion = convert_units("2", "cup", "ml").unwrap();
        assert_eq!(conversion.value, 480.0);
        assert_eq!(conversion.display, "480.0");
        assert_eq!(conversion.to_string(), "480.0 ml");
    }

    #[test]
    fn test_cross_dimension_is_rejected() {
        let result = convert_units("1", "cup", "g");
        assert_eq!(
            result,
            Err(ConversionError::IncompatibleDimensions {
                from: "cup".to_string(),
                to: "g".to_string()
            })
        );
    }

    #[test]
    fn test_negative_input_is_invalid() {
        assert_eq!(
            convert_units("-1", "ml", "l"),
            Err(ConversionError::InvalidInput)
        );
        assert_eq!(
            convert(-1.0, Unit::Milliliter, Unit::Liter),
            Err(ConversionError::InvalidInput)
        );
    }

    #[test]
    fn test_non_numeric_input_is_invalid() {
        assert_eq!(
            convert_units("two", "cup", "ml"),
            Err(ConversionError::InvalidInput)
        );
        assert_eq!(convert_units("", "cup", "ml"), Err(ConversionError::InvalidInput));
        assert_eq!(
            convert_units("NaN", "cup", "ml"),
            Err(ConversionError::InvalidInput)
        );
    }

    #[test]
    fn test_unknown_unit() {
        assert_eq!(
            convert_units("1", "stone", "kg"),
            Err(ConversionError::UnknownUnit("stone".to_string()))
        );
    }

    #[test]
    fn test_weight_conversions() {
        let kg = convert(2.0, Unit::Pound, Unit::Kilogram).unwrap();
        assert!((kg - 0.907184).abs() < 1e-9);
        assert_eq!(format_converted(kg), "0.907");

        let grams = convert_units("3", "kg", "g").unwrap();
        assert_eq!(grams.display, "3000");
    }

    #[test]
    fn test_precision_policy() {
        assert_eq!(format_converted(3785.41), "3785");
        assert_eq!(format_converted(12.345), "12.3");
        assert_eq!(format_converted(4.0), "4.00");
        assert_eq!(format_converted(0.25), "0.250");
        assert_eq!(format_converted(0.0), "0.000");
    }

    #[test]
    fn test_precision_ties_round_up() {
        assert_eq!(format_converted(1000.5), "1001");
        assert_eq!(format_converted(12.25), "12.3");
        assert_eq!(format_converted(0.0625), "0.063");
    }

    #[test]
    fn test_unit_aliases() {
        assert_eq!("Cups".parse::<Unit>().unwrap(), Unit::Cup);
        assert_eq!("tablespoon".parse::<Unit>().unwrap(), Unit::Tablespoon);
        assert_eq!("fl oz".parse::<Unit>().unwrap(), Unit::FluidOunce);
        assert_eq!("fl-oz".parse::<Unit>().unwrap(), Unit::FluidOunce);
        assert_eq!("lbs".parse::<Unit>().unwrap(), Unit::Pound);
        assert_eq!(" L ".parse::<Unit>().unwrap(), Unit::Liter);
    }

    #[test]
    fn test_every_code_round_trips_through_parse() {
        for unit in Unit::ALL {
            assert_eq!(unit.code().parse::<Unit>().unwrap(), unit);
        }
    }

    #[test]
    fn test_same_unit_is_identity() {
        assert_eq!(convert(7.5, Unit::Teaspoon, Unit::Teaspoon).unwrap(), 7.5);
    }
}
