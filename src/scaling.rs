//! Serving adjustment and ingredient quantity scaling.

use log::trace;

use crate::units::round_to;

/// Serving count of the recipe on screen, relative to the count it was
/// fetched with. The current count never drops below one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Servings {
    original: u32,
    current: u32,
}

impl Servings {
    pub fn new(original: u32) -> Self {
        let original = original.max(1);
        Servings {
            original,
            current: original,
        }
    }

    pub fn original(&self) -> u32 {
        self.original
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn increment(&mut self) {
        self.current = self.current.saturating_add(1);
    }

    pub fn decrement(&mut self) {
        self.current = self.current.saturating_sub(1).max(1);
    }

    /// Apply a signed step, as the +/- buttons do
    pub fn adjust(&mut self, delta: i64) {
        let next = (i64::from(self.current) + delta).clamp(1, i64::from(u32::MAX));
        self.current = next as u32;
    }

    pub fn set(&mut self, servings: u32) {
        self.current = servings.max(1);
    }

    pub fn reset(&mut self) {
        self.current = self.original;
    }

    /// Multiplier applied to every ingredient quantity
    pub fn ratio(&self) -> f64 {
        f64::from(self.current) / f64::from(self.original)
    }
}

/// Scale the leading quantity of a measure string by `ratio`, keeping the
/// unit text untouched.
///
/// Measures without a usable leading number ("pinch of salt", "to taste")
/// come back unchanged, as do results that are not finite or negative.
///
/// ```
/// use ai_kitchen::scaling::scale_measure;
///
/// assert_eq!(scale_measure("1/2 cup", 2.0), "1 cup");
/// assert_eq!(scale_measure("1 1/2 tsp", 2.0), "3 tsp");
/// assert_eq!(scale_measure("pinch of salt", 2.0), "pinch of salt");
/// ```
pub fn scale_measure(measure: &str, ratio: f64) -> String {
    if !ratio.is_finite() || ratio <= 0.0 {
        return measure.to_string();
    }

    let Some((quantity, unit_text)) = split_measure(measure) else {
        return measure.to_string();
    };

    let scaled = parse_quantity(quantity) * ratio;
    if !scaled.is_finite() || scaled < 0.0 {
        trace!("leaving measure {:?} unscaled", measure);
        return measure.to_string();
    }

    format!("{}{}", format_quantity(scaled), unit_text)
}

/// Split a measure into its leading quantity and the remaining unit text.
///
/// The quantity is the leading run of digits, dots, slashes and whitespace.
/// Whitespace at the end of that run stays with the unit text so the
/// original spacing is kept. Returns `None` when the run holds no digit.
pub fn split_measure(measure: &str) -> Option<(&str, &str)> {
    let end = measure
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.' || *c == '/' || c.is_whitespace()))
        .map(|(i, _)| i)
        .unwrap_or(measure.len());

    let run = &measure[..end];
    if !run.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let quantity = run.trim_end();
    Some((quantity.trim_start(), &measure[quantity.len()..]))
}

/// Numeric value of a quantity: `a/b`, `a b/c` or a plain number.
///
/// Other shapes fall back to the longest leading number; `NaN` when there
/// is none.
pub fn parse_quantity(quantity: &str) -> f64 {
    let parts: Vec<&str> = quantity.split_whitespace().collect();

    match parts.as_slice() {
        [fraction] if fraction.contains('/') => {
            if let Some(value) = parse_fraction(fraction) {
                return value;
            }
        }
        [whole, fraction] if !whole.contains('/') && fraction.contains('/') => {
            if let (Ok(whole), Some(fraction)) = (whole.parse::<f64>(), parse_fraction(fraction)) {
                return whole + fraction;
            }
        }
        _ => {}
    }

    quantity
        .trim()
        .parse::<f64>()
        .unwrap_or_else(|_| leading_number(quantity))
}

fn parse_fraction(fraction: &str) -> Option<f64> {
    let (numerator, denominator) = fraction.split_once('/')?;
    let numerator: f64 = numerator.parse().ok()?;
    let denominator: f64 = denominator.parse().ok()?;
    Some(numerator / denominator)
}

fn leading_number(text: &str) -> f64 {
    let text = text.trim_start();
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in text.char_indices() {
        match c {
            '0'..='9' => end = i + 1,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
    }
    text[..end].parse().unwrap_or(f64::NAN)
}

/// Whole numbers render without decimals, everything else with one decimal
/// and no trailing ".0". Halves round away from zero, so 0.25 shows as 0.3.
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        return format!("{:.0}", value);
    }
    let rounded = format!("{:.1}", round_to(value, 1));
    match rounded.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => rounded,
    }
}
