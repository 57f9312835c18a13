use derive_more::{AsRef, Deref, Display, From, Into};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

const MAX_PRECISION: usize = 15;
const DEFAULT_PRECISION: usize = 2;

/// Text shown in the middle of the ring.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct ValueText(String);

crate::impl_string_newtype!(ValueText);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, StrumDisplay)]
#[strum(ascii_case_insensitive)]
pub enum FormatKind {
    /// Fixed decimals with thousands separators.
    #[strum(serialize = "N")]
    Number,
    /// Fixed decimals.
    #[strum(serialize = "F")]
    Fixed,
    /// Fixed decimals followed by a percent sign.
    #[strum(serialize = "P")]
    Percent,
    /// Shortest representation.
    #[strum(serialize = "G")]
    General,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Empty format specifier")]
    Empty,
    #[error("Unknown format specifier '{0}'")]
    UnknownKind(String),
    #[error("Invalid precision '{0}' (expected 0-15)")]
    InvalidPrecision(String),
}

/// A numeric format specifier such as `N0`, `F2`, `P1` or `G`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, DeserializeFromStr, SerializeDisplay)]
pub struct ValueFormat {
    pub kind: FormatKind,
    pub precision: Option<usize>,
}

impl Default for ValueFormat {
    fn default() -> Self {
        Self {
            kind: FormatKind::Number,
            precision: Some(0),
        }
    }
}

impl ValueFormat {
    pub fn new(kind: FormatKind, precision: Option<usize>) -> Self {
        Self { kind, precision }
    }

    pub fn format(&self, value: f64) -> ValueText {
        let precision = self.precision.unwrap_or(DEFAULT_PRECISION);
        let text = match self.kind {
            FormatKind::Number => group_thousands(&format!("{value:.precision$}")),
            FormatKind::Fixed => format!("{value:.precision$}"),
            FormatKind::Percent => format!("{value:.precision$}%"),
            FormatKind::General => match self.precision {
                Some(digits) if digits > 0 => format_significant(value, digits),
                _ => value.to_string(),
            },
        };
        ValueText::new(text)
    }
}

impl fmt::Display for ValueFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(precision) = self.precision {
            write!(f, "{precision}")?;
        }
        Ok(())
    }
}

impl FromStr for ValueFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let head = chars.next().ok_or(FormatError::Empty)?;
        let kind = FormatKind::from_str(&head.to_string())
            .map_err(|_| FormatError::UnknownKind(s.to_string()))?;

        let digits = chars.as_str();
        let precision = if digits.is_empty() {
            None
        } else {
            let p = digits
                .parse::<usize>()
                .ok()
                .filter(|p| *p <= MAX_PRECISION)
                .ok_or_else(|| FormatError::InvalidPrecision(digits.to_string()))?;
            Some(p)
        };

        Ok(Self { kind, precision })
    }
}

fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Rounds to `digits` significant digits and prints the shortest decimal form.
/// Integer digits beyond `digits` are kept as is; there is no switch to
/// exponent notation, so `G2` of 1234 prints `1234`.
fn format_significant(value: f64, digits: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return value.to_string();
    }
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (digits as i32 - 1 - magnitude).max(0) as usize;
    let rounded: f64 = format!("{value:.decimals$}").parse().unwrap_or(value);
    rounded.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_specifiers() {
        assert_eq!(
            "N0".parse::<ValueFormat>().unwrap(),
            ValueFormat::new(FormatKind::Number, Some(0))
        );
        assert_eq!(
            "f2".parse::<ValueFormat>().unwrap(),
            ValueFormat::new(FormatKind::Fixed, Some(2))
        );
        assert_eq!(
            "G".parse::<ValueFormat>().unwrap(),
            ValueFormat::new(FormatKind::General, None)
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<ValueFormat>(), Err(FormatError::Empty));
        assert!(matches!(
            "X2".parse::<ValueFormat>(),
            Err(FormatError::UnknownKind(_))
        ));
        assert!(matches!(
            "N99".parse::<ValueFormat>(),
            Err(FormatError::InvalidPrecision(_))
        ));
        assert!(matches!(
            "Nx".parse::<ValueFormat>(),
            Err(FormatError::InvalidPrecision(_))
        ));
    }

    #[test]
    fn test_format_values() {
        let cases = [
            ("N0", 42.0, "42"),
            ("N0", 77.6, "78"),
            ("N2", 1234.5, "1,234.50"),
            ("N0", -1234567.0, "-1,234,567"),
            ("F1", 33.333, "33.3"),
            ("P0", 80.0, "80%"),
            ("G", 12.25, "12.25"),
            ("G3", 12.345, "12.3"),
            ("G2", 1234.0, "1234"),
            ("N", 5.0, "5.00"),
        ];
        for (specifier, value, expected) in cases {
            let format: ValueFormat = specifier.parse().unwrap();
            assert_eq!(format.format(value).as_str(), expected, "{specifier} {value}");
        }
    }

    #[test]
    fn test_default_is_n0() {
        assert_eq!(ValueFormat::default().to_string(), "N0");
    }

    #[test]
    fn test_serde_round_trips_through_string() {
        let format: ValueFormat = serde_json::from_str("\"p1\"").unwrap();
        assert_eq!(format, ValueFormat::new(FormatKind::Percent, Some(1)));
        assert_eq!(serde_json::to_string(&format).unwrap(), "\"P1\"");
    }
}
