//! Measurement unit value object

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::error::{DomainError, DomainResult};

/// Unit a meter reports its readings in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementUnit {
    /// Liters
    Liters,
    /// Cubic meters
    CubicMeters,
}

impl MeasurementUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Liters => "L",
            Self::CubicMeters => "M3",
        }
    }

    /// Parse from the wire/storage representation (`"L"` or `"M3"`).
    pub fn parse(s: &str) -> DomainResult<Self> {
        match s {
            "L" => Ok(Self::Liters),
            "M3" => Ok(Self::CubicMeters),
            other => Err(DomainError::InvalidMeasurementUnit(other.to_string())),
        }
    }

    /// Convert a raw reading into liters.
    pub fn normalize(&self, raw: Decimal) -> Decimal {
        match self {
            Self::Liters => raw,
            Self::CubicMeters => raw * Decimal::from(1000),
        }
    }

    /// Normalized value as the numeric type used for rate arithmetic.
    pub fn normalize_value(&self, raw: Decimal) -> DomainResult<f64> {
        self.normalize(raw)
            .to_f64()
            .ok_or_else(|| DomainError::Validation(format!("reading {} is out of range", raw)))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn liters_normalize_unchanged() {
        let raw = Decimal::from_str("1234.5").unwrap();
        assert_eq!(MeasurementUnit::Liters.normalize(raw), raw);
    }

    #[test]
    fn cubic_meters_normalize_times_thousand() {
        let raw = Decimal::from_str("18").unwrap();
        assert_eq!(
            MeasurementUnit::CubicMeters.normalize(raw),
            Decimal::from(18000)
        );
    }

    #[test]
    fn cubic_meters_keep_decimal_precision() {
        let raw = Decimal::from_str("0.001").unwrap();
        assert_eq!(
            MeasurementUnit::CubicMeters.normalize_value(raw).unwrap(),
            1.0
        );
    }

    #[test]
    fn parse_roundtrip() {
        for unit in &[MeasurementUnit::Liters, MeasurementUnit::CubicMeters] {
            assert_eq!(&MeasurementUnit::parse(unit.as_str()).unwrap(), unit);
        }
    }

    #[test]
    fn parse_rejects_unknown_unit() {
        let err = MeasurementUnit::parse("GAL").unwrap_err();
        assert!(matches!(err, DomainError::InvalidMeasurementUnit(u) if u == "GAL"));
    }
}
