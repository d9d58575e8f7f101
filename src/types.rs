//! Core data types for imulog
//!
//! # Main Types
//!
//! - [`Reading`] - One x/y/z accelerometer sample parsed from a device line
//!
//! # Value Formatting
//!
//! Values are rendered in shortest round-trip form and integral values keep a
//! trailing `.0`, so a reading parsed from `X: 1.5 Y: -2.25 Z: 3.0` is written
//! back out as `1.5,-2.25,3.0`. Very large or small magnitudes switch to
//! exponent form such as `1e+16` or `1.5e-05`.

use std::fmt;

/// CSV header row written at the top of every output file
pub const CSV_HEADER: &str = "x,y,z";

/// Terminator after the header and every row
pub const ROW_TERMINATOR: &str = "\r\n";

/// A single x/y/z sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Reading {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Render as a CSV row (without line terminator)
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{}",
            FormatValue(self.x),
            FormatValue(self.y),
            FormatValue(self.z)
        )
    }
}

/// Console form: `x, y, z`
impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}",
            FormatValue(self.x),
            FormatValue(self.y),
            FormatValue(self.z)
        )
    }
}

/// Shortest round-trip rendering of an `f64` that keeps `.0` on integral values
///
/// Exponents carry an explicit sign and at least two digits (`1e+16`,
/// `1.5e-05`) and non-finite values are written `nan`, `inf` and `-inf`.
pub struct FormatValue(pub f64);

impl fmt::Display for FormatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_nan() {
            return f.write_str("nan");
        }

        // Debug already produces `3.0` rather than `3`, and `inf`/`-inf`
        let repr = format!("{:?}", self.0);
        match repr.split_once('e') {
            Some((mantissa, exponent)) => {
                let (sign, digits) = match exponent.strip_prefix('-') {
                    Some(digits) => ('-', digits),
                    None => ('+', exponent),
                };
                write!(f, "{}e{}{:0>2}", mantissa, sign, digits)
            }
            None => f.write_str(&repr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_row() {
        let r = Reading::new(1.5, -2.25, 3.0);
        assert_eq!(r.to_csv_row(), "1.5,-2.25,3.0");
    }

    #[test]
    fn test_display() {
        let r = Reading::new(0.123, -1.045, 9.812);
        assert_eq!(r.to_string(), "0.123, -1.045, 9.812");
    }

    #[test]
    fn test_exponent_form() {
        assert_eq!(FormatValue(1e16).to_string(), "1e+16");
        assert_eq!(FormatValue(1.5e-5).to_string(), "1.5e-05");
        assert_eq!(FormatValue(-2.5e-120).to_string(), "-2.5e-120");
        assert_eq!(FormatValue(1e300).to_string(), "1e+300");
        assert_eq!(FormatValue(0.0001).to_string(), "0.0001");
        assert_eq!(FormatValue(1e15).to_string(), "1000000000000000.0");
    }

    #[test]
    fn test_non_finite_values() {
        assert_eq!(FormatValue(f64::NAN).to_string(), "nan");
        assert_eq!(FormatValue(f64::INFINITY).to_string(), "inf");
        assert_eq!(FormatValue(f64::NEG_INFINITY).to_string(), "-inf");
    }

    #[test]
    fn test_integral_values_keep_fraction() {
        assert_eq!(FormatValue(0.0).to_string(), "0.0");
        assert_eq!(FormatValue(-16.0).to_string(), "-16.0");
    }
}
