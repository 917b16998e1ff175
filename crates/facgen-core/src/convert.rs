//! # Scalar Converters
//!
//! The built-in scalar types and the literal rules each one applies.
//!
//! ## Unit Suffixes
//!
//! Numeric strings may carry a single trailing unit letter selecting a
//! binary multiplier:
//!
//! | suffix   | factor |
//! |----------|--------|
//! | `k`, `K` | 1024   |
//! | `m`, `M` | 1024²  |
//! | `g`, `G` | 1024³  |
//!
//! Any other trailing text leaves the value unscaled. Time values use their
//! own suffix table ([`TimeUnit`]) and default to picoseconds.

use std::fmt;

use serde_yaml::Value;

use crate::error::ConvertError;
use crate::types::TypeConverter;

const KIB: i128 = 1024;

/// Multiplier selected by a size unit letter.
pub fn size_multiplier(unit: Option<char>) -> i128 {
    match unit {
        Some('k' | 'K') => KIB,
        Some('m' | 'M') => KIB * KIB,
        Some('g' | 'G') => KIB * KIB * KIB,
        _ => 1,
    }
}

/// Short textual form of a raw value for error messages.
pub(crate) fn describe_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Sequence(_) => "<sequence>".to_string(),
        Value::Mapping(_) => "<mapping>".to_string(),
        Value::Tagged(tagged) => describe_value(&tagged.value),
    }
}

/// Split `s` into its leading signed integer and the character after it.
fn leading_integer(s: &str) -> Option<(i128, Option<char>)> {
    let s = s.trim();
    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }

    let magnitude: i128 = rest[..end].parse().ok()?;
    let value = if negative { -magnitude } else { magnitude };
    Some((value, rest[end..].chars().next()))
}

/// Split `s` into its leading decimal number and the remaining text.
fn leading_float(s: &str) -> Option<(f64, &str)> {
    let s = s.trim();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'-' | b'+')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - digits_start;
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        let frac_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        digits += end - frac_start;
    }
    if digits == 0 {
        return None;
    }

    // Exponent only when digits follow, so "2e" keeps `e` as trailing text.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'-' | b'+') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    let value: f64 = s[..end].parse().ok()?;
    Some((value, &s[end..]))
}

/// Render a float so that C++ reads it as a floating literal.
fn float_literal(value: f64) -> String {
    format!("{value:?}")
}

// ─── string ─────────────────────────────────────────────────────────

/// `string` — rendered verbatim inside double quotes.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringType;

impl TypeConverter for StringType {
    fn type_name(&self) -> &str {
        "string"
    }

    fn cc_type(&self) -> String {
        "std::string".to_string()
    }

    fn convert(&self, raw: &Value) -> Result<String, ConvertError> {
        let text = match raw {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.clone(),
            Value::Tagged(tagged) => return self.convert(&tagged.value),
            Value::Sequence(_) | Value::Mapping(_) => {
                return Err(ConvertError::invalid(
                    describe_value(raw),
                    "string",
                    "only scalar values can be rendered as a string",
                ))
            }
        };
        Ok(format!("\"{text}\""))
    }
}

// ─── integers ───────────────────────────────────────────────────────

/// `integer` and the fixed-width `intN` / `uintN` types.
#[derive(Debug, Clone, Copy)]
pub struct IntType {
    name: &'static str,
    cc_type: &'static str,
    min: i128,
    max: i128,
}

impl IntType {
    const fn new(name: &'static str, cc_type: &'static str, min: i128, max: i128) -> Self {
        Self {
            name,
            cc_type,
            min,
            max,
        }
    }

    /// Every built-in integer type.
    pub fn all() -> [IntType; 9] {
        [
            Self::new("integer", "int", i32::MIN as i128, i32::MAX as i128),
            Self::new("int8", "int8_t", i8::MIN as i128, i8::MAX as i128),
            Self::new("int16", "int16_t", i16::MIN as i128, i16::MAX as i128),
            Self::new("int32", "int32_t", i32::MIN as i128, i32::MAX as i128),
            Self::new("int64", "int64_t", i64::MIN as i128, i64::MAX as i128),
            Self::new("uint8", "uint8_t", 0, u8::MAX as i128),
            Self::new("uint16", "uint16_t", 0, u16::MAX as i128),
            Self::new("uint32", "uint32_t", 0, u32::MAX as i128),
            Self::new("uint64", "uint64_t", 0, u64::MAX as i128),
        ]
    }

    /// Parse `raw` into an integer, applying the size unit of string forms.
    pub fn parse(&self, raw: &Value) -> Result<i128, ConvertError> {
        let value = match raw {
            Value::Number(n) => n
                .as_i64()
                .map(i128::from)
                .or_else(|| n.as_u64().map(i128::from))
                .ok_or_else(|| {
                    ConvertError::invalid(n.to_string(), self.name, "not an integer")
                })?,
            Value::String(s) => {
                let (magnitude, unit) = leading_integer(s).ok_or_else(|| {
                    ConvertError::invalid(s.as_str(), self.name, "no leading integer")
                })?;
                magnitude
                    .checked_mul(size_multiplier(unit))
                    .ok_or_else(|| self.out_of_range(raw))?
            }
            Value::Tagged(tagged) => return self.parse(&tagged.value),
            other => {
                return Err(ConvertError::invalid(
                    describe_value(other),
                    self.name,
                    "not an integer",
                ))
            }
        };

        if value < self.min || value > self.max {
            return Err(self.out_of_range(raw));
        }
        Ok(value)
    }

    fn out_of_range(&self, raw: &Value) -> ConvertError {
        ConvertError::OutOfRange {
            value: describe_value(raw),
            target: self.name.to_string(),
            min: self.min,
            max: self.max,
        }
    }
}

impl TypeConverter for IntType {
    fn type_name(&self) -> &str {
        self.name
    }

    fn cc_type(&self) -> String {
        self.cc_type.to_string()
    }

    fn convert(&self, raw: &Value) -> Result<String, ConvertError> {
        self.parse(raw).map(|v| v.to_string())
    }
}

// ─── floating point ─────────────────────────────────────────────────

/// `double` and `float`.
#[derive(Debug, Clone, Copy)]
pub struct FloatType {
    name: &'static str,
}

impl FloatType {
    /// The `double` type.
    pub const fn double() -> Self {
        Self { name: "double" }
    }

    /// The `float` type.
    pub const fn float() -> Self {
        Self { name: "float" }
    }

    /// Parse `raw` into a finite float, applying the size unit of string forms.
    pub fn parse(&self, raw: &Value) -> Result<f64, ConvertError> {
        let value = match raw {
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| ConvertError::invalid(n.to_string(), self.name, "not a number"))?,
            Value::String(s) => {
                let (magnitude, rest) = leading_float(s).ok_or_else(|| {
                    ConvertError::invalid(s.as_str(), self.name, "no leading number")
                })?;
                magnitude * size_multiplier(rest.chars().next()) as f64
            }
            Value::Tagged(tagged) => return self.parse(&tagged.value),
            other => {
                return Err(ConvertError::invalid(
                    describe_value(other),
                    self.name,
                    "not a number",
                ))
            }
        };

        if !value.is_finite() {
            return Err(ConvertError::invalid(
                describe_value(raw),
                self.name,
                "not a finite number",
            ));
        }
        Ok(value)
    }
}

impl TypeConverter for FloatType {
    fn type_name(&self) -> &str {
        self.name
    }

    fn cc_type(&self) -> String {
        self.name.to_string()
    }

    fn convert(&self, raw: &Value) -> Result<String, ConvertError> {
        match raw {
            // Native integers stay integers; C++ widens them implicitly.
            Value::Number(n) if n.is_i64() || n.is_u64() => Ok(n.to_string()),
            _ => self.parse(raw).map(float_literal),
        }
    }
}

// ─── boolean ────────────────────────────────────────────────────────

/// `boolean` — `true`/`1` and `false`/`0`, case-insensitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanType;

impl BooleanType {
    /// Interpret `raw` as a boolean.
    pub fn parse(&self, raw: &Value) -> Result<bool, ConvertError> {
        let text = match raw {
            Value::Bool(b) => return Ok(*b),
            Value::String(s) => s.trim().to_ascii_lowercase(),
            Value::Number(n) => n.to_string(),
            Value::Tagged(tagged) => return self.parse(&tagged.value),
            other => describe_value(other),
        };

        match text.as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(ConvertError::invalid(
                describe_value(raw),
                "boolean",
                "expected one of true, false, 1, 0",
            )),
        }
    }
}

impl TypeConverter for BooleanType {
    fn type_name(&self) -> &str {
        "boolean"
    }

    fn cc_type(&self) -> String {
        "bool".to_string()
    }

    fn convert(&self, raw: &Value) -> Result<String, ConvertError> {
        self.parse(raw).map(|b| b.to_string())
    }
}

// ─── time ───────────────────────────────────────────────────────────

/// SystemC time units accepted as `time` suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    /// Femtoseconds (`fs`).
    Fs,
    /// Picoseconds (`ps`), the default.
    Ps,
    /// Nanoseconds (`ns`).
    Ns,
    /// Microseconds (`us`).
    Us,
    /// Milliseconds (`ms`).
    Ms,
    /// Seconds (`s`).
    S,
}

impl TimeUnit {
    /// Parse a unit suffix, case-insensitive.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix.trim().to_ascii_lowercase().as_str() {
            "fs" => Some(Self::Fs),
            "ps" => Some(Self::Ps),
            "ns" => Some(Self::Ns),
            "us" => Some(Self::Us),
            "ms" => Some(Self::Ms),
            "s" => Some(Self::S),
            _ => None,
        }
    }

    /// The `sc_core::sc_time_unit` enumerator.
    pub fn sc_unit(&self) -> &'static str {
        match self {
            Self::Fs => "sc_core::SC_FS",
            Self::Ps => "sc_core::SC_PS",
            Self::Ns => "sc_core::SC_NS",
            Self::Us => "sc_core::SC_US",
            Self::Ms => "sc_core::SC_MS",
            Self::S => "sc_core::SC_SEC",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Fs => "fs",
            Self::Ps => "ps",
            Self::Ns => "ns",
            Self::Us => "us",
            Self::Ms => "ms",
            Self::S => "s",
        };
        f.write_str(s)
    }
}

/// `time` — a magnitude and a unit, emitted as an `sc_time` constructor.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeType;

impl TimeType {
    /// Split `raw` into magnitude and unit. Unrecognized suffixes mean picoseconds.
    pub fn parse(&self, raw: &Value) -> Result<(f64, TimeUnit), ConvertError> {
        match raw {
            Value::Number(n) => n
                .as_f64()
                .map(|v| (v, TimeUnit::Ps))
                .ok_or_else(|| ConvertError::invalid(n.to_string(), "time", "not a number")),
            Value::String(s) => {
                let (magnitude, rest) = leading_float(s).ok_or_else(|| {
                    ConvertError::invalid(s.as_str(), "time", "no leading number")
                })?;
                Ok((magnitude, TimeUnit::from_suffix(rest).unwrap_or(TimeUnit::Ps)))
            }
            Value::Tagged(tagged) => self.parse(&tagged.value),
            other => Err(ConvertError::invalid(
                describe_value(other),
                "time",
                "expected a number with an optional unit",
            )),
        }
    }
}

impl TypeConverter for TimeType {
    fn type_name(&self) -> &str {
        "time"
    }

    fn cc_type(&self) -> String {
        "sc_core::sc_time".to_string()
    }

    fn convert(&self, raw: &Value) -> Result<String, ConvertError> {
        let (magnitude, unit) = self.parse(raw)?;
        if !magnitude.is_finite() {
            return Err(ConvertError::invalid(
                describe_value(raw),
                "time",
                "not a finite number",
            ));
        }
        let magnitude = if magnitude.fract() == 0.0 && magnitude.abs() < 1e15 {
            format!("{}", magnitude as i64)
        } else {
            float_literal(magnitude)
        };
        Ok(format!("sc_core::sc_time({magnitude}, {})", unit.sc_unit()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(src: &str) -> Value {
        serde_yaml::from_str(src).unwrap()
    }

    fn int(name: &str) -> IntType {
        IntType::all()
            .into_iter()
            .find(|t| t.type_name() == name)
            .unwrap()
    }

    #[test]
    fn integer_unit_suffixes_are_binary() {
        assert_eq!(int("integer").convert(&yaml("\"4k\"")).unwrap(), "4096");
        assert_eq!(int("uint32").convert(&yaml("\"2M\"")).unwrap(), "2097152");
        assert_eq!(int("int64").convert(&yaml("\"1g\"")).unwrap(), "1073741824");
        assert_eq!(int("int64").convert(&yaml("\"3G\"")).unwrap(), "3221225472");
    }

    #[test]
    fn integer_without_unit_is_unscaled() {
        assert_eq!(int("integer").convert(&yaml("\"17\"")).unwrap(), "17");
        assert_eq!(int("integer").convert(&yaml("\"17x\"")).unwrap(), "17");
        assert_eq!(int("integer").convert(&yaml("\"-8k\"")).unwrap(), "-8192");
    }

    #[test]
    fn native_integer_is_identity() {
        assert_eq!(int("integer").convert(&yaml("42")).unwrap(), "42");
        assert_eq!(int("uint64").convert(&yaml("18446744073709551615")).unwrap(), "18446744073709551615");
    }

    #[test]
    fn integer_range_is_checked() {
        let err = int("uint8").convert(&yaml("\"1k\"")).unwrap_err();
        assert!(matches!(err, ConvertError::OutOfRange { max: 255, .. }), "got {err:?}");
        assert!(int("uint16").convert(&yaml("-1")).is_err());
    }

    #[test]
    fn unit_suffix_overflowing_int_is_out_of_range() {
        let err = int("integer").convert(&yaml("\"4g\"")).unwrap_err();
        assert_eq!(
            err,
            ConvertError::OutOfRange {
                value: "4g".to_string(),
                target: "integer".to_string(),
                min: i32::MIN as i128,
                max: i32::MAX as i128,
            }
        );
        assert!(err.to_string().contains("out of range for integer"));
        assert_eq!(int("int64").convert(&yaml("\"4g\"")).unwrap(), "4294967296");
    }

    #[test]
    fn integer_without_digits_fails() {
        assert!(int("integer").convert(&yaml("\"k\"")).is_err());
        assert!(int("integer").convert(&yaml("true")).is_err());
        assert!(int("integer").convert(&yaml("1.5")).is_err());
    }

    #[test]
    fn float_literals_keep_a_decimal_point() {
        let double = FloatType::double();
        assert_eq!(double.convert(&yaml("\"2k\"")).unwrap(), "2048.0");
        assert_eq!(double.convert(&yaml("\"0.5M\"")).unwrap(), "524288.0");
        assert_eq!(double.convert(&yaml("1.25")).unwrap(), "1.25");
        assert_eq!(double.convert(&yaml("3")).unwrap(), "3");
        assert_eq!(FloatType::float().cc_type(), "float");
    }

    #[test]
    fn float_exponent_requires_digits() {
        let double = FloatType::double();
        assert_eq!(double.convert(&yaml("\"1e3\"")).unwrap(), "1000.0");
        assert_eq!(double.convert(&yaml("\"2e\"")).unwrap(), "2.0");
        assert!(double.convert(&yaml("\".\"")).is_err());
    }

    #[test]
    fn boolean_vocabulary() {
        let b = BooleanType;
        assert_eq!(b.convert(&yaml("\"TRUE\"")).unwrap(), "true");
        assert_eq!(b.convert(&yaml("\"1\"")).unwrap(), "true");
        assert_eq!(b.convert(&yaml("\"0\"")).unwrap(), "false");
        assert_eq!(b.convert(&yaml("\"False\"")).unwrap(), "false");
        assert_eq!(b.convert(&yaml("1")).unwrap(), "true");
        assert_eq!(b.convert(&yaml("true")).unwrap(), "true");
        assert_eq!(b.convert(&yaml("false")).unwrap(), "false");
    }

    #[test]
    fn boolean_rejects_other_words() {
        let err = BooleanType.convert(&yaml("maybe")).unwrap_err();
        assert!(err.to_string().contains("cannot convert `maybe' to boolean"));
        assert!(BooleanType.convert(&yaml("2")).is_err());
    }

    #[test]
    fn string_is_quoted_verbatim() {
        assert_eq!(StringType.convert(&yaml("stderr")).unwrap(), "\"stderr\"");
        assert_eq!(StringType.convert(&yaml("\"\"")).unwrap(), "\"\"");
        assert_eq!(StringType.convert(&yaml("~")).unwrap(), "\"\"");
        assert_eq!(StringType.convert(&yaml("12")).unwrap(), "\"12\"");
        assert!(StringType.convert(&yaml("[a]")).is_err());
    }

    #[test]
    fn time_units() {
        let t = TimeType;
        assert_eq!(t.convert(&yaml("\"10ns\"")).unwrap(), "sc_core::sc_time(10, sc_core::SC_NS)");
        assert_eq!(t.convert(&yaml("\"10 NS\"")).unwrap(), "sc_core::sc_time(10, sc_core::SC_NS)");
        assert_eq!(t.convert(&yaml("\"2.5ms\"")).unwrap(), "sc_core::sc_time(2.5, sc_core::SC_MS)");
        assert_eq!(t.convert(&yaml("\"1s\"")).unwrap(), "sc_core::sc_time(1, sc_core::SC_SEC)");
        assert_eq!(t.convert(&yaml("\"3fs\"")).unwrap(), "sc_core::sc_time(3, sc_core::SC_FS)");
        assert_eq!(t.convert(&yaml("\"4us\"")).unwrap(), "sc_core::sc_time(4, sc_core::SC_US)");
    }

    #[test]
    fn time_defaults_to_picoseconds() {
        let t = TimeType;
        assert_eq!(t.convert(&yaml("100")).unwrap(), "sc_core::sc_time(100, sc_core::SC_PS)");
        assert_eq!(t.convert(&yaml("\"100\"")).unwrap(), "sc_core::sc_time(100, sc_core::SC_PS)");
        assert_eq!(t.convert(&yaml("\"100 parsecs\"")).unwrap(), "sc_core::sc_time(100, sc_core::SC_PS)");
        assert!(t.convert(&yaml("\"ns\"")).is_err());
    }

    #[test]
    fn time_unit_display_round_trips_suffix() {
        for unit in [TimeUnit::Fs, TimeUnit::Ps, TimeUnit::Ns, TimeUnit::Us, TimeUnit::Ms, TimeUnit::S] {
            assert_eq!(TimeUnit::from_suffix(&unit.to_string()), Some(unit));
        }
    }
}
