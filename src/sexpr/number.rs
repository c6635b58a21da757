use std::{
    fmt::Display,
    ops::{Add, Mul, Sub},
};

/// The numeric abstraction behind the arithmetic primitives. A value stays
/// integer-representable until an operand parses only as float, a division
/// does not divide exactly, or an integer operation overflows; after that it
/// is float and stays float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntOrFloat {
    Int(i64),
    Float(f64),
}

impl IntOrFloat {
    /// Parses numeric source text. Hex (`0x`) and plain decimal runs parse
    /// as integers; a decimal point or exponent forces float. `None` means
    /// the text is not numeric at all.
    pub fn parse(text: &str) -> Option<IntOrFloat> {
        let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);

        if let Some(digits) = unsigned
            .strip_prefix("0x")
            .or_else(|| unsigned.strip_prefix("0X"))
        {
            let signed = if text.starts_with('-') {
                format!("-{digits}")
            } else {
                digits.to_owned()
            };
            return i64::from_str_radix(&signed, 16).ok().map(IntOrFloat::Int);
        }

        if !unsigned.contains('.') && !unsigned.contains(['e', 'E']) {
            if let Ok(value) = text.parse::<i64>() {
                return Some(IntOrFloat::Int(value));
            }
        }

        text.parse::<f64>().ok().map(IntOrFloat::Float)
    }

    pub fn as_f64(self) -> f64 {
        match self {
            IntOrFloat::Int(value) => value as f64,
            IntOrFloat::Float(value) => value,
        }
    }

    /// Numeric equality across representations: `2` equals `2.0`.
    pub fn equals(self, other: IntOrFloat) -> bool {
        match (self, other) {
            (IntOrFloat::Int(a), IntOrFloat::Int(b)) => a == b,
            (a, b) => a.as_f64() == b.as_f64(),
        }
    }

    /// `None` when the divisor is zero. Exact integer division stays
    /// integer; inexact division converts to float.
    pub fn checked_div(self, divisor: IntOrFloat) -> Option<IntOrFloat> {
        if divisor.as_f64() == 0.0 {
            return None;
        }
        match (self, divisor) {
            (IntOrFloat::Int(a), IntOrFloat::Int(b)) => {
                if a % b == 0 {
                    Some(IntOrFloat::Int(a / b))
                } else {
                    Some(IntOrFloat::Float(a as f64 / b as f64))
                }
            }
            (a, b) => Some(IntOrFloat::Float(a.as_f64() / b.as_f64())),
        }
    }

    /// Integer base and non-negative integer exponent fold integer
    /// multiplication; anything else goes through host `powf`.
    pub fn pow(self, exponent: IntOrFloat) -> IntOrFloat {
        match (self, exponent) {
            (IntOrFloat::Int(base), IntOrFloat::Int(exp)) if exp >= 0 => u32::try_from(exp)
                .ok()
                .and_then(|exp| base.checked_pow(exp))
                .map(IntOrFloat::Int)
                .unwrap_or_else(|| IntOrFloat::Float((base as f64).powf(exp as f64))),
            (base, exp) => IntOrFloat::Float(base.as_f64().powf(exp.as_f64())),
        }
    }
}

impl Add for IntOrFloat {
    type Output = IntOrFloat;

    fn add(self, rhs: IntOrFloat) -> IntOrFloat {
        match (self, rhs) {
            (IntOrFloat::Int(a), IntOrFloat::Int(b)) => a
                .checked_add(b)
                .map(IntOrFloat::Int)
                .unwrap_or(IntOrFloat::Float(a as f64 + b as f64)),
            (a, b) => IntOrFloat::Float(a.as_f64() + b.as_f64()),
        }
    }
}

impl Sub for IntOrFloat {
    type Output = IntOrFloat;

    fn sub(self, rhs: IntOrFloat) -> IntOrFloat {
        match (self, rhs) {
            (IntOrFloat::Int(a), IntOrFloat::Int(b)) => a
                .checked_sub(b)
                .map(IntOrFloat::Int)
                .unwrap_or(IntOrFloat::Float(a as f64 - b as f64)),
            (a, b) => IntOrFloat::Float(a.as_f64() - b.as_f64()),
        }
    }
}

impl Mul for IntOrFloat {
    type Output = IntOrFloat;

    fn mul(self, rhs: IntOrFloat) -> IntOrFloat {
        match (self, rhs) {
            (IntOrFloat::Int(a), IntOrFloat::Int(b)) => a
                .checked_mul(b)
                .map(IntOrFloat::Int)
                .unwrap_or(IntOrFloat::Float(a as f64 * b as f64)),
            (a, b) => IntOrFloat::Float(a.as_f64() * b.as_f64()),
        }
    }
}

/// Integers print bare; floats print with six decimal digits.
impl Display for IntOrFloat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntOrFloat::Int(value) => write!(f, "{value}"),
            IntOrFloat::Float(value) => write!(f, "{value:.6}"),
        }
    }
}
