//! `<int> <op> <int>` evaluation.
//!
//! Operands are unbounded integers, so `+ - *` are exact. Division always
//! produces a float, printed the way a dynamic language would print it
//! (`5.0`, `2.5`, `1e-05`).

use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("На ноль делить нельзя :(")]
    DivisionByZero,
    #[error("Некорректный ввод чисел.")]
    InvalidNumber,
    #[error("Неизвестная операция.")]
    UnknownOperation,
    #[error("Слишком большое число.")]
    Overflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl FromStr for Operator {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Sub),
            "*" => Ok(Operator::Mul),
            "/" => Ok(Operator::Div),
            _ => Err(CalcError::UnknownOperation),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(BigInt),
    Float(f64),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => f.write_str(&format_float(*x)),
        }
    }
}

/// Shortest round-trip repr with a trailing `.0` for whole numbers and
/// scientific notation outside `[1e-4, 1e16)`.
fn format_float(x: f64) -> String {
    if !x.is_finite() {
        return x.to_string();
    }
    let magnitude = x.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let sci = format!("{:e}", x);
        return match sci.split_once('e') {
            Some((mantissa, exp)) => {
                let (sign, digits) = match exp.strip_prefix('-') {
                    Some(d) => ('-', d),
                    None => ('+', exp),
                };
                format!("{}e{}{:0>2}", mantissa, sign, digits)
            }
            None => sci,
        };
    }
    if x.fract() == 0.0 {
        format!("{:.1}", x)
    } else {
        x.to_string()
    }
}

/// Integers up to this many bits convert to `f64` without rounding.
const EXACT_F64_BITS: u64 = 53;

/// `x * 2^exp`, stepping so intermediate powers stay finite.
fn scale_by_pow2(mut x: f64, mut exp: i64) -> f64 {
    const STEP: i64 = 1000;
    while exp > STEP && x.is_finite() {
        x *= 2f64.powi(STEP as i32);
        exp -= STEP;
    }
    while exp < -STEP && x != 0.0 {
        x *= 2f64.powi(-STEP as i32);
        exp += STEP;
    }
    x * 2f64.powi(exp.clamp(-STEP, STEP) as i32)
}

fn true_divide(lhs: &BigInt, rhs: &BigInt) -> Result<f64, CalcError> {
    if rhs.is_zero() {
        return Err(CalcError::DivisionByZero);
    }
    let quotient = if lhs.bits() <= EXACT_F64_BITS && rhs.bits() <= EXACT_F64_BITS {
        match (lhs.to_f64(), rhs.to_f64()) {
            (Some(a), Some(b)) => a / b,
            _ => return Err(CalcError::Overflow),
        }
    } else {
        // integer quotient scaled to carry 64 significant bits
        let shift = rhs.bits() as i64 - lhs.bits() as i64 + 64;
        let scaled = if shift >= 0 {
            (lhs << shift as usize) / rhs
        } else {
            lhs / (rhs << shift.unsigned_abs() as usize)
        };
        let mantissa = scaled.to_f64().ok_or(CalcError::Overflow)?;
        scale_by_pow2(mantissa, -shift)
    };

    if quotient.is_finite() {
        Ok(quotient)
    } else {
        Err(CalcError::Overflow)
    }
}

pub fn evaluate(lhs: &BigInt, op: Operator, rhs: &BigInt) -> Result<Value, CalcError> {
    match op {
        Operator::Add => Ok(Value::Int(lhs + rhs)),
        Operator::Sub => Ok(Value::Int(lhs - rhs)),
        Operator::Mul => Ok(Value::Int(lhs * rhs)),
        Operator::Div => true_divide(lhs, rhs).map(Value::Float),
    }
}

static DECIMAL_DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d$").unwrap());

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    DECIMAL_DIGIT.is_match(c.encode_utf8(&mut buf))
}

/// Value of any character `\d` matches. Decimal digits are encoded in
/// contiguous runs that start at zero, so the offset from the start of the
/// run gives the value.
fn digit_value(c: char) -> Option<u32> {
    if let Some(d) = c.to_digit(10) {
        return Some(d);
    }
    if !is_decimal_digit(c) {
        return None;
    }
    let mut start = c as u32;
    while let Some(prev) = start.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        start -= 1;
    }
    Some((c as u32 - start) % 10)
}

fn parse_operand(s: &str) -> Result<BigInt, CalcError> {
    let s = s.trim();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.strip_prefix('+').unwrap_or(s)),
    };
    if digits.is_empty() {
        return Err(CalcError::InvalidNumber);
    }

    let mut ascii = String::with_capacity(sign.len() + digits.len());
    ascii.push_str(sign);
    for c in digits.chars() {
        let d = digit_value(c).ok_or(CalcError::InvalidNumber)?;
        ascii.push(char::from_digit(d, 10).ok_or(CalcError::InvalidNumber)?);
    }
    ascii.parse().map_err(|_| CalcError::InvalidNumber)
}

/// Evaluate the three captured pieces of an expression. Failures come back as
/// the user-facing message rather than an error.
pub fn calculate(lhs: &str, op: &str, rhs: &str) -> String {
    let result = (|| {
        let lhs = parse_operand(lhs)?;
        let op: Operator = op.parse()?;
        let rhs = parse_operand(rhs)?;
        evaluate(&lhs, op, &rhs)
    })();

    match result {
        Ok(value) => value.to_string(),
        Err(e) => e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_ops() {
        assert_eq!(calculate("2", "+", "2"), "4");
        assert_eq!(calculate("3", "-", "10"), "-7");
        assert_eq!(calculate("6", "*", "7"), "42");
    }

    #[test]
    fn test_division_renders_float() {
        assert_eq!(calculate("10", "/", "2"), "5.0");
        assert_eq!(calculate("10", "/", "4"), "2.5");
        assert_eq!(calculate("1", "/", "3"), "0.3333333333333333");
        assert_eq!(calculate("0", "/", "5"), "0.0");
    }

    #[test]
    fn test_division_scientific() {
        assert_eq!(calculate("1", "/", "100000"), "1e-05");
        assert_eq!(
            calculate("9223372036854775807", "/", "1"),
            "9.223372036854776e+18"
        );
    }

    #[test]
    fn test_division_of_huge_operands() {
        let big = format!("1{}", "0".repeat(400));
        let smaller = format!("1{}", "0".repeat(399));
        assert_eq!(calculate(&big, "/", &smaller), "10.0");
        assert_eq!(calculate(&big, "/", &big), "1.0");
        assert_eq!(calculate("1", "/", &big), "0.0");
        assert_eq!(calculate(&big, "/", "1"), "Слишком большое число.");
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(calculate("10", "/", "0"), "На ноль делить нельзя :(");
        assert_eq!(calculate("10", "/", "000"), "На ноль делить нельзя :(");
    }

    #[test]
    fn test_invalid_operands() {
        assert_eq!(calculate("abc", "+", "1"), "Некорректный ввод чисел.");
        assert_eq!(calculate("", "+", "1"), "Некорректный ввод чисел.");
        assert_eq!(calculate("1", "+", "-"), "Некорректный ввод чисел.");
    }

    #[test]
    fn test_unicode_digits() {
        // Arabic-Indic three
        assert_eq!(calculate("\u{0663}", "+", "1"), "4");
        // Devanagari forty-two
        assert_eq!(calculate("\u{096A}\u{0968}", "*", "2"), "84");
        // mathematical bold nine, double-struck zero (adjacent runs)
        assert_eq!(calculate("\u{1D7D7}", "+", "\u{1D7D8}"), "9");
    }

    #[test]
    fn test_beyond_machine_integers() {
        assert_eq!(
            calculate("99999999999999999999", "+", "1"),
            "100000000000000000000"
        );
        assert_eq!(
            calculate("9223372036854775807", "+", "1"),
            "9223372036854775808"
        );
        assert_eq!(
            calculate("9223372036854775807", "*", "2"),
            "18446744073709551614"
        );
        assert_eq!(
            calculate("1", "-", "100000000000000000000"),
            "-99999999999999999999"
        );
    }

    #[test]
    fn test_unknown_operator() {
        assert_eq!(calculate("1", "%", "2"), "Неизвестная операция.");
    }

    #[test]
    fn test_operator_parse() {
        assert_eq!("/".parse::<Operator>(), Ok(Operator::Div));
        assert_eq!("^".parse::<Operator>(), Err(CalcError::UnknownOperation));
    }
}
