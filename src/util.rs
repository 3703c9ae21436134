// Copyright 2018-2020 Matthieu Felix
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive};

use value::Value;

/// Checks that a slice has at least `min`, at most `max` entries.
// TODO this is not really idiomatic and should probably be made to return a boolean
pub fn check_len<T>(v: &[T], min: Option<usize>, max: Option<usize>) -> Result<(), String> {
    if let Some(m) = min {
        if v.len() < m {
            return Err(format!("Too few values, expecting at least {}.", m));
        }
    };
    if let Some(m) = max {
        if v.len() > m {
            return Err(format!("Too many values, expecting at most {}.", m));
        }
    };
    Ok(())
}

/// Like [check_len], but passes the vector through on success.
pub fn with_check_len<T>(
    v: Vec<T>,
    min: Option<usize>,
    max: Option<usize>,
) -> Result<Vec<T>, String> {
    check_len(&v, min, max)?;
    Ok(v)
}

pub fn escape_char(c: char) -> String {
    match c {
        '\x07' => "alarm".into(),
        '\x08' => "backspace".into(),
        '\x7F' => "delete".into(),
        '\x1B' => "escape".into(),
        '\n' => "newline".into(),
        '\0' => "null".into(),
        '\r' => "return".into(),
        ' ' => "space".into(),
        '\t' => "tab".into(),
        c => c.to_string(),
    }
}

pub fn escape_string(s: &str) -> String {
    let mut output = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\x07' => output.push_str("\\a"),
            '\x08' => output.push_str("\\b"),
            '\t' => output.push_str("\\t"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '|' => output.push_str("\\|"),
            _ => output.push(c),
        }
    }
    output
}

pub fn escape_symbol(s: &str) -> String {
    if s.is_ascii() {
        s.into()
    } else {
        format!("|{}|", s)
    }
}

// TODO these unwraps can fail if the bigintegers are large enough. Easy to fix
//      by repeatedly dividing each side until they're small.
//      Will be done natively by rust_num once https://github.com/rust-num/num-rational/issues/4
//      is merged.
pub fn rational_to_float(v: &BigRational) -> f64 {
    v.numer().to_f64().unwrap() / v.denom().to_f64().unwrap()
}

pub fn integer_to_float(v: &BigInt) -> f64 {
    v.to_f64().unwrap_or_else(|| {
        if v.is_positive() {
            std::f64::INFINITY
        } else {
            std::f64::NEG_INFINITY
        }
    })
}

/// Collapses integer-valued rationals into proper integers, and complex values
/// with a zero imaginary part into reals.
pub fn simplify_numeric(v: Value) -> Value {
    match v {
        Value::Rational(r) => {
            if r.is_integer() {
                Value::Integer(r.to_integer())
            } else {
                Value::Rational(r)
            }
        }
        Value::ComplexReal(c) => {
            if c.im == 0.0 {
                Value::Real(c.re)
            } else {
                Value::ComplexReal(c)
            }
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_len() {
        assert!(check_len(&[1, 2, 3], Some(2), None).is_ok());
        assert!(check_len(&[1, 2, 3], None, Some(2)).is_err());
        assert!(check_len::<usize>(&[], Some(1), None).is_err());
    }

    #[test]
    fn test_simplify_numeric() {
        let integral = BigRational::new(BigInt::from(4), BigInt::from(2));
        assert_eq!(
            Value::Integer(BigInt::from(2)),
            simplify_numeric(Value::Rational(Box::new(integral)))
        );
        let proper = BigRational::new(BigInt::from(1), BigInt::from(2));
        assert_eq!(
            Value::Rational(Box::new(proper.clone())),
            simplify_numeric(Value::Rational(Box::new(proper)))
        );
        let real_complex = ::num_complex::Complex64::new(1.5, 0.0);
        assert_eq!(
            Value::Real(1.5),
            simplify_numeric(Value::ComplexReal(real_complex))
        );
    }
}
