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

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_complex::Complex64;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use arena::Arena;
use util::{
    check_len, integer_to_float, rational_to_float, simplify_numeric, with_check_len,
};
use value::{pretty_print, Value};

/// Generates a numeric primitive that runs a simple fold. The provided folder
/// must be a function (&Value, &Value) -> Result<Value, String>.
macro_rules! prim_fold_0 {
    ($name:ident, $folder:ident, $fold_initial:expr) => {
        pub fn $name(arena: &Arena, args: &[usize]) -> Result<usize, String> {
            let values = numeric_vec(arena, args)?;
            let mut acc = $fold_initial;
            for v in values.iter() {
                acc = $folder(&acc, v)?;
            }
            Ok(arena.insert(acc))
        }
    };
}

prim_fold_0!(add, add2, Value::Integer(BigInt::zero()));
fn add2(a: &Value, b: &Value) -> Result<Value, String> {
    Ok(match cast_same(a, b) {
        (Value::Integer(x), Value::Integer(y)) => Value::Integer(x + y),
        (Value::Rational(x), Value::Rational(y)) => {
            simplify_numeric(Value::Rational(Box::new(&*x + &*y)))
        }
        (Value::Real(x), Value::Real(y)) => Value::Real(x + y),
        (Value::ComplexReal(x), Value::ComplexReal(y)) => Value::ComplexReal(x + y),
        (x, y) => panic!(
            "cast_same did not return equal numeric types: ({:?}, {:?})",
            x, y
        ),
    })
}

prim_fold_0!(mul, mul2, Value::Integer(BigInt::one()));
fn mul2(a: &Value, b: &Value) -> Result<Value, String> {
    Ok(match cast_same(a, b) {
        (Value::Integer(x), Value::Integer(y)) => Value::Integer(x * y),
        (Value::Rational(x), Value::Rational(y)) => {
            simplify_numeric(Value::Rational(Box::new(&*x * &*y)))
        }
        (Value::Real(x), Value::Real(y)) => Value::Real(x * y),
        (Value::ComplexReal(x), Value::ComplexReal(y)) => Value::ComplexReal(x * y),
        (x, y) => panic!(
            "cast_same did not return equal numeric types: ({:?}, {:?})",
            x, y
        ),
    })
}

/// Like [prim_fold_0], but uses the first element of the list as the fold
/// initializer, so that `(- 5 1 2)` is 2 and `(/ 8 2 2)` is 2. A single
/// argument folds against the operation's identity instead: `(- 5)` is -5 and
/// `(/ 5)` is 1/5.
macro_rules! prim_fold_1 {
    ($name:ident, $folder:ident, $identity:expr) => {
        pub fn $name(arena: &Arena, args: &[usize]) -> Result<usize, String> {
            let values = with_check_len(numeric_vec(arena, args)?, Some(1), None)
                .map_err(|e| format!("{}: {}", stringify!($name), e))?;
            let (mut acc, rest) = if values.len() == 1 {
                ($identity, &values[..])
            } else {
                (values[0].clone(), &values[1..])
            };
            for v in rest.iter() {
                acc = $folder(&acc, v)?;
            }
            Ok(arena.insert(acc))
        }
    };
}

prim_fold_1!(sub, sub2, Value::Integer(BigInt::zero()));
fn sub2(a: &Value, b: &Value) -> Result<Value, String> {
    Ok(match cast_same(a, b) {
        (Value::Integer(x), Value::Integer(y)) => Value::Integer(x - y),
        (Value::Rational(x), Value::Rational(y)) => {
            simplify_numeric(Value::Rational(Box::new(&*x - &*y)))
        }
        (Value::Real(x), Value::Real(y)) => Value::Real(x - y),
        (Value::ComplexReal(x), Value::ComplexReal(y)) => Value::ComplexReal(x - y),
        (x, y) => panic!(
            "cast_same did not return equal numeric types: ({:?}, {:?})",
            x, y
        ),
    })
}

prim_fold_1!(div, div2, Value::Integer(BigInt::one()));
fn div2(a: &Value, b: &Value) -> Result<Value, String> {
    Ok(match cast_same(a, b) {
        (Value::Integer(x), Value::Integer(y)) => {
            if y.is_zero() {
                return Err("/: division by zero".into());
            }
            if x.is_multiple_of(&y) {
                Value::Integer(x / y)
            } else {
                Value::Rational(Box::new(BigRational::new(x, y)))
            }
        }
        (Value::Rational(x), Value::Rational(y)) => {
            if y.is_zero() {
                return Err("/: division by zero".into());
            }
            simplify_numeric(Value::Rational(Box::new(&*x / &*y)))
        }
        (Value::Real(x), Value::Real(y)) => Value::Real(x / y),
        (Value::ComplexReal(x), Value::ComplexReal(y)) => Value::ComplexReal(x / y),
        (x, y) => panic!(
            "cast_same did not return equal numeric types: ({:?}, {:?})",
            x, y
        ),
    })
}

/// Generates a numeric primitive that verifies monotonicity. Needs a
/// (&Value, &Value) -> Result<bool, String> function to wrap.
macro_rules! prim_monotonic {
    ($name:ident, $pair:ident) => {
        pub fn $name(arena: &Arena, args: &[usize]) -> Result<usize, String> {
            let values = with_check_len(numeric_vec(arena, args)?, Some(2), None)
                .map_err(|e| format!("{}: {}", stringify!($name), e))?;
            let mut ans = true;
            for w in values.windows(2) {
                if !$pair(&w[0], &w[1])? {
                    ans = false;
                    break;
                }
            }
            Ok(arena.insert(Value::Boolean(ans)))
        }
    };
}

prim_monotonic!(less_than, less_than2);
fn less_than2(a: &Value, b: &Value) -> Result<bool, String> {
    Ok(num_cmp(a, b)? == Ordering::Less)
}

prim_monotonic!(greater_than, greater_than2);
fn greater_than2(a: &Value, b: &Value) -> Result<bool, String> {
    Ok(num_cmp(a, b)? == Ordering::Greater)
}

prim_monotonic!(less_than_equal, less_than_equal2);
fn less_than_equal2(a: &Value, b: &Value) -> Result<bool, String> {
    Ok(num_cmp(a, b)? != Ordering::Greater)
}

prim_monotonic!(greater_than_equal, greater_than_equal2);
fn greater_than_equal2(a: &Value, b: &Value) -> Result<bool, String> {
    Ok(num_cmp(a, b)? != Ordering::Less)
}

/// Compares two numeric values after promoting them to the same tower level.
/// Complex values are not ordered.
pub fn num_cmp(a: &Value, b: &Value) -> Result<Ordering, String> {
    match cast_same(a, b) {
        (Value::Integer(x), Value::Integer(y)) => Ok(x.cmp(&y)),
        (Value::Rational(x), Value::Rational(y)) => Ok(x.cmp(&y)),
        (Value::Real(x), Value::Real(y)) => x
            .partial_cmp(&y)
            .ok_or_else(|| "cannot order NaN".to_string()),
        (Value::ComplexReal(_), Value::ComplexReal(_)) => {
            Err("cannot order complex numbers".into())
        }
        (x, y) => panic!(
            "cast_same did not return equal numeric types: ({:?}, {:?})",
            x, y
        ),
    }
}

/// Numeric equality after promotion, so `(= 1 1.0)` holds even though the
/// operands are not `eqv?`.
pub fn num_eq(a: &Value, b: &Value) -> bool {
    #![allow(clippy::float_cmp)]
    match cast_same(a, b) {
        (Value::Integer(x), Value::Integer(y)) => x == y,
        (Value::Rational(x), Value::Rational(y)) => x == y,
        (Value::Real(x), Value::Real(y)) => x == y,
        (Value::ComplexReal(x), Value::ComplexReal(y)) => x == y,
        (x, y) => panic!(
            "cast_same did not return equal numeric types: ({:?}, {:?})",
            x, y
        ),
    }
}

pub fn number_p(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(1), Some(1))?;
    Ok(arena.insert(Value::Boolean(arena.get(args[0]).numeric())))
}

// Every represented number is complex.
pub fn complex_p(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    number_p(arena, args)
}

pub fn real_p(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(1), Some(1))?;
    let ans = match arena.get(args[0]) {
        Value::Integer(_) | Value::Rational(_) | Value::Real(_) => true,
        _ => false,
    };
    Ok(arena.insert(Value::Boolean(ans)))
}

pub fn rational_p(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(1), Some(1))?;
    let ans = match arena.get(args[0]) {
        Value::Integer(_) | Value::Rational(_) => true,
        Value::Real(f) => f.is_finite(),
        _ => false,
    };
    Ok(arena.insert(Value::Boolean(ans)))
}

pub fn integer_p(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(1), Some(1))?;
    let ans = match arena.get(args[0]) {
        Value::Integer(_) => true,
        Value::Real(f) => f.fract() == 0.0,
        _ => false,
    };
    Ok(arena.insert(Value::Boolean(ans)))
}

pub fn exact_p(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(1), Some(1))?;
    let v = arena.get(args[0]);
    if !v.numeric() {
        return Err(format!(
            "exact?: not a number: {}",
            pretty_print(arena, args[0])
        ));
    }
    Ok(arena.insert(Value::Boolean(v.exact())))
}

pub fn inexact_p(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(1), Some(1))?;
    let v = arena.get(args[0]);
    if !v.numeric() {
        return Err(format!(
            "inexact?: not a number: {}",
            pretty_print(arena, args[0])
        ));
    }
    Ok(arena.insert(Value::Boolean(!v.exact())))
}

/// Generates a rounding primitive. Exact integers round to themselves; exact
/// rationals round to exact integers; reals stay inexact.
macro_rules! prim_round {
    ($name:ident, $scheme_name:expr, $rational_method:ident, $float_method:ident) => {
        pub fn $name(arena: &Arena, args: &[usize]) -> Result<usize, String> {
            check_len(args, Some(1), Some(1))?;
            match arena.get(args[0]) {
                Value::Integer(_) => Ok(args[0]),
                Value::Rational(r) => Ok(arena
                    .insert(Value::Integer(r.$rational_method().to_integer()))),
                Value::Real(f) => Ok(arena.insert(Value::Real(f.$float_method()))),
                _ => Err(format!(
                    "{}: not a real number: {}",
                    $scheme_name,
                    pretty_print(arena, args[0])
                )),
            }
        }
    };
}

prim_round!(floor, "floor", floor, floor);
prim_round!(ceiling, "ceiling", ceil, ceil);
prim_round!(round, "round", round, round);
prim_round!(truncate, "truncate", trunc, trunc);

macro_rules! prim_transcendental {
    ($name:ident, $scheme_name:expr, $method:ident) => {
        pub fn $name(arena: &Arena, args: &[usize]) -> Result<usize, String> {
            check_len(args, Some(1), Some(1))?;
            match arena.get(args[0]) {
                Value::ComplexReal(c) => {
                    Ok(arena.insert(simplify_numeric(Value::ComplexReal(c.$method()))))
                }
                v if v.numeric() => Ok(arena.insert(Value::Real(as_float(v).$method()))),
                _ => Err(format!(
                    "{}: not a number: {}",
                    $scheme_name,
                    pretty_print(arena, args[0])
                )),
            }
        }
    };
}

prim_transcendental!(sin, "sin", sin);
prim_transcendental!(cos, "cos", cos);
prim_transcendental!(exp, "exp", exp);

pub fn sqrt(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(1), Some(1))?;
    match arena.get(args[0]) {
        Value::Integer(i) if !i.is_negative() => {
            let root = i.sqrt();
            if &root * &root == *i {
                Ok(arena.insert(Value::Integer(root)))
            } else {
                Ok(arena.insert(Value::Real(integer_to_float(i).sqrt())))
            }
        }
        Value::ComplexReal(c) => Ok(arena.insert(simplify_numeric(Value::ComplexReal(c.sqrt())))),
        v if v.numeric() => {
            let f = as_float(v);
            if f < 0.0 {
                Ok(arena.insert(Value::ComplexReal(Complex64::new(0.0, (-f).sqrt()))))
            } else {
                Ok(arena.insert(Value::Real(f.sqrt())))
            }
        }
        _ => Err(format!(
            "sqrt: not a number: {}",
            pretty_print(arena, args[0])
        )),
    }
}

pub fn atan(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(1), Some(2))?;
    if args.len() == 2 {
        let y = real_to_float(arena, args[0], "atan")?;
        let x = real_to_float(arena, args[1], "atan")?;
        Ok(arena.insert(Value::Real(y.atan2(x))))
    } else {
        let y = real_to_float(arena, args[0], "atan")?;
        Ok(arena.insert(Value::Real(y.atan())))
    }
}

pub fn abs(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(1), Some(1))?;
    match arena.get(args[0]) {
        Value::Integer(i) => Ok(arena.insert(Value::Integer(i.abs()))),
        Value::Rational(r) => Ok(arena.insert(Value::Rational(Box::new(r.abs())))),
        Value::Real(f) => Ok(arena.insert(Value::Real(f.abs()))),
        _ => Err(format!(
            "abs: not a real number: {}",
            pretty_print(arena, args[0])
        )),
    }
}

pub fn make_rectangular(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(2), Some(2))?;
    let re = real_to_float(arena, args[0], "make-rectangular")?;
    let im = real_to_float(arena, args[1], "make-rectangular")?;
    Ok(arena.insert(simplify_numeric(Value::ComplexReal(Complex64::new(re, im)))))
}

pub fn real_part(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(1), Some(1))?;
    match arena.get(args[0]) {
        Value::ComplexReal(c) => Ok(arena.insert(Value::Real(c.re))),
        v if v.numeric() => Ok(args[0]),
        _ => Err(format!(
            "real-part: not a number: {}",
            pretty_print(arena, args[0])
        )),
    }
}

pub fn imag_part(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(1), Some(1))?;
    match arena.get(args[0]) {
        Value::ComplexReal(c) => Ok(arena.insert(Value::Real(c.im))),
        v if v.exact() => Ok(arena.insert(Value::Integer(BigInt::zero()))),
        Value::Real(_) => Ok(arena.insert(Value::Real(0.0))),
        _ => Err(format!(
            "imag-part: not a number: {}",
            pretty_print(arena, args[0])
        )),
    }
}

/// Takes an argument list (slice of arena pointers), returns a vector of
/// numeric values or an error.
pub fn numeric_vec(arena: &Arena, args: &[usize]) -> Result<Vec<Value>, String> {
    args.iter()
        .map(|v| {
            let value = arena.get(*v);
            if value.numeric() {
                Ok(value.clone())
            } else {
                Err(format!("not a number: {}", pretty_print(arena, *v)))
            }
        })
        .collect::<Result<Vec<_>, _>>()
}

pub fn real_to_float(arena: &Arena, at: usize, who: &str) -> Result<f64, String> {
    match arena.get(at) {
        Value::Integer(i) => Ok(integer_to_float(i)),
        Value::Rational(r) => Ok(rational_to_float(r)),
        Value::Real(f) => Ok(*f),
        _ => Err(format!(
            "{}: not a real number: {}",
            who,
            pretty_print(arena, at)
        )),
    }
}

/// Casts two numeric values to the same tower level: integer if both are
/// integers, rational if both are exact, complex if either is complex, real
/// otherwise.
fn cast_same(a: &Value, b: &Value) -> (Value, Value) {
    match (a, b) {
        (Value::Integer(_), Value::Integer(_)) => (a.clone(), b.clone()),
        _ if a.exact() && b.exact() => (as_rational(a), as_rational(b)),
        (Value::ComplexReal(_), _) | (_, Value::ComplexReal(_)) => (as_complex(a), as_complex(b)),
        _ => (Value::Real(as_float(a)), Value::Real(as_float(b))),
    }
}

fn as_rational(v: &Value) -> Value {
    match v {
        Value::Integer(i) => Value::Rational(Box::new(BigRational::from_integer(i.clone()))),
        Value::Rational(_) => v.clone(),
        _ => panic!("as_rational: inexact value: {:?}", v),
    }
}

fn as_complex(v: &Value) -> Value {
    match v {
        Value::ComplexReal(_) => v.clone(),
        _ => Value::ComplexReal(Complex64::new(as_float(v), 0.0)),
    }
}

fn as_float(v: &Value) -> f64 {
    match v {
        Value::Integer(i) => integer_to_float(i),
        Value::Rational(r) => rational_to_float(r),
        Value::Real(f) => *f,
        _ => panic!("as_float: not a real value: {:?}", v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(arena: &Arena, i: i64) -> usize {
        arena.insert(Value::Integer(BigInt::from(i)))
    }

    fn real(arena: &Arena, f: f64) -> usize {
        arena.insert(Value::Real(f))
    }

    #[test]
    fn add_promotes() {
        let arena = Arena::default();
        let r = add(&arena, &[int(&arena, 1), int(&arena, 2)]).unwrap();
        assert_eq!(Value::Integer(BigInt::from(3)), *arena.get(r));
        let r = add(&arena, &[int(&arena, 1), real(&arena, 0.5)]).unwrap();
        assert_eq!(Value::Real(1.5), *arena.get(r));
    }

    #[test]
    fn exact_division() {
        let arena = Arena::default();
        let r = div(&arena, &[int(&arena, 8), int(&arena, 2)]).unwrap();
        assert_eq!(Value::Integer(BigInt::from(4)), *arena.get(r));
        let r = div(&arena, &[int(&arena, 1), int(&arena, 2)]).unwrap();
        assert_eq!(
            Value::Rational(Box::new(BigRational::new(
                BigInt::from(1),
                BigInt::from(2)
            ))),
            *arena.get(r)
        );
        assert!(div(&arena, &[int(&arena, 1), int(&arena, 0)]).is_err());
    }

    #[test]
    fn unary_sub_and_div() {
        let arena = Arena::default();
        let r = sub(&arena, &[int(&arena, 5)]).unwrap();
        assert_eq!(Value::Integer(BigInt::from(-5)), *arena.get(r));
        let r = div(&arena, &[int(&arena, 4)]).unwrap();
        assert_eq!(
            Value::Rational(Box::new(BigRational::new(
                BigInt::from(1),
                BigInt::from(4)
            ))),
            *arena.get(r)
        );
    }

    #[test]
    fn monotonic_comparisons() {
        let arena = Arena::default();
        let r = less_than(&arena, &[int(&arena, 1), int(&arena, 2), int(&arena, 3)]).unwrap();
        assert_eq!(arena.t, r);
        let r = less_than(&arena, &[int(&arena, 1), int(&arena, 3), int(&arena, 2)]).unwrap();
        assert_eq!(arena.f, r);
        let r = less_than_equal(&arena, &[int(&arena, 1), real(&arena, 1.0)]).unwrap();
        assert_eq!(arena.t, r);
        assert!(less_than(&arena, &[int(&arena, 1), arena.t]).is_err());
    }

    #[test]
    fn rounding() {
        let arena = Arena::default();
        let half = arena.insert(Value::Rational(Box::new(BigRational::new(
            BigInt::from(7),
            BigInt::from(2),
        ))));
        assert_eq!(
            Value::Integer(BigInt::from(3)),
            *arena.get(floor(&arena, &[half]).unwrap())
        );
        assert_eq!(
            Value::Integer(BigInt::from(4)),
            *arena.get(ceiling(&arena, &[half]).unwrap())
        );
        assert_eq!(
            Value::Real(-3.0),
            *arena.get(ceiling(&arena, &[real(&arena, -3.5)]).unwrap())
        );
    }

    #[test]
    fn sqrt_stays_exact_on_perfect_squares() {
        let arena = Arena::default();
        assert_eq!(
            Value::Integer(BigInt::from(4)),
            *arena.get(sqrt(&arena, &[int(&arena, 16)]).unwrap())
        );
        assert_eq!(
            Value::Real(2.0f64.sqrt()),
            *arena.get(sqrt(&arena, &[int(&arena, 2)]).unwrap())
        );
        assert_eq!(
            Value::ComplexReal(Complex64::new(0.0, 2.0)),
            *arena.get(sqrt(&arena, &[real(&arena, -4.0)]).unwrap())
        );
    }

    #[test]
    fn rectangular_parts() {
        let arena = Arena::default();
        let c = make_rectangular(&arena, &[int(&arena, 3), int(&arena, 4)]).unwrap();
        assert_eq!(Value::Real(3.0), *arena.get(real_part(&arena, &[c]).unwrap()));
        assert_eq!(Value::Real(4.0), *arena.get(imag_part(&arena, &[c]).unwrap()));
        // Zero imaginary part collapses to a real.
        let r = make_rectangular(&arena, &[int(&arena, 3), int(&arena, 0)]).unwrap();
        assert_eq!(Value::Real(3.0), *arena.get(r));
        assert_eq!(
            Value::Integer(BigInt::from(0)),
            *arena.get(imag_part(&arena, &[int(&arena, 5)]).unwrap())
        );
    }
}
