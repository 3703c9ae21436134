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

//! Derived numeric operations.
//!
//! The integer-division family (`quotient`, `remainder`, `modulo`, the parity
//! predicates, `gcd`, `lcm`) accepts exact integers and inexact reals with an
//! integral value, which are rounded before use; genuinely fractional
//! operands are an error rather than being silently rounded.

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_complex::Complex64;
use num_rational::BigRational;
use num_traits::{FromPrimitive, One, Signed, Zero};

use arena::Arena;
use primitives::numeric::{num_cmp, num_eq, numeric_vec, real_to_float};
use util::{check_len, integer_to_float, simplify_numeric};
use value::{pretty_print, Value};

/// N-ary numeric equality: every argument is compared against the first. A
/// non-number argument makes the answer `#f` instead of raising a type error.
pub fn equal(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(1), None).map_err(|e| format!("=: {}", e))?;
    for arg in args.iter() {
        if !arena.get(*arg).numeric() {
            return Ok(arena.f);
        }
    }
    let first = arena.get(args[0]);
    for arg in args[1..].iter() {
        if !num_eq(first, arena.get(*arg)) {
            return Ok(arena.f);
        }
    }
    Ok(arena.t)
}

pub fn zero_p(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(1), Some(1))?;
    let v = arena.get(args[0]);
    if !v.numeric() {
        return Err(format!(
            "zero?: not a number: {}",
            pretty_print(arena, args[0])
        ));
    }
    Ok(arena.insert(Value::Boolean(num_eq(v, &Value::Integer(BigInt::zero())))))
}

pub fn positive_p(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(1), Some(1))?;
    let ord = num_cmp(arena.get(args[0]), &Value::Integer(BigInt::zero()))
        .map_err(|e| format!("positive?: {}", e))?;
    Ok(arena.insert(Value::Boolean(ord == Ordering::Greater)))
}

pub fn negative_p(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(1), Some(1))?;
    let ord = num_cmp(arena.get(args[0]), &Value::Integer(BigInt::zero()))
        .map_err(|e| format!("negative?: {}", e))?;
    Ok(arena.insert(Value::Boolean(ord == Ordering::Less)))
}

pub fn odd_p(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(1), Some(1))?;
    let n = integral_value(arena, args[0], "odd?")?;
    let r = remainder2(&n, &Value::Integer(BigInt::from(2)), "odd?")?;
    Ok(arena.insert(Value::Boolean(!value_is_zero(&r))))
}

// even? is the boolean negation of odd?.
pub fn even_p(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(1), Some(1))?;
    let n = integral_value(arena, args[0], "even?")?;
    let r = remainder2(&n, &Value::Integer(BigInt::from(2)), "even?")?;
    Ok(arena.insert(Value::Boolean(value_is_zero(&r))))
}

pub fn max(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    fold_extremum(arena, args, "max", Ordering::Less)
}

pub fn min(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    fold_extremum(arena, args, "min", Ordering::Greater)
}

/// Right fold with a pairwise comparison. The left operand survives a tie,
/// which decides which representation is returned when values compare equal
/// but differ in exactness.
fn fold_extremum(
    arena: &Arena,
    args: &[usize],
    who: &str,
    replace_when: Ordering,
) -> Result<usize, String> {
    let values = numeric_vec(arena, args).map_err(|e| format!("{}: {}", who, e))?;
    check_len(&values, Some(1), None).map_err(|e| format!("{}: {}", who, e))?;
    let mut acc = values[values.len() - 1].clone();
    for v in values[..values.len() - 1].iter().rev() {
        if num_cmp(v, &acc).map_err(|e| format!("{}: {}", who, e))? != replace_when {
            acc = v.clone();
        }
    }
    Ok(arena.insert(acc))
}

pub fn quotient(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(2), Some(2))?;
    let x = integral_value(arena, args[0], "quotient")?;
    let y = integral_value(arena, args[1], "quotient")?;
    Ok(arena.insert(quotient2(&x, &y, "quotient")?))
}

pub fn remainder(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(2), Some(2))?;
    let x = integral_value(arena, args[0], "remainder")?;
    let y = integral_value(arena, args[1], "remainder")?;
    Ok(arena.insert(remainder2(&x, &y, "remainder")?))
}

pub fn modulo(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(2), Some(2))?;
    let x = integral_value(arena, args[0], "modulo")?;
    let y = integral_value(arena, args[1], "modulo")?;
    Ok(arena.insert(modulo2(&x, &y, "modulo")?))
}

// Both gcd and lcm are not defined for more than two operands.
pub fn gcd(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(2), Some(2))?;
    let x = integral_value(arena, args[0], "gcd")?;
    let y = integral_value(arena, args[1], "gcd")?;
    let exact = x.exact() && y.exact();
    let g = euclid(exact_int(&x, "gcd")?, exact_int(&y, "gcd")?);
    Ok(arena.insert(reexactify(g, exact)))
}

pub fn lcm(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(2), Some(2))?;
    let x = integral_value(arena, args[0], "lcm")?;
    let y = integral_value(arena, args[1], "lcm")?;
    let exact = x.exact() && y.exact();
    let a = exact_int(&x, "lcm")?;
    let b = exact_int(&y, "lcm")?;
    let g = euclid(a.clone(), b.clone());
    let l = if g.is_zero() {
        BigInt::zero()
    } else {
        (&a * &b).abs() / g
    };
    Ok(arena.insert(reexactify(l, exact)))
}

pub fn factorial(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(1), Some(1))?;
    let n = integral_value(arena, args[0], "factorial")?;
    let exact = n.exact();
    let n = exact_int(&n, "factorial")?;
    if n.is_negative() {
        return Err(format!("factorial: negative input: {}", n));
    }
    let mut acc = BigInt::one();
    let mut i = BigInt::from(2);
    while i <= n {
        acc *= &i;
        i += 1;
    }
    Ok(arena.insert(reexactify(acc, exact)))
}

pub fn make_polar(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(2), Some(2))?;
    let r = real_to_float(arena, args[0], "make-polar")?;
    let theta = real_to_float(arena, args[1], "make-polar")?;
    Ok(arena.insert(simplify_numeric(Value::ComplexReal(Complex64::from_polar(
        r, theta,
    )))))
}

/// Euclidean norm of the real and imaginary parts.
pub fn magnitude(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(1), Some(1))?;
    let (re, im) = parts(arena, args[0], "magnitude")?;
    Ok(arena.insert(Value::Real(re.hypot(im))))
}

/// Two-argument arctangent of the imaginary and real parts.
pub fn angle(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(1), Some(1))?;
    let (re, im) = parts(arena, args[0], "angle")?;
    Ok(arena.insert(Value::Real(im.atan2(re))))
}

fn parts(arena: &Arena, at: usize, who: &str) -> Result<(f64, f64), String> {
    match arena.get(at) {
        Value::ComplexReal(c) => Ok((c.re, c.im)),
        v if v.numeric() => Ok((real_to_float(arena, at, who)?, 0.0)),
        _ => Err(format!(
            "{}: not a number: {}",
            who,
            pretty_print(arena, at)
        )),
    }
}

/// Accepts an exact integer, or an inexact real with an integral value; the
/// latter is rounded, preserving the reference derivation of the division
/// family. Fractional or non-real operands are an error.
fn integral_value(arena: &Arena, at: usize, who: &str) -> Result<Value, String> {
    match arena.get(at) {
        Value::Integer(i) => Ok(Value::Integer(i.clone())),
        Value::Real(f) => {
            if f.fract() == 0.0 {
                Ok(Value::Real(f.round()))
            } else {
                Err(format!("{}: not an integer: {}", who, f))
            }
        }
        v if v.numeric() => Err(format!(
            "{}: not an integer: {}",
            who,
            pretty_print(arena, at)
        )),
        _ => Err(format!(
            "{}: not a number: {}",
            who,
            pretty_print(arena, at)
        )),
    }
}

/// True division, then `floor` for a positive quotient and `ceiling` for a
/// non-positive one. Rounding the true quotient rather than truncating is
/// what the rest of the division family is built on.
fn quotient2(x: &Value, y: &Value, who: &str) -> Result<Value, String> {
    match (x, y) {
        (Value::Integer(a), Value::Integer(b)) => {
            if b.is_zero() {
                return Err(format!("{}: division by zero", who));
            }
            let t = BigRational::new(a.clone(), b.clone());
            let q = if t.is_positive() { t.floor() } else { t.ceil() };
            Ok(Value::Integer(q.to_integer()))
        }
        _ => {
            let a = float_of_integral(x);
            let b = float_of_integral(y);
            if b == 0.0 {
                return Err(format!("{}: division by zero", who));
            }
            let t = a / b;
            let q = if t > 0.0 { t.floor() } else { t.ceil() };
            Ok(Value::Real(q))
        }
    }
}

/// remainder = dividend - divisor * quotient, so its sign follows the
/// dividend.
fn remainder2(x: &Value, y: &Value, who: &str) -> Result<Value, String> {
    let q = quotient2(x, y, who)?;
    match (x, y, &q) {
        (Value::Integer(a), Value::Integer(b), Value::Integer(quot)) => {
            Ok(Value::Integer(a - b * quot))
        }
        _ => {
            let a = float_of_integral(x);
            let b = float_of_integral(y);
            let quot = float_of_integral(&q);
            Ok(Value::Real(a - b * quot))
        }
    }
}

/// modulo adjusts the remainder by the divisor when the operand signs differ,
/// flipping the result's sign to the divisor's.
fn modulo2(x: &Value, y: &Value, who: &str) -> Result<Value, String> {
    let r = remainder2(x, y, who)?;
    if value_is_zero(&r) || value_is_negative(x) == value_is_negative(y) {
        return Ok(r);
    }
    match (&r, y) {
        (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(a + b)),
        _ => Ok(Value::Real(float_of_integral(&r) + float_of_integral(y))),
    }
}

fn euclid(a: BigInt, b: BigInt) -> BigInt {
    let mut a = a.abs();
    let mut b = b.abs();
    while !b.is_zero() {
        let r = &a % &b;
        a = b;
        b = r;
    }
    a
}

fn exact_int(v: &Value, who: &str) -> Result<BigInt, String> {
    match v {
        Value::Integer(i) => Ok(i.clone()),
        Value::Real(f) => {
            BigInt::from_f64(*f).ok_or_else(|| format!("{}: not an integer: {}", who, f))
        }
        _ => panic!("integral_value produced a non-integral value: {:?}", v),
    }
}

fn reexactify(i: BigInt, exact: bool) -> Value {
    if exact {
        Value::Integer(i)
    } else {
        Value::Real(integer_to_float(&i))
    }
}

fn float_of_integral(v: &Value) -> f64 {
    match v {
        Value::Integer(i) => integer_to_float(i),
        Value::Real(f) => *f,
        _ => panic!("integral_value produced a non-integral value: {:?}", v),
    }
}

fn value_is_zero(v: &Value) -> bool {
    match v {
        Value::Integer(i) => i.is_zero(),
        Value::Real(f) => *f == 0.0,
        _ => false,
    }
}

fn value_is_negative(v: &Value) -> bool {
    match v {
        Value::Integer(i) => i.is_negative(),
        Value::Real(f) => *f < 0.0,
        _ => false,
    }
}
