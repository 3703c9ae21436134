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

use arena::Arena;
use util::check_len;
use value::{pretty_print, Value};

/// Identity equality. Symbols, booleans, and the singleton values are
/// canonicalized by the arena, so index comparison is enough; numbers are not
/// interned, so equal numbers are generally not `eq?`.
pub fn eq(_arena: &Arena, left: usize, right: usize) -> bool {
    left == right
}

pub fn eq_p(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(2), Some(2))?;
    Ok(arena.insert(Value::Boolean(eq(arena, args[0], args[1]))))
}

pub fn eqv(arena: &Arena, left: usize, right: usize) -> bool {
    #![allow(clippy::float_cmp)]
    match (arena.get(left), arena.get(right)) {
        // This comparison is in the same order as the R5RS one for ease of
        // verification.
        (Value::Boolean(a), Value::Boolean(b)) => a == b,
        (Value::Symbol(a), Value::Symbol(b)) => a == b,
        (Value::Integer(a), Value::Integer(b)) => a == b,
        (Value::Rational(a), Value::Rational(b)) => a == b,
        (Value::Real(a), Value::Real(b)) => a == b,
        (Value::ComplexReal(a), Value::ComplexReal(b)) => a == b,
        (Value::Character(a), Value::Character(b)) => a == b,
        (Value::EmptyList, Value::EmptyList) => true,
        _ => left == right,
    }
}

pub fn eqv_p(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(2), Some(2))?;
    Ok(arena.insert(Value::Boolean(eqv(arena, args[0], args[1]))))
}

/// Structural equality. Iterative down the cdr spine so that long lists do
/// not grow the stack; recursive through cars and vector slots.
pub fn equal(arena: &Arena, left: usize, right: usize) -> bool {
    let mut left = left;
    let mut right = right;
    loop {
        match (arena.get(left), arena.get(right)) {
            (Value::Pair(left_car, left_cdr), Value::Pair(right_car, right_cdr)) => {
                if !equal(arena, *left_car.borrow(), *right_car.borrow()) {
                    return false;
                }
                left = *left_cdr.borrow();
                right = *right_cdr.borrow();
            }
            (Value::Vector(a), Value::Vector(b)) => {
                let a = a.borrow();
                let b = b.borrow();
                return a.len() == b.len()
                    && a.iter().zip(b.iter()).all(|(x, y)| equal(arena, *x, *y));
            }
            (Value::String(a), Value::String(b)) => return *a.borrow() == *b.borrow(),
            _ => return eqv(arena, left, right),
        }
    }
}

pub fn equal_p(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(2), Some(2))?;
    Ok(arena.insert(Value::Boolean(equal(arena, args[0], args[1]))))
}

pub fn procedure_p(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(1), Some(1))?;
    Ok(arena.insert(Value::Boolean(arena.get(args[0]).callable())))
}

pub fn display(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(1), Some(1))?;
    match arena.get(args[0]) {
        Value::String(s) => print!("{}", s.borrow()),
        Value::Character(c) => print!("{}", c),
        _ => print!("{}", pretty_print(arena, args[0])),
    }
    Ok(arena.unspecific)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;
    use std::cell::RefCell;
    use value::list_from_vec;

    fn int(arena: &Arena, i: i64) -> usize {
        arena.insert(Value::Integer(BigInt::from(i)))
    }

    #[test]
    fn eq_on_interned_values() {
        let arena = Arena::default();
        let a = arena.insert(Value::Symbol("a".into()));
        let b = arena.insert(Value::Symbol("a".into()));
        assert!(eq(&arena, a, b));
        assert!(eq(&arena, arena.empty_list, arena.empty_list));
        // Numbers are not interned.
        assert!(!eq(&arena, int(&arena, 1), int(&arena, 1)));
    }

    #[test]
    fn eqv_on_numbers() {
        let arena = Arena::default();
        assert!(eqv(&arena, int(&arena, 42), int(&arena, 42)));
        assert!(!eqv(&arena, int(&arena, 42), int(&arena, 43)));
        // Exactness matters to eqv.
        let inexact = arena.insert(Value::Real(42.0));
        assert!(!eqv(&arena, int(&arena, 42), inexact));
    }

    #[test]
    fn eqv_on_characters() {
        let arena = Arena::default();
        let a = arena.insert(Value::Character('a'));
        let b = arena.insert(Value::Character('a'));
        let c = arena.insert(Value::Character('b'));
        assert!(eqv(&arena, a, b));
        assert!(!eqv(&arena, a, c));
    }

    #[test]
    fn eqv_on_pairs_is_identity() {
        let arena = Arena::default();
        let a = list_from_vec(&arena, &[int(&arena, 1)]);
        let b = list_from_vec(&arena, &[int(&arena, 1)]);
        assert!(!eqv(&arena, a, b));
        assert!(eqv(&arena, a, a));
    }

    #[test]
    fn equal_is_structural() {
        let arena = Arena::default();
        let a = list_from_vec(&arena, &[int(&arena, 1), int(&arena, 2)]);
        let b = list_from_vec(&arena, &[int(&arena, 1), int(&arena, 2)]);
        let c = list_from_vec(&arena, &[int(&arena, 1), int(&arena, 3)]);
        assert!(equal(&arena, a, b));
        assert!(!equal(&arena, a, c));

        let s1 = arena.insert(Value::String(RefCell::new("abc".into())));
        let s2 = arena.insert(Value::String(RefCell::new("abc".into())));
        assert!(equal(&arena, s1, s2));

        let v1 = arena.insert(Value::Vector(RefCell::new(vec![a])));
        let v2 = arena.insert(Value::Vector(RefCell::new(vec![b])));
        assert!(equal(&arena, v1, v2));
    }
}
