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

use std::cell::RefCell;

use num_bigint::BigInt;
use num_complex::Complex64;
use num_rational::BigRational;

use arena::Arena;
use gc::{Inventory, PushOnlyVec};
use primitives::Primitive;
use util::{escape_char, escape_string, escape_symbol};

/// The numeric tower is `Integer` and `Rational` (exact), and `Real` and
/// `ComplexReal` (inexact). Exact values are kept normalized: a rational with
/// denominator 1 is represented as an integer, and a complex with a zero
/// imaginary part as a real (see [util::simplify_numeric]).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Undefined,
    Unspecific,
    EmptyList,
    Boolean(bool),
    Integer(BigInt),
    Rational(Box<BigRational>),
    Real(f64),
    ComplexReal(Complex64),
    Character(char),
    Symbol(String),
    String(RefCell<String>),
    Pair(RefCell<usize>, RefCell<usize>),
    Vector(RefCell<Vec<usize>>),
    Primitive(&'static Primitive),
    /// A procedure that applies the wrapped procedure, then inverts the
    /// truthiness of its result. Created by `negate`.
    Complement(usize),
}

impl Value {
    pub fn truthy(&self) -> bool {
        match self {
            Value::Boolean(false) => false,
            _ => true,
        }
    }

    pub fn numeric(&self) -> bool {
        match self {
            Value::Integer(_) | Value::Rational(_) | Value::Real(_) | Value::ComplexReal(_) => true,
            _ => false,
        }
    }

    pub fn exact(&self) -> bool {
        match self {
            Value::Integer(_) | Value::Rational(_) => true,
            _ => false,
        }
    }

    pub fn callable(&self) -> bool {
        match self {
            Value::Primitive(_) | Value::Complement(_) => true,
            _ => false,
        }
    }
}

impl Inventory for Value {
    fn inventory(&self, v: &mut PushOnlyVec<usize>) {
        match self {
            Value::Pair(car, cdr) => {
                v.push(*car.borrow());
                v.push(*cdr.borrow());
            }
            Value::Vector(vals) => {
                for val in vals.borrow().iter() {
                    v.push(*val);
                }
            }
            Value::Complement(f) => v.push(*f),
            _ => (),
        }
    }
}

pub fn pretty_print(arena: &Arena, at: usize) -> String {
    match arena.get(at) {
        Value::Undefined => "#undefined".to_string(),
        Value::Unspecific => "#unspecific".to_string(),
        Value::EmptyList => "()".to_string(),
        Value::Boolean(true) => "#t".to_string(),
        Value::Boolean(false) => "#f".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Rational(r) => r.to_string(),
        Value::Real(f) => f.to_string(),
        Value::ComplexReal(c) => c.to_string(),
        Value::Character(c) => format!("#\\{}", escape_char(*c)),
        Value::Symbol(s) => escape_symbol(s),
        Value::String(s) => format!("\"{}\"", escape_string(&s.borrow())),
        Value::Pair(_, _) => print_pair(arena, at),
        Value::Vector(v) => {
            let elems: Vec<_> = v.borrow().iter().map(|e| pretty_print(arena, *e)).collect();
            format!("#({})", elems.join(" "))
        }
        Value::Primitive(p) => format!("#<primitive {}>", p.name),
        Value::Complement(f) => format!("#<complement {}>", pretty_print(arena, *f)),
    }
}

// Diverges on cyclic structure, like the traversal procedures themselves.
fn print_pair(arena: &Arena, at: usize) -> String {
    let mut output = "(".to_string();
    let mut current = at;
    loop {
        match arena.get(current) {
            Value::Pair(car, cdr) => {
                if current != at {
                    output.push(' ');
                }
                output.push_str(&pretty_print(arena, *car.borrow()));
                current = *cdr.borrow();
            }
            Value::EmptyList => {
                output.push(')');
                return output;
            }
            _ => {
                output.push_str(" . ");
                output.push_str(&pretty_print(arena, current));
                output.push(')');
                return output;
            }
        }
    }
}

/// Conses the values into a fresh proper list, in order.
pub fn list_from_vec(arena: &Arena, vals: &[usize]) -> usize {
    let mut result = arena.empty_list;
    for v in vals.iter().rev() {
        result = arena.insert(Value::Pair(RefCell::new(*v), RefCell::new(result)));
    }
    result
}

/// Walks a proper list and collects the element positions. Errors on an
/// improper tail.
pub fn vec_from_list(arena: &Arena, at: usize) -> Result<Vec<usize>, String> {
    let mut result = Vec::new();
    let mut current = at;
    loop {
        match arena.get(current) {
            Value::EmptyList => return Ok(result),
            Value::Pair(car, cdr) => {
                result.push(*car.borrow());
                current = *cdr.borrow();
            }
            _ => {
                return Err(format!(
                    "not a proper list: {}",
                    pretty_print(arena, at)
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(arena: &Arena, i: i64) -> usize {
        arena.insert(Value::Integer(BigInt::from(i)))
    }

    #[test]
    fn list_roundtrip() {
        let arena = Arena::default();
        let vals = vec![int(&arena, 1), int(&arena, 2), int(&arena, 3)];
        let list = list_from_vec(&arena, &vals);
        assert_eq!(vals, vec_from_list(&arena, list).unwrap());
    }

    #[test]
    fn improper_list_errors() {
        let arena = Arena::default();
        let improper = arena.insert(Value::Pair(
            RefCell::new(int(&arena, 1)),
            RefCell::new(int(&arena, 2)),
        ));
        assert!(vec_from_list(&arena, improper).is_err());
    }

    #[test]
    fn print_proper_and_dotted() {
        let arena = Arena::default();
        let vals = vec![int(&arena, 1), int(&arena, 2)];
        let list = list_from_vec(&arena, &vals);
        assert_eq!("(1 2)", pretty_print(&arena, list));

        let dotted = arena.insert(Value::Pair(
            RefCell::new(int(&arena, 1)),
            RefCell::new(int(&arena, 2)),
        ));
        assert_eq!("(1 . 2)", pretty_print(&arena, dotted));
    }

    #[test]
    fn print_atoms() {
        let arena = Arena::default();
        assert_eq!("#t", pretty_print(&arena, arena.t));
        assert_eq!("()", pretty_print(&arena, arena.empty_list));
        let sym = arena.insert(Value::Symbol("fnord".into()));
        assert_eq!("fnord", pretty_print(&arena, sym));
        let s = arena.insert(Value::String(RefCell::new("a\"b".into())));
        assert_eq!("\"a\\\"b\"", pretty_print(&arena, s));
    }
}
