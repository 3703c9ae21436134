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

//! The primitive substrate the derived procedures are built on.
//!
//! Naming conventions in Rust: replace `?` with `_p`, `!` with `_b`, `->` with
//! `_to_`.

use std::fmt::{Debug, Error, Formatter};

use arena::Arena;
use primitives::numeric::*;
use primitives::object::*;
use primitives::pair::*;
use primitives::vector::*;
use util::check_len;
use value::{pretty_print, vec_from_list, Value};

pub mod numeric;
pub mod object;
pub mod pair;
pub mod vector;

macro_rules! simple_primitive {
    ($name:expr, $implementation:ident) => {
        Primitive {
            name: $name,
            implementation: PrimitiveImplementation::Simple($implementation),
        }
    };
}

static PRIMITIVES: [Primitive; 47] = [
    simple_primitive!("eq?", eq_p),
    simple_primitive!("eqv?", eqv_p),
    simple_primitive!("equal?", equal_p),
    simple_primitive!("procedure?", procedure_p),
    simple_primitive!("display", display),
    simple_primitive!("pair?", pair_p),
    simple_primitive!("cons", cons),
    simple_primitive!("car", car),
    simple_primitive!("cdr", cdr),
    simple_primitive!("set-car!", set_car_b),
    simple_primitive!("set-cdr!", set_cdr_b),
    simple_primitive!("vector?", vector_p),
    simple_primitive!("make-vector", make_vector),
    simple_primitive!("vector-length", vector_length),
    simple_primitive!("vector-ref", vector_ref),
    simple_primitive!("vector-set!", vector_set_b),
    simple_primitive!("number?", number_p),
    simple_primitive!("complex?", complex_p),
    simple_primitive!("real?", real_p),
    simple_primitive!("rational?", rational_p),
    simple_primitive!("integer?", integer_p),
    simple_primitive!("exact?", exact_p),
    simple_primitive!("inexact?", inexact_p),
    simple_primitive!("<", less_than),
    simple_primitive!(">", greater_than),
    simple_primitive!("<=", less_than_equal),
    simple_primitive!(">=", greater_than_equal),
    simple_primitive!("+", add),
    simple_primitive!("*", mul),
    simple_primitive!("-", sub),
    simple_primitive!("/", div),
    simple_primitive!("floor", floor),
    simple_primitive!("ceiling", ceiling),
    simple_primitive!("ceil", ceiling),
    simple_primitive!("round", round),
    simple_primitive!("truncate", truncate),
    simple_primitive!("sin", sin),
    simple_primitive!("cos", cos),
    simple_primitive!("atan", atan),
    simple_primitive!("sqrt", sqrt),
    simple_primitive!("exp", exp),
    simple_primitive!("abs", abs),
    simple_primitive!("make-rectangular", make_rectangular),
    simple_primitive!("real-part", real_part),
    simple_primitive!("imag-part", imag_part),
    Primitive {
        name: "apply",
        implementation: PrimitiveImplementation::Apply,
    },
    Primitive {
        name: "call-with-current-continuation",
        implementation: PrimitiveImplementation::CallCC,
    },
];

pub struct Primitive {
    pub name: &'static str,
    pub implementation: PrimitiveImplementation,
}

pub enum PrimitiveImplementation {
    Simple(fn(&Arena, &[usize]) -> Result<usize, String>),
    Apply,
    CallCC,
}

impl Debug for Primitive {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "primitive {}", self.name)
    }
}

impl PartialEq for Primitive {
    fn eq(&self, other: &Primitive) -> bool {
        self.name == other.name
    }
}

pub fn lookup(name: &str) -> Option<&'static Primitive> {
    PRIMITIVES.iter().find(|p| p.name == name)
}

/// Applies a procedure value to an argument vector.
///
/// Continuation capture is delegated to the host evaluator; applying the
/// `call-with-current-continuation` marker without one is an error.
pub fn apply(arena: &Arena, fun: usize, args: &[usize]) -> Result<usize, String> {
    match arena.get(fun) {
        Value::Primitive(p) => match p.implementation {
            PrimitiveImplementation::Simple(f) => f(arena, args),
            PrimitiveImplementation::Apply => {
                check_len(args, Some(2), None)?;
                let mut full = args[1..args.len() - 1].to_vec();
                full.extend(vec_from_list(arena, args[args.len() - 1])?);
                apply(arena, args[0], &full)
            }
            PrimitiveImplementation::CallCC => Err(format!(
                "{} must be applied by the host evaluator",
                p.name
            )),
        },
        Value::Complement(f) => {
            let res = apply(arena, *f, args)?;
            Ok(arena.insert(Value::Boolean(!arena.get(res).truthy())))
        }
        _ => Err(format!(
            "tried to apply non-procedure: {}",
            pretty_print(arena, fun)
        )),
    }
}
