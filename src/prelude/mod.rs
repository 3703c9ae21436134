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

//! Standard procedures derived from the primitive substrate.
//!
//! ### Provided
//! memq memv member assq assv assoc
//!
//! = zero? positive? negative? odd? even?
//! max min
//! quotient remainder modulo
//! gcd lcm factorial
//! make-polar magnitude angle
//!
//! list? length append reverse
//! list-tail list-ref
//! map for-each foldr
//!
//! list->vector vector->list vector-fill!
//!
//! begin force negate
//! call/cc ~> alias for call-with-current-continuation

use prelude::control::*;
use prelude::list::*;
use prelude::numeric::*;
use prelude::search::*;
use prelude::vector::*;
use primitives::{Primitive, PrimitiveImplementation};

pub mod control;
pub mod list;
pub mod numeric;
pub mod search;
pub mod vector;

macro_rules! simple_primitive {
    ($name:expr, $implementation:ident) => {
        Primitive {
            name: $name,
            implementation: PrimitiveImplementation::Simple($implementation),
        }
    };
}

static DERIVED: [Primitive; 39] = [
    simple_primitive!("memq", memq),
    simple_primitive!("memv", memv),
    simple_primitive!("member", member),
    simple_primitive!("assq", assq),
    simple_primitive!("assv", assv),
    simple_primitive!("assoc", assoc),
    simple_primitive!("=", equal),
    simple_primitive!("zero?", zero_p),
    simple_primitive!("positive?", positive_p),
    simple_primitive!("negative?", negative_p),
    simple_primitive!("odd?", odd_p),
    simple_primitive!("even?", even_p),
    simple_primitive!("max", max),
    simple_primitive!("min", min),
    simple_primitive!("quotient", quotient),
    simple_primitive!("remainder", remainder),
    simple_primitive!("modulo", modulo),
    simple_primitive!("gcd", gcd),
    simple_primitive!("lcm", lcm),
    simple_primitive!("factorial", factorial),
    simple_primitive!("make-polar", make_polar),
    simple_primitive!("magnitude", magnitude),
    simple_primitive!("angle", angle),
    simple_primitive!("list?", list_p),
    simple_primitive!("length", length),
    simple_primitive!("append", append),
    simple_primitive!("reverse", reverse),
    simple_primitive!("list-tail", list_tail),
    simple_primitive!("list-ref", list_ref),
    simple_primitive!("map", map),
    simple_primitive!("for-each", for_each),
    simple_primitive!("foldr", foldr),
    simple_primitive!("list->vector", list_to_vector),
    simple_primitive!("vector->list", vector_to_list),
    simple_primitive!("vector-fill!", vector_fill_b),
    simple_primitive!("begin", begin),
    simple_primitive!("force", force),
    simple_primitive!("negate", negate),
    Primitive {
        name: "call/cc",
        implementation: PrimitiveImplementation::CallCC,
    },
];

pub fn lookup(name: &str) -> Option<&'static Primitive> {
    DERIVED.iter().find(|p| p.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name() {
        assert!(lookup("assoc").is_some());
        assert!(lookup("vector-fill!").is_some());
        assert!(lookup("cons").is_none());
    }

    #[test]
    fn names_are_unique() {
        for (i, p) in DERIVED.iter().enumerate() {
            assert!(
                DERIVED[i + 1..].iter().all(|q| q.name != p.name),
                "duplicate name {}",
                p.name
            );
        }
    }
}
