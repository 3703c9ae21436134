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
use primitives::apply;
use util::check_len;
use value::{pretty_print, Value};

/// All arguments have necessarily been evaluated by the time a procedure is
/// applied, so begin reduces to selecting the last of them.
pub fn begin(_arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(1), None).map_err(|e| format!("begin: {}", e))?;
    Ok(args[args.len() - 1])
}

/// Forces a promise by invoking it with no arguments. No memoization:
/// forcing the same promise again re-invokes it.
pub fn force(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(1), Some(1))?;
    apply(arena, args[0], &[])
}

/// Boolean inputs get their inverse back; callable inputs get a procedure
/// that applies them and inverts the truthiness of the result.
pub fn negate(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(1), Some(1))?;
    match arena.get(args[0]) {
        Value::Boolean(b) => Ok(arena.insert(Value::Boolean(!*b))),
        v if v.callable() => Ok(arena.insert(Value::Complement(args[0]))),
        _ => Err(format!(
            "negate: expected a boolean or a procedure: {}",
            pretty_print(arena, args[0])
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;
    use primitives::lookup;
    use prelude;

    fn int(arena: &Arena, i: i64) -> usize {
        arena.insert(Value::Integer(BigInt::from(i)))
    }

    fn prim(arena: &Arena, name: &str) -> usize {
        arena.insert(Value::Primitive(lookup(name).expect("unknown primitive")))
    }

    #[test]
    fn begin_selects_the_last_value() {
        let arena = Arena::default();
        let last = int(&arena, 3);
        assert_eq!(
            last,
            begin(&arena, &[int(&arena, 1), int(&arena, 2), last]).unwrap()
        );
        assert!(begin(&arena, &[]).is_err());
    }

    #[test]
    fn force_invokes_a_promise() {
        let arena = Arena::default();
        // `+` applied to no arguments stands in for a promise of 0.
        let promise = prim(&arena, "+");
        let result = force(&arena, &[promise]).unwrap();
        assert_eq!(Value::Integer(BigInt::from(0)), *arena.get(result));
    }

    #[test]
    fn negate_booleans() {
        let arena = Arena::default();
        assert_eq!(arena.f, negate(&arena, &[arena.t]).unwrap());
        assert_eq!(arena.t, negate(&arena, &[arena.f]).unwrap());
        assert!(negate(&arena, &[int(&arena, 1)]).is_err());
    }

    #[test]
    fn negate_procedures() {
        let arena = Arena::default();
        let odd = arena.insert(Value::Primitive(
            prelude::lookup("odd?").expect("odd? not registered"),
        ));
        let not_odd = negate(&arena, &[odd]).unwrap();
        assert_eq!(arena.f, apply(&arena, not_odd, &[int(&arena, 3)]).unwrap());
        assert_eq!(arena.t, apply(&arena, not_odd, &[int(&arena, 4)]).unwrap());
        // Negating twice layers another complement.
        let odd_again = negate(&arena, &[not_odd]).unwrap();
        assert_eq!(arena.t, apply(&arena, odd_again, &[int(&arena, 3)]).unwrap());
    }
}
