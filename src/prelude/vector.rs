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

//! Conversions between lists and vectors always allocate a fresh container;
//! the two never share storage.

use std::cell::RefCell;

use arena::Arena;
use util::check_len;
use value::{pretty_print, vec_from_list, Value};

pub fn list_to_vector(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(1), Some(1))?;
    let elements = vec_from_list(arena, args[0]).map_err(|e| format!("list->vector: {}", e))?;
    Ok(arena.insert(Value::Vector(RefCell::new(elements))))
}

/// Walks the vector from the last index to the first, consing as it goes, so
/// the list comes out in order without a reversal pass.
pub fn vector_to_list(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(1), Some(1))?;
    let vec = arena.try_get_vector(args[0]).ok_or_else(|| {
        format!(
            "vector->list: not a vector: {}",
            pretty_print(arena, args[0])
        )
    })?;
    let borrowed = vec.borrow();
    let mut result = arena.empty_list;
    for v in borrowed.iter().rev() {
        result = arena.insert(Value::Pair(RefCell::new(*v), RefCell::new(result)));
    }
    Ok(result)
}

/// Overwrites every slot, from the last index down to zero, and returns the
/// vector itself.
pub fn vector_fill_b(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(2), Some(2))?;
    let vec = arena.try_get_vector(args[0]).ok_or_else(|| {
        format!(
            "vector-fill!: not a vector: {}",
            pretty_print(arena, args[0])
        )
    })?;
    let mut borrowed = vec.borrow_mut();
    for i in (0..borrowed.len()).rev() {
        borrowed[i] = args[1];
    }
    Ok(args[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;
    use primitives::object::equal;
    use value::list_from_vec;

    fn int(arena: &Arena, i: i64) -> usize {
        arena.insert(Value::Integer(BigInt::from(i)))
    }

    fn int_list(arena: &Arena, xs: &[i64]) -> usize {
        let vals: Vec<usize> = xs.iter().map(|&x| int(arena, x)).collect();
        list_from_vec(arena, &vals)
    }

    #[test]
    fn roundtrip_preserves_value_equality() {
        let arena = Arena::default();
        let l = int_list(&arena, &[1, 2, 3]);
        let v = list_to_vector(&arena, &[l]).unwrap();
        let back = vector_to_list(&arena, &[v]).unwrap();
        assert!(equal(&arena, l, back));
        // A fresh list, not the original structure.
        assert_ne!(l, back);
    }

    #[test]
    fn empty_roundtrip() {
        let arena = Arena::default();
        let v = list_to_vector(&arena, &[arena.empty_list]).unwrap();
        assert_eq!(0, arena.try_get_vector(v).unwrap().borrow().len());
        assert_eq!(arena.empty_list, vector_to_list(&arena, &[v]).unwrap());
    }

    #[test]
    fn fill_overwrites_and_returns_the_vector() {
        let arena = Arena::default();
        let v = list_to_vector(&arena, &[int_list(&arena, &[1, 2, 3])]).unwrap();
        let filled = vector_fill_b(&arena, &[v, arena.t]).unwrap();
        assert_eq!(v, filled);
        for slot in arena.try_get_vector(v).unwrap().borrow().iter() {
            assert_eq!(arena.t, *slot);
        }
    }

    #[test]
    fn conversion_rejects_non_containers() {
        let arena = Arena::default();
        assert!(list_to_vector(&arena, &[arena.t]).is_err());
        assert!(vector_to_list(&arena, &[arena.empty_list]).is_err());
        assert!(vector_fill_b(&arena, &[arena.f, arena.t]).is_err());
    }
}
