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

use arena::Arena;
use util::check_len;
use value::{pretty_print, Value};

pub fn pair_p(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(1), Some(1))?;
    let ans = match arena.get(args[0]) {
        Value::Pair(_, _) => true,
        _ => false,
    };
    Ok(arena.insert(Value::Boolean(ans)))
}

pub fn cons(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(2), Some(2))?;
    Ok(arena.insert(Value::Pair(RefCell::new(args[0]), RefCell::new(args[1]))))
}

pub fn car(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(1), Some(1))?;
    match arena.get(args[0]) {
        Value::Pair(car, _) => Ok(*car.borrow()),
        _ => Err(format!(
            "Called car on a non-pair: {}",
            pretty_print(arena, args[0])
        )),
    }
}

pub fn cdr(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(1), Some(1))?;
    match arena.get(args[0]) {
        Value::Pair(_, cdr) => Ok(*cdr.borrow()),
        _ => Err(format!(
            "Called cdr on a non-pair: {}",
            pretty_print(arena, args[0])
        )),
    }
}

pub fn set_car_b(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(2), Some(2))?;
    match arena.get(args[0]) {
        Value::Pair(car, _) => {
            car.replace(args[1]);
            Ok(arena.unspecific)
        }
        _ => Err(format!(
            "Called set-car! on a non-pair: {}",
            pretty_print(arena, args[0])
        )),
    }
}

pub fn set_cdr_b(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(2), Some(2))?;
    match arena.get(args[0]) {
        Value::Pair(_, cdr) => {
            cdr.replace(args[1]);
            Ok(arena.unspecific)
        }
        _ => Err(format!(
            "Called set-cdr! on a non-pair: {}",
            pretty_print(arena, args[0])
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn int(arena: &Arena, i: i64) -> usize {
        arena.insert(Value::Integer(BigInt::from(i)))
    }

    #[test]
    fn cons_car_cdr() {
        let arena = Arena::default();
        let p = cons(&arena, &[int(&arena, 1), int(&arena, 2)]).unwrap();
        assert_eq!(
            Value::Integer(BigInt::from(1)),
            *arena.get(car(&arena, &[p]).unwrap())
        );
        assert_eq!(
            Value::Integer(BigInt::from(2)),
            *arena.get(cdr(&arena, &[p]).unwrap())
        );
    }

    #[test]
    fn mutation() {
        let arena = Arena::default();
        let p = cons(&arena, &[int(&arena, 1), int(&arena, 2)]).unwrap();
        set_car_b(&arena, &[p, int(&arena, 10)]).unwrap();
        set_cdr_b(&arena, &[p, arena.empty_list]).unwrap();
        assert_eq!(
            Value::Integer(BigInt::from(10)),
            *arena.get(car(&arena, &[p]).unwrap())
        );
        assert_eq!(arena.empty_list, cdr(&arena, &[p]).unwrap());
    }

    #[test]
    fn car_of_non_pair() {
        let arena = Arena::default();
        assert!(car(&arena, &[arena.empty_list]).is_err());
        assert!(cdr(&arena, &[arena.t]).is_err());
    }
}
