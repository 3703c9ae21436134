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

//! The traversal procedures here iterate down cdr spines instead of recursing,
//! so stack use does not grow with list length. None of them detect cycles;
//! a cyclic argument hangs.

use std::cell::RefCell;

use num_bigint::BigInt;
use num_traits::ToPrimitive;

use arena::Arena;
use primitives::apply;
use util::check_len;
use value::{list_from_vec, pretty_print, vec_from_list, Value};

pub fn list_p(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(1), Some(1))?;
    let mut current = args[0];
    loop {
        match arena.get(current) {
            Value::EmptyList => return Ok(arena.t),
            Value::Pair(_, cdr) => current = *cdr.borrow(),
            _ => return Ok(arena.f),
        }
    }
}

pub fn length(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(1), Some(1))?;
    let mut count: usize = 0;
    let mut current = args[0];
    loop {
        match arena.get(current) {
            Value::EmptyList => return Ok(arena.insert(Value::Integer(BigInt::from(count)))),
            Value::Pair(_, cdr) => {
                count += 1;
                current = *cdr.borrow();
            }
            _ => {
                return Err(format!(
                    "length: not a proper list: {}",
                    pretty_print(arena, args[0])
                ));
            }
        }
    }
}

/// Every argument but the last is copied into a fresh chain, linked up with
/// tail mutation; the last argument is attached as-is. The result therefore
/// shares structure with the final argument, and mutating that argument
/// afterwards is visible through the result.
pub fn append(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    if args.is_empty() {
        return Ok(arena.empty_list);
    }
    let mut head = None;
    let mut last_pair = None;
    for list in args[..args.len() - 1].iter() {
        let mut current = *list;
        loop {
            match arena.get(current) {
                Value::EmptyList => break,
                Value::Pair(car, cdr) => {
                    let fresh = arena.insert(Value::Pair(
                        RefCell::new(*car.borrow()),
                        RefCell::new(arena.empty_list),
                    ));
                    match last_pair {
                        Some(p) => set_tail(arena, p, fresh),
                        None => head = Some(fresh),
                    }
                    last_pair = Some(fresh);
                    current = *cdr.borrow();
                }
                _ => {
                    return Err(format!(
                        "append: not a proper list: {}",
                        pretty_print(arena, *list)
                    ));
                }
            }
        }
    }
    let last = args[args.len() - 1];
    match (head, last_pair) {
        (Some(h), Some(p)) => {
            set_tail(arena, p, last);
            Ok(h)
        }
        _ => Ok(last),
    }
}

// Only called on pairs of the fresh chain.
fn set_tail(arena: &Arena, pair: usize, value: usize) {
    match arena.get(pair) {
        Value::Pair(_, cdr) => {
            cdr.replace(value);
        }
        _ => panic!("append: fresh chain node is not a pair"),
    }
}

pub fn reverse(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(1), Some(1))?;
    let mut result = arena.empty_list;
    let mut current = args[0];
    loop {
        match arena.get(current) {
            Value::EmptyList => return Ok(result),
            Value::Pair(car, cdr) => {
                result = arena.insert(Value::Pair(
                    RefCell::new(*car.borrow()),
                    RefCell::new(result),
                ));
                current = *cdr.borrow();
            }
            _ => {
                return Err(format!(
                    "reverse: not a proper list: {}",
                    pretty_print(arena, args[0])
                ));
            }
        }
    }
}

pub fn list_tail(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(2), Some(2))?;
    let k = arena
        .try_get_integer(args[1])
        .and_then(|i| i.to_usize())
        .ok_or_else(|| {
            format!(
                "list-tail: invalid index: {}",
                pretty_print(arena, args[1])
            )
        })?;
    let mut current = args[0];
    for _ in 0..k {
        match arena.get(current) {
            Value::Pair(_, cdr) => current = *cdr.borrow(),
            _ => {
                return Err(format!(
                    "list-tail: index {} out of range for {}",
                    k,
                    pretty_print(arena, args[0])
                ));
            }
        }
    }
    Ok(current)
}

pub fn list_ref(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    let tail = list_tail(arena, args)?;
    match arena.get(tail) {
        Value::Pair(car, _) => Ok(*car.borrow()),
        _ => Err(format!(
            "list-ref: index {} out of range for {}",
            pretty_print(arena, args[1]),
            pretty_print(arena, args[0])
        )),
    }
}

pub fn map(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(2), None)?;
    let mut results = Vec::new();
    traverse(arena, "map", args[0], &args[1..], |v| results.push(v))?;
    Ok(list_from_vec(arena, &results))
}

pub fn for_each(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(2), None)?;
    traverse(arena, "for-each", args[0], &args[1..], |_| ())?;
    Ok(arena.unspecific)
}

/// Parallel traversal for map and for-each. Termination tracks the first
/// list only; a subsequent list running out before the first one is an
/// explicit error rather than a silent truncation.
fn traverse<F: FnMut(usize)>(
    arena: &Arena,
    who: &str,
    fun: usize,
    lists: &[usize],
    mut sink: F,
) -> Result<(), String> {
    let mut tails = lists.to_vec();
    loop {
        match arena.get(tails[0]) {
            Value::EmptyList => return Ok(()),
            Value::Pair(_, _) => (),
            _ => {
                return Err(format!(
                    "{}: not a proper list: {}",
                    who,
                    pretty_print(arena, tails[0])
                ));
            }
        }
        let mut call_args = Vec::with_capacity(tails.len());
        for tail in tails.iter_mut() {
            match arena.get(*tail) {
                Value::Pair(car, cdr) => {
                    call_args.push(*car.borrow());
                    *tail = *cdr.borrow();
                }
                Value::EmptyList => return Err(format!("{}: a list ran out of elements", who)),
                _ => {
                    return Err(format!(
                        "{}: not a proper list: {}",
                        who,
                        pretty_print(arena, *tail)
                    ));
                }
            }
        }
        sink(apply(arena, fun, &call_args)?);
    }
}

/// Right fold: the last element is combined with the seed first. The spine is
/// materialized and walked backwards, so deep lists do not grow the stack.
pub fn foldr(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    check_len(args, Some(3), Some(3))?;
    let elements = vec_from_list(arena, args[2]).map_err(|e| format!("foldr: {}", e))?;
    let mut acc = args[1];
    for e in elements.iter().rev() {
        acc = apply(arena, args[0], &[*e, acc])?;
    }
    Ok(acc)
}
