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

//! The six lookup procedures are specializations of one scan, parameterized
//! along two independent axes: what is extracted from each visited node
//! before comparison (the node itself for the member family, the head of the
//! entry for the association family), and which equality predicate the
//! extracted value is compared with.

use arena::Arena;
use primitives::object::{eq, equal, eqv};
use util::check_len;
use value::{pretty_print, Value};

type Extraction = fn(&Arena, usize) -> Result<usize, String>;
type EqualityPredicate = fn(&Arena, usize, usize) -> bool;

fn element(_arena: &Arena, node: usize) -> Result<usize, String> {
    Ok(node)
}

fn entry_key(arena: &Arena, node: usize) -> Result<usize, String> {
    match arena.get(node) {
        Value::Pair(car, _) => Ok(*car.borrow()),
        _ => Err(format!(
            "association entry is not a pair: {}",
            pretty_print(arena, node)
        )),
    }
}

/// Scans successive tails of `list`. At each position, the extraction is
/// applied to the node and the result compared with `key`; on a match the
/// node itself is returned, never the extracted value. An exhausted list
/// yields `#f`, never the empty list.
fn scan(
    arena: &Arena,
    key: usize,
    list: usize,
    extract: Extraction,
    pred: EqualityPredicate,
) -> Result<usize, String> {
    let mut current = list;
    loop {
        match arena.get(current) {
            Value::EmptyList => return Ok(arena.f),
            Value::Pair(car, cdr) => {
                let node = *car.borrow();
                if pred(arena, key, extract(arena, node)?) {
                    return Ok(node);
                }
                current = *cdr.borrow();
            }
            _ => {
                return Err(format!(
                    "not a proper list: {}",
                    pretty_print(arena, list)
                ));
            }
        }
    }
}

fn search(
    arena: &Arena,
    args: &[usize],
    extract: Extraction,
    pred: EqualityPredicate,
) -> Result<usize, String> {
    check_len(args, Some(2), Some(2))?;
    scan(arena, args[0], args[1], extract, pred)
}

pub fn memq(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    search(arena, args, element, eq)
}

pub fn memv(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    search(arena, args, element, eqv)
}

pub fn member(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    search(arena, args, element, equal)
}

pub fn assq(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    search(arena, args, entry_key, eq)
}

pub fn assv(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    search(arena, args, entry_key, eqv)
}

pub fn assoc(arena: &Arena, args: &[usize]) -> Result<usize, String> {
    search(arena, args, entry_key, equal)
}
