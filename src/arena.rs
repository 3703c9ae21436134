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
use std::collections::HashMap;

use num_bigint::BigInt;

use gc::Gc;
use value::Value;

/// Holds all live values. Values are referenced by their index in the arena,
/// so pair identity is arena-index identity and the sharing behavior of
/// structure-returning procedures falls out of the representation.
///
/// Symbols are interned, and the handful of singleton values get one canonical
/// cell each, so identity comparison works on them.
pub struct Arena {
    values: Gc<Value>,
    symbol_map: RefCell<HashMap<String, usize>>,
    pub undefined: usize,
    pub unspecific: usize,
    pub empty_list: usize,
    pub t: usize,
    pub f: usize,
}

impl Arena {
    /// Moves a value into the arena, and returns its position.
    pub fn insert(&self, v: Value) -> usize {
        match v {
            Value::Undefined => self.undefined,
            Value::Unspecific => self.unspecific,
            Value::EmptyList => self.empty_list,
            Value::Boolean(true) => self.t,
            Value::Boolean(false) => self.f,
            Value::Symbol(s) => {
                let res = self.symbol_map.borrow().get(&s).cloned();
                match res {
                    Some(u) => u,
                    None => {
                        let label = s.clone();
                        let pos = self.values.insert(Value::Symbol(s));
                        self.symbol_map.borrow_mut().insert(label, pos);
                        pos
                    }
                }
            }
            _ => self.values.insert(v),
        }
    }

    /// Given a position in the arena, returns a reference to the value at that
    /// location.
    pub fn get(&self, at: usize) -> &Value {
        self.values.get(at)
    }

    pub fn try_get_integer(&self, at: usize) -> Option<&BigInt> {
        match self.get(at) {
            Value::Integer(i) => Some(i),
            _ => None,
        }
    }

    pub fn try_get_character(&self, at: usize) -> Option<char> {
        match self.get(at) {
            Value::Character(c) => Some(*c),
            _ => None,
        }
    }

    pub fn try_get_string(&self, at: usize) -> Option<&RefCell<String>> {
        match self.get(at) {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn try_get_symbol(&self, at: usize) -> Option<&str> {
        match self.get(at) {
            Value::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn try_get_pair(&self, at: usize) -> Option<(&RefCell<usize>, &RefCell<usize>)> {
        match self.get(at) {
            Value::Pair(car, cdr) => Some((car, cdr)),
            _ => None,
        }
    }

    pub fn try_get_vector(&self, at: usize) -> Option<&RefCell<Vec<usize>>> {
        match self.get(at) {
            Value::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn collect(&mut self, roots: &[usize]) {
        let mut all_roots: Vec<usize> = vec![
            self.undefined,
            self.unspecific,
            self.empty_list,
            self.t,
            self.f,
        ];
        all_roots.extend(self.symbol_map.borrow().values());
        all_roots.extend_from_slice(roots);
        self.values.collect(&all_roots);
    }
}

impl Default for Arena {
    fn default() -> Self {
        let values = Gc::default();
        let undefined = values.insert(Value::Undefined);
        let unspecific = values.insert(Value::Unspecific);
        let empty_list = values.insert(Value::EmptyList);
        let f = values.insert(Value::Boolean(false));
        let t = values.insert(Value::Boolean(true));
        Arena {
            values,
            symbol_map: RefCell::new(HashMap::new()),
            undefined,
            unspecific,
            empty_list,
            f,
            t,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_ENTRY: usize = 5;

    #[test]
    fn add_empty() {
        let arena = Arena::default();
        assert_eq!(BASE_ENTRY, arena.insert(Value::Symbol("abc".into())));
    }

    #[test]
    fn get() {
        let arena = Arena::default();
        assert_eq!(BASE_ENTRY, arena.insert(Value::Real(0.1)));
        assert_eq!(Value::Real(0.1), *arena.get(BASE_ENTRY));
    }

    #[test]
    fn symbols_are_interned() {
        let arena = Arena::default();
        let a = arena.insert(Value::Symbol("abc".into()));
        let b = arena.insert(Value::Symbol("abc".into()));
        let c = arena.insert(Value::Symbol("abd".into()));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn singletons_are_canonical() {
        let arena = Arena::default();
        assert_eq!(arena.t, arena.insert(Value::Boolean(true)));
        assert_eq!(arena.f, arena.insert(Value::Boolean(false)));
        assert_eq!(arena.empty_list, arena.insert(Value::EmptyList));
    }
}
