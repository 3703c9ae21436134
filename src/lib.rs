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

extern crate bitvec;
#[macro_use]
extern crate log;
extern crate num_bigint;
extern crate num_complex;
extern crate num_integer;
extern crate num_rational;
extern crate num_traits;

use primitives::Primitive;

pub mod arena;
pub mod gc;
pub mod prelude;
pub mod primitives;
pub mod util;
pub mod value;

/// Resolves a procedure by its Scheme name.
///
/// The derived procedures are searched before the substrate primitives, so the
/// prelude may shadow a primitive of the same name.
pub fn resolve(name: &str) -> Option<&'static Primitive> {
    prelude::lookup(name).or_else(|| primitives::lookup(name))
}
