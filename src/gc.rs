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

//! Cell store with mark&sweep collection.
//!
//! Simple and slow. Values are put into a large vector, and referenced by
//! their index in it. A list of free cells is maintained for reuse.
//!
//! Stored values must implement the [Inventory] trait, which asks them to push
//! the indices of other cells they hold references to. The mark phase walks
//! the reference graph from the roots into a `bitvec` bitmap; the sweep phase
//! returns every unmarked cell to the free list.
//!
//! The UnsafeCell business is used because we want to be able to add values to
//! the store while references are being held. (You can insert in a non-mutable
//! store.) Collection cannot happen while values are being held.

use std::cell::{RefCell, UnsafeCell};

use bitvec::prelude::BitVec;

pub struct PushOnlyVec<T> {
    underlying: Vec<T>,
}

impl<T> PushOnlyVec<T> {
    pub fn push(&mut self, v: T) {
        self.underlying.push(v);
    }

    fn get_vec(&mut self) -> &mut Vec<T> {
        &mut self.underlying
    }
}

pub trait Inventory {
    fn inventory(&self, v: &mut PushOnlyVec<usize>);
}

pub struct Gc<T: Inventory> {
    cells: UnsafeCell<Vec<Option<Box<T>>>>,
    free_cells: RefCell<Vec<usize>>,
}

impl<T: Inventory> Gc<T> {
    pub fn insert(&self, val: T) -> usize {
        let boxed = Some(Box::new(val));
        if let Some(insert_pos) = self.free_cells.borrow_mut().pop() {
            unsafe {
                (&mut *self.cells.get())[insert_pos] = boxed;
            }
            insert_pos
        } else {
            unsafe {
                (*self.cells.get()).push(boxed);
                (*self.cells.get()).len() - 1
            }
        }
    }

    pub fn maybe_get(&self, pos: usize) -> Option<&T> {
        unsafe {
            if let Some(Some(ref r)) = (&*self.cells.get()).get(pos) {
                Some(r)
            } else {
                None
            }
        }
    }

    pub fn get(&self, pos: usize) -> &T {
        self.maybe_get(pos).expect("get() on invalid GC cell")
    }

    fn remove(&mut self, pos: usize) {
        if unsafe { std::mem::replace(&mut (&mut *self.cells.get())[pos], None) }.is_some() {
            self.free_cells.borrow_mut().push(pos);
        }
    }

    pub fn collect(&mut self, roots: &[usize]) {
        let current_len = unsafe { (*self.cells.get()).len() };

        let mut marks: BitVec = BitVec::repeat(false, current_len);
        let mut to_mark = PushOnlyVec {
            underlying: Vec::new(),
        };
        to_mark.get_vec().extend_from_slice(roots);

        while let Some(i) = to_mark.get_vec().pop() {
            if marks[i] {
                continue;
            }
            marks.set(i, true);
            self.get(i).inventory(&mut to_mark);
        }

        let mut freed = 0;
        for i_m in 0..current_len {
            if !marks[i_m] {
                self.remove(i_m);
                freed += 1;
            }
        }
        debug!("collected {} of {} cells", freed, current_len);
    }
}

impl<T: Inventory> Default for Gc<T> {
    fn default() -> Self {
        Gc {
            cells: UnsafeCell::new(Vec::new()),
            free_cells: RefCell::new(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Cell {
        pub label: String,
        pub refs: Vec<usize>,
    }

    impl Cell {
        fn new(label: &str, refs: Vec<usize>) -> Self {
            Cell {
                label: label.into(),
                refs,
            }
        }
    }

    impl Inventory for Cell {
        fn inventory(&self, pv: &mut PushOnlyVec<usize>) {
            for v in self.refs.iter() {
                pv.push(*v);
            }
        }
    }

    #[test]
    fn insert_then_get() {
        let gc: Gc<Cell> = Default::default();
        assert_eq!(gc.insert(Cell::new("a", vec![])), 0);
        assert_eq!(gc.insert(Cell::new("b", vec![])), 1);
        assert_eq!(gc.get(1).label, "b");
    }

    #[test]
    fn collect_reuses_cells() {
        let mut gc: Gc<Cell> = Default::default();
        assert_eq!(gc.insert(Cell::new("a", vec![])), 0);
        assert_eq!(gc.insert(Cell::new("b", vec![])), 1);
        gc.collect(&[]);
        assert_eq!(gc.insert(Cell::new("c", vec![])), 1);
        assert_eq!(gc.insert(Cell::new("d", vec![])), 0);
    }

    #[test]
    fn collect_keeps_roots() {
        let mut gc: Gc<Cell> = Default::default();
        assert_eq!(gc.insert(Cell::new("root", vec![])), 0);
        assert_eq!(gc.insert(Cell::new("garbage", vec![])), 1);
        gc.collect(&[0]);
        assert_eq!(gc.get(0).label, "root");
        assert!(gc.maybe_get(1).is_none());
    }

    #[test]
    fn collect_follows_graph() {
        // 0 -> 1 -> 2 -> 0 is a rooted loop; 3 <-> 4 is unreachable.
        let mut gc: Gc<Cell> = Default::default();
        assert_eq!(gc.insert(Cell::new("0", vec![1])), 0);
        assert_eq!(gc.insert(Cell::new("1", vec![2])), 1);
        assert_eq!(gc.insert(Cell::new("2", vec![0])), 2);
        assert_eq!(gc.insert(Cell::new("3", vec![4])), 3);
        assert_eq!(gc.insert(Cell::new("4", vec![3])), 4);
        gc.collect(&[0]);
        assert_eq!(gc.get(0).label, "0");
        assert_eq!(gc.get(1).label, "1");
        assert_eq!(gc.get(2).label, "2");
        assert!(gc.maybe_get(3).is_none());
        assert!(gc.maybe_get(4).is_none());
    }

    #[test]
    fn no_readdress_on_growth() {
        let gc: Gc<Cell> = Default::default();
        gc.insert(Cell::new("pinned", vec![]));
        let val = gc.get(0);
        for _i in 0..10_000 {
            gc.insert(Cell::new("filler", vec![]));
        }
        assert_eq!(val.label, "pinned");
    }
}
