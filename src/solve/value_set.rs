use std::fmt::{self, Debug, Formatter};
use std::iter::FromIterator;

use crate::grid::Value;

/// A set of grid values stored as a bit mask, bit `v - 1` for value `v`
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ValueSet(u16);

impl ValueSet {
    pub const fn new() -> Self {
        ValueSet(0)
    }

    /// The set of values `1..=max`
    pub fn with_all(max: usize) -> Self {
        assert!(max <= 16);
        ValueSet(((1_u32 << max) - 1) as u16)
    }

    pub fn single(value: Value) -> Self {
        let mut set = Self::new();
        set.insert(value);
        set
    }

    fn bit(value: Value) -> u16 {
        debug_assert!((1..=16).contains(&value));
        1 << (value - 1)
    }

    pub fn contains(self, value: Value) -> bool {
        self.0 & Self::bit(value) != 0
    }

    pub fn insert(&mut self, value: Value) -> bool {
        let inserted = !self.contains(value);
        self.0 |= Self::bit(value);
        inserted
    }

    pub fn remove(&mut self, value: Value) -> bool {
        let removed = self.contains(value);
        self.0 &= !Self::bit(value);
        removed
    }

    pub fn union(self, other: Self) -> Self {
        ValueSet(self.0 | other.0)
    }

    pub fn intersection(self, other: Self) -> Self {
        ValueSet(self.0 & other.0)
    }

    pub fn difference(self, other: Self) -> Self {
        ValueSet(self.0 & !other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns the value if the set contains exactly one
    pub fn single_value(self) -> Option<Value> {
        if self.len() == 1 {
            Some(self.0.trailing_zeros() as Value + 1)
        } else {
            None
        }
    }

    /// Iterates values in ascending order
    pub fn iter(self) -> Iter {
        Iter(self.0)
    }
}

pub struct Iter(u16);

impl Iterator for Iter {
    type Item = Value;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            return None;
        }
        let value = self.0.trailing_zeros() as Value + 1;
        // clear the lowest set bit
        self.0 &= self.0 - 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl IntoIterator for ValueSet {
    type Item = Value;
    type IntoIter = Iter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Extend<Value> for ValueSet {
    fn extend<T: IntoIterator<Item = Value>>(&mut self, iter: T) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl FromIterator<Value> for ValueSet {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Debug for ValueSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_all() {
        let set = ValueSet::with_all(9);
        assert_eq!(9, set.len());
        assert_eq!((1..=9).collect::<Vec<Value>>(), set.iter().collect::<Vec<_>>());
    }

    #[test]
    fn insert_remove() {
        let mut set = ValueSet::new();
        assert!(set.insert(3));
        assert!(!set.insert(3));
        assert_eq!(Some(3), set.single_value());
        assert!(set.remove(3));
        assert!(!set.remove(3));
        assert!(set.is_empty());
    }

    #[test]
    fn set_operations() {
        let a: ValueSet = vec![1, 2, 3].into_iter().collect();
        let b: ValueSet = vec![3, 4].into_iter().collect();
        assert_eq!(ValueSet::single(3), a.intersection(b));
        assert_eq!(vec![1, 2], a.difference(b).iter().collect::<Vec<_>>());
        assert_eq!(4, a.union(b).len());
    }
}
