//! This module contains utility functionality needed for this crate. Most
//! prominently, it contains the definition of the [DigitSet] used for storing
//! cell candidates.

use std::fmt::{self, Debug, Formatter};
use std::ops::{
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    BitXor,
    BitXorAssign,
    Sub,
    SubAssign
};

/// All digits 1 to 9, one bit each, with bit `i` standing for digit `i`.
const ALL_DIGITS: u16 = 0b11_1111_1110;

/// A set of Sudoku digits in the range `[1, 9]` that is implemented as a bit
/// mask in a single `u16`. Each digit is represented by one bit. This
/// generally has better performance than a `HashSet` and is trivially
/// copyable, which matters in the solver's hot recursion.
///
/// Digits outside the range `[1, 9]` are never members; inserting or removing
/// them is a no-op that reports no change.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct DigitSet {
    mask: u16
}

impl DigitSet {

    /// Creates a new, empty `DigitSet`.
    pub fn new() -> DigitSet {
        DigitSet {
            mask: 0
        }
    }

    /// Creates a new `DigitSet` that contains all digits 1 to 9.
    pub fn all() -> DigitSet {
        DigitSet {
            mask: ALL_DIGITS
        }
    }

    /// Creates a new `DigitSet` which contains only the given digit, which
    /// must be in the range `[1, 9]`. For digits outside that range, the
    /// empty set is returned.
    pub fn singleton(digit: u8) -> DigitSet {
        let mut set = DigitSet::new();
        set.insert(digit);
        set
    }

    fn mask_of(digit: u8) -> u16 {
        if (1..=9).contains(&digit) {
            1u16 << digit
        }
        else {
            0
        }
    }

    /// Indicates whether this set contains the given digit. Digits outside
    /// the range `[1, 9]` always yield `false`.
    pub fn contains(&self, digit: u8) -> bool {
        self.mask & DigitSet::mask_of(digit) != 0
    }

    /// Inserts the given digit into this set, such that [DigitSet::contains]
    /// returns `true` for it afterwards.
    ///
    /// This method returns `true` if the set has changed (i.e. the digit was
    /// not present before) and `false` otherwise, in particular for digits
    /// outside the range `[1, 9]`.
    pub fn insert(&mut self, digit: u8) -> bool {
        let mask = DigitSet::mask_of(digit);
        let changed = self.mask & mask == 0 && mask != 0;
        self.mask |= mask;
        changed
    }

    /// Removes the given digit from this set, such that [DigitSet::contains]
    /// returns `false` for it afterwards.
    ///
    /// This method returns `true` if the set has changed (i.e. the digit was
    /// present before) and `false` otherwise.
    pub fn remove(&mut self, digit: u8) -> bool {
        let mask = DigitSet::mask_of(digit);
        let changed = self.mask & mask != 0;
        self.mask &= !mask;
        changed
    }

    /// Removes all digits from this set, such that [DigitSet::is_empty] will
    /// return `true` afterwards.
    pub fn clear(&mut self) {
        self.mask = 0;
    }

    /// Indicates whether this set is empty, i.e. contains no digits.
    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Returns the number of digits contained in this set.
    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    /// Returns an iterator over the digits contained in this set in ascending
    /// order.
    pub fn iter(&self) -> DigitSetIter {
        DigitSetIter {
            mask: self.mask
        }
    }
}

impl Default for DigitSet {
    fn default() -> DigitSet {
        DigitSet::new()
    }
}

impl Debug for DigitSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// An iterator over the content of a [DigitSet] in ascending order.
pub struct DigitSetIter {
    mask: u16
}

impl Iterator for DigitSetIter {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.mask == 0 {
            None
        }
        else {
            let digit = self.mask.trailing_zeros() as u8;
            self.mask &= self.mask - 1;
            Some(digit)
        }
    }
}

impl IntoIterator for &DigitSet {
    type Item = u8;
    type IntoIter = DigitSetIter;

    fn into_iter(self) -> DigitSetIter {
        self.iter()
    }
}

/// Creates a new [DigitSet] that contains the specified digits, provided as a
/// comma-separated list.
///
/// An example usage of this macro looks as follows:
///
/// ```
/// use sudoku_mill::digits;
/// use sudoku_mill::util::DigitSet;
///
/// let set = digits!(2, 4);
/// assert!(set.contains(2));
/// assert!(!set.contains(3));
/// ```
#[macro_export]
macro_rules! digits {
    ($($es:expr),*) => {
        {
            #[allow(unused_mut)]
            let mut set = DigitSet::new();
            $(set.insert($es);)*
            set
        }
    };
}

impl BitAnd for DigitSet {
    type Output = DigitSet;

    fn bitand(self, rhs: DigitSet) -> DigitSet {
        DigitSet {
            mask: self.mask & rhs.mask
        }
    }
}

impl BitOr for DigitSet {
    type Output = DigitSet;

    fn bitor(self, rhs: DigitSet) -> DigitSet {
        DigitSet {
            mask: self.mask | rhs.mask
        }
    }
}

impl Sub for DigitSet {
    type Output = DigitSet;

    fn sub(self, rhs: DigitSet) -> DigitSet {
        DigitSet {
            mask: self.mask & !rhs.mask
        }
    }
}

impl BitXor for DigitSet {
    type Output = DigitSet;

    fn bitxor(self, rhs: DigitSet) -> DigitSet {
        DigitSet {
            mask: self.mask ^ rhs.mask
        }
    }
}

impl BitAndAssign for DigitSet {
    fn bitand_assign(&mut self, rhs: DigitSet) {
        self.mask &= rhs.mask;
    }
}

impl BitOrAssign for DigitSet {
    fn bitor_assign(&mut self, rhs: DigitSet) {
        self.mask |= rhs.mask;
    }
}

impl SubAssign for DigitSet {
    fn sub_assign(&mut self, rhs: DigitSet) {
        self.mask &= !rhs.mask;
    }
}

impl BitXorAssign for DigitSet {
    fn bitxor_assign(&mut self, rhs: DigitSet) {
        self.mask ^= rhs.mask;
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn new_set_is_empty() {
        let set = DigitSet::new();
        assert!(set.is_empty());
        assert!(!set.contains(1));
        assert!(!set.contains(3));
        assert!(!set.contains(9));
        assert_eq!(0, set.len());
    }

    #[test]
    fn all_set_is_full() {
        let set = DigitSet::all();
        assert!(!set.is_empty());
        assert!(set.contains(1));
        assert!(set.contains(3));
        assert!(set.contains(9));
        assert_eq!(9, set.len());
    }

    #[test]
    fn singleton_set_contains_only_given_digit() {
        let set = DigitSet::singleton(3);
        assert!(!set.is_empty());
        assert!(!set.contains(1));
        assert!(set.contains(3));
        assert!(!set.contains(9));
        assert_eq!(1, set.len());
    }

    #[test]
    fn digits_macro_contains_specified_digits() {
        let set = digits!(3, 7, 8);
        assert_eq!(3, set.len());
        assert!(set.contains(3));
        assert!(set.contains(7));
        assert!(set.contains(8));
        assert!(!set.contains(5));
    }

    #[test]
    fn out_of_range_digits_are_ignored() {
        let mut set = DigitSet::new();
        assert!(!set.insert(0));
        assert!(!set.insert(10));
        assert!(set.is_empty());
        assert!(!set.contains(0));
        assert!(!set.remove(0));
    }

    #[test]
    fn manipulation() {
        let mut set = DigitSet::new();
        set.insert(2);
        set.insert(4);
        set.insert(6);

        assert!(!set.is_empty());
        assert!(set.contains(2));
        assert!(set.contains(4));
        assert!(set.contains(6));
        assert_eq!(3, set.len());

        set.remove(4);

        assert!(!set.is_empty());
        assert!(set.contains(2));
        assert!(!set.contains(4));
        assert!(set.contains(6));
        assert_eq!(2, set.len());

        set.clear();

        assert!(set.is_empty());
        assert!(!set.contains(2));
        assert!(!set.contains(4));
        assert!(!set.contains(6));
        assert_eq!(0, set.len());
    }

    #[test]
    fn iteration_is_ascending() {
        let set = digits!(9, 1, 5, 2);
        let collected: Vec<u8> = set.iter().collect();
        assert_eq!(vec![1, 2, 5, 9], collected);
    }

    #[test]
    fn double_insert() {
        let mut set = DigitSet::new();
        assert!(set.insert(3));
        assert!(set.insert(4));
        assert!(!set.insert(3));

        assert!(set.contains(3));
        assert_eq!(2, set.len());
    }

    #[test]
    fn double_remove() {
        let mut set = DigitSet::all();
        assert!(set.remove(3));
        assert!(set.remove(5));
        assert!(!set.remove(3));

        assert!(!set.contains(3));
        assert_eq!(7, set.len());
    }

    fn op_test_lhs() -> DigitSet {
        digits!(2, 4)
    }

    fn op_test_rhs() -> DigitSet {
        digits!(3, 4)
    }

    #[test]
    fn union() {
        let result = op_test_lhs() | op_test_rhs();
        assert_eq!(digits!(2, 3, 4), result);
    }

    #[test]
    fn intersection() {
        let result = op_test_lhs() & op_test_rhs();
        assert_eq!(digits!(4), result);
    }

    #[test]
    fn difference() {
        let result = op_test_lhs() - op_test_rhs();
        assert_eq!(digits!(2), result);
    }

    #[test]
    fn symmetric_difference() {
        let result = op_test_lhs() ^ op_test_rhs();
        assert_eq!(digits!(2, 3), result);
    }
}
