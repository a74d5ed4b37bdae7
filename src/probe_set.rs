use alloc::collections::TryReserveError;
use core::fmt::Debug;
use core::iter::FusedIterator;

use crate::slots;
use crate::slots::Slots;
use crate::slots::exceeds_fill;
use crate::slots::remap_sentinel;

/// An open-addressed hash set of `i64` values using linear probing.
///
/// Elements live directly in a single `Vec<i64>`. Empty slots are marked
/// in-band with [`SENTINEL`](Self::SENTINEL), so there is no per-slot
/// occupancy flag and no per-element allocation.
///
/// # Sentinel aliasing
///
/// Because `SENTINEL` (`-1`) marks empty slots, it can't be stored as itself.
/// Adding or looking up `-1` is treated as adding or looking up
/// `SENTINEL + 1` (`0`), so the two values are the same element to this set.
///
/// ```rust
/// use int_probe_set::IntegerProbeSet;
///
/// let mut set = IntegerProbeSet::new();
/// assert!(set.add(-1));
/// assert!(set.contains(0));
/// assert!(!set.add(0));
/// assert_eq!(set.size(), 1);
/// ```
///
/// # Growth
///
/// The set starts at [`MINIMUM_SIZE`](Self::MINIMUM_SIZE) slots (or the
/// requested expected size, if larger) and doubles whenever an insertion
/// would push occupancy above [`FILL_PERCENTAGE`](Self::FILL_PERCENTAGE).
/// Every growth is a full rehash. The set never shrinks, including on
/// [`clear`](Self::clear).
///
/// # Performance Characteristics
///
/// - **Memory**: 8 bytes per slot, no per-entry overhead.
#[derive(Clone)]
pub struct IntegerProbeSet {
    slots: Slots,
}

impl IntegerProbeSet {
    /// Maximum occupancy before growth, as a percentage of capacity.
    pub const FILL_PERCENTAGE: usize = slots::FILL_PERCENTAGE;

    /// Smallest capacity a set is ever allocated with.
    pub const MINIMUM_SIZE: usize = slots::MINIMUM_SIZE;

    /// Bit pattern marking an empty slot (all bits set).
    pub const SENTINEL: i64 = slots::SENTINEL;

    /// Creates an empty set with [`MINIMUM_SIZE`](Self::MINIMUM_SIZE) slots.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use int_probe_set::IntegerProbeSet;
    ///
    /// let set = IntegerProbeSet::new();
    /// assert!(set.is_empty());
    /// assert_eq!(set.capacity(), IntegerProbeSet::MINIMUM_SIZE);
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(Self::MINIMUM_SIZE)
    }

    /// Creates an empty set with `max(expected_size, MINIMUM_SIZE)` slots.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use int_probe_set::IntegerProbeSet;
    ///
    /// assert_eq!(IntegerProbeSet::with_capacity(5).capacity(), 16);
    /// assert_eq!(IntegerProbeSet::with_capacity(100).capacity(), 100);
    /// ```
    pub fn with_capacity(expected_size: usize) -> Self {
        Self {
            slots: Slots::with_len(expected_size.max(Self::MINIMUM_SIZE)),
        }
    }

    /// Like [`with_capacity`](Self::with_capacity), but returns an error
    /// instead of aborting if the allocation fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use int_probe_set::IntegerProbeSet;
    ///
    /// assert!(IntegerProbeSet::try_with_capacity(64).is_ok());
    /// assert!(IntegerProbeSet::try_with_capacity(usize::MAX).is_err());
    /// ```
    pub fn try_with_capacity(expected_size: usize) -> Result<Self, TryReserveError> {
        Ok(Self {
            slots: Slots::try_with_len(expected_size.max(Self::MINIMUM_SIZE))?,
        })
    }

    /// Returns the number of elements in the set.
    pub fn size(&self) -> usize {
        self.slots.populated()
    }

    /// Returns the number of elements in the set. Alias of
    /// [`size`](Self::size) for parity with the std collections.
    pub fn len(&self) -> usize {
        self.size()
    }

    /// Returns `true` if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.slots.populated() == 0
    }

    /// Returns the number of slots in the backing array.
    ///
    /// At most `capacity * FILL_PERCENTAGE / 100` elements fit before the
    /// next insertion grows the set.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the set contains `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use int_probe_set::IntegerProbeSet;
    ///
    /// let mut set = IntegerProbeSet::new();
    /// set.add(42);
    /// assert!(set.contains(42));
    /// assert!(!set.contains(7));
    /// ```
    #[inline]
    pub fn contains(&self, key: i64) -> bool {
        self.slots.find(remap_sentinel(key))
    }

    /// Adds `key` to the set. Returns `true` if it was not already present.
    ///
    /// The fill check runs before the lookup, so adding a key that is already
    /// present can still grow the set when it sits at the threshold.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use int_probe_set::IntegerProbeSet;
    ///
    /// let mut set = IntegerProbeSet::new();
    /// assert!(set.add(3));
    /// assert!(!set.add(3));
    /// assert_eq!(set.size(), 1);
    /// ```
    #[inline]
    pub fn add(&mut self, key: i64) -> bool {
        if exceeds_fill(self.slots.populated() + 1, self.slots.len()) {
            self.grow(self.slots.len().saturating_mul(2));
        }
        self.slots.insert(remap_sentinel(key))
    }

    /// Removes all elements from the set, keeping its capacity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use int_probe_set::IntegerProbeSet;
    ///
    /// let mut set: IntegerProbeSet = (0..100).collect();
    /// let capacity = set.capacity();
    /// set.clear();
    /// assert!(set.is_empty());
    /// assert!(!set.contains(50));
    /// assert_eq!(set.capacity(), capacity);
    /// ```
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Grows the set so at least `additional` more elements can be added
    /// without another resize.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows `usize`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use int_probe_set::IntegerProbeSet;
    ///
    /// let mut set = IntegerProbeSet::new();
    /// set.reserve(1000);
    /// let capacity = set.capacity();
    /// set.extend(0..1000);
    /// assert_eq!(set.capacity(), capacity);
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        let capacity = self.capacity_for(additional);
        if capacity != self.slots.len() {
            self.grow(capacity);
        }
    }

    /// Like [`reserve`](Self::reserve), but returns an error instead of
    /// aborting or panicking. The set is unchanged on error.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        let capacity = self.capacity_for(additional);
        if capacity != self.slots.len() {
            let mut grown = Slots::try_with_len(capacity)?;
            self.slots.rehash_into(&mut grown);
            self.slots = grown;
        }
        Ok(())
    }

    /// Returns an iterator over the stored elements in slot order.
    ///
    /// An element added as `-1` is yielded as `0`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use int_probe_set::IntegerProbeSet;
    ///
    /// let set: IntegerProbeSet = [5, -1, 9].into_iter().collect();
    /// let mut values: Vec<i64> = set.iter().collect();
    /// values.sort();
    /// assert_eq!(values, [0, 5, 9]);
    /// ```
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.slots.as_slice().iter(),
            remaining: self.slots.populated(),
        }
    }

    // Doubling from the current capacity keeps growth on the same sequence
    // `add` would have produced.
    fn capacity_for(&self, additional: usize) -> usize {
        let required = self.slots.populated().saturating_add(additional);
        let mut capacity = self.slots.len();
        while exceeds_fill(required, capacity) && capacity != usize::MAX {
            capacity = capacity.saturating_mul(2);
        }
        capacity
    }

    fn grow(&mut self, capacity: usize) {
        let mut grown = Slots::with_len(capacity);
        self.slots.rehash_into(&mut grown);
        self.slots = grown;
    }

    #[cfg(feature = "stats")]
    pub(crate) fn raw_slots(&self) -> &Slots {
        &self.slots
    }
}

impl Default for IntegerProbeSet {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for IntegerProbeSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl PartialEq for IntegerProbeSet {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().all(|v| other.contains(v))
    }
}

impl Eq for IntegerProbeSet {}

/// An iterator over the elements of an [`IntegerProbeSet`].
pub struct Iter<'a> {
    inner: core::slice::Iter<'a, i64>,
    remaining: usize,
}

impl Iterator for Iter<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let next = self
            .inner
            .by_ref()
            .copied()
            .find(|&slot| slot != slots::SENTINEL)?;
        self.remaining -= 1;
        Some(next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a IntegerProbeSet {
    type IntoIter = Iter<'a>;
    type Item = i64;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<i64> for IntegerProbeSet {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        let mut set = IntegerProbeSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<i64> for IntegerProbeSet {
    fn extend<I: IntoIterator<Item = i64>>(&mut self, iter: I) {
        // The size hint counts items, not distinct keys, so growth is left to
        // `add`.
        for value in iter {
            self.add(value);
        }
    }
}

impl<'a> Extend<&'a i64> for IntegerProbeSet {
    fn extend<I: IntoIterator<Item = &'a i64>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}
