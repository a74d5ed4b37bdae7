use alloc::collections::TryReserveError;
use alloc::vec::Vec;

/// Value marking an empty slot: every bit set.
///
/// A caller's literal `SENTINEL` is stored as [`remap_sentinel`] returns it,
/// so the slot array never needs a separate occupancy bitmap.
pub(crate) const SENTINEL: i64 = -1;

/// Maximum occupancy, as `populated * 100 / capacity`. Must stay below 100
/// so every probe sequence reaches an empty slot.
pub(crate) const FILL_PERCENTAGE: usize = 70;

/// Smallest number of slots a table is ever allocated with.
pub(crate) const MINIMUM_SIZE: usize = 16;

/// Folds a 64-bit key to 32 bits by xoring its halves, the same derivation
/// `Long.hashCode` and friends use.
#[inline(always)]
pub(crate) fn fold_hash(key: i64) -> u32 {
    let bits = key as u64;
    (bits ^ (bits >> 32)) as u32
}

#[inline(always)]
pub(crate) fn remap_sentinel(key: i64) -> i64 {
    if key == SENTINEL {
        SENTINEL.wrapping_add(1)
    } else {
        key
    }
}

/// Returns true if holding `populated` keys in `capacity` slots would exceed
/// [`FILL_PERCENTAGE`].
#[inline(always)]
pub(crate) fn exceeds_fill(populated: usize, capacity: usize) -> bool {
    (populated as u128 * 100) / capacity as u128 > FILL_PERCENTAGE as u128
}

/// Linear probe cursor over a table of `len` slots, wrapping at the end.
pub(crate) struct LinearProbe {
    pos: usize,
    len: usize,
}

impl LinearProbe {
    #[inline(always)]
    pub(crate) fn start(key: i64, len: usize) -> Self {
        LinearProbe {
            pos: (fold_hash(key) & 0x7fff_ffff) as usize % len,
            len,
        }
    }

    #[inline(always)]
    pub(crate) fn next_probe(&mut self) -> usize {
        let pos = self.pos;
        self.pos += 1;
        if self.pos == self.len {
            self.pos = 0;
        }
        pos
    }
}

enum Probe {
    Found,
    Vacant(usize),
}

/// The owned slot array backing an [`IntegerProbeSet`].
///
/// Keys passed in here have already been through [`remap_sentinel`]; nothing
/// in this type checks for the sentinel again.
///
/// [`IntegerProbeSet`]: crate::IntegerProbeSet
#[derive(Clone)]
pub(crate) struct Slots {
    slots: Vec<i64>,
    populated: usize,
}

impl Slots {
    /// Allocates `len` empty slots. Aborts through the global allocation
    /// error handler if the allocation fails.
    pub(crate) fn with_len(len: usize) -> Self {
        debug_assert!(len > 0);
        Slots {
            slots: alloc::vec![SENTINEL; len],
            populated: 0,
        }
    }

    pub(crate) fn try_with_len(len: usize) -> Result<Self, TryReserveError> {
        debug_assert!(len > 0);
        let mut slots = Vec::new();
        slots.try_reserve_exact(len)?;
        slots.resize(len, SENTINEL);
        Ok(Slots {
            slots,
            populated: 0,
        })
    }

    #[inline]
    pub(crate) fn populated(&self) -> usize {
        self.populated
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[i64] {
        &self.slots
    }

    #[inline]
    fn probe(&self, key: i64) -> Probe {
        let mut probe = LinearProbe::start(key, self.slots.len());
        loop {
            let index = probe.next_probe();
            let slot = self.slots[index];
            if slot == key {
                return Probe::Found;
            }
            if slot == SENTINEL {
                return Probe::Vacant(index);
            }
        }
    }

    #[inline]
    pub(crate) fn find(&self, key: i64) -> bool {
        matches!(self.probe(key), Probe::Found)
    }

    /// Stores `key` in the first empty slot of its probe chain. Returns
    /// `false` if the key was already present.
    ///
    /// The caller is responsible for keeping occupancy under the fill bound;
    /// a table with no empty slot would probe forever.
    #[inline]
    pub(crate) fn insert(&mut self, key: i64) -> bool {
        debug_assert!(self.populated < self.slots.len());
        match self.probe(key) {
            Probe::Found => false,
            Probe::Vacant(index) => {
                self.slots[index] = key;
                self.populated += 1;
                true
            }
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.fill(SENTINEL);
        self.populated = 0;
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = i64> + '_ {
        self.slots.iter().copied().filter(|&slot| slot != SENTINEL)
    }

    /// Moves every stored key into `target`, recomputing each probe chain
    /// against the target's length.
    pub(crate) fn rehash_into(&self, target: &mut Slots) {
        debug_assert!(target.len() > self.populated);
        for key in self.keys() {
            target.insert(key);
        }
    }

    /// Distance from the home slot of the key stored at `index` to `index`.
    #[cfg(any(test, feature = "stats"))]
    pub(crate) fn displacement(&self, index: usize) -> usize {
        let len = self.slots.len();
        let home = LinearProbe::start(self.slots[index], len).pos;
        (index + len - home) % len
    }
}
