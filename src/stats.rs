use alloc::vec::Vec;

use crate::IntegerProbeSet;
use crate::slots::SENTINEL;
use crate::slots::Slots;

/// Occupancy and probe-length statistics for an [`IntegerProbeSet`].
///
/// Requires the `stats` feature.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeStats {
    /// Number of elements currently in the set
    pub populated: usize,
    /// Total number of slots allocated
    pub total_slots: usize,
    /// Elements the set holds before the next insertion grows it
    pub max_populated: usize,
    /// Load factor (populated / total_slots)
    pub load_factor: f64,
    /// Longest distance any element sits from its home slot
    pub max_probe_length: usize,
    /// Mean distance of elements from their home slot
    pub mean_probe_length: f64,
    /// Longest run of consecutive occupied slots, counting wraparound
    pub longest_cluster: usize,
    /// Total memory in bytes used by the slot array
    pub total_bytes: usize,
}

impl ProbeStats {
    fn collect(slots: &Slots) -> Self {
        let total_slots = slots.len();
        let populated = slots.populated();

        let mut max_probe_length = 0;
        let mut total_probe_length = 0;
        for (index, &slot) in slots.as_slice().iter().enumerate() {
            if slot != SENTINEL {
                let distance = slots.displacement(index);
                max_probe_length = max_probe_length.max(distance);
                total_probe_length += distance;
            }
        }

        ProbeStats {
            populated,
            total_slots,
            max_populated: total_slots * IntegerProbeSet::FILL_PERCENTAGE / 100,
            load_factor: populated as f64 / total_slots as f64,
            max_probe_length,
            mean_probe_length: if populated == 0 {
                0.0
            } else {
                total_probe_length as f64 / populated as f64
            },
            longest_cluster: longest_cluster(slots.as_slice()),
            total_bytes: total_slots * core::mem::size_of::<i64>(),
        }
    }

    /// Pretty-print the statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Probe Set Statistics ===");
        println!(
            "Population: {}/{} ({:.2}% load factor, grows past {})",
            self.populated,
            self.total_slots,
            self.load_factor * 100.0,
            self.max_populated
        );
        println!(
            "Probe length: max {}, mean {:.3}",
            self.max_probe_length, self.mean_probe_length
        );
        println!("Longest cluster: {} slots", self.longest_cluster);
        println!("Total Allocated: {} bytes", self.total_bytes);
    }
}

// At least one slot is always empty, so starting the scan just past an empty
// slot means no run crosses the end of the scan.
fn longest_cluster(slots: &[i64]) -> usize {
    let Some(start) = slots.iter().position(|&slot| slot == SENTINEL) else {
        return slots.len();
    };

    let mut longest = 0;
    let mut run = 0;
    for offset in 1..=slots.len() {
        if slots[(start + offset) % slots.len()] == SENTINEL {
            run = 0;
        } else {
            run += 1;
            longest = longest.max(run);
        }
    }
    longest
}

impl IntegerProbeSet {
    /// Returns occupancy and probe-length statistics.
    ///
    /// Requires the `stats` feature.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use int_probe_set::IntegerProbeSet;
    ///
    /// let set: IntegerProbeSet = (0..10).collect();
    /// let stats = set.probe_stats();
    /// assert_eq!(stats.populated, 10);
    /// assert_eq!(stats.total_slots, 16);
    /// assert_eq!(stats.max_probe_length, 0);
    /// ```
    pub fn probe_stats(&self) -> ProbeStats {
        ProbeStats::collect(self.raw_slots())
    }

    /// Computes a histogram of probe lengths.
    ///
    /// Index `n` of the returned vector counts the elements stored `n` slots
    /// past their home slot. The vector is `max_probe_length + 1` long, or
    /// empty for an empty set.
    ///
    /// Requires the `stats` feature.
    pub fn probe_histogram(&self) -> Vec<usize> {
        let slots = self.raw_slots();
        let mut hist = Vec::new();
        for (index, &slot) in slots.as_slice().iter().enumerate() {
            if slot == SENTINEL {
                continue;
            }
            let distance = slots.displacement(index);
            if hist.len() <= distance {
                hist.resize(distance + 1, 0);
            }
            hist[distance] += 1;
        }
        hist
    }

    /// Pretty-prints the probe-length histogram horizontally using stdout.
    ///
    /// Requires the `stats` and `std` features.
    #[cfg(feature = "std")]
    pub fn print_probe_histogram(&self) {
        let hist = self.probe_histogram();
        let max = hist.iter().copied().max().unwrap_or(0);
        if max == 0 {
            println!("probe histogram: empty");
            return;
        }

        let max_bar = 60usize;
        println!("probe histogram ({} entries):", self.len());
        for (distance, &count) in hist.iter().enumerate() {
            let width = (count * max_bar).div_ceil(max);
            println!("{:>3} | {} ({})", distance, "█".repeat(width), count);
        }
    }
}
