use core::hash::BuildHasher;
use core::hint::black_box;
use std::collections::HashSet as StdHashSet;

use criterion::AxisScale;
use criterion::BatchSize;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use hashbrown::HashSet as HashbrownHashSet;
use int_probe_set::IntegerProbeSet;
use rand::Rng;
use rand::SeedableRng;
use rand::TryRngCore;
use rand::rngs::OsRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand_distr::Zipf;
use siphasher::sip::SipHasher;

#[derive(Clone)]
struct SipHashBuilder {
    k1: u64,
    k2: u64,
}

impl BuildHasher for SipHashBuilder {
    type Hasher = SipHasher;

    fn build_hasher(&self) -> Self::Hasher {
        SipHasher::new_with_keys(self.k1, self.k2)
    }
}

impl Default for SipHashBuilder {
    fn default() -> Self {
        Self {
            k1: OsRng.try_next_u64().unwrap_or(0),
            k2: OsRng.try_next_u64().unwrap_or(0),
        }
    }
}

trait IntSet {
    const NAME: &'static str;

    fn with_capacity(capacity: usize) -> Self;
    fn add(&mut self, key: i64) -> bool;
    fn contains(&self, key: i64) -> bool;
    fn clear(&mut self);
}

impl IntSet for IntegerProbeSet {
    const NAME: &'static str = "int_probe_set";

    fn with_capacity(capacity: usize) -> Self {
        let mut set = IntegerProbeSet::new();
        set.reserve(capacity);
        set
    }

    fn add(&mut self, key: i64) -> bool {
        IntegerProbeSet::add(self, key)
    }

    fn contains(&self, key: i64) -> bool {
        IntegerProbeSet::contains(self, key)
    }

    fn clear(&mut self) {
        IntegerProbeSet::clear(self)
    }
}

impl IntSet for HashbrownHashSet<i64> {
    const NAME: &'static str = "hashbrown";

    fn with_capacity(capacity: usize) -> Self {
        HashbrownHashSet::with_capacity(capacity)
    }

    fn add(&mut self, key: i64) -> bool {
        self.insert(key)
    }

    fn contains(&self, key: i64) -> bool {
        HashbrownHashSet::contains(self, &key)
    }

    fn clear(&mut self) {
        HashbrownHashSet::clear(self)
    }
}

impl IntSet for StdHashSet<i64, foldhash::fast::RandomState> {
    const NAME: &'static str = "std_foldhash";

    fn with_capacity(capacity: usize) -> Self {
        StdHashSet::with_capacity_and_hasher(capacity, foldhash::fast::RandomState::default())
    }

    fn add(&mut self, key: i64) -> bool {
        self.insert(key)
    }

    fn contains(&self, key: i64) -> bool {
        StdHashSet::contains(self, &key)
    }

    fn clear(&mut self) {
        StdHashSet::clear(self)
    }
}

impl IntSet for StdHashSet<i64, SipHashBuilder> {
    const NAME: &'static str = "std_siphash";

    fn with_capacity(capacity: usize) -> Self {
        StdHashSet::with_capacity_and_hasher(capacity, SipHashBuilder::default())
    }

    fn add(&mut self, key: i64) -> bool {
        self.insert(key)
    }

    fn contains(&self, key: i64) -> bool {
        StdHashSet::contains(self, &key)
    }

    fn clear(&mut self) {
        StdHashSet::clear(self)
    }
}

type StdFoldhash = StdHashSet<i64, foldhash::fast::RandomState>;
type StdSiphash = StdHashSet<i64, SipHashBuilder>;

const SIZES: &[usize] = &[
    (1 << 10),
    (1 << 12),
    (1 << 14),
    (1 << 16),
    (1 << 18),
    (1 << 20),
];

fn random_keys(count: usize) -> Vec<i64> {
    let mut rng = SmallRng::from_os_rng();
    (0..count).map(|_| rng.random::<i64>()).collect()
}

fn bench_insert<S: IntSet>(group_name: &str, keys_for: fn(usize) -> Vec<i64>, c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("{}_{}", group_name, S::NAME));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = keys_for(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("grow/{}", size), |b| {
            b.iter_batched(
                || keys.clone(),
                |keys| {
                    let mut set = S::with_capacity(0);
                    for key in keys {
                        black_box(set.add(key));
                    }
                    black_box(set)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("preallocated/{}", size), |b| {
            b.iter_batched(
                || keys.clone(),
                |keys| {
                    let mut set = S::with_capacity(size);
                    for key in keys {
                        black_box(set.add(key));
                    }
                    black_box(set)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_insert_random<S: IntSet>(c: &mut Criterion) {
    bench_insert::<S>("insert_random", random_keys, c);
}

// Sequential ids are the common case for handle tracking and the worst case
// for clustering under a plain xor-fold hash.
fn bench_insert_sequential<S: IntSet>(c: &mut Criterion) {
    bench_insert::<S>("insert_sequential", |count| (0..count as i64).collect(), c);
}

fn bench_find_hit_miss<S: IntSet>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("find_hit_miss_{}", S::NAME));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = random_keys(size * 2);
        let (present, absent) = keys.split_at(size);

        let mut set = S::with_capacity(0);
        for &key in present {
            set.add(key);
        }

        let mut lookups = present
            .iter()
            .chain(absent.iter())
            .copied()
            .collect::<Vec<i64>>();
        lookups.shuffle(&mut SmallRng::from_os_rng());

        group.throughput(Throughput::Elements(lookups.len() as u64));
        group.bench_function(format!("{}", size), |b| {
            b.iter(|| {
                let mut hits = 0usize;
                for &key in &lookups {
                    hits += set.contains(black_box(key)) as usize;
                }
                black_box(hits)
            })
        });
    }

    group.finish();
}

fn bench_find_zipf<S: IntSet>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("find_zipf_{}", S::NAME));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = random_keys(size);
        let mut set = S::with_capacity(0);
        for &key in &keys {
            set.add(key);
        }

        let mut rng = SmallRng::from_os_rng();
        let distr = Zipf::new(size as f64, 1.0).unwrap();
        let lookups = (0..size)
            .map(|_| keys[rng.sample(distr) as usize - 1])
            .collect::<Vec<i64>>();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("{}", size), |b| {
            b.iter(|| {
                for &key in &lookups {
                    black_box(set.contains(key));
                }
            })
        });
    }

    group.finish();
}

fn bench_clear_refill<S: IntSet>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("clear_refill_{}", S::NAME));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = random_keys(size);
        let mut set = S::with_capacity(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("{}", size), |b| {
            b.iter(|| {
                set.clear();
                for &key in &keys {
                    black_box(set.add(key));
                }
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insert_random::<IntegerProbeSet>,
    bench_insert_random::<HashbrownHashSet<i64>>,
    bench_insert_random::<StdFoldhash>,
    bench_insert_random::<StdSiphash>,
    bench_insert_sequential::<IntegerProbeSet>,
    bench_insert_sequential::<HashbrownHashSet<i64>>,
    bench_insert_sequential::<StdFoldhash>,
    bench_find_hit_miss::<IntegerProbeSet>,
    bench_find_hit_miss::<HashbrownHashSet<i64>>,
    bench_find_hit_miss::<StdFoldhash>,
    bench_find_hit_miss::<StdSiphash>,
    bench_find_zipf::<IntegerProbeSet>,
    bench_find_zipf::<HashbrownHashSet<i64>>,
    bench_find_zipf::<StdFoldhash>,
    bench_clear_refill::<IntegerProbeSet>,
    bench_clear_refill::<HashbrownHashSet<i64>>,
    bench_clear_refill::<StdFoldhash>,
);

criterion_main!(benches);
