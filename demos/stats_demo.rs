use clap::Parser;
use clap::ValueEnum;
use int_probe_set::IntegerProbeSet;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum KeyPattern {
    /// Uniformly random 64-bit keys
    Random,
    /// 0, 1, 2, ...
    Sequential,
    /// Multiples of the stride; the default stride folds every key to slot 0
    Strided,
}

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'e', long = "expected_size", default_value_t = 0)]
    expected_size: usize,

    #[arg(short = 'n', long = "count", default_value_t = 1000)]
    count: usize,

    #[arg(short = 'p', long = "pattern", value_enum, default_value_t = KeyPattern::Random)]
    pattern: KeyPattern,

    #[arg(long = "stride", default_value_t = (1 << 32) | 1)]
    stride: i64,

    #[arg(long = "seed", default_value_t = 0)]
    seed: u64,
}

fn main() {
    let args = Args::parse();

    println!(
        "Creating IntegerProbeSet with expected size: {}",
        args.expected_size
    );
    let mut set = IntegerProbeSet::with_capacity(args.expected_size);
    println!("Initial capacity: {}", set.capacity());

    let mut rng = SmallRng::seed_from_u64(args.seed);
    let mut growths = 0;
    let mut duplicates = 0;
    for i in 0..args.count as i64 {
        let key = match args.pattern {
            KeyPattern::Random => rng.random::<i64>(),
            KeyPattern::Sequential => i,
            KeyPattern::Strided => i.wrapping_mul(args.stride),
        };

        let capacity = set.capacity();
        if !set.add(key) {
            duplicates += 1;
        }
        if set.capacity() != capacity {
            growths += 1;
        }
    }

    println!(
        "Inserted {} values ({} duplicates, {} growths)",
        set.size(),
        duplicates,
        growths
    );
    println!("Final capacity: {}", set.capacity());

    set.print_probe_histogram();
    set.probe_stats().print();
}
