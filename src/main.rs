//! `lz4-bench`: in-memory benchmark for the block codecs.
//!
//! Runs every level in `-b..=-e` over the given files (or generated data
//! when none are given) and prints ratio and throughput. `LZ4_CLEVEL` and
//! `LZ4_ACCELERATION` provide defaults for `--hc` and `-a`.

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use lz4::bench::{bench_files, BenchConfig};
use lz4::{config, datagen};

#[derive(Parser, Debug)]
#[command(
    name = "lz4-bench",
    version = lz4::LZ4_VERSION_STRING,
    about = "Benchmark LZ4 block compression and decompression"
)]
struct Args {
    /// Files to benchmark. Generated data is used when none are given.
    files: Vec<String>,

    /// First compression level. Levels below 3 use the fast encoder,
    /// negative levels raise its acceleration.
    #[arg(short = 'b', long = "level", allow_negative_numbers = true)]
    level: Option<i32>,

    /// Last compression level (inclusive).
    #[arg(short = 'e', long = "level-last", allow_negative_numbers = true)]
    level_last: Option<i32>,

    /// Start at the HC level from LZ4_CLEVEL (default 9) when -b is absent.
    #[arg(long)]
    hc: bool,

    /// Acceleration of the fast encoder at levels 0 to 2.
    #[arg(short = 'a', long)]
    acceleration: Option<i32>,

    /// Block size in bytes. Values below 32 keep each file in one block.
    #[arg(short = 'B', long = "block-size", default_value_t = config::BLOCK_SIZE_DEFAULT)]
    block_size: usize,

    /// Minimum duration of each level, in seconds. 0 runs a single pass.
    #[arg(short = 'i', long = "seconds", default_value_t = lz4::bench::config::NBSECONDS)]
    seconds: u32,

    /// Dictionary file; its last 64 KB are used.
    #[arg(short = 'D', long = "dict")]
    dict: Option<String>,

    /// Compress the blocks of a file as one dependent stream.
    #[arg(long)]
    linked: bool,

    /// Benchmark each file on its own.
    #[arg(short = 'S', long)]
    separately: bool,

    /// Match probability of generated data, in percent.
    #[arg(
        short = 'P',
        long,
        default_value_t = (datagen::COMPRESSIBILITY_DEFAULT * 100.0) as u32,
        value_parser = clap::value_parser!(u32).range(0..=100)
    )]
    compressibility: u32,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print only one summary line per level.
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let first = match (args.level, args.hc) {
        (Some(level), _) => level,
        (None, true) => config::init_c_level(),
        (None, false) => 1,
    };
    let last = args.level_last.unwrap_or(first);
    if last < first {
        bail!("last level {last} is below first level {first}");
    }

    let mut bench_config = BenchConfig::default();
    bench_config
        .set_nb_seconds(args.seconds)
        .set_block_size(args.block_size)
        .set_linked_blocks(args.linked)
        .set_bench_separately(args.separately)
        .set_acceleration(args.acceleration.unwrap_or_else(config::init_acceleration))
        .set_notification_level(if args.quiet { 1 } else { 2 });
    debug!(?bench_config, "starting benchmark");

    let files: Vec<&str> = args.files.iter().map(String::as_str).collect();
    let results = bench_files(
        &files,
        first,
        last,
        args.dict.as_deref(),
        f64::from(args.compressibility) / 100.0,
        &bench_config,
    )
    .context("benchmark failed")?;

    for r in &results {
        info!(
            level = r.c_level,
            src = r.src_size,
            compressed = r.compressed_size,
            ratio = r.ratio,
            "level done"
        );
    }
    Ok(())
}
