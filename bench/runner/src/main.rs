use std::path::PathBuf;

use bench_common::{
    generate_keys, normal_lengths, run, to_string_pretty, uniform_lengths, BenchParams,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::{rngs::StdRng, SeedableRng};
use sparse_index::SparseKeyIndex;
use strum_macros::AsRefStr;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Bench(BenchArgs),
    Inspect(InspectArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, AsRefStr, Default)]
pub enum KeyLengths {
    #[default]
    Normal,
    Uniform,
}

#[derive(Args, Debug)]
pub struct BenchArgs {
    #[arg(long, help = "Number of keys in the synthetic segment.", default_value_t = 65536)]
    pub keys: usize,

    #[arg(long, help = "Mean key length in bytes.", default_value_t = 16)]
    pub key_len: usize,

    #[arg(long, help = "Distribution of key lengths.")]
    pub lengths: Option<KeyLengths>,

    #[arg(long, help = "Memory budget of the index in bytes.", default_value_t = 65536)]
    pub capacity: usize,

    #[arg(long, help = "Average key size announced to the index, defaults to --key-len.")]
    pub average_key_size: Option<usize>,

    #[arg(long, help = "Number of timed lookups.", default_value_t = 100_000)]
    pub lookups: usize,

    #[arg(long, help = "Seed of the key generator.", default_value_t = 0)]
    pub seed: u64,

    #[arg(long, help = "Write the built index to this path.")]
    pub save: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    #[arg(help = "Path of a saved index.")]
    pub path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Bench(args) => {
            let lengths = args.lengths.unwrap_or_default();
            let params = BenchParams {
                keys: args.keys,
                key_len: args.key_len,
                lengths: lengths.as_ref().to_string(),
                capacity_bytes: args.capacity,
                average_key_size: args.average_key_size.unwrap_or(args.key_len),
                lookups: args.lookups,
                seed: args.seed,
            };

            let mut rng = StdRng::seed_from_u64(args.seed);
            let keys = match lengths {
                KeyLengths::Normal => {
                    generate_keys(&mut rng, args.keys, normal_lengths(args.key_len)?)
                }
                KeyLengths::Uniform => {
                    generate_keys(&mut rng, args.keys, uniform_lengths(args.key_len))
                }
            };

            let (index, report) = run(&mut rng, params, &keys)?;
            println!("{}", to_string_pretty(&report)?);

            if let Some(path) = &args.save {
                index.save(path)?;
                tracing::info!(path = %path.display(), "index saved");
            }
        }
        Commands::Inspect(args) => {
            let index = SparseKeyIndex::load(&args.path)?;
            println!("config:       {:?}", index.config());
            println!("hop:          {}", index.hop());
            println!("samples:      {} / {}", index.sample_count(), index.max_samples());
            println!("bytes used:   {}", index.bytes_used());
            println!("closed:       {}", index.is_closed());

            if let Some((position, key)) = index.samples().next_back() {
                println!(
                    "last sample:  {} at key index {}",
                    String::from_utf8_lossy(key),
                    position
                );
            };
        }
    }

    Ok(())
}
