use std::hint::black_box;
use std::time::Instant;

use average::{Estimate, Max, MeanWithError};
use rand::distributions::{Alphanumeric, Distribution, Uniform};
use rand::Rng;
use rand_distr::Normal;
use serde::{Deserialize, Serialize};
pub use serde_json::to_string_pretty;
use sparse_index::{locate, IndexConfig, KeySource, SortedKeys, SparseKeyIndex};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BenchParams {
    pub keys: usize,
    pub key_len: usize,
    pub lengths: String,
    pub capacity_bytes: usize,
    pub average_key_size: usize,
    pub lookups: usize,
    pub seed: u64,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct BenchReport {
    pub started: String,
    pub params: BenchParams,
    pub max_samples: usize,
    pub hop: usize,
    pub samples: usize,
    pub bytes_used: usize,
    pub closed: bool,
    pub build_secs: f64,
    pub lookup_mean_ns: f64,
    pub lookup_error_ns: f64,
    pub locate_mean_ns: f64,
    pub locate_max_ns: f64,
    pub mean_bracket: f64,
    pub direct_hits: usize,
}

/// Generates a sorted segment of distinct alphanumeric keys.
pub fn generate_keys<R, D>(rng: &mut R, num: usize, lengths: D) -> SortedKeys
where
    R: Rng,
    D: Distribution<f64>,
{
    let keys: Vec<Vec<u8>> = (0..num)
        .map(|_| {
            let len = (lengths.sample(rng).round() as usize).max(1);
            (&mut *rng).sample_iter(Alphanumeric).take(len).collect()
        })
        .collect();

    SortedKeys::new(keys)
}

pub fn uniform_lengths(key_len: usize) -> Uniform<f64> {
    Uniform::new_inclusive(1.0, (2 * key_len).max(1) as f64)
}

pub fn normal_lengths(key_len: usize) -> anyhow::Result<Normal<f64>> {
    Ok(Normal::new(key_len as f64, key_len as f64 / 4.0)?)
}

/// Builds an index over `keys` and times lookups of randomly chosen keys.
pub fn run<R: Rng>(
    rng: &mut R,
    params: BenchParams,
    keys: &SortedKeys,
) -> anyhow::Result<(SparseKeyIndex, BenchReport)> {
    anyhow::ensure!(!keys.is_empty(), "cannot benchmark an empty segment");

    let started = humantime::format_rfc3339_seconds(std::time::SystemTime::now()).to_string();
    let config = IndexConfig::new(params.capacity_bytes, keys.len(), params.average_key_size);

    let start = Instant::now();
    let index = SparseKeyIndex::build(config, keys.iter())?;
    let build_secs = start.elapsed().as_secs_f64();

    tracing::info!(
        samples = index.sample_count(),
        hop = index.hop(),
        build_secs,
        "index built"
    );

    let positions = Uniform::new(0, keys.len());

    let mut lookup_time = MeanWithError::new();
    let mut locate_time = MeanWithError::new();
    let mut locate_max = Max::new();
    let mut bracket = MeanWithError::new();
    let mut direct_hits = 0;

    for _ in 0..params.lookups {
        let key = keys.key_at(rng.sample(positions));

        let start = Instant::now();
        let result = black_box(index.lookup(black_box(key)));
        lookup_time.add(start.elapsed().as_nanos() as f64);

        if result.is_direct_hit() {
            direct_hits += 1;
        }
        let bounds = result.bounds(keys.len());
        bracket.add(bounds.len() as f64);

        let start = Instant::now();
        black_box(locate(&index, keys, black_box(key)));
        let elapsed = start.elapsed().as_nanos() as f64;
        locate_time.add(elapsed);
        locate_max.add(elapsed);
    }

    let report = BenchReport {
        started,
        max_samples: index.max_samples(),
        hop: index.hop(),
        samples: index.sample_count(),
        bytes_used: index.bytes_used(),
        closed: index.is_closed(),
        build_secs,
        lookup_mean_ns: lookup_time.mean(),
        lookup_error_ns: lookup_time.error(),
        locate_mean_ns: locate_time.mean(),
        locate_max_ns: locate_max.max(),
        mean_bracket: bracket.mean(),
        direct_hits,
        params,
    };

    Ok((index, report))
}
