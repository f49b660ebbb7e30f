#[cfg(test)]
mod tests {
    use rand::distributions::{Alphanumeric, Uniform};
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use rand_distr::Normal;
    use sparse_index::{locate, IndexConfig, KeySource, Lookup, SortedKeys, SparseKeyIndex};
    use tempfile::tempdir;

    /// Generates sorted, distinct keys whose lengths follow a normal distribution
    /// around `mean_len`.
    fn random_segment(rng: &mut StdRng, num: usize, mean_len: f64) -> SortedKeys {
        let len_dist = Normal::new(mean_len, mean_len / 4.0).unwrap();

        let keys: Vec<Vec<u8>> = (0..num)
            .map(|_| {
                let len = (rng.sample(len_dist).round() as usize).max(1);
                (&mut *rng).sample_iter(Alphanumeric).take(len).collect()
            })
            .collect();

        SortedKeys::new(keys)
    }

    fn build_index(keys: &SortedKeys, capacity_bytes: usize, average: usize) -> SparseKeyIndex {
        let config = IndexConfig::new(capacity_bytes, keys.len(), average);
        let mut index = SparseKeyIndex::new(config).unwrap();

        // Offer every key the way a segment builder would, honoring the stop signal
        for (position, key) in keys.iter().enumerate() {
            if !index.add(position, key) {
                assert!(!index.add(position + 1, b""));
                break;
            }
        }

        index
    }

    /// Checks that the bracket returned for a present key contains its position.
    fn assert_contains(result: Lookup, position: usize) {
        match result {
            Lookup::DirectHit(hit) => assert_eq!(hit, position),
            Lookup::Range { left, right } => assert!(left <= position && position < right),
            Lookup::Unbounded(left) => assert!(left <= position),
            Lookup::BeforeFirst => panic!("present key at {position} reported before first"),
        }
    }

    /// Checks the bracket returned for an absent key whose insertion point is
    /// `insert_at`.
    fn assert_brackets(result: Lookup, insert_at: usize) {
        match result {
            Lookup::DirectHit(hit) => panic!("absent key reported as a hit at {hit}"),
            Lookup::Range { left, right } => assert!(left < insert_at && insert_at <= right),
            Lookup::Unbounded(left) => assert!(left < insert_at || left == 0),
            Lookup::BeforeFirst => assert_eq!(insert_at, 0),
        }
    }

    fn check_samples(index: &SparseKeyIndex, keys: &SortedKeys) {
        let mut previous: Option<&[u8]> = None;

        for (sample, (position, key)) in index.samples().enumerate() {
            assert_eq!(position, sample * index.stride());
            assert_eq!(key, keys.key_at(position));
            assert!(previous.map_or(true, |previous| previous < key));
            previous = Some(key);
        }

        assert!(index.sample_count() <= index.max_samples());
        assert!(index.bytes_used() <= index.config().buffer_len());
    }

    fn check_lookups(index: &SparseKeyIndex, keys: &SortedKeys, rng: &mut StdRng) {
        for (position, key) in keys.iter().enumerate() {
            assert_contains(index.lookup(key), position);
            assert_eq!(locate(index, keys, key), Some(position));
        }

        let len_dist = Uniform::new(1, 24);
        for _ in 0..2_000 {
            let len = rng.sample(len_dist);
            let probe: Vec<u8> = (&mut *rng).sample_iter(Alphanumeric).take(len).collect();

            let insert_at = keys.iter().take_while(|key| *key < probe.as_slice()).count();
            if insert_at < keys.len() && keys.key_at(insert_at) == probe.as_slice() {
                continue;
            }

            assert_brackets(index.lookup(&probe), insert_at);
            assert_eq!(locate(index, keys, &probe), None);
        }
    }

    #[test]
    fn random_segments() {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for &(num, mean_len, capacity_bytes, average) in &[
            (10, 8.0, 64, 8),
            (1_000, 12.0, 512, 12),
            (1_000, 12.0, 512, 4),
            (1_000, 12.0, 1 << 16, 12),
            (5_000, 20.0, 2_048, 30),
            (5_000, 6.0, 100_000, 2),
        ] {
            let keys = random_segment(&mut rng, num, mean_len);
            let index = build_index(&keys, capacity_bytes, average);

            check_samples(&index, &keys);
            check_lookups(&index, &keys, &mut rng);
        }
    }

    #[test]
    fn generous_budget_samples_every_key() {
        let mut rng = StdRng::seed_from_u64(7);
        let keys = random_segment(&mut rng, 500, 10.0);
        let index = build_index(&keys, 1 << 20, 10);

        assert_eq!(index.hop(), 0);
        assert_eq!(index.sample_count(), keys.len());

        for (position, key) in keys.iter().enumerate() {
            assert_eq!(index.lookup(key), Lookup::DirectHit(position));
        }
    }

    #[test]
    fn underestimated_key_size_closes_early() {
        let mut rng = StdRng::seed_from_u64(11);
        let keys = random_segment(&mut rng, 1_000, 40.0);

        // Keys are ten times larger than announced, so the buffer runs dry first
        let index = build_index(&keys, 800, 4);

        assert!(index.is_closed());
        assert!(index.sample_count() < index.max_samples());
        check_samples(&index, &keys);
        check_lookups(&index, &keys, &mut rng);
    }

    #[test]
    fn persisted_index_matches() -> sparse_index::Result<()> {
        let mut rng = StdRng::seed_from_u64(42);
        let keys = random_segment(&mut rng, 2_000, 16.0);
        let index = build_index(&keys, 4_096, 16);

        let temp_dir = tempdir()?;
        let path = temp_dir.path().join("segment.idx");
        index.save(&path)?;

        let restored = SparseKeyIndex::load(&path)?;
        assert_eq!(restored.config(), index.config());
        assert_eq!(restored.sample_count(), index.sample_count());
        assert!(restored.is_closed());

        check_samples(&restored, &keys);
        for key in keys.iter() {
            assert_eq!(restored.lookup(key), index.lookup(key));
        }

        Ok(())
    }

    #[test]
    fn config_from_json() {
        let config: IndexConfig = serde_json::from_str(
            r#"{ "capacity_bytes": 4096, "source_key_count": 1000, "average_key_size": 12 }"#,
        )
        .unwrap();

        assert_eq!(config.max_samples(), 256);
        assert_eq!(config.hop(), 3);
        assert!(SparseKeyIndex::new(config).is_ok());
    }
}
