//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check storage and expiry behaviour against a simple model.

use proptest::prelude::*;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;

use crate::cache::{Cache, CacheStore};

// == Test Configuration ==
const TEST_INTERVAL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Generates URL-like cache keys
fn key_strategy() -> impl Strategy<Value = String> {
    "https://pokeapi\\.co/api/v2/[a-z0-9/_-]{0,32}".prop_map(|s| s)
}

/// Generates arbitrary value bytes, including empty bodies
fn value_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..256)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Add { key: String, value: Vec<u8> },
    Get { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    // Small key space so gets and overwrites actually collide
    let key = "[a-d]";
    prop_oneof![
        (key, value_strategy()).prop_map(|(key, value)| CacheOp::Add { key, value }),
        key.prop_map(|key| CacheOp::Get { key }),
    ]
}

fn paused_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Storing a pair and reading it back before expiry returns the exact bytes.
    #[test]
    fn prop_add_then_get(key in key_strategy(), value in value_strategy()) {
        let retrieved = tokio_test::block_on(async {
            let cache = Cache::new(TEST_INTERVAL).unwrap();
            cache.add(key.clone(), value.clone()).await;
            cache.get(&key).await
        });

        prop_assert_eq!(retrieved, Some(Bytes::from(value)));
    }

    // The last write for a key wins.
    #[test]
    fn prop_overwrite_returns_latest(
        key in key_strategy(),
        v1 in value_strategy(),
        v2 in value_strategy(),
    ) {
        let retrieved = tokio_test::block_on(async {
            let cache = Cache::new(TEST_INTERVAL).unwrap();
            cache.add(key.clone(), v1).await;
            cache.add(key.clone(), v2.clone()).await;
            (cache.get(&key).await, cache.len().await)
        });

        prop_assert_eq!(retrieved, (Some(Bytes::from(v2)), 1));
    }

    // Keys that were never added are reported missing.
    #[test]
    fn prop_never_inserted_is_missing(
        keys in prop::collection::hash_set(key_strategy(), 0..20),
        probe in key_strategy(),
    ) {
        prop_assume!(!keys.contains(&probe));

        let retrieved = tokio_test::block_on(async {
            let cache = Cache::new(TEST_INTERVAL).unwrap();
            for key in &keys {
                cache.add(key.clone(), "body").await;
            }
            cache.get(&probe).await
        });

        prop_assert_eq!(retrieved, None);
    }

    // Store contents and hit/miss counters follow a plain HashMap model.
    #[test]
    fn prop_store_matches_model(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let mut store = CacheStore::new();
        let mut model: HashMap<String, Vec<u8>> = HashMap::new();
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Add { key, value } => {
                    store.add(key.clone(), Bytes::from(value.clone()));
                    model.insert(key, value);
                }
                CacheOp::Get { key } => {
                    let got = store.get(&key);
                    match model.get(&key) {
                        Some(value) => {
                            expected_hits += 1;
                            prop_assert_eq!(got, Some(Bytes::from(value.clone())));
                        }
                        None => {
                            expected_misses += 1;
                            prop_assert_eq!(got, None);
                        }
                    }
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.total_entries, model.len(), "Total entries mismatch");
    }

    // A sweep removes exactly the entries whose age exceeds the interval.
    #[test]
    fn prop_sweep_removes_exactly_expired(offsets in prop::collection::vec(0u64..40, 1..30)) {
        let interval = Duration::from_millis(10);
        let horizon = Duration::from_millis(40);

        let (survivors, removed) = paused_runtime().block_on(async {
            let mut store = CacheStore::new();
            let start = Instant::now();

            // Insert in time order, each entry at its own offset from start
            let mut sorted: Vec<(usize, u64)> = offsets.iter().copied().enumerate().collect();
            sorted.sort_by_key(|&(_, offset)| offset);
            for (idx, offset) in sorted {
                let at = start + Duration::from_millis(offset);
                tokio::time::advance(at - Instant::now()).await;
                store.add(format!("key{idx}"), Bytes::new());
            }

            tokio::time::advance(start + horizon - Instant::now()).await;
            let removed = store.sweep(interval, Instant::now());

            let survivors: HashSet<String> = (0..offsets.len())
                .map(|idx| format!("key{idx}"))
                .filter(|key| store.get(key).is_some())
                .collect();
            (survivors, removed)
        });

        let expected: HashSet<String> = offsets
            .iter()
            .enumerate()
            .filter(|&(_, &offset)| horizon - Duration::from_millis(offset) <= interval)
            .map(|(idx, _)| format!("key{idx}"))
            .collect();

        prop_assert_eq!(removed, offsets.len() - expected.len());
        prop_assert_eq!(survivors, expected);
    }
}
