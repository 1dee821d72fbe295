// ==============================================
// CROSS-POLICY CONTRACT TESTS (integration)
// ==============================================
//
// Behavior every policy must share when driven through the public facade,
// plus the per-policy eviction orders that distinguish them.

use cacheevict::{Cache, CacheBuilder, CacheConfig, CachePolicy, ConfigError};

fn build(policy: CachePolicy, capacity: usize) -> Cache<&'static str, i32> {
    CacheBuilder::new()
        .policy(policy)
        .capacity(capacity)
        .build()
        .unwrap()
}

// ==============================================
// Shared Contract
// ==============================================

mod shared_contract {
    use super::*;

    #[test]
    fn round_trip_for_every_policy() {
        for policy in CachePolicy::ALL {
            let cache = build(policy, 4);
            cache.add("k", 1);
            assert_eq!(cache.get(&"k"), Some(1), "{policy}");
            assert!(cache.contains(&"k"), "{policy}");
        }
    }

    #[test]
    fn update_replaces_value_for_every_policy() {
        for policy in CachePolicy::ALL {
            let cache = build(policy, 4);
            cache.add("k", 1);
            cache.add("k", 2);
            assert_eq!(cache.get(&"k"), Some(2), "{policy}");
            assert_eq!(cache.len(), 1, "{policy}");
        }
    }

    #[test]
    fn missing_key_is_not_found() {
        for policy in CachePolicy::ALL {
            let cache = build(policy, 4);
            assert_eq!(cache.get(&"absent"), None, "{policy}");
            assert!(!cache.contains(&"absent"), "{policy}");
        }
    }

    #[test]
    fn capacity_is_never_exceeded() {
        let keys = ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"];
        for policy in CachePolicy::ALL {
            let cache = build(policy, 3);
            for (i, key) in keys.into_iter().enumerate() {
                cache.add(key, i as i32);
                if i % 3 == 0 {
                    cache.get(&keys[i / 2]);
                }
                assert!(cache.len() <= 3, "{policy} grew to {}", cache.len());
                cache.debug_validate_invariants();
            }
        }
    }

    #[test]
    fn capacity_one_keeps_latest() {
        for policy in CachePolicy::ALL {
            let cache = build(policy, 1);
            cache.add("a", 1);
            cache.add("b", 2);
            assert_eq!(cache.get(&"b"), Some(2), "{policy}");
            assert!(!cache.contains(&"a"), "{policy}");
        }
    }

    #[test]
    fn clear_empties_every_policy() {
        for policy in CachePolicy::ALL {
            let cache = build(policy, 3);
            cache.add("a", 1);
            cache.add("b", 2);
            cache.clear();
            assert!(cache.is_empty(), "{policy}");
            assert_eq!(cache.get(&"a"), None, "{policy}");

            cache.add("c", 3);
            assert_eq!(cache.get(&"c"), Some(3), "{policy}");
        }
    }
}

// ==============================================
// Eviction Orders
// ==============================================

mod eviction_order {
    use super::*;

    #[test]
    fn fifo_ignores_reads() {
        let cache = build(CachePolicy::Fifo, 3);
        cache.add("a", 1);
        cache.add("b", 2);
        cache.add("c", 3);
        cache.get(&"a");
        cache.get(&"a");
        cache.add("d", 4);

        assert!(!cache.contains(&"a"));
        assert!(cache.contains(&"b"));
        assert!(cache.contains(&"c"));
        assert!(cache.contains(&"d"));
    }

    #[test]
    fn lru_evicts_least_recent() {
        let cache = build(CachePolicy::Lru, 2);
        cache.add("a", 1);
        cache.add("b", 2);
        cache.get(&"a");
        cache.add("c", 3);

        assert!(cache.contains(&"a"));
        assert!(!cache.contains(&"b"));
        assert!(cache.contains(&"c"));
    }

    #[test]
    fn lfu_evicts_least_frequent() {
        let cache = build(CachePolicy::Lfu, 2);
        cache.add("a", 1);
        cache.add("b", 2);
        cache.get(&"a");
        cache.get(&"a");
        cache.add("c", 3);

        assert!(cache.contains(&"a"));
        assert!(!cache.contains(&"b"));
        assert!(cache.contains(&"c"));
    }

    #[test]
    fn lfu_breaks_ties_by_recency() {
        let cache = build(CachePolicy::Lfu, 2);
        cache.add("a", 1);
        cache.add("b", 2);
        cache.add("c", 3);

        assert!(!cache.contains(&"a"));
        assert!(cache.contains(&"b"));
    }

    #[test]
    fn arc_keeps_frequent_entry_over_scan() {
        let cache = build(CachePolicy::Arc, 3);
        cache.add("hot", 0);
        cache.get(&"hot");

        for (i, key) in ["s1", "s2", "s3", "s4", "s5", "s6"].into_iter().enumerate() {
            cache.add(key, i as i32);
        }
        assert_eq!(cache.get(&"hot"), Some(0));
        cache.debug_validate_invariants();
    }
}

// ==============================================
// Construction
// ==============================================

mod construction {
    use super::*;

    #[test]
    fn zero_capacity_rejected_by_every_path() {
        for policy in CachePolicy::ALL {
            assert_eq!(
                Cache::<u8, u8>::new(policy, 0).unwrap_err(),
                ConfigError::ZeroCapacity
            );
            assert_eq!(
                CacheConfig::new(policy, 0).build::<u8, u8>().unwrap_err(),
                ConfigError::ZeroCapacity
            );
        }
        assert_eq!(
            Cache::<u8, u8>::from_name("fifo", 0).unwrap_err(),
            ConfigError::ZeroCapacity
        );
    }

    #[test]
    fn unknown_policy_names_rejected() {
        for name in ["", "mru", "lru2", "a r c"] {
            assert_eq!(
                Cache::<u8, u8>::from_name(name, 4).unwrap_err(),
                ConfigError::UnknownPolicy(name.to_string())
            );
        }
    }

    #[test]
    fn builder_requires_policy() {
        let err = CacheBuilder::new().capacity(8).build::<u8, u8>().unwrap_err();
        assert_eq!(err, ConfigError::MissingPolicy);
        assert_eq!(err.to_string(), "no eviction policy specified");
    }

    #[test]
    fn names_are_case_insensitive() {
        for (name, policy) in [
            ("FIFO", CachePolicy::Fifo),
            ("Lru", CachePolicy::Lru),
            ("lfu", CachePolicy::Lfu),
            ("  arc\n", CachePolicy::Arc),
        ] {
            let cache = Cache::<u8, u8>::from_name(name, 2).unwrap();
            assert_eq!(cache.policy(), policy);
            assert_eq!(cache.capacity(), 2);
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_from_json_builds_cache() {
        let config: CacheConfig =
            serde_json::from_str(r#"{ "policy": "arc", "capacity": 16 }"#).unwrap();
        let cache = config.build::<u64, u64>().unwrap();
        assert_eq!(cache.policy(), CachePolicy::Arc);
        assert_eq!(cache.capacity(), 16);

        let zero: CacheConfig =
            serde_json::from_str(r#"{ "policy": "lru", "capacity": 0 }"#).unwrap();
        assert_eq!(zero.build::<u64, u64>().unwrap_err(), ConfigError::ZeroCapacity);
    }
}
