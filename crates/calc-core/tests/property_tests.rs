//! Property-based tests for the calculator kernels

use calc_core::exponent::{log, power};
use calc_core::random::generate;
use calc_core::stats::Summary;
use calc_core::triangle::{area_base_height, area_herons};
use calc_core::words::{integer_to_words, NumberSystem};
use calc_core::RandomRequest;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn number_system() -> impl Strategy<Value = NumberSystem> {
    prop_oneof![Just(NumberSystem::International), Just(NumberSystem::Indian)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // ============================================================
    // Logarithms
    // ============================================================

    #[test]
    fn log_round_trips_through_power(
        n in 0.001f64..1.0e6,
        base in prop_oneof![0.05f64..0.95, 1.05f64..100.0]
    ) {
        let l = log(n, base).unwrap();
        let back = power(base, l);
        prop_assert!((back - n).abs() <= 1e-9 * n.max(1.0), "{} ^ {} = {} != {}", base, l, back, n);
    }

    // ============================================================
    // Triangles
    // ============================================================

    #[test]
    fn right_triangle_agrees_with_base_height(a in 0.1f64..1000.0, b in 0.1f64..1000.0) {
        let c = (a * a + b * b).sqrt();
        let herons = area_herons(a, b, c).unwrap();
        let base_height = area_base_height(a, b).unwrap();
        prop_assert!((herons - base_height).abs() <= 1e-6 * base_height.max(1.0));
    }

    #[test]
    fn triangle_inequality_violations_are_rejected(a in 0.1f64..100.0, b in 0.1f64..100.0, extra in 0.0f64..100.0) {
        prop_assert!(area_herons(a, b, a + b + extra).is_none());
    }

    // ============================================================
    // Statistics
    // ============================================================

    #[test]
    fn summary_is_internally_consistent(values in prop::collection::vec(-1.0e6f64..1.0e6, 1..50)) {
        let s = Summary::from_values(&values).unwrap();
        prop_assert_eq!(s.count, values.len());
        prop_assert!(s.min <= s.mean + 1e-6 && s.mean <= s.max + 1e-6);
        prop_assert!(s.min <= s.median && s.median <= s.max);
        prop_assert!(s.q1 <= s.q3);
        prop_assert!(s.variance >= 0.0);
        prop_assert!(s.outliers.iter().all(|&v| v < s.lower_fence || v > s.upper_fence));
    }

    // ============================================================
    // Number words
    // ============================================================

    #[test]
    fn words_are_a_pure_function(n in -999_999_999_999_999i64..=999_999_999_999_999, system in number_system()) {
        let first = integer_to_words(n, system).unwrap();
        let second = integer_to_words(n, system).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert!(!first.is_empty());
        prop_assert!(!first.contains("  "));
        prop_assert_eq!(first.starts_with("Minus "), n < 0);
    }

    #[test]
    fn words_match_below_one_lakh(n in 0i64..100_000) {
        prop_assert_eq!(
            integer_to_words(n, NumberSystem::International).unwrap(),
            integer_to_words(n, NumberSystem::Indian).unwrap()
        );
    }

    // ============================================================
    // Random numbers
    // ============================================================

    #[test]
    fn unique_draws_are_distinct_and_in_range(
        min in -1000i64..1000,
        span in 1i64..200,
        seed in any::<u64>(),
        fraction in 0.0f64..=1.0
    ) {
        let max = min + span;
        let available = (span + 1) as usize;
        let count = ((available as f64 * fraction) as usize).max(1);
        let request = RandomRequest { min, max, count, allow_duplicates: false, sort: false };

        let mut rng = StdRng::seed_from_u64(seed);
        let numbers = generate(&request, 10_000, &mut rng).unwrap();

        prop_assert_eq!(numbers.len(), count);
        let distinct: HashSet<_> = numbers.iter().collect();
        prop_assert_eq!(distinct.len(), count);
        prop_assert!(numbers.iter().all(|n| *n >= min && *n <= max));
    }

    #[test]
    fn unique_draws_beyond_range_are_rejected(min in -1000i64..1000, span in 1i64..200, over in 1usize..10) {
        let request = RandomRequest {
            min,
            max: min + span,
            count: (span + 1) as usize + over,
            allow_duplicates: false,
            sort: false,
        };
        let mut rng = StdRng::seed_from_u64(0);
        prop_assert!(generate(&request, 10_000, &mut rng).is_err());
    }
}
