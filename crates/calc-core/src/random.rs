//! Random integer generation
//!
//! Uniform draws from an inclusive range, with or without duplicates, plus
//! a small history of recent runs for display.

use crate::error::CalcError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use tracing::{debug, warn};

/// Number of runs kept in the history
pub const DEFAULT_HISTORY_SIZE: usize = 5;

/// Upper limit on numbers per request
pub const DEFAULT_MAX_COUNT: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomRequest {
    pub min: i64,
    pub max: i64,
    pub count: usize,
    pub allow_duplicates: bool,
    /// Sort the output ascending
    #[serde(default)]
    pub sort: bool,
}

impl RandomRequest {
    /// How many distinct integers the inclusive range holds
    pub fn range_size(&self) -> u64 {
        let size = self.max as i128 - self.min as i128 + 1;
        u64::try_from(size.max(0)).unwrap_or(u64::MAX)
    }

    /// Check the request before anything is drawn
    pub fn validate(&self, max_count: usize) -> Result<(), CalcError> {
        if self.min >= self.max {
            return Err(CalcError::InvalidRange {
                min: self.min,
                max: self.max,
            });
        }
        if self.count == 0 || self.count > max_count {
            return Err(CalcError::InvalidCount { max: max_count });
        }
        if !self.allow_duplicates && self.count as u64 > self.range_size() {
            return Err(CalcError::NotEnoughUnique {
                requested: self.count,
                available: self.range_size(),
            });
        }
        Ok(())
    }
}

/// Draw the numbers for a request.
///
/// Without duplicates, values already drawn are discarded and redrawn until
/// `count` distinct values are collected.
pub fn generate<R: Rng>(
    request: &RandomRequest,
    max_count: usize,
    rng: &mut R,
) -> Result<Vec<i64>, CalcError> {
    if let Err(e) = request.validate(max_count) {
        warn!(?request, error = %e, "Random request rejected");
        return Err(e);
    }

    let range = request.min..=request.max;
    let mut numbers = if request.allow_duplicates {
        (0..request.count)
            .map(|_| rng.gen_range(range.clone()))
            .collect::<Vec<_>>()
    } else {
        let mut seen = HashSet::with_capacity(request.count);
        let mut numbers = Vec::with_capacity(request.count);
        let mut draws = 0usize;
        while numbers.len() < request.count {
            let n = rng.gen_range(range.clone());
            draws += 1;
            if seen.insert(n) {
                numbers.push(n);
            }
        }
        debug!(draws, count = request.count, "Drew unique numbers");
        numbers
    };

    if request.sort {
        numbers.sort_unstable();
    }
    Ok(numbers)
}

/// One completed generation, kept for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRun {
    pub request: RandomRequest,
    pub numbers: Vec<i64>,
}

/// Generator with a bounded history of recent runs
pub struct RandomGenerator<R = StdRng> {
    rng: R,
    history: VecDeque<GenerationRun>,
    history_size: usize,
    max_count: usize,
}

impl RandomGenerator<StdRng> {
    /// Generator seeded from the operating system
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible generator
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for RandomGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            history: VecDeque::with_capacity(DEFAULT_HISTORY_SIZE),
            history_size: DEFAULT_HISTORY_SIZE,
            max_count: DEFAULT_MAX_COUNT,
        }
    }

    pub fn with_history_size(mut self, history_size: usize) -> Self {
        self.history_size = history_size;
        self.history.truncate(history_size);
        self
    }

    pub fn with_max_count(mut self, max_count: usize) -> Self {
        self.max_count = max_count;
        self
    }

    pub fn max_count(&self) -> usize {
        self.max_count
    }

    /// Generate numbers and record the run. Rejected requests leave the
    /// history untouched.
    pub fn generate(&mut self, request: RandomRequest) -> Result<Vec<i64>, CalcError> {
        let numbers = generate(&request, self.max_count, &mut self.rng)?;

        if self.history_size > 0 {
            self.history.push_front(GenerationRun {
                request,
                numbers: numbers.clone(),
            });
            self.history.truncate(self.history_size);
        }

        Ok(numbers)
    }

    /// Recent runs, newest first
    pub fn history(&self) -> impl Iterator<Item = &GenerationRun> {
        self.history.iter()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(min: i64, max: i64, count: usize, allow_duplicates: bool) -> RandomRequest {
        RandomRequest {
            min,
            max,
            count,
            allow_duplicates,
            sort: false,
        }
    }

    #[test]
    fn test_range_size() {
        assert_eq!(request(1, 10, 1, true).range_size(), 10);
        assert_eq!(request(-5, 5, 1, true).range_size(), 11);
        assert_eq!(request(i64::MIN, i64::MAX, 1, true).range_size(), u64::MAX);
    }

    #[test]
    fn test_min_must_be_below_max() {
        let err = request(5, 5, 1, true).validate(100).unwrap_err();
        assert_eq!(err, CalcError::InvalidRange { min: 5, max: 5 });
        assert!(request(6, 5, 1, true).validate(100).is_err());
    }

    #[test]
    fn test_count_limits() {
        assert!(request(1, 10, 0, true).validate(100).is_err());
        assert!(request(1, 10, 101, true).validate(100).is_err());
    }

    #[test]
    fn test_unique_rejected_when_range_too_small() {
        let err = request(1, 5, 6, false).validate(100).unwrap_err();
        assert_eq!(
            err,
            CalcError::NotEnoughUnique {
                requested: 6,
                available: 5
            }
        );
        // Duplicates allowed: same request is fine
        assert!(request(1, 5, 6, true).validate(100).is_ok());
    }

    #[test]
    fn test_unique_draws_are_distinct_and_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let numbers = generate(&request(1, 20, 20, false), 100, &mut rng).unwrap();

        assert_eq!(numbers.len(), 20);
        let distinct: HashSet<_> = numbers.iter().collect();
        assert_eq!(distinct.len(), 20);
        assert!(numbers.iter().all(|n| (1..=20).contains(n)));
    }

    #[test]
    fn test_duplicates_mode_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let numbers = generate(&request(-3, 3, 500, true), 1000, &mut rng).unwrap();
        assert_eq!(numbers.len(), 500);
        assert!(numbers.iter().all(|n| (-3..=3).contains(n)));
    }

    #[test]
    fn test_sorted_output() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut req = request(1, 1000, 50, false);
        req.sort = true;
        let numbers = generate(&req, 100, &mut rng).unwrap();
        assert!(numbers.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_seeded_generators_agree() {
        let mut a = RandomGenerator::seeded(42);
        let mut b = RandomGenerator::seeded(42);
        let req = request(1, 100, 10, true);
        assert_eq!(a.generate(req).unwrap(), b.generate(req).unwrap());
    }

    #[test]
    fn test_history_is_bounded_newest_first() {
        let mut generator = RandomGenerator::seeded(1).with_history_size(3);
        for count in 1..=5 {
            generator.generate(request(1, 100, count, true)).unwrap();
        }

        let counts: Vec<usize> = generator.history().map(|run| run.numbers.len()).collect();
        assert_eq!(counts, vec![5, 4, 3]);
    }

    #[test]
    fn test_rejected_request_not_recorded() {
        let mut generator = RandomGenerator::seeded(1);
        assert!(generator.generate(request(10, 1, 1, true)).is_err());
        assert_eq!(generator.history().count(), 0);
    }
}
