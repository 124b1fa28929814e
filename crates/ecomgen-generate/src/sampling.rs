//! Seedable sampling primitives shared by the table generators.

use chrono::{Duration, Months, NaiveDate};
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

use crate::errors::GenerationError;

/// Round to cents, half away from zero.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Uniform day in `[start, end]`. An inverted range collapses to `start`.
pub fn date_between<R: Rng + ?Sized>(rng: &mut R, start: NaiveDate, end: NaiveDate) -> NaiveDate {
    let span = (end - start).num_days().max(0);
    let offset = rng.random_range(0..=span);
    start + Duration::days(offset)
}

/// The same calendar day `years` years before `date`.
pub fn years_before(date: NaiveDate, years: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(years * 12))
        .unwrap_or(NaiveDate::MIN)
}

/// Discrete choice over a fixed set of outcomes with explicit weights.
#[derive(Debug, Clone)]
pub struct WeightedChoice<T: Copy> {
    values: Vec<T>,
    index: WeightedIndex<f64>,
}

impl<T: Copy> WeightedChoice<T> {
    pub fn new(values: &[T], weights: &[f64]) -> Result<Self, GenerationError> {
        if values.len() != weights.len() {
            return Err(GenerationError::InvalidOptions(format!(
                "{} outcomes but {} weights",
                values.len(),
                weights.len()
            )));
        }
        let index = WeightedIndex::new(weights.iter().copied())
            .map_err(|err| GenerationError::InvalidOptions(format!("invalid weights: {err}")))?;
        Ok(Self {
            values: values.to_vec(),
            index,
        })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        self.values[self.index.sample(rng)]
    }
}

/// Derive an independent stream seed from the run seed and a stream name.
pub fn hash_seed(seed: u64, key: &str) -> u64 {
    let mut hash = seed ^ 0xcbf29ce484222325;
    for byte in key.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn rounds_to_cents() {
        assert_eq!(round_cents(12.344), 12.34);
        assert_eq!(round_cents(12.346), 12.35);
        assert_eq!(round_cents(7.0), 7.0);
    }

    #[test]
    fn dates_stay_inside_the_window() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let start = NaiveDate::from_ymd_opt(2024, 2, 27).expect("date");
        let end = NaiveDate::from_ymd_opt(2024, 3, 2).expect("date");
        for _ in 0..500 {
            let value = date_between(&mut rng, start, end);
            assert!(value >= start && value <= end);
        }
        assert_eq!(date_between(&mut rng, end, start), end);
    }

    #[test]
    fn years_before_keeps_the_calendar_day() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).expect("date");
        assert_eq!(
            years_before(date, 3),
            NaiveDate::from_ymd_opt(2023, 10, 19).expect("date")
        );
    }

    #[test]
    fn weighted_choice_follows_weights() {
        let choice = WeightedChoice::new(&[1_u32, 2, 3], &[0.0, 1.0, 0.0]).expect("choice");
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(choice.sample(&mut rng), 2);
        }
    }

    #[test]
    fn weighted_choice_rejects_mismatched_weights() {
        assert!(matches!(
            WeightedChoice::new(&[1_u32, 2], &[1.0]),
            Err(GenerationError::InvalidOptions(_))
        ));
        assert!(matches!(
            WeightedChoice::new(&[1_u32, 2], &[0.0, 0.0]),
            Err(GenerationError::InvalidOptions(_))
        ));
    }

    #[test]
    fn stream_seeds_differ_by_name() {
        assert_ne!(hash_seed(42, "customers"), hash_seed(42, "orders"));
        assert_eq!(hash_seed(42, "orders"), hash_seed(42, "orders"));
    }
}
