//! Booking number generation
//!
//! Format: `{PLATE}-{NNNNN}-{AAAAA}` with the numeric segment in
//! [10000, 99999] and five random uppercase letters. Uniqueness is
//! probabilistic; the unique index on `booking_number` turns a
//! collision into a retryable conflict, at which point the coordinator
//! regenerates a fresh number on the next attempt.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::vehicle::is_valid_license_plate;
use crate::domain::DomainResult;
use crate::shared::errors::DomainError;

const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Randomness source for booking numbers.
///
/// Injected rather than global so tests can supply a seeded sequence
/// and concurrent generation never contends on a shared static.
pub struct BookingNumberGenerator {
    rng: Mutex<StdRng>,
}

impl BookingNumberGenerator {
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic generator for tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Generate a booking number for an already-normalized plate.
    pub fn generate(&self, license_plate: &str) -> DomainResult<String> {
        if !is_valid_license_plate(license_plate) {
            return Err(DomainError::InvalidArgument(format!(
                "invalid license plate '{license_plate}'"
            )));
        }
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let number: u32 = rng.gen_range(10_000..100_000);
        let suffix: String = (0..5)
            .map(|_| LETTERS[rng.gen_range(0..LETTERS.len())] as char)
            .collect();
        Ok(format!("{license_plate}-{number}-{suffix}"))
    }
}

impl Default for BookingNumberGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_numbers_match_format() {
        let gen = BookingNumberGenerator::from_entropy();
        for _ in 0..200 {
            let number = gen.generate("XYZ789").unwrap();
            let parts: Vec<&str> = number.split('-').collect();
            assert_eq!(parts.len(), 3, "unexpected shape: {number}");
            assert_eq!(parts[0], "XYZ789");
            let numeric: u32 = parts[1].parse().expect("numeric segment");
            assert!((10_000..=99_999).contains(&numeric), "out of range: {numeric}");
            assert_eq!(parts[2].len(), 5);
            assert!(parts[2].bytes().all(|b| b.is_ascii_uppercase()));
        }
    }

    #[test]
    fn seeded_generators_are_reproducible() {
        let a = BookingNumberGenerator::seeded(42);
        let b = BookingNumberGenerator::seeded(42);
        for _ in 0..10 {
            assert_eq!(a.generate("ABC123").unwrap(), b.generate("ABC123").unwrap());
        }
    }

    #[test]
    fn invalid_plate_is_rejected_before_generation() {
        let gen = BookingNumberGenerator::seeded(1);
        for plate in ["abc123", "AB123", "ABC12X", ""] {
            let err = gen.generate(plate).unwrap_err();
            assert!(matches!(err, DomainError::InvalidArgument(_)), "plate {plate:?}");
        }
    }
}
