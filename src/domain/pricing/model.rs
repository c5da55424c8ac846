//! Pricing policy and cost computation

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::domain::booking::Booking;
use crate::domain::vehicle::VehicleType;
use crate::domain::DomainResult;
use crate::shared::errors::DomainError;

/// Per-vehicle-type rate multipliers
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TypeMultiplier {
    pub daily_rate: Decimal,
    pub distance_rate: Decimal,
}

impl Default for TypeMultiplier {
    fn default() -> Self {
        Self {
            daily_rate: Decimal::ONE,
            distance_rate: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TypeMultipliers {
    pub small_car: TypeMultiplier,
    pub combi_car: TypeMultiplier,
    pub truck: TypeMultiplier,
}

impl Default for TypeMultipliers {
    fn default() -> Self {
        Self {
            // SmallCar is day-rate only unless the policy overrides it
            small_car: TypeMultiplier {
                daily_rate: dec!(1.0),
                distance_rate: dec!(0.0),
            },
            combi_car: TypeMultiplier {
                daily_rate: dec!(1.3),
                distance_rate: dec!(1.0),
            },
            truck: TypeMultiplier {
                daily_rate: dec!(1.5),
                distance_rate: dec!(1.5),
            },
        }
    }
}

/// Rental pricing policy, loaded from the `[pricing]` config section.
/// Rates are data-driven so operators can retune without a rebuild.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PricingPolicy {
    pub base_daily_rate: Decimal,
    pub base_distance_rate: Decimal,
    pub multipliers: TypeMultipliers,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            base_daily_rate: dec!(600),
            base_distance_rate: dec!(20),
            multipliers: TypeMultipliers::default(),
        }
    }
}

impl PricingPolicy {
    pub fn multiplier(&self, vehicle_type: VehicleType) -> &TypeMultiplier {
        match vehicle_type {
            VehicleType::SmallCar => &self.multipliers.small_car,
            VehicleType::CombiCar => &self.multipliers.combi_car,
            VehicleType::Truck => &self.multipliers.truck,
        }
    }
}

const SECONDS_PER_DAY: i64 = 86_400;

/// Compute the total rental cost for a returned booking.
///
/// Days rented are rounded up to full days with a minimum of one (a
/// same-day return still charges one full day). The result is rounded
/// to 2 decimal places, midpoints away from zero.
pub fn compute_cost(
    booking: &Booking,
    vehicle_type: VehicleType,
    policy: &PricingPolicy,
) -> DomainResult<Decimal> {
    let (Some(returned_at), Some(returned_odometer)) =
        (booking.returned_at, booking.returned_odometer)
    else {
        return Err(DomainError::InvalidArgument(format!(
            "booking {} has no return data",
            booking.booking_number
        )));
    };

    // Non-negative by the return-odometer invariant
    let distance = returned_odometer.saturating_sub(booking.booked_odometer);

    let rented_seconds = (returned_at - booking.booked_at).num_seconds().max(0);
    let days_rented = ((rented_seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY).max(1);

    let multiplier = policy.multiplier(vehicle_type);
    let daily_cost = policy.base_daily_rate * Decimal::from(days_rented) * multiplier.daily_rate;
    let distance_cost =
        policy.base_distance_rate * Decimal::from(distance) * multiplier.distance_rate;

    Ok((daily_cost + distance_cost)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    use super::*;

    fn returned_booking(hours: i64, booked_odometer: u32, returned_odometer: u32) -> Booking {
        let booked_at = Utc::now();
        let mut b = Booking::open(
            "ABC123-12345-QWERT",
            Uuid::new_v4(),
            Uuid::new_v4(),
            booked_at,
            booked_odometer,
        );
        b.return_vehicle(returned_odometer, booked_at + Duration::hours(hours))
            .unwrap();
        b
    }

    #[test]
    fn small_car_two_days_is_day_rate_only() {
        // 25h -> ceil(25/24) = 2 days; 200 km travelled but the
        // default SmallCar distance multiplier is zero.
        let b = returned_booking(25, 1000, 1200);
        let cost = compute_cost(&b, VehicleType::SmallCar, &PricingPolicy::default()).unwrap();
        assert_eq!(cost, dec!(1200.00));
    }

    #[test]
    fn combi_car_three_days_with_distance() {
        // (600*3*1.3) + (20*300*1.0) = 2340 + 6000
        let b = returned_booking(72, 0, 300);
        let cost = compute_cost(&b, VehicleType::CombiCar, &PricingPolicy::default()).unwrap();
        assert_eq!(cost, dec!(8340.00));
    }

    #[test]
    fn truck_two_days_with_distance() {
        // (600*2*1.5) + (20*100*1.5) = 1800 + 3000
        let b = returned_booking(48, 500, 600);
        let cost = compute_cost(&b, VehicleType::Truck, &PricingPolicy::default()).unwrap();
        assert_eq!(cost, dec!(4800.00));
    }

    #[test]
    fn same_day_return_charges_one_full_day() {
        let b = returned_booking(2, 1000, 1010);
        let cost = compute_cost(&b, VehicleType::SmallCar, &PricingPolicy::default()).unwrap();
        assert_eq!(cost, dec!(600.00));
    }

    #[test]
    fn exact_multiple_of_24_hours_does_not_round_up() {
        let b = returned_booking(48, 0, 0);
        let cost = compute_cost(&b, VehicleType::SmallCar, &PricingPolicy::default()).unwrap();
        assert_eq!(cost, dec!(1200.00));
    }

    #[test]
    fn computation_is_pure_and_idempotent() {
        let b = returned_booking(30, 1000, 1500);
        let policy = PricingPolicy::default();
        let first = compute_cost(&b, VehicleType::Truck, &policy).unwrap();
        let second = compute_cost(&b, VehicleType::Truck, &policy).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn open_booking_cannot_be_priced() {
        let b = Booking::open(
            "ABC123-12345-QWERT",
            Uuid::new_v4(),
            Uuid::new_v4(),
            Utc::now(),
            0,
        );
        let err = compute_cost(&b, VehicleType::SmallCar, &PricingPolicy::default()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }

    #[test]
    fn policy_override_enables_small_car_distance_rate() {
        let mut policy = PricingPolicy::default();
        policy.multipliers.small_car.distance_rate = dec!(0.5);
        let b = returned_booking(24, 0, 100);
        // (600*1*1.0) + (20*100*0.5) = 600 + 1000
        let cost = compute_cost(&b, VehicleType::SmallCar, &policy).unwrap();
        assert_eq!(cost, dec!(1600.00));
    }

    #[test]
    fn result_is_rounded_to_two_decimals_away_from_zero() {
        let mut policy = PricingPolicy::default();
        policy.base_daily_rate = dec!(0.105);
        policy.multipliers.small_car.daily_rate = dec!(1.0);
        let b = returned_booking(12, 0, 0);
        // 0.105 rounds to 0.11, not banker's 0.10
        let cost = compute_cost(&b, VehicleType::SmallCar, &policy).unwrap();
        assert_eq!(cost, dec!(0.11));
    }
}
