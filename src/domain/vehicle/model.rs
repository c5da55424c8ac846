//! Vehicle domain entity

use uuid::Uuid;

use crate::domain::DomainResult;
use crate::shared::errors::DomainError;

/// Vehicle category, drives the pricing multipliers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleType {
    SmallCar,
    CombiCar,
    Truck,
}

impl VehicleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SmallCar => "SmallCar",
            Self::CombiCar => "CombiCar",
            Self::Truck => "Truck",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "SmallCar" => Some(Self::SmallCar),
            "CombiCar" => Some(Self::CombiCar),
            "Truck" => Some(Self::Truck),
            _ => None,
        }
    }
}

/// Reservation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleStatus {
    /// Free to be booked
    Available,
    /// Exclusively held by one open booking
    Unavailable,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Unavailable => "Unavailable",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Available" => Some(Self::Available),
            "Unavailable" => Some(Self::Unavailable),
            _ => None,
        }
    }
}

/// Soft-delete state, tagged rather than a bare bool so a deleted
/// vehicle can never be confused with a bookable one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleLifecycle {
    Active,
    Deleted,
}

/// Rental vehicle
#[derive(Debug, Clone)]
pub struct Vehicle {
    /// Unique vehicle ID
    pub id: Uuid,
    /// Normalized plate: 3 uppercase letters + 3 digits
    pub license_plate: String,
    pub vehicle_type: VehicleType,
    pub status: VehicleStatus,
    /// Monotonically non-decreasing reading
    pub odometer: u32,
    pub lifecycle: VehicleLifecycle,
    /// Optimistic concurrency token, bumped by the store on every write
    pub version: i32,
}

impl Vehicle {
    /// Register a new vehicle. Validates and normalizes the license
    /// plate; the vehicle starts Available and Active.
    pub fn register(
        license_plate: &str,
        vehicle_type: VehicleType,
        odometer: u32,
    ) -> DomainResult<Self> {
        let license_plate = normalize_license_plate(license_plate)?;
        Ok(Self {
            id: Uuid::new_v4(),
            license_plate,
            vehicle_type,
            status: VehicleStatus::Available,
            odometer,
            lifecycle: VehicleLifecycle::Active,
            version: 0,
        })
    }

    pub fn is_deleted(&self) -> bool {
        self.lifecycle == VehicleLifecycle::Deleted
    }

    pub fn is_available(&self) -> bool {
        self.status == VehicleStatus::Available && !self.is_deleted()
    }

    /// Reserve the vehicle for a booking. Requires Available and not
    /// soft-deleted.
    pub fn mark_reserved(&mut self) -> DomainResult<()> {
        if self.is_deleted() {
            return Err(DomainError::PreconditionFailed(format!(
                "vehicle {} is deleted",
                self.license_plate
            )));
        }
        if self.status != VehicleStatus::Available {
            return Err(DomainError::PreconditionFailed(format!(
                "vehicle {} is not available",
                self.license_plate
            )));
        }
        self.status = VehicleStatus::Unavailable;
        Ok(())
    }

    /// Release the vehicle. No precondition: reclaiming an
    /// already-available vehicle is legal (covers cancel-and-retry).
    pub fn mark_available(&mut self) {
        self.status = VehicleStatus::Available;
    }

    /// Update the odometer. The reading never decreases.
    pub fn update_odometer(&mut self, reading: u32) -> DomainResult<()> {
        if reading < self.odometer {
            return Err(DomainError::InvalidOdometerUpdate {
                stored: self.odometer,
                new: reading,
            });
        }
        self.odometer = reading;
        Ok(())
    }

    /// Flag the vehicle deleted. No-op when already deleted.
    pub fn soft_delete(&mut self) {
        self.lifecycle = VehicleLifecycle::Deleted;
    }

    pub fn restore(&mut self) {
        self.lifecycle = VehicleLifecycle::Active;
    }
}

/// Canonical plate format: exactly 3 uppercase letters followed by 3 digits.
pub fn is_valid_license_plate(plate: &str) -> bool {
    let bytes = plate.as_bytes();
    bytes.len() == 6
        && bytes[..3].iter().all(|b| b.is_ascii_uppercase())
        && bytes[3..].iter().all(|b| b.is_ascii_digit())
}

/// Uppercase and validate a license plate.
pub fn normalize_license_plate(plate: &str) -> DomainResult<String> {
    let plate = plate.trim().to_ascii_uppercase();
    if !is_valid_license_plate(&plate) {
        return Err(DomainError::InvalidArgument(format!(
            "invalid license plate '{plate}'"
        )));
    }
    Ok(plate)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_vehicle() -> Vehicle {
        Vehicle::register("abc123", VehicleType::SmallCar, 1000).unwrap()
    }

    #[test]
    fn register_normalizes_plate_and_starts_available() {
        let v = sample_vehicle();
        assert_eq!(v.license_plate, "ABC123");
        assert_eq!(v.status, VehicleStatus::Available);
        assert_eq!(v.lifecycle, VehicleLifecycle::Active);
        assert_eq!(v.odometer, 1000);
        assert_eq!(v.version, 0);
    }

    #[test]
    fn register_rejects_malformed_plates() {
        for plate in ["AB123", "ABCD12", "123ABC", "AB12345", "ÅÄÖ123", ""] {
            assert!(
                Vehicle::register(plate, VehicleType::Truck, 0).is_err(),
                "plate {plate:?} should be rejected"
            );
        }
    }

    #[test]
    fn mark_reserved_flips_available_vehicle() {
        let mut v = sample_vehicle();
        v.mark_reserved().unwrap();
        assert_eq!(v.status, VehicleStatus::Unavailable);
    }

    #[test]
    fn mark_reserved_fails_when_unavailable() {
        let mut v = sample_vehicle();
        v.mark_reserved().unwrap();
        let err = v.mark_reserved().unwrap_err();
        assert!(matches!(err, DomainError::PreconditionFailed(_)));
        assert_eq!(v.status, VehicleStatus::Unavailable);
    }

    #[test]
    fn mark_reserved_fails_when_deleted() {
        let mut v = sample_vehicle();
        v.soft_delete();
        let err = v.mark_reserved().unwrap_err();
        assert!(matches!(err, DomainError::PreconditionFailed(_)));
    }

    #[test]
    fn mark_available_is_idempotent() {
        let mut v = sample_vehicle();
        v.mark_available();
        v.mark_available();
        assert_eq!(v.status, VehicleStatus::Available);
    }

    #[test]
    fn odometer_never_decreases() {
        let mut v = sample_vehicle();
        let err = v.update_odometer(999).unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidOdometerUpdate {
                stored: 1000,
                new: 999
            }
        ));
        assert_eq!(v.odometer, 1000, "failed update must leave reading unchanged");
    }

    #[test]
    fn odometer_accepts_equal_and_higher_readings() {
        let mut v = sample_vehicle();
        v.update_odometer(1000).unwrap();
        v.update_odometer(1500).unwrap();
        assert_eq!(v.odometer, 1500);
    }

    #[test]
    fn soft_delete_is_noop_when_already_deleted() {
        let mut v = sample_vehicle();
        v.soft_delete();
        v.soft_delete();
        assert!(v.is_deleted());
        v.restore();
        assert!(!v.is_deleted());
    }

    #[test]
    fn vehicle_type_roundtrip() {
        for vt in &[VehicleType::SmallCar, VehicleType::CombiCar, VehicleType::Truck] {
            assert_eq!(VehicleType::from_str(vt.as_str()), Some(*vt));
        }
        assert!(VehicleType::from_str("Bicycle").is_none());
    }
}
