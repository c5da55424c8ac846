//! End-to-end booking lifecycle tests against a real SQLite database.

use std::sync::Arc;

use rust_decimal_macros::dec;
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

use car_rental::application::services::{BookingService, CustomerService, VehicleService};
use car_rental::domain::booking::BookingNumberGenerator;
use car_rental::domain::pricing::PricingPolicy;
use car_rental::domain::{
    BookingState, DomainError, RepositoryProvider, VehicleStatus, VehicleType,
};
use car_rental::infrastructure::database::migrator::Migrator;
use car_rental::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

struct TestApp {
    repos: Arc<dyn RepositoryProvider>,
    bookings: BookingService,
    vehicles: VehicleService,
    customers: CustomerService,
    db_path: std::path::PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_path);
    }
}

async fn create_test_app() -> TestApp {
    let db_path = std::env::temp_dir().join(format!("car_rental_test_{}.db", Uuid::new_v4()));
    let config = DatabaseConfig::sqlite(db_path.to_str().expect("utf-8 temp path"));
    let db = init_database(&config).await.expect("database connects");
    Migrator::up(&db, None).await.expect("migrations run");

    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db));
    TestApp {
        bookings: BookingService::new(repos.clone(), PricingPolicy::default())
            .with_number_generator(BookingNumberGenerator::seeded(7)),
        vehicles: VehicleService::new(repos.clone()),
        customers: CustomerService::new(repos.clone()),
        repos,
        db_path,
    }
}

async fn seed_customer(app: &TestApp, personal_number: &str) -> Uuid {
    app.customers
        .create_customer(personal_number, "Anna", "Larsson", None, None)
        .await
        .expect("customer created")
        .id
}

async fn seed_vehicle(app: &TestApp, plate: &str, vehicle_type: VehicleType, odometer: u32) -> Uuid {
    app.vehicles
        .register_vehicle(plate, vehicle_type, odometer)
        .await
        .expect("vehicle registered")
        .id
}

#[tokio::test]
async fn full_booking_lifecycle() {
    let app = create_test_app().await;
    seed_customer(&app, "19900101-1234").await;
    let vehicle_id = seed_vehicle(&app, "ABC123", VehicleType::SmallCar, 1000).await;

    let booking = app
        .bookings
        .create_booking("abc123", "19900101-1234")
        .await
        .expect("booking created");
    assert_eq!(booking.state(), BookingState::Open);
    assert_eq!(booking.booked_odometer, 1000);
    assert!(booking.booking_number.starts_with("ABC123-"));

    // Vehicle is now out
    let vehicle = app.vehicles.get_vehicle(vehicle_id).await.unwrap();
    assert_eq!(vehicle.status, VehicleStatus::Unavailable);

    // A second booking for the same plate is refused
    let err = app
        .bookings
        .create_booking("ABC123", "19900101-1234")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::PreconditionFailed(_)), "{err}");

    // Same-day return: one full day charged, odometer carried over
    let finalized = app
        .bookings
        .finalize_booking(booking.id, 1200)
        .await
        .expect("booking finalized");
    assert_eq!(finalized.state(), BookingState::Priced);
    assert_eq!(finalized.returned_odometer, Some(1200));
    assert_eq!(finalized.total_cost, Some(dec!(600.00)));

    let vehicle = app.vehicles.get_vehicle(vehicle_id).await.unwrap();
    assert_eq!(vehicle.status, VehicleStatus::Available);
    assert_eq!(vehicle.odometer, 1200);

    // Terminal state: neither a second finalize nor a cancel is legal
    let err = app.bookings.finalize_booking(booking.id, 1300).await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidStateTransition(_)), "{err}");
    let err = app.bookings.cancel_booking(booking.id).await.unwrap_err();
    assert!(matches!(err, DomainError::PreconditionFailed(_)), "{err}");
}

#[tokio::test]
async fn truck_rental_cost_includes_distance() {
    let app = create_test_app().await;
    seed_customer(&app, "19851231-0000").await;
    seed_vehicle(&app, "TRK001", VehicleType::Truck, 500).await;

    let booking = app
        .bookings
        .create_booking("TRK001", "19851231-0000")
        .await
        .unwrap();
    // Same-day return: one day at 600*1.5 plus 100 km at 20*1.5
    let finalized = app.bookings.finalize_booking(booking.id, 600).await.unwrap();
    assert_eq!(finalized.total_cost, Some(dec!(3900.00)));
}

#[tokio::test]
async fn finalize_rejects_decreasing_odometer() {
    let app = create_test_app().await;
    seed_customer(&app, "19700101-9999").await;
    let vehicle_id = seed_vehicle(&app, "DEF456", VehicleType::CombiCar, 5000).await;

    let booking = app
        .bookings
        .create_booking("DEF456", "19700101-9999")
        .await
        .unwrap();
    let err = app.bookings.finalize_booking(booking.id, 4999).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::InvalidOdometerUpdate { stored: 5000, new: 4999 }
    ));

    // Failed finalize leaves the booking open and the vehicle out
    let reloaded = app.bookings.get_booking(booking.id).await.unwrap();
    assert!(reloaded.is_open());
    let vehicle = app.vehicles.get_vehicle(vehicle_id).await.unwrap();
    assert_eq!(vehicle.status, VehicleStatus::Unavailable);
}

#[tokio::test]
async fn cancel_is_idempotent_and_releases_vehicle() {
    let app = create_test_app().await;
    seed_customer(&app, "19991212-4321").await;
    let vehicle_id = seed_vehicle(&app, "GHI789", VehicleType::SmallCar, 0).await;

    let booking = app
        .bookings
        .create_booking("GHI789", "19991212-4321")
        .await
        .unwrap();
    app.bookings.cancel_booking(booking.id).await.unwrap();

    let vehicle = app.vehicles.get_vehicle(vehicle_id).await.unwrap();
    assert_eq!(vehicle.status, VehicleStatus::Available);
    assert!(app
        .repos
        .bookings()
        .find_by_id(booking.id)
        .await
        .unwrap()
        .is_none());

    // Cancelling again is a no-op, as is cancelling a random id
    app.bookings.cancel_booking(booking.id).await.unwrap();
    app.bookings.cancel_booking(Uuid::new_v4()).await.unwrap();

    // The vehicle is immediately bookable again
    app.bookings
        .create_booking("GHI789", "19991212-4321")
        .await
        .expect("vehicle reclaimed after cancel");
}

#[tokio::test]
async fn concurrent_bookings_for_one_vehicle_yield_exactly_one_winner() {
    let app = create_test_app().await;
    seed_customer(&app, "19800808-1111").await;
    seed_customer(&app, "19800808-2222").await;
    let vehicle_id = seed_vehicle(&app, "RCE001", VehicleType::SmallCar, 100).await;

    let bookings = Arc::new(
        BookingService::new(app.repos.clone(), PricingPolicy::default())
            .with_number_generator(BookingNumberGenerator::seeded(11)),
    );
    let left = {
        let bookings = bookings.clone();
        tokio::spawn(async move { bookings.create_booking("RCE001", "19800808-1111").await })
    };
    let right = {
        let bookings = bookings.clone();
        tokio::spawn(async move { bookings.create_booking("RCE001", "19800808-2222").await })
    };

    let results = [left.await.unwrap(), right.await.unwrap()];
    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1, "exactly one racer may hold the vehicle");
    for r in &results {
        if let Err(e) = r {
            assert!(
                matches!(e, DomainError::PreconditionFailed(_) | DomainError::Conflict(_)),
                "loser saw unexpected error: {e}"
            );
        }
    }

    let open = app
        .repos
        .bookings()
        .find_open_for_vehicle(vehicle_id)
        .await
        .unwrap();
    assert!(open.is_some(), "winner's booking is open");
    let vehicle = app.vehicles.get_vehicle(vehicle_id).await.unwrap();
    assert_eq!(vehicle.status, VehicleStatus::Unavailable);
}

#[tokio::test]
async fn soft_deleted_vehicle_cannot_be_booked() {
    let app = create_test_app().await;
    seed_customer(&app, "19660606-0001").await;
    let vehicle_id = seed_vehicle(&app, "JKL012", VehicleType::CombiCar, 0).await;

    app.vehicles.soft_delete_vehicle(vehicle_id).await.unwrap();

    let err = app
        .bookings
        .create_booking("JKL012", "19660606-0001")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }), "{err}");

    // Restore brings it back into the bookable fleet
    app.vehicles.restore_vehicle(vehicle_id).await.unwrap();
    app.bookings
        .create_booking("JKL012", "19660606-0001")
        .await
        .expect("restored vehicle is bookable");
}

#[tokio::test]
async fn vehicle_with_open_booking_cannot_be_deleted() {
    let app = create_test_app().await;
    seed_customer(&app, "19750505-0002").await;
    let vehicle_id = seed_vehicle(&app, "MNO345", VehicleType::Truck, 0).await;

    let booking = app
        .bookings
        .create_booking("MNO345", "19750505-0002")
        .await
        .unwrap();
    let err = app.vehicles.soft_delete_vehicle(vehicle_id).await.unwrap_err();
    assert!(matches!(err, DomainError::PreconditionFailed(_)), "{err}");

    app.bookings.cancel_booking(booking.id).await.unwrap();
    app.vehicles.soft_delete_vehicle(vehicle_id).await.unwrap();
}

#[tokio::test]
async fn customer_erasure_detaches_booking_history() {
    let app = create_test_app().await;
    let customer_id = seed_customer(&app, "19440404-0003").await;
    seed_vehicle(&app, "PQR678", VehicleType::SmallCar, 10).await;

    let booking = app
        .bookings
        .create_booking("PQR678", "19440404-0003")
        .await
        .unwrap();
    let finalized = app.bookings.finalize_booking(booking.id, 60).await.unwrap();
    assert_eq!(finalized.customer_id, Some(customer_id));

    app.customers.erase_customer(customer_id).await.unwrap();
    // Erasure is idempotent
    app.customers.erase_customer(customer_id).await.unwrap();

    // History survives with the customer reference cleared
    let reloaded = app.bookings.get_booking(booking.id).await.unwrap();
    assert_eq!(reloaded.customer_id, None);
    assert_eq!(reloaded.total_cost, finalized.total_cost);

    // The personal number is free for a new registration
    let err = app
        .customers
        .get_by_personal_number("19440404-0003")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
    seed_customer(&app, "19440404-0003").await;
}

#[tokio::test]
async fn available_vehicle_listing_filters_by_type() {
    let app = create_test_app().await;
    seed_customer(&app, "19520202-0004").await;
    seed_vehicle(&app, "STU901", VehicleType::SmallCar, 0).await;
    seed_vehicle(&app, "VWX234", VehicleType::Truck, 0).await;
    let deleted = seed_vehicle(&app, "YZA567", VehicleType::Truck, 0).await;
    app.vehicles.soft_delete_vehicle(deleted).await.unwrap();

    let trucks = app
        .vehicles
        .list_available(Some(VehicleType::Truck))
        .await
        .unwrap();
    assert_eq!(trucks.len(), 1);
    assert_eq!(trucks[0].license_plate, "VWX234");

    app.bookings
        .create_booking("VWX234", "19520202-0004")
        .await
        .unwrap();
    let trucks = app
        .vehicles
        .list_available(Some(VehicleType::Truck))
        .await
        .unwrap();
    assert!(trucks.is_empty(), "booked and deleted trucks are not available");

    let all = app.vehicles.list_vehicles(false).await.unwrap();
    assert_eq!(all.len(), 2);
    let with_deleted = app.vehicles.list_vehicles(true).await.unwrap();
    assert_eq!(with_deleted.len(), 3);
}
