//! Tests contra PostgreSQL real; se omiten si DATABASE_URL no está definida

use chrono::{NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use taxi_moto_fleet::database::DatabaseConnection;
use taxi_moto_fleet::models::booking::{BookingDecision, BookingStatus, NewReservation, NewSubscription};
use taxi_moto_fleet::models::ledger::WeekdayLabel;
use taxi_moto_fleet::models::question::NewQuestion;
use taxi_moto_fleet::models::user::{NewAccount, UserRole};
use taxi_moto_fleet::models::vehicle::VehicleStatus;
use taxi_moto_fleet::repositories::Repositories;
use taxi_moto_fleet::services::ledger_service::prepare_daily_entry;
use taxi_moto_fleet::utils::errors::AppError;

async fn repos() -> Option<Repositories> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let connection = DatabaseConnection::connect(&url).await.unwrap();
    Some(Repositories::postgres(connection.pool()))
}

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, &Uuid::new_v4().simple().to_string()[..12])
}

fn account(role: UserRole) -> NewAccount {
    NewAccount {
        username: unique("pg"),
        email: None,
        password_hash: "hash".to_string(),
        first_name: "Kossi".to_string(),
        last_name: "Mensah".to_string(),
        phone: "+22890000000".to_string(),
        address: Some("Lomé".to_string()),
        role,
    }
}

async fn new_profile(repos: &Repositories, role: UserRole) -> Uuid {
    repos
        .users
        .create_account(account(role))
        .await
        .unwrap()
        .profile_id
        .unwrap()
}

fn plate() -> String {
    format!("TG-{}", Uuid::new_v4().simple().to_string()[..8].to_uppercase())
}

#[tokio::test]
async fn test_pg_concurrent_assignments_have_one_winner() {
    let Some(repos) = repos().await else { return };
    let d1 = new_profile(&repos, UserRole::Driver).await;
    let d2 = new_profile(&repos, UserRole::Driver).await;
    let vehicle = repos.fleet.create_vehicle("Haojue", &plate()).await.unwrap();

    let (first, second) = tokio::join!(
        repos.fleet.assign_vehicle(vehicle.id, d1),
        repos.fleet.assign_vehicle(vehicle.id, d2),
    );
    let results = [first, second];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .any(|r| matches!(r, Err(AppError::Conflict(_)))));

    let stored = repos.fleet.find_vehicle(vehicle.id).await.unwrap().unwrap();
    assert_eq!(stored.status, VehicleStatus::Assigned);

    // La baja del titular libera la moto
    let holder = repos.fleet.vehicle_holder(vehicle.id).await.unwrap().unwrap();
    repos.fleet.delete_driver(holder).await.unwrap();
    let stored = repos.fleet.find_vehicle(vehicle.id).await.unwrap().unwrap();
    assert_eq!(stored.status, VehicleStatus::Available);
}

#[tokio::test]
async fn test_pg_daily_entry_upsert_replaces_amounts() {
    let Some(repos) = repos().await else { return };
    let driver = new_profile(&repos, UserRole::Driver).await;
    let date = NaiveDate::from_ymd_opt(2024, 3, 17).unwrap();

    let first = prepare_daily_entry(driver, date, Decimal::new(5000, 0), Decimal::new(1200, 0)).unwrap();
    let created = repos.ledger.upsert_entry(first).await.unwrap();
    let second = prepare_daily_entry(driver, date, Decimal::new(6000, 0), Decimal::new(1500, 0)).unwrap();
    let updated = repos.ledger.upsert_entry(second).await.unwrap();

    assert_eq!(created.id, updated.id);
    assert_eq!(updated.weekday, WeekdayLabel::Dimanche);
    assert_eq!(updated.net(), Decimal::new(4500, 0));
    assert_eq!(repos.ledger.entries_for_driver(driver).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_pg_second_pending_question_is_rejected() {
    let Some(repos) = repos().await else { return };
    let email = format!("{}@example.com", unique("ama"));
    let question = || NewQuestion {
        name: "Ama".to_string(),
        email: email.clone(),
        subject: "Tarifs".to_string(),
        message: "Combien coûte un trajet ?".to_string(),
    };

    repos.questions.create_question(question()).await.unwrap();
    let err = repos.questions.create_question(question()).await.unwrap_err();
    assert!(matches!(err, AppError::DuplicatePending(_)));
}

#[tokio::test]
async fn test_pg_seen_keeps_decision_and_weekdays_round_trip() {
    let Some(repos) = repos().await else { return };
    let client = new_profile(&repos, UserRole::Client).await;

    let reservation = repos
        .bookings
        .create_reservation(NewReservation {
            client_id: client,
            ride_date: NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
            ride_time: NaiveTime::from_hms_opt(7, 30, 0).unwrap(),
            pickup: "Tokoin".to_string(),
            dropoff: "Grand Marché".to_string(),
            notes: None,
        })
        .await
        .unwrap();
    repos
        .bookings
        .decide_reservation(reservation.id, BookingDecision::Approved)
        .await
        .unwrap();
    let seen = repos
        .bookings
        .mark_reservation_seen(reservation.id, Utc::now())
        .await
        .unwrap();
    assert_eq!(seen.status, BookingStatus::Approved);
    assert!(seen.seen_at.is_some());

    let subscription = repos
        .bookings
        .create_subscription(NewSubscription {
            client_id: client,
            weekdays: vec![WeekdayLabel::Lundi, WeekdayLabel::Vendredi],
            pickup_time: NaiveTime::from_hms_opt(6, 45, 0).unwrap(),
            pickup: "Adidogomé".to_string(),
            dropoff: "Port".to_string(),
        })
        .await
        .unwrap();
    let stored = repos
        .bookings
        .find_subscription(subscription.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.weekdays, vec![WeekdayLabel::Lundi, WeekdayLabel::Vendredi]);

    let seen = repos
        .bookings
        .mark_subscription_seen(subscription.id, Utc::now())
        .await
        .unwrap();
    assert_eq!(seen.status, BookingStatus::Seen);
}
