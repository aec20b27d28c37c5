mod common;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use taxi_moto_fleet::controllers::driver_controller::DriverController;
use taxi_moto_fleet::controllers::ledger_controller::LedgerController;
use taxi_moto_fleet::controllers::repair_controller::RepairController;
use taxi_moto_fleet::controllers::report_controller::ReportController;
use taxi_moto_fleet::controllers::vehicle_controller::VehicleController;
use taxi_moto_fleet::dto::ledger_dto::{AbsenceRequest, EditEntryRequest, UpsertEntryRequest};
use taxi_moto_fleet::dto::repair_dto::RecordRepairRequest;
use taxi_moto_fleet::dto::vehicle_dto::{AssignVehicleRequest, CreateVehicleRequest, SetVehicleStatusRequest};
use taxi_moto_fleet::models::ledger::WeekdayLabel;
use taxi_moto_fleet::models::vehicle::VehicleStatus;
use taxi_moto_fleet::utils::errors::AppError;

use common::*;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn assign(vehicle_id: uuid::Uuid, driver_id: uuid::Uuid) -> AssignVehicleRequest {
    AssignVehicleRequest { vehicle_id, driver_id }
}

#[tokio::test]
async fn test_vehicle_cannot_be_held_by_two_drivers() {
    let state = test_state();
    let admin = create_admin(&state).await;
    let d1 = create_driver(&state, "kossi").await;
    let d2 = create_driver(&state, "yao").await;
    let v1 = create_vehicle(&state, &admin, "Haojue 1", "TG-1001-AA").await;
    let vehicles = VehicleController::new(&state);

    let assigned = vehicles.assign(&admin, assign(v1.id, driver_id(&d1))).await.unwrap();
    assert_eq!(assigned.data.unwrap().status, VehicleStatus::Assigned);

    let err = vehicles.assign(&admin, assign(v1.id, driver_id(&d2))).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // re-asignar al mismo conductor es idempotente
    assert!(vehicles.assign(&admin, assign(v1.id, driver_id(&d1))).await.is_ok());

    let holder = state.repos.fleet.vehicle_holder(v1.id).await.unwrap();
    assert_eq!(holder, Some(driver_id(&d1)));
    let d2_profile = state.repos.fleet.find_driver(driver_id(&d2)).await.unwrap().unwrap();
    assert_eq!(d2_profile.vehicle_id, None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_assignments_have_one_winner() {
    let state = test_state();
    let admin = create_admin(&state).await;
    let d1 = create_driver(&state, "kossi").await;
    let d2 = create_driver(&state, "yao").await;
    let v1 = create_vehicle(&state, &admin, "Haojue 1", "TG-1001-AA").await;
    let vehicles = VehicleController::new(&state);

    let (first, second) = tokio::join!(
        vehicles.assign(&admin, assign(v1.id, driver_id(&d1))),
        vehicles.assign(&admin, assign(v1.id, driver_id(&d2))),
    );

    let results = [first, second];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .any(|r| matches!(r, Err(AppError::Conflict(_)))));

    let holder = state.repos.fleet.vehicle_holder(v1.id).await.unwrap();
    assert!(holder == Some(driver_id(&d1)) || holder == Some(driver_id(&d2)));
    let vehicle = state.repos.fleet.find_vehicle(v1.id).await.unwrap().unwrap();
    assert_eq!(vehicle.status, VehicleStatus::Assigned);
}

#[tokio::test]
async fn test_assigned_status_follows_driver_link() {
    let state = test_state();
    let admin = create_admin(&state).await;
    let driver = create_driver(&state, "kossi").await;
    let v1 = create_vehicle(&state, &admin, "Haojue 1", "TG-1001-AA").await;
    let v2 = create_vehicle(&state, &admin, "Haojue 2", "TG-1002-AA").await;
    let vehicles = VehicleController::new(&state);

    vehicles.assign(&admin, assign(v1.id, driver_id(&driver))).await.unwrap();
    vehicles.assign(&admin, assign(v2.id, driver_id(&driver))).await.unwrap();

    let v1 = state.repos.fleet.find_vehicle(v1.id).await.unwrap().unwrap();
    assert_eq!(v1.status, VehicleStatus::Available);
    assert_eq!(state.repos.fleet.vehicle_holder(v1.id).await.unwrap(), None);

    vehicles.remove(&admin, v2.id).await.unwrap();
    assert!(state.repos.fleet.find_vehicle(v2.id).await.unwrap().is_none());
    let profile = state.repos.fleet.find_driver(driver_id(&driver)).await.unwrap().unwrap();
    assert_eq!(profile.vehicle_id, None);
}

#[tokio::test]
async fn test_vehicle_plate_is_unique_after_normalization() {
    let state = test_state();
    let admin = create_admin(&state).await;
    create_vehicle(&state, &admin, "Haojue 1", "TG-1001-AA").await;

    let err = VehicleController::new(&state)
        .create(
            &admin,
            CreateVehicleRequest {
                name: "Doublon".to_string(),
                plate: " tg-1001-aa ".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_driver_cannot_manage_fleet() {
    let state = test_state();
    let admin = create_admin(&state).await;
    let driver = create_driver(&state, "kossi").await;
    let v1 = create_vehicle(&state, &admin, "Haojue 1", "TG-1001-AA").await;

    let err = VehicleController::new(&state)
        .assign(&driver, assign(v1.id, driver_id(&driver)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let err = DriverController::new(&state).list(&driver).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn test_invalid_status_leaves_vehicle_untouched() {
    let state = test_state();
    let admin = create_admin(&state).await;
    let v1 = create_vehicle(&state, &admin, "Haojue 1", "TG-1001-AA").await;
    let vehicles = VehicleController::new(&state);

    let err = vehicles
        .set_status(&admin, v1.id, SetVehicleStatusRequest { status: "volee".to_string() })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let vehicle = state.repos.fleet.find_vehicle(v1.id).await.unwrap().unwrap();
    assert_eq!(vehicle.status, VehicleStatus::Available);
}

#[tokio::test]
async fn test_daily_entry_is_upserted() {
    let state = test_state();
    let driver = create_driver(&state, "kossi").await;
    let ledger = LedgerController::new(&state);
    let today = day(2024, 3, 17);

    let first = UpsertEntryRequest {
        driver_id: None,
        date: None,
        revenue: Decimal::from(5000),
        expense: Decimal::from(1200),
    };
    ledger.upsert(&driver, first, today).await.unwrap();

    let second = UpsertEntryRequest {
        driver_id: None,
        date: None,
        revenue: Decimal::from(6000),
        expense: Decimal::from(1500),
    };
    let saved = ledger.upsert(&driver, second, today).await.unwrap().data.unwrap();
    assert_eq!(saved.net, Decimal::from(4500));
    assert_eq!(saved.entry.weekday, WeekdayLabel::Dimanche);

    let entries = ledger.entries(&driver, driver_id(&driver)).await.unwrap().data.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].entry.revenue, Decimal::from(6000));
    assert_eq!(entries[0].net, Decimal::from(4500));
}

#[tokio::test]
async fn test_driver_cannot_write_another_ledger() {
    let state = test_state();
    let kossi = create_driver(&state, "kossi").await;
    let yao = create_driver(&state, "yao").await;

    let request = UpsertEntryRequest {
        driver_id: Some(driver_id(&yao)),
        date: None,
        revenue: Decimal::from(1000),
        expense: Decimal::ZERO,
    };
    let err = LedgerController::new(&state)
        .upsert(&kossi, request, day(2024, 3, 18))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn test_admin_edits_entry_and_records_absence() {
    let state = test_state();
    let admin = create_admin(&state).await;
    let driver = create_driver(&state, "kossi").await;
    let ledger = LedgerController::new(&state);
    let today = day(2024, 3, 18);

    let entry = ledger
        .upsert(
            &admin,
            UpsertEntryRequest {
                driver_id: Some(driver_id(&driver)),
                date: None,
                revenue: Decimal::from(3000),
                expense: Decimal::from(500),
            },
            today,
        )
        .await
        .unwrap()
        .data
        .unwrap();

    let edited = ledger
        .edit(
            &admin,
            entry.entry.id,
            EditEntryRequest {
                revenue: Decimal::from(3500),
                expense: Decimal::from(500),
            },
        )
        .await
        .unwrap()
        .data
        .unwrap();
    assert_eq!(edited.net, Decimal::from(3000));

    ledger
        .record_absence(&admin, driver_id(&driver), AbsenceRequest::default(), today)
        .await
        .unwrap();
    let absences = ledger.absences(&admin, driver_id(&driver)).await.unwrap().data.unwrap();
    assert_eq!(absences.len(), 1);
    assert_eq!(absences[0].absence_date, today);
}

#[tokio::test]
async fn test_repair_requires_vehicle_in_repair() {
    let state = test_state();
    let admin = create_admin(&state).await;
    let v1 = create_vehicle(&state, &admin, "Haojue 1", "TG-1001-AA").await;
    let repairs = RepairController::new(&state);
    let today = day(2024, 3, 18);

    let request = || RecordRepairRequest {
        vehicle_id: v1.id,
        date: None,
        description: "Chaîne cassée".to_string(),
        cost: Decimal::from(7500),
        invoice_ref: None,
    };

    let err = repairs.record(&admin, request(), today).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    VehicleController::new(&state)
        .set_status(&admin, v1.id, SetVehicleStatusRequest { status: "in_repair".to_string() })
        .await
        .unwrap();
    let repair = repairs.record(&admin, request(), today).await.unwrap().data.unwrap();
    assert_eq!(repair.cost, Decimal::from(7500));
    assert_eq!(repair.repair_date, today);
}

#[tokio::test]
async fn test_global_balance() {
    let state = test_state();
    let admin = create_admin(&state).await;
    let reports = ReportController::new(&state);

    let empty = reports.balance(&admin).await.unwrap().data.unwrap();
    assert_eq!(empty.balance.net_profit, Decimal::ZERO);
    assert_eq!(empty.drivers, 0);

    let driver = create_driver(&state, "kossi").await;
    LedgerController::new(&state)
        .upsert(
            &driver,
            UpsertEntryRequest {
                driver_id: None,
                date: None,
                revenue: Decimal::from(5000),
                expense: Decimal::from(1200),
            },
            day(2024, 3, 18),
        )
        .await
        .unwrap();

    let report = reports.balance(&admin).await.unwrap().data.unwrap();
    assert_eq!(report.balance.total_revenue, Decimal::from(5000));
    assert_eq!(report.balance.net_profit, Decimal::from(3800));
    assert_eq!(report.drivers, 1);

    let err = reports.balance(&driver).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn test_deleting_driver_releases_vehicle() {
    let state = test_state();
    let admin = create_admin(&state).await;
    let driver = create_driver(&state, "kossi").await;
    let v1 = create_vehicle(&state, &admin, "Haojue 1", "TG-1001-AA").await;
    VehicleController::new(&state)
        .assign(&admin, assign(v1.id, driver_id(&driver)))
        .await
        .unwrap();

    DriverController::new(&state)
        .delete(&admin, driver_id(&driver))
        .await
        .unwrap();

    let vehicle = state.repos.fleet.find_vehicle(v1.id).await.unwrap().unwrap();
    assert_eq!(vehicle.status, VehicleStatus::Available);
    assert!(state.repos.users.find_by_id(driver.user_id()).await.unwrap().is_none());
}
