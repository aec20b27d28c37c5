//! Repositorios de acceso a datos
//!
//! Cada área expone un trait con dos implementaciones: PostgreSQL (sqlx) y
//! memoria (tests y arranque sin `DATABASE_URL`). Los controllers solo ven
//! los traits a través de [`Repositories`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::booking::{
    BookingDecision, NewQuickRequest, NewReservation, NewSubscription, QuickRequest,
    QuickRequestStatus, Reservation, Subscription,
};
use crate::models::driver::{DriverProfile, DriverUpdate};
use crate::models::ledger::{Absence, LedgerEntry};
use crate::models::question::{NewQuestion, Question};
use crate::models::repair::{NewRepair, RepairEvent};
use crate::models::report::LedgerTotals;
use crate::models::user::{Account, NewAccount, User};
use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::services::ledger_service::DailyEntry;
use crate::utils::errors::AppResult;

pub mod booking_repository;
pub mod ledger_repository;
pub mod memory;
pub mod question_repository;
pub mod repair_repository;
pub mod report_repository;
pub mod user_repository;
pub mod vehicle_repository;

pub use memory::InMemoryStore;

/// Usuarios y perfiles (driver / client)
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Crear usuario + perfil en una sola operación; username duplicado → Conflict
    async fn create_account(&self, account: NewAccount) -> AppResult<Account>;
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
    async fn username_exists(&self, username: &str) -> AppResult<bool>;
    /// Id del driver o client asociado al usuario
    async fn profile_id(&self, user: &User) -> AppResult<Option<Uuid>>;
}

/// Motos y conductores
#[async_trait]
pub trait FleetRepository: Send + Sync {
    async fn create_vehicle(&self, name: &str, plate: &str) -> AppResult<Vehicle>;
    async fn plate_exists(&self, plate: &str) -> AppResult<bool>;
    async fn count_vehicles(&self) -> AppResult<i64>;
    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>>;
    async fn find_vehicle(&self, id: Uuid) -> AppResult<Option<Vehicle>>;
    /// Conductor que tiene la moto, si lo hay
    async fn vehicle_holder(&self, vehicle_id: Uuid) -> AppResult<Option<Uuid>>;
    async fn set_vehicle_status(&self, id: Uuid, status: VehicleStatus) -> AppResult<Vehicle>;
    /// Libera el vínculo, fuerza `available` y borra, todo junto
    async fn remove_vehicle(&self, id: Uuid) -> AppResult<()>;
    /// Check-and-set atómico de la asignación
    async fn assign_vehicle(&self, vehicle_id: Uuid, driver_id: Uuid) -> AppResult<Vehicle>;

    async fn count_drivers(&self) -> AppResult<i64>;
    async fn list_drivers(&self) -> AppResult<Vec<DriverProfile>>;
    async fn find_driver(&self, id: Uuid) -> AppResult<Option<DriverProfile>>;
    async fn update_driver(&self, id: Uuid, update: DriverUpdate) -> AppResult<DriverProfile>;
    /// Borra el conductor y su usuario; su moto vuelve a `available`
    async fn delete_driver(&self, id: Uuid) -> AppResult<()>;
}

/// Recettes y absences
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Insert o sobrescritura de la entrada (driver, fecha)
    async fn upsert_entry(&self, entry: DailyEntry) -> AppResult<LedgerEntry>;
    async fn find_entry(&self, id: Uuid) -> AppResult<Option<LedgerEntry>>;
    async fn update_entry_amounts(
        &self,
        id: Uuid,
        revenue: Decimal,
        expense: Decimal,
    ) -> AppResult<LedgerEntry>;
    /// Entradas de un conductor, más recientes primero
    async fn entries_for_driver(&self, driver_id: Uuid) -> AppResult<Vec<LedgerEntry>>;
    async fn entry_for_day(&self, driver_id: Uuid, date: NaiveDate) -> AppResult<Option<LedgerEntry>>;
    async fn driver_totals(&self, driver_id: Uuid) -> AppResult<LedgerTotals>;
    async fn record_absence(
        &self,
        driver_id: Uuid,
        date: NaiveDate,
        reason: Option<String>,
    ) -> AppResult<Absence>;
    async fn absences_for_driver(&self, driver_id: Uuid) -> AppResult<Vec<Absence>>;
}

/// Pannes
#[async_trait]
pub trait RepairRepository: Send + Sync {
    async fn record_repair(&self, repair: NewRepair) -> AppResult<RepairEvent>;
    /// Más recientes primero
    async fn list_repairs(&self) -> AppResult<Vec<RepairEvent>>;
}

/// Reservations, abonnements y réservations rapides
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create_reservation(&self, reservation: NewReservation) -> AppResult<Reservation>;
    async fn find_reservation(&self, id: Uuid) -> AppResult<Option<Reservation>>;
    async fn list_reservations(&self, client_id: Option<Uuid>) -> AppResult<Vec<Reservation>>;
    /// Decisión del admin; conserva `seen_at`
    async fn decide_reservation(&self, id: Uuid, decision: BookingDecision) -> AppResult<Reservation>;
    /// `pending → seen` en el mismo UPDATE; sobre un registro decidido solo anota `seen_at`
    async fn mark_reservation_seen(&self, id: Uuid, now: DateTime<Utc>) -> AppResult<Reservation>;

    async fn create_subscription(&self, subscription: NewSubscription) -> AppResult<Subscription>;
    async fn find_subscription(&self, id: Uuid) -> AppResult<Option<Subscription>>;
    async fn list_subscriptions(&self, client_id: Option<Uuid>) -> AppResult<Vec<Subscription>>;
    async fn decide_subscription(&self, id: Uuid, decision: BookingDecision) -> AppResult<Subscription>;
    async fn mark_subscription_seen(&self, id: Uuid, now: DateTime<Utc>) -> AppResult<Subscription>;

    async fn create_quick_request(&self, request: NewQuickRequest) -> AppResult<QuickRequest>;
    async fn find_quick_request(&self, id: Uuid) -> AppResult<Option<QuickRequest>>;
    async fn list_quick_requests(&self) -> AppResult<Vec<QuickRequest>>;
    async fn set_quick_request_status(
        &self,
        id: Uuid,
        status: QuickRequestStatus,
    ) -> AppResult<QuickRequest>;
    async fn delete_quick_request(&self, id: Uuid) -> AppResult<()>;
}

/// Preguntas públicas
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Falla con DuplicatePending si el email ya tiene una pregunta pendiente
    async fn create_question(&self, question: NewQuestion) -> AppResult<Question>;
    async fn find_question(&self, id: Uuid) -> AppResult<Option<Question>>;
    /// Todas, más recientes primero
    async fn list_questions(&self) -> AppResult<Vec<Question>>;
    async fn list_answered(&self) -> AppResult<Vec<Question>>;
    /// Guarda la respuesta solo si la pregunta sigue pendiente
    async fn save_answer(&self, answered: &Question) -> AppResult<Question>;
}

/// Lecturas agregadas para el bilan
#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn ledger_totals(&self) -> AppResult<LedgerTotals>;
    async fn repair_total(&self) -> AppResult<Decimal>;
    async fn vehicle_counts(&self) -> AppResult<Vec<(VehicleStatus, i64)>>;
}

/// Conjunto de repositorios compartido por los controllers
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub fleet: Arc<dyn FleetRepository>,
    pub ledger: Arc<dyn LedgerRepository>,
    pub repairs: Arc<dyn RepairRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub questions: Arc<dyn QuestionRepository>,
    pub reports: Arc<dyn ReportRepository>,
}

impl Repositories {
    /// Repositorios respaldados por PostgreSQL
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(user_repository::UserRepositoryPg::new(pool.clone())),
            fleet: Arc::new(vehicle_repository::FleetRepositoryPg::new(pool.clone())),
            ledger: Arc::new(ledger_repository::LedgerRepositoryPg::new(pool.clone())),
            repairs: Arc::new(repair_repository::RepairRepositoryPg::new(pool.clone())),
            bookings: Arc::new(booking_repository::BookingRepositoryPg::new(pool.clone())),
            questions: Arc::new(question_repository::QuestionRepositoryPg::new(pool.clone())),
            reports: Arc::new(report_repository::ReportRepositoryPg::new(pool)),
        }
    }

    /// Repositorios en memoria sobre un único store compartido
    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(InMemoryStore::new()))
    }

    pub fn from_store(store: Arc<InMemoryStore>) -> Self {
        Self {
            users: store.clone(),
            fleet: store.clone(),
            ledger: store.clone(),
            repairs: store.clone(),
            bookings: store.clone(),
            questions: store.clone(),
            reports: store,
        }
    }
}
