//! Almacenamiento en memoria
//!
//! Implementa todos los traits de repositorio sobre un único `RwLock`, de modo
//! que cada operación compuesta (asignación, baja, pregunta pendiente) se
//! ejecuta bajo el mismo lock de escritura. Reproduce los `ON DELETE` del
//! schema SQL.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::booking::{
    BookingDecision, BookingStatus, NewQuickRequest, NewReservation, NewSubscription, QuickRequest,
    QuickRequestStatus, Reservation, Subscription,
};
use crate::models::client::Client;
use crate::models::driver::{Driver, DriverProfile, DriverUpdate};
use crate::models::ledger::{Absence, LedgerEntry};
use crate::models::question::{NewQuestion, Question, QuestionStatus};
use crate::models::repair::{NewRepair, RepairEvent};
use crate::models::report::LedgerTotals;
use crate::models::user::{Account, NewAccount, User, UserRole};
use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::repositories::{
    BookingRepository, FleetRepository, LedgerRepository, QuestionRepository, RepairRepository,
    ReportRepository, UserRepository,
};
use crate::services::booking_service::{self, BookingState};
use crate::services::{fleet_service, ledger_service, ledger_service::DailyEntry};
use crate::utils::errors::{conflict_error, not_found_error, AppError, AppResult};

#[derive(Default)]
struct MemoryData {
    users: HashMap<Uuid, User>,
    drivers: HashMap<Uuid, Driver>,
    clients: HashMap<Uuid, Client>,
    vehicles: HashMap<Uuid, Vehicle>,
    ledger: HashMap<Uuid, LedgerEntry>,
    absences: Vec<Absence>,
    repairs: Vec<RepairEvent>,
    reservations: HashMap<Uuid, Reservation>,
    subscriptions: HashMap<Uuid, Subscription>,
    quick_requests: HashMap<Uuid, QuickRequest>,
    questions: HashMap<Uuid, Question>,
}

impl MemoryData {
    fn holder_of(&self, vehicle_id: Uuid) -> Option<Uuid> {
        self.drivers
            .values()
            .find(|driver| driver.vehicle_id == Some(vehicle_id))
            .map(|driver| driver.id)
    }

    fn set_status(&mut self, vehicle_id: Uuid, status: VehicleStatus) {
        if let Some(vehicle) = self.vehicles.get_mut(&vehicle_id) {
            vehicle.status = status;
        }
    }

    fn profile(&self, driver: &Driver) -> Option<DriverProfile> {
        let user = self.users.get(&driver.user_id)?;
        let vehicle = driver.vehicle_id.and_then(|id| self.vehicles.get(&id));
        Some(DriverProfile {
            id: driver.id,
            user_id: driver.user_id,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            address: driver.address.clone(),
            phone: driver.phone.clone(),
            vehicle_id: driver.vehicle_id,
            vehicle_name: vehicle.map(|v| v.name.clone()),
            vehicle_plate: vehicle.map(|v| v.plate.clone()),
        })
    }
}

/// Store en memoria compartido por todos los repositorios
#[derive(Default)]
pub struct InMemoryStore {
    data: RwLock<MemoryData>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first<T, F>(items: &mut [T], key: F)
where
    F: Fn(&T) -> DateTime<Utc>,
{
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create_account(&self, account: NewAccount) -> AppResult<Account> {
        let mut data = self.data.write().await;
        if data.users.values().any(|u| u.username == account.username) {
            return Err(conflict_error("User", "username", &account.username));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: account.username,
            email: account.email,
            password_hash: account.password_hash,
            first_name: account.first_name,
            last_name: account.last_name,
            role: account.role,
            created_at: now,
        };

        let profile_id = match account.role {
            UserRole::Admin => None,
            UserRole::Driver => {
                let driver = Driver {
                    id: Uuid::new_v4(),
                    user_id: user.id,
                    address: account.address.unwrap_or_default(),
                    phone: account.phone,
                    vehicle_id: None,
                    created_at: now,
                };
                let id = driver.id;
                data.drivers.insert(id, driver);
                Some(id)
            }
            UserRole::Client => {
                let client = Client {
                    id: Uuid::new_v4(),
                    user_id: user.id,
                    phone: account.phone,
                    address: account.address,
                    created_at: now,
                };
                let id = client.id;
                data.clients.insert(id, client);
                Some(id)
            }
        };

        data.users.insert(user.id, user.clone());
        Ok(Account { user, profile_id })
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let data = self.data.read().await;
        Ok(data.users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.data.read().await.users.get(&id).cloned())
    }

    async fn username_exists(&self, username: &str) -> AppResult<bool> {
        let data = self.data.read().await;
        Ok(data.users.values().any(|u| u.username == username))
    }

    async fn profile_id(&self, user: &User) -> AppResult<Option<Uuid>> {
        let data = self.data.read().await;
        let id = match user.role {
            UserRole::Admin => None,
            UserRole::Driver => data.drivers.values().find(|d| d.user_id == user.id).map(|d| d.id),
            UserRole::Client => data.clients.values().find(|c| c.user_id == user.id).map(|c| c.id),
        };
        Ok(id)
    }
}

#[async_trait]
impl FleetRepository for InMemoryStore {
    async fn create_vehicle(&self, name: &str, plate: &str) -> AppResult<Vehicle> {
        let mut data = self.data.write().await;
        if data.vehicles.values().any(|v| v.plate == plate) {
            return Err(conflict_error("Vehicle", "plate", plate));
        }
        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            name: name.to_string(),
            plate: plate.to_string(),
            status: VehicleStatus::Available,
            created_at: Utc::now(),
        };
        data.vehicles.insert(vehicle.id, vehicle.clone());
        Ok(vehicle)
    }

    async fn plate_exists(&self, plate: &str) -> AppResult<bool> {
        let data = self.data.read().await;
        Ok(data.vehicles.values().any(|v| v.plate == plate))
    }

    async fn count_vehicles(&self) -> AppResult<i64> {
        Ok(self.data.read().await.vehicles.len() as i64)
    }

    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        let data = self.data.read().await;
        let mut vehicles: Vec<Vehicle> = data.vehicles.values().cloned().collect();
        vehicles.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.plate.cmp(&b.plate)));
        Ok(vehicles)
    }

    async fn find_vehicle(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        Ok(self.data.read().await.vehicles.get(&id).cloned())
    }

    async fn vehicle_holder(&self, vehicle_id: Uuid) -> AppResult<Option<Uuid>> {
        Ok(self.data.read().await.holder_of(vehicle_id))
    }

    async fn set_vehicle_status(&self, id: Uuid, status: VehicleStatus) -> AppResult<Vehicle> {
        let mut data = self.data.write().await;
        let vehicle = data
            .vehicles
            .get_mut(&id)
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;
        vehicle.status = status;
        Ok(vehicle.clone())
    }

    async fn remove_vehicle(&self, id: Uuid) -> AppResult<()> {
        let mut data = self.data.write().await;
        if !data.vehicles.contains_key(&id) {
            return Err(not_found_error("Vehicle", &id.to_string()));
        }
        for driver in data.drivers.values_mut() {
            if driver.vehicle_id == Some(id) {
                driver.vehicle_id = None;
            }
        }
        data.set_status(id, VehicleStatus::Available);
        data.vehicles.remove(&id);
        data.repairs.retain(|r| r.vehicle_id != id);
        Ok(())
    }

    async fn assign_vehicle(&self, vehicle_id: Uuid, driver_id: Uuid) -> AppResult<Vehicle> {
        let mut data = self.data.write().await;
        let vehicle = data
            .vehicles
            .get(&vehicle_id)
            .cloned()
            .ok_or_else(|| not_found_error("Vehicle", &vehicle_id.to_string()))?;
        let previous = data
            .drivers
            .get(&driver_id)
            .ok_or_else(|| not_found_error("Driver", &driver_id.to_string()))?
            .vehicle_id;

        fleet_service::ensure_assignable(&vehicle, data.holder_of(vehicle_id), driver_id)?;

        if let Some(previous) = previous.filter(|id| *id != vehicle_id) {
            data.set_status(previous, VehicleStatus::Available);
        }
        if let Some(driver) = data.drivers.get_mut(&driver_id) {
            driver.vehicle_id = Some(vehicle_id);
        }
        data.set_status(vehicle_id, VehicleStatus::Assigned);

        data.vehicles
            .get(&vehicle_id)
            .cloned()
            .ok_or_else(|| AppError::Internal("vehicle vanished during assignment".to_string()))
    }

    async fn count_drivers(&self) -> AppResult<i64> {
        Ok(self.data.read().await.drivers.len() as i64)
    }

    async fn list_drivers(&self) -> AppResult<Vec<DriverProfile>> {
        let data = self.data.read().await;
        let mut drivers: Vec<DriverProfile> =
            data.drivers.values().filter_map(|d| data.profile(d)).collect();
        drivers.sort_by(|a, b| {
            (&a.last_name, &a.first_name, &a.username).cmp(&(&b.last_name, &b.first_name, &b.username))
        });
        Ok(drivers)
    }

    async fn find_driver(&self, id: Uuid) -> AppResult<Option<DriverProfile>> {
        let data = self.data.read().await;
        Ok(data.drivers.get(&id).and_then(|d| data.profile(d)))
    }

    async fn update_driver(&self, id: Uuid, update: DriverUpdate) -> AppResult<DriverProfile> {
        let mut data = self.data.write().await;
        let user_id = data
            .drivers
            .get(&id)
            .ok_or_else(|| not_found_error("Driver", &id.to_string()))?
            .user_id;

        if let Some(username) = &update.username {
            if data.users.values().any(|u| u.id != user_id && &u.username == username) {
                return Err(conflict_error("User", "username", username));
            }
        }

        if let Some(user) = data.users.get_mut(&user_id) {
            if let Some(username) = update.username {
                user.username = username;
            }
            if let Some(email) = update.email {
                user.email = Some(email);
            }
        }
        if let Some(driver) = data.drivers.get_mut(&id) {
            if let Some(phone) = update.phone {
                driver.phone = phone;
            }
            if let Some(address) = update.address {
                driver.address = address;
            }
        }

        data.drivers
            .get(&id)
            .and_then(|d| data.profile(d))
            .ok_or_else(|| not_found_error("Driver", &id.to_string()))
    }

    async fn delete_driver(&self, id: Uuid) -> AppResult<()> {
        let mut data = self.data.write().await;
        let driver = data
            .drivers
            .remove(&id)
            .ok_or_else(|| not_found_error("Driver", &id.to_string()))?;

        if let Some(vehicle_id) = driver.vehicle_id {
            data.set_status(vehicle_id, VehicleStatus::Available);
        }
        data.users.remove(&driver.user_id);
        data.ledger.retain(|_, entry| entry.driver_id != id);
        data.absences.retain(|absence| absence.driver_id != id);
        for request in data.quick_requests.values_mut() {
            if request.user_id == Some(driver.user_id) {
                request.user_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl LedgerRepository for InMemoryStore {
    async fn upsert_entry(&self, entry: DailyEntry) -> AppResult<LedgerEntry> {
        let mut data = self.data.write().await;
        if !data.drivers.contains_key(&entry.driver_id) {
            return Err(not_found_error("Driver", &entry.driver_id.to_string()));
        }

        let now = Utc::now();
        let existing = data
            .ledger
            .values_mut()
            .find(|e| e.driver_id == entry.driver_id && e.entry_date == entry.date);

        if let Some(existing) = existing {
            existing.weekday = entry.weekday;
            existing.revenue = entry.revenue;
            existing.expense = entry.expense;
            existing.updated_at = now;
            return Ok(existing.clone());
        }

        let created = LedgerEntry {
            id: Uuid::new_v4(),
            driver_id: entry.driver_id,
            entry_date: entry.date,
            weekday: entry.weekday,
            revenue: entry.revenue,
            expense: entry.expense,
            updated_at: now,
        };
        data.ledger.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_entry(&self, id: Uuid) -> AppResult<Option<LedgerEntry>> {
        Ok(self.data.read().await.ledger.get(&id).cloned())
    }

    async fn update_entry_amounts(
        &self,
        id: Uuid,
        revenue: Decimal,
        expense: Decimal,
    ) -> AppResult<LedgerEntry> {
        let mut data = self.data.write().await;
        let entry = data
            .ledger
            .get_mut(&id)
            .ok_or_else(|| not_found_error("LedgerEntry", &id.to_string()))?;
        entry.revenue = revenue;
        entry.expense = expense;
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    async fn entries_for_driver(&self, driver_id: Uuid) -> AppResult<Vec<LedgerEntry>> {
        let data = self.data.read().await;
        let mut entries: Vec<LedgerEntry> = data
            .ledger
            .values()
            .filter(|e| e.driver_id == driver_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.entry_date.cmp(&a.entry_date));
        Ok(entries)
    }

    async fn entry_for_day(&self, driver_id: Uuid, date: NaiveDate) -> AppResult<Option<LedgerEntry>> {
        let data = self.data.read().await;
        Ok(data
            .ledger
            .values()
            .find(|e| e.driver_id == driver_id && e.entry_date == date)
            .cloned())
    }

    async fn driver_totals(&self, driver_id: Uuid) -> AppResult<LedgerTotals> {
        let entries = self.entries_for_driver(driver_id).await?;
        Ok(ledger_service::totals(&entries))
    }

    async fn record_absence(
        &self,
        driver_id: Uuid,
        date: NaiveDate,
        reason: Option<String>,
    ) -> AppResult<Absence> {
        let mut data = self.data.write().await;
        if !data.drivers.contains_key(&driver_id) {
            return Err(not_found_error("Driver", &driver_id.to_string()));
        }
        let absence = Absence {
            id: Uuid::new_v4(),
            driver_id,
            absence_date: date,
            reason,
            created_at: Utc::now(),
        };
        data.absences.push(absence.clone());
        Ok(absence)
    }

    async fn absences_for_driver(&self, driver_id: Uuid) -> AppResult<Vec<Absence>> {
        let data = self.data.read().await;
        let mut absences: Vec<Absence> = data
            .absences
            .iter()
            .filter(|a| a.driver_id == driver_id)
            .cloned()
            .collect();
        absences.sort_by(|a, b| {
            b.absence_date
                .cmp(&a.absence_date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(absences)
    }
}

#[async_trait]
impl RepairRepository for InMemoryStore {
    async fn record_repair(&self, repair: NewRepair) -> AppResult<RepairEvent> {
        let mut data = self.data.write().await;
        if !data.vehicles.contains_key(&repair.vehicle_id) {
            return Err(not_found_error("Vehicle", &repair.vehicle_id.to_string()));
        }
        let event = RepairEvent {
            id: Uuid::new_v4(),
            vehicle_id: repair.vehicle_id,
            repair_date: repair.repair_date,
            description: repair.description,
            cost: repair.cost,
            invoice_ref: repair.invoice_ref,
            admin_id: Some(repair.admin_id),
            created_at: Utc::now(),
        };
        data.repairs.push(event.clone());
        Ok(event)
    }

    async fn list_repairs(&self) -> AppResult<Vec<RepairEvent>> {
        let data = self.data.read().await;
        let mut repairs = data.repairs.clone();
        repairs.sort_by(|a, b| {
            b.repair_date
                .cmp(&a.repair_date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(repairs)
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn create_reservation(&self, reservation: NewReservation) -> AppResult<Reservation> {
        let mut data = self.data.write().await;
        let created = Reservation {
            id: Uuid::new_v4(),
            client_id: reservation.client_id,
            ride_date: reservation.ride_date,
            ride_time: reservation.ride_time,
            pickup: reservation.pickup,
            dropoff: reservation.dropoff,
            notes: reservation.notes,
            status: BookingStatus::Pending,
            seen_at: None,
            created_at: Utc::now(),
        };
        data.reservations.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_reservation(&self, id: Uuid) -> AppResult<Option<Reservation>> {
        Ok(self.data.read().await.reservations.get(&id).cloned())
    }

    async fn list_reservations(&self, client_id: Option<Uuid>) -> AppResult<Vec<Reservation>> {
        let data = self.data.read().await;
        let mut reservations: Vec<Reservation> = data
            .reservations
            .values()
            .filter(|r| client_id.map_or(true, |id| r.client_id == id))
            .cloned()
            .collect();
        newest_first(&mut reservations, |r| r.created_at);
        Ok(reservations)
    }

    async fn decide_reservation(&self, id: Uuid, decision: BookingDecision) -> AppResult<Reservation> {
        let mut data = self.data.write().await;
        let reservation = data
            .reservations
            .get_mut(&id)
            .ok_or_else(|| not_found_error("Reservation", &id.to_string()))?;
        let next = booking_service::decide(
            BookingState {
                status: reservation.status,
                seen_at: reservation.seen_at,
            },
            decision,
        );
        reservation.status = next.status;
        reservation.seen_at = next.seen_at;
        Ok(reservation.clone())
    }

    async fn mark_reservation_seen(&self, id: Uuid, now: DateTime<Utc>) -> AppResult<Reservation> {
        let mut data = self.data.write().await;
        let reservation = data
            .reservations
            .get_mut(&id)
            .ok_or_else(|| not_found_error("Reservation", &id.to_string()))?;
        let next = booking_service::mark_seen(
            BookingState {
                status: reservation.status,
                seen_at: reservation.seen_at,
            },
            now,
        );
        reservation.status = next.status;
        reservation.seen_at = next.seen_at;
        Ok(reservation.clone())
    }

    async fn create_subscription(&self, subscription: NewSubscription) -> AppResult<Subscription> {
        let mut data = self.data.write().await;
        let created = Subscription {
            id: Uuid::new_v4(),
            client_id: subscription.client_id,
            weekdays: subscription.weekdays,
            pickup_time: subscription.pickup_time,
            pickup: subscription.pickup,
            dropoff: subscription.dropoff,
            status: BookingStatus::Pending,
            seen_at: None,
            created_at: Utc::now(),
        };
        data.subscriptions.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_subscription(&self, id: Uuid) -> AppResult<Option<Subscription>> {
        Ok(self.data.read().await.subscriptions.get(&id).cloned())
    }

    async fn list_subscriptions(&self, client_id: Option<Uuid>) -> AppResult<Vec<Subscription>> {
        let data = self.data.read().await;
        let mut subscriptions: Vec<Subscription> = data
            .subscriptions
            .values()
            .filter(|s| client_id.map_or(true, |id| s.client_id == id))
            .cloned()
            .collect();
        newest_first(&mut subscriptions, |s| s.created_at);
        Ok(subscriptions)
    }

    async fn decide_subscription(&self, id: Uuid, decision: BookingDecision) -> AppResult<Subscription> {
        let mut data = self.data.write().await;
        let subscription = data
            .subscriptions
            .get_mut(&id)
            .ok_or_else(|| not_found_error("Subscription", &id.to_string()))?;
        let next = booking_service::decide(
            BookingState {
                status: subscription.status,
                seen_at: subscription.seen_at,
            },
            decision,
        );
        subscription.status = next.status;
        subscription.seen_at = next.seen_at;
        Ok(subscription.clone())
    }

    async fn mark_subscription_seen(&self, id: Uuid, now: DateTime<Utc>) -> AppResult<Subscription> {
        let mut data = self.data.write().await;
        let subscription = data
            .subscriptions
            .get_mut(&id)
            .ok_or_else(|| not_found_error("Subscription", &id.to_string()))?;
        let next = booking_service::mark_seen(
            BookingState {
                status: subscription.status,
                seen_at: subscription.seen_at,
            },
            now,
        );
        subscription.status = next.status;
        subscription.seen_at = next.seen_at;
        Ok(subscription.clone())
    }

    async fn create_quick_request(&self, request: NewQuickRequest) -> AppResult<QuickRequest> {
        let mut data = self.data.write().await;
        let created = QuickRequest {
            id: Uuid::new_v4(),
            user_id: request.user_id,
            full_name: request.full_name,
            phone: request.phone,
            email: request.email,
            pickup: request.pickup,
            dropoff: request.dropoff,
            ride_date: request.ride_date,
            ride_time: request.ride_time,
            message: request.message,
            status: QuickRequestStatus::Pending,
            created_at: Utc::now(),
        };
        data.quick_requests.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_quick_request(&self, id: Uuid) -> AppResult<Option<QuickRequest>> {
        Ok(self.data.read().await.quick_requests.get(&id).cloned())
    }

    async fn list_quick_requests(&self) -> AppResult<Vec<QuickRequest>> {
        let data = self.data.read().await;
        let mut requests: Vec<QuickRequest> = data.quick_requests.values().cloned().collect();
        newest_first(&mut requests, |r| r.created_at);
        Ok(requests)
    }

    async fn set_quick_request_status(
        &self,
        id: Uuid,
        status: QuickRequestStatus,
    ) -> AppResult<QuickRequest> {
        let mut data = self.data.write().await;
        let request = data
            .quick_requests
            .get_mut(&id)
            .ok_or_else(|| not_found_error("QuickRequest", &id.to_string()))?;
        request.status = status;
        Ok(request.clone())
    }

    async fn delete_quick_request(&self, id: Uuid) -> AppResult<()> {
        let mut data = self.data.write().await;
        data.quick_requests
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found_error("QuickRequest", &id.to_string()))
    }
}

#[async_trait]
impl QuestionRepository for InMemoryStore {
    async fn create_question(&self, question: NewQuestion) -> AppResult<Question> {
        let mut data = self.data.write().await;
        let has_pending = data
            .questions
            .values()
            .any(|q| q.email == question.email && q.status == QuestionStatus::Pending);
        if has_pending {
            return Err(AppError::DuplicatePending(format!(
                "Une question est déjà en attente pour {}",
                question.email
            )));
        }

        let created = Question {
            id: Uuid::new_v4(),
            name: question.name,
            email: question.email,
            subject: question.subject,
            message: question.message,
            reply: None,
            status: QuestionStatus::Pending,
            created_at: Utc::now(),
            answered_at: None,
        };
        data.questions.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_question(&self, id: Uuid) -> AppResult<Option<Question>> {
        Ok(self.data.read().await.questions.get(&id).cloned())
    }

    async fn list_questions(&self) -> AppResult<Vec<Question>> {
        let data = self.data.read().await;
        let mut questions: Vec<Question> = data.questions.values().cloned().collect();
        newest_first(&mut questions, |q| q.created_at);
        Ok(questions)
    }

    async fn list_answered(&self) -> AppResult<Vec<Question>> {
        let mut questions = self.list_questions().await?;
        questions.retain(|q| q.status == QuestionStatus::Answered);
        Ok(questions)
    }

    async fn save_answer(&self, answered: &Question) -> AppResult<Question> {
        let mut data = self.data.write().await;
        let stored = data
            .questions
            .get_mut(&answered.id)
            .ok_or_else(|| not_found_error("Question", &answered.id.to_string()))?;
        if stored.status != QuestionStatus::Pending {
            return Err(AppError::Conflict(format!(
                "La question {} a déjà reçu une réponse",
                answered.id
            )));
        }
        stored.reply = answered.reply.clone();
        stored.status = QuestionStatus::Answered;
        stored.answered_at = answered.answered_at;
        Ok(stored.clone())
    }
}

#[async_trait]
impl ReportRepository for InMemoryStore {
    async fn ledger_totals(&self) -> AppResult<LedgerTotals> {
        let data = self.data.read().await;
        let entries: Vec<LedgerEntry> = data.ledger.values().cloned().collect();
        Ok(ledger_service::totals(&entries))
    }

    async fn repair_total(&self) -> AppResult<Decimal> {
        let data = self.data.read().await;
        Ok(data.repairs.iter().map(|r| r.cost).sum())
    }

    async fn vehicle_counts(&self) -> AppResult<Vec<(VehicleStatus, i64)>> {
        let data = self.data.read().await;
        let mut counts: HashMap<VehicleStatus, i64> = HashMap::new();
        for vehicle in data.vehicles.values() {
            *counts.entry(vehicle.status).or_insert(0) += 1;
        }
        Ok(counts.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver_account(username: &str) -> NewAccount {
        NewAccount {
            username: username.to_string(),
            email: None,
            password_hash: "hash".to_string(),
            first_name: "Kossi".to_string(),
            last_name: "Mensah".to_string(),
            phone: "+22890000000".to_string(),
            address: Some("Lomé".to_string()),
            role: UserRole::Driver,
        }
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let store = InMemoryStore::new();
        store.create_account(driver_account("kossi")).await.unwrap();
        let result = store.create_account(driver_account("kossi")).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_reassign_releases_previous_vehicle() {
        let store = InMemoryStore::new();
        let driver = store.create_account(driver_account("kossi")).await.unwrap();
        let driver_id = driver.profile_id.unwrap();
        let first = store.create_vehicle("Haojue", "TG-0001-AA").await.unwrap();
        let second = store.create_vehicle("Sanya", "TG-0002-AA").await.unwrap();

        store.assign_vehicle(first.id, driver_id).await.unwrap();
        store.assign_vehicle(second.id, driver_id).await.unwrap();

        let first = store.find_vehicle(first.id).await.unwrap().unwrap();
        assert_eq!(first.status, VehicleStatus::Available);
        assert_eq!(store.vehicle_holder(first.id).await.unwrap(), None);
        assert_eq!(store.vehicle_holder(second.id).await.unwrap(), Some(driver_id));
    }

    #[tokio::test]
    async fn test_delete_driver_releases_vehicle() {
        let store = InMemoryStore::new();
        let driver = store.create_account(driver_account("kossi")).await.unwrap();
        let driver_id = driver.profile_id.unwrap();
        let vehicle = store.create_vehicle("Haojue", "TG-0001-AA").await.unwrap();
        store.assign_vehicle(vehicle.id, driver_id).await.unwrap();

        store.delete_driver(driver_id).await.unwrap();

        let vehicle = store.find_vehicle(vehicle.id).await.unwrap().unwrap();
        assert_eq!(vehicle.status, VehicleStatus::Available);
        assert!(store.find_by_id(driver.user.id).await.unwrap().is_none());
    }
}
