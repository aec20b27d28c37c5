//! Repository de reservations, abonnements y réservations rapides en PostgreSQL

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::booking::{
    BookingDecision, BookingStatus, NewQuickRequest, NewReservation, NewSubscription, QuickRequest,
    QuickRequestStatus, Reservation, Subscription,
};
use crate::repositories::BookingRepository;
use crate::utils::errors::{not_found_error, AppResult};

/// `seen` solo reemplaza a `pending`; la decisión se lee y escribe en el mismo UPDATE
const MARK_SEEN_SET: &str = "status = CASE WHEN status = 'pending' THEN 'seen'::booking_status ELSE status END, \
     seen_at = COALESCE(seen_at, $2)";

pub struct BookingRepositoryPg {
    pool: PgPool,
}

impl BookingRepositoryPg {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for BookingRepositoryPg {
    async fn create_reservation(&self, reservation: NewReservation) -> AppResult<Reservation> {
        let created = sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservations (id, client_id, ride_date, ride_time, pickup, dropoff, notes, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(reservation.client_id)
        .bind(reservation.ride_date)
        .bind(reservation.ride_time)
        .bind(&reservation.pickup)
        .bind(&reservation.dropoff)
        .bind(&reservation.notes)
        .bind(BookingStatus::Pending)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn find_reservation(&self, id: Uuid) -> AppResult<Option<Reservation>> {
        let reservation = sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(reservation)
    }

    async fn list_reservations(&self, client_id: Option<Uuid>) -> AppResult<Vec<Reservation>> {
        let reservations = sqlx::query_as::<_, Reservation>(
            r#"
            SELECT * FROM reservations
            WHERE ($1::uuid IS NULL OR client_id = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(reservations)
    }

    async fn decide_reservation(&self, id: Uuid, decision: BookingDecision) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>(
            "UPDATE reservations SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(BookingStatus::from(decision))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found_error("Reservation", &id.to_string()))
    }

    async fn mark_reservation_seen(&self, id: Uuid, now: DateTime<Utc>) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>(&format!(
            "UPDATE reservations SET {} WHERE id = $1 RETURNING *",
            MARK_SEEN_SET
        ))
        .bind(id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found_error("Reservation", &id.to_string()))
    }

    async fn create_subscription(&self, subscription: NewSubscription) -> AppResult<Subscription> {
        let created = sqlx::query_as::<_, Subscription>(
            r#"
            INSERT INTO subscriptions (id, client_id, weekdays, pickup_time, pickup, dropoff, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(subscription.client_id)
        .bind(&subscription.weekdays)
        .bind(subscription.pickup_time)
        .bind(&subscription.pickup)
        .bind(&subscription.dropoff)
        .bind(BookingStatus::Pending)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn find_subscription(&self, id: Uuid) -> AppResult<Option<Subscription>> {
        let subscription = sqlx::query_as::<_, Subscription>("SELECT * FROM subscriptions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(subscription)
    }

    async fn list_subscriptions(&self, client_id: Option<Uuid>) -> AppResult<Vec<Subscription>> {
        let subscriptions = sqlx::query_as::<_, Subscription>(
            r#"
            SELECT * FROM subscriptions
            WHERE ($1::uuid IS NULL OR client_id = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(subscriptions)
    }

    async fn decide_subscription(&self, id: Uuid, decision: BookingDecision) -> AppResult<Subscription> {
        sqlx::query_as::<_, Subscription>(
            "UPDATE subscriptions SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(BookingStatus::from(decision))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found_error("Subscription", &id.to_string()))
    }

    async fn mark_subscription_seen(&self, id: Uuid, now: DateTime<Utc>) -> AppResult<Subscription> {
        sqlx::query_as::<_, Subscription>(&format!(
            "UPDATE subscriptions SET {} WHERE id = $1 RETURNING *",
            MARK_SEEN_SET
        ))
        .bind(id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found_error("Subscription", &id.to_string()))
    }

    async fn create_quick_request(&self, request: NewQuickRequest) -> AppResult<QuickRequest> {
        let created = sqlx::query_as::<_, QuickRequest>(
            r#"
            INSERT INTO quick_requests
                (id, user_id, full_name, phone, email, pickup, dropoff, ride_date, ride_time, message, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.user_id)
        .bind(&request.full_name)
        .bind(&request.phone)
        .bind(&request.email)
        .bind(&request.pickup)
        .bind(&request.dropoff)
        .bind(request.ride_date)
        .bind(request.ride_time)
        .bind(&request.message)
        .bind(QuickRequestStatus::Pending)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn find_quick_request(&self, id: Uuid) -> AppResult<Option<QuickRequest>> {
        let request = sqlx::query_as::<_, QuickRequest>("SELECT * FROM quick_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(request)
    }

    async fn list_quick_requests(&self) -> AppResult<Vec<QuickRequest>> {
        let requests = sqlx::query_as::<_, QuickRequest>(
            "SELECT * FROM quick_requests ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(requests)
    }

    async fn set_quick_request_status(
        &self,
        id: Uuid,
        status: QuickRequestStatus,
    ) -> AppResult<QuickRequest> {
        sqlx::query_as::<_, QuickRequest>(
            "UPDATE quick_requests SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found_error("QuickRequest", &id.to_string()))
    }

    async fn delete_quick_request(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM quick_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found_error("QuickRequest", &id.to_string()));
        }
        Ok(())
    }
}
