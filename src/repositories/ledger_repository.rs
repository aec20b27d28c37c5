//! Repository de recettes y absences en PostgreSQL

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::ledger::{Absence, LedgerEntry};
use crate::models::report::LedgerTotals;
use crate::repositories::LedgerRepository;
use crate::services::ledger_service::DailyEntry;
use crate::utils::errors::{not_found_error, AppResult};

pub struct LedgerRepositoryPg {
    pool: PgPool,
}

impl LedgerRepositoryPg {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerRepository for LedgerRepositoryPg {
    async fn upsert_entry(&self, entry: DailyEntry) -> AppResult<LedgerEntry> {
        let saved = sqlx::query_as::<_, LedgerEntry>(
            r#"
            INSERT INTO ledger_entries (id, driver_id, entry_date, weekday, revenue, expense, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (driver_id, entry_date) DO UPDATE
            SET weekday = EXCLUDED.weekday,
                revenue = EXCLUDED.revenue,
                expense = EXCLUDED.expense,
                updated_at = EXCLUDED.updated_at
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(entry.driver_id)
        .bind(entry.date)
        .bind(entry.weekday)
        .bind(entry.revenue)
        .bind(entry.expense)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    async fn find_entry(&self, id: Uuid) -> AppResult<Option<LedgerEntry>> {
        let entry = sqlx::query_as::<_, LedgerEntry>("SELECT * FROM ledger_entries WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(entry)
    }

    async fn update_entry_amounts(
        &self,
        id: Uuid,
        revenue: Decimal,
        expense: Decimal,
    ) -> AppResult<LedgerEntry> {
        sqlx::query_as::<_, LedgerEntry>(
            r#"
            UPDATE ledger_entries
            SET revenue = $2, expense = $3, updated_at = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(revenue)
        .bind(expense)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found_error("LedgerEntry", &id.to_string()))
    }

    async fn entries_for_driver(&self, driver_id: Uuid) -> AppResult<Vec<LedgerEntry>> {
        let entries = sqlx::query_as::<_, LedgerEntry>(
            "SELECT * FROM ledger_entries WHERE driver_id = $1 ORDER BY entry_date DESC",
        )
        .bind(driver_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    async fn entry_for_day(&self, driver_id: Uuid, date: NaiveDate) -> AppResult<Option<LedgerEntry>> {
        let entry = sqlx::query_as::<_, LedgerEntry>(
            "SELECT * FROM ledger_entries WHERE driver_id = $1 AND entry_date = $2",
        )
        .bind(driver_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(entry)
    }

    async fn driver_totals(&self, driver_id: Uuid) -> AppResult<LedgerTotals> {
        let (revenue, expense): (Decimal, Decimal) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(revenue), 0), COALESCE(SUM(expense), 0)
            FROM ledger_entries
            WHERE driver_id = $1
            "#,
        )
        .bind(driver_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(LedgerTotals { revenue, expense })
    }

    async fn record_absence(
        &self,
        driver_id: Uuid,
        date: NaiveDate,
        reason: Option<String>,
    ) -> AppResult<Absence> {
        let absence = sqlx::query_as::<_, Absence>(
            r#"
            INSERT INTO absences (id, driver_id, absence_date, reason, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(driver_id)
        .bind(date)
        .bind(reason)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(absence)
    }

    async fn absences_for_driver(&self, driver_id: Uuid) -> AppResult<Vec<Absence>> {
        let absences = sqlx::query_as::<_, Absence>(
            "SELECT * FROM absences WHERE driver_id = $1 ORDER BY absence_date DESC, created_at DESC",
        )
        .bind(driver_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(absences)
    }
}
