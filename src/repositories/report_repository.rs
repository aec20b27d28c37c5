//! Lecturas agregadas para reporting (PostgreSQL)

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::report::LedgerTotals;
use crate::models::vehicle::VehicleStatus;
use crate::repositories::ReportRepository;
use crate::utils::errors::AppResult;

pub struct ReportRepositoryPg {
    pool: PgPool,
}

impl ReportRepositoryPg {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for ReportRepositoryPg {
    async fn ledger_totals(&self) -> AppResult<LedgerTotals> {
        let (revenue, expense): (Decimal, Decimal) = sqlx::query_as(
            "SELECT COALESCE(SUM(revenue), 0), COALESCE(SUM(expense), 0) FROM ledger_entries",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(LedgerTotals { revenue, expense })
    }

    async fn repair_total(&self) -> AppResult<Decimal> {
        let (total,): (Decimal,) = sqlx::query_as("SELECT COALESCE(SUM(cost), 0) FROM repairs")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn vehicle_counts(&self) -> AppResult<Vec<(VehicleStatus, i64)>> {
        let rows: Vec<(VehicleStatus, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM vehicles GROUP BY status")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }
}
