//! Repository de pannes en PostgreSQL

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::repair::{NewRepair, RepairEvent};
use crate::repositories::RepairRepository;
use crate::utils::errors::AppResult;

pub struct RepairRepositoryPg {
    pool: PgPool,
}

impl RepairRepositoryPg {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RepairRepository for RepairRepositoryPg {
    async fn record_repair(&self, repair: NewRepair) -> AppResult<RepairEvent> {
        let event = sqlx::query_as::<_, RepairEvent>(
            r#"
            INSERT INTO repairs (id, vehicle_id, repair_date, description, cost, invoice_ref, admin_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(repair.vehicle_id)
        .bind(repair.repair_date)
        .bind(&repair.description)
        .bind(repair.cost)
        .bind(&repair.invoice_ref)
        .bind(repair.admin_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(event)
    }

    async fn list_repairs(&self) -> AppResult<Vec<RepairEvent>> {
        let repairs = sqlx::query_as::<_, RepairEvent>(
            "SELECT * FROM repairs ORDER BY repair_date DESC, created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(repairs)
    }
}
