//! Controller del libro diario: recettes y absences

use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::ledger_dto::{AbsenceRequest, EditEntryRequest, LedgerEntryView, UpsertEntryRequest};
use crate::dto::ApiResponse;
use crate::models::auth::Actor;
use crate::models::ledger::Absence;
use crate::repositories::Repositories;
use crate::services::authorization_service::{authorize, Action};
use crate::services::ledger_service;
use crate::state::AppState;
use crate::utils::errors::{forbidden_error, not_found_error, validation_error, AppResult};

pub struct LedgerController {
    repos: Repositories,
}

impl LedgerController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repos: state.repos.clone(),
        }
    }

    /// Recette del día: un conductor escribe la suya, el admin nombra al conductor
    pub async fn upsert(
        &self,
        actor: &Actor,
        request: UpsertEntryRequest,
        today: NaiveDate,
    ) -> AppResult<ApiResponse<LedgerEntryView>> {
        authorize(Some(actor), Action::WriteLedger)?;
        request.validate()?;

        let driver_id = match actor {
            Actor::Driver { driver_id, .. } => match request.driver_id {
                Some(other) if other != *driver_id => {
                    return Err(forbidden_error("write another driver's ledger"))
                }
                _ => *driver_id,
            },
            _ => request
                .driver_id
                .ok_or_else(|| validation_error("driver_id", "Conducteur requis"))?,
        };
        self.ensure_driver(driver_id).await?;

        let entry = ledger_service::prepare_daily_entry(
            driver_id,
            request.date.unwrap_or(today),
            request.revenue,
            request.expense,
        )?;
        let saved = self.repos.ledger.upsert_entry(entry).await?;
        info!(
            "💰 Recette {} ({}) enregistrée pour {}: {} / {}",
            saved.entry_date,
            saved.weekday.as_str(),
            driver_id,
            saved.revenue,
            saved.expense
        );

        Ok(ApiResponse::success_with_message(saved.into(), "Recette enregistrée"))
    }

    pub async fn edit(
        &self,
        actor: &Actor,
        id: Uuid,
        request: EditEntryRequest,
    ) -> AppResult<ApiResponse<LedgerEntryView>> {
        authorize(Some(actor), Action::AuditLedger)?;
        request.validate()?;
        ledger_service::validate_amounts(request.revenue, request.expense)?;

        let updated = self
            .repos
            .ledger
            .update_entry_amounts(id, request.revenue.round_dp(2), request.expense.round_dp(2))
            .await?;
        info!("✏️ Recette {} corrigée", id);

        Ok(ApiResponse::success_with_message(updated.into(), "Recette modifiée"))
    }

    pub async fn entries(&self, actor: &Actor, driver_id: Uuid) -> AppResult<ApiResponse<Vec<LedgerEntryView>>> {
        authorize(Some(actor), Action::AuditLedger)?;
        self.ensure_driver(driver_id).await?;

        let entries = self.repos.ledger.entries_for_driver(driver_id).await?;
        Ok(ApiResponse::success(entries.into_iter().map(Into::into).collect()))
    }

    pub async fn record_absence(
        &self,
        actor: &Actor,
        driver_id: Uuid,
        request: AbsenceRequest,
        today: NaiveDate,
    ) -> AppResult<ApiResponse<Absence>> {
        authorize(Some(actor), Action::RecordAbsence)?;
        request.validate()?;
        self.ensure_driver(driver_id).await?;

        let reason = request
            .reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        let absence = self
            .repos
            .ledger
            .record_absence(driver_id, request.date.unwrap_or(today), reason)
            .await?;
        info!("📅 Absence enregistrée pour {} le {}", driver_id, absence.absence_date);

        Ok(ApiResponse::success_with_message(absence, "Absence enregistrée"))
    }

    pub async fn absences(&self, actor: &Actor, driver_id: Uuid) -> AppResult<ApiResponse<Vec<Absence>>> {
        authorize(Some(actor), Action::AuditLedger)?;
        self.ensure_driver(driver_id).await?;
        Ok(ApiResponse::success(
            self.repos.ledger.absences_for_driver(driver_id).await?,
        ))
    }

    async fn ensure_driver(&self, driver_id: Uuid) -> AppResult<()> {
        self.repos
            .fleet
            .find_driver(driver_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| not_found_error("Driver", &driver_id.to_string()))
    }
}
