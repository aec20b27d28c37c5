//! Controller de reporting y dashboards (solo lectura)

use chrono::NaiveDate;
use tracing::debug;

use crate::dto::ApiResponse;
use crate::models::auth::Actor;
use crate::models::report::{AdminDashboardRow, BalanceReport, DriverDashboard};
use crate::repositories::Repositories;
use crate::services::authorization_service::{authorize, Action};
use crate::services::reporting_service;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub struct ReportController {
    repos: Repositories,
}

impl ReportController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repos: state.repos.clone(),
        }
    }

    /// Bilan général: recalculado en cada llamada
    pub async fn balance(&self, actor: &Actor) -> AppResult<ApiResponse<BalanceReport>> {
        authorize(Some(actor), Action::ViewReports)?;

        let ledger = self.repos.reports.ledger_totals().await?;
        let repairs = self.repos.reports.repair_total().await?;
        let counts = self.repos.reports.vehicle_counts().await?;
        let drivers = self.repos.fleet.count_drivers().await?;

        let report = BalanceReport {
            balance: reporting_service::global_balance(ledger, repairs),
            fleet: reporting_service::fleet_counts(&counts),
            drivers,
        };
        debug!("📊 Bilan: net {}", report.balance.net_profit);

        Ok(ApiResponse::success(report))
    }

    pub async fn admin_dashboard(
        &self,
        actor: &Actor,
        today: NaiveDate,
    ) -> AppResult<ApiResponse<Vec<AdminDashboardRow>>> {
        authorize(Some(actor), Action::ViewReports)?;

        let drivers = self.repos.fleet.list_drivers().await?;
        let mut rows = Vec::with_capacity(drivers.len());
        for driver in drivers {
            let today_entry = self.repos.ledger.entry_for_day(driver.id, today).await?;
            let totals = self.repos.ledger.driver_totals(driver.id).await?;
            rows.push(AdminDashboardRow {
                driver,
                today_entry,
                total_revenue: totals.revenue,
            });
        }

        Ok(ApiResponse::success(rows))
    }

    pub async fn driver_dashboard(
        &self,
        actor: &Actor,
        today: NaiveDate,
    ) -> AppResult<ApiResponse<DriverDashboard>> {
        authorize(Some(actor), Action::ViewDriverDashboard)?;

        let Actor::Driver { driver_id, .. } = *actor else {
            return Err(AppError::Forbidden("driver dashboard".to_string()));
        };

        Ok(ApiResponse::success(DriverDashboard {
            driver_id,
            date: today,
            today_entry: self.repos.ledger.entry_for_day(driver_id, today).await?,
            absences: self.repos.ledger.absences_for_driver(driver_id).await?,
        }))
    }
}
