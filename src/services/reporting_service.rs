//! Agregados de reporting, recalculados en cada llamada

use rust_decimal::Decimal;

use crate::models::report::{FleetCounts, GlobalBalance, LedgerTotals};
use crate::models::vehicle::VehicleStatus;

/// Bénéfice net = recettes − (dépenses + pannes)
pub fn global_balance(ledger: LedgerTotals, repair_cost: Decimal) -> GlobalBalance {
    GlobalBalance {
        total_revenue: ledger.revenue,
        total_expense: ledger.expense,
        total_repair_cost: repair_cost,
        net_profit: ledger.revenue - (ledger.expense + repair_cost),
    }
}

/// Conteos por estado; los estados ausentes cuentan 0
pub fn fleet_counts(rows: &[(VehicleStatus, i64)]) -> FleetCounts {
    rows.iter().fold(FleetCounts::default(), |mut counts, (status, count)| {
        match status {
            VehicleStatus::Available => counts.available += count,
            VehicleStatus::Assigned => counts.assigned += count,
            VehicleStatus::InRepair => counts.in_repair += count,
        }
        counts
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_balance_is_zero() {
        let balance = global_balance(LedgerTotals::default(), Decimal::ZERO);
        assert_eq!(balance.net_profit, Decimal::ZERO);
    }

    #[test]
    fn test_balance_identity() {
        let ledger = LedgerTotals {
            revenue: Decimal::from(11000),
            expense: Decimal::from(2700),
        };
        let balance = global_balance(ledger, Decimal::new(350050, 2));
        assert_eq!(
            balance.net_profit,
            balance.total_revenue - (balance.total_expense + balance.total_repair_cost)
        );
        assert_eq!(balance.net_profit, Decimal::new(479950, 2));
    }

    #[test]
    fn test_fleet_counts_fill_missing_statuses() {
        let counts = fleet_counts(&[(VehicleStatus::Assigned, 3), (VehicleStatus::InRepair, 1)]);
        assert_eq!(counts.available, 0);
        assert_eq!(counts.assigned, 3);
        assert_eq!(counts.in_repair, 1);
    }
}
