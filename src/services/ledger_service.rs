//! Cálculos del libro diario del conductor

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::ledger::{LedgerEntry, WeekdayLabel};
use crate::models::report::LedgerTotals;
use crate::utils::errors::{validation_error, AppResult};
use crate::utils::validation::validate_amount;

/// Entrada validada lista para el upsert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyEntry {
    pub driver_id: Uuid,
    pub date: NaiveDate,
    pub weekday: WeekdayLabel,
    pub revenue: Decimal,
    pub expense: Decimal,
}

/// Validar montos y derivar el día de la semana desde la fecha de la entrada
pub fn prepare_daily_entry(
    driver_id: Uuid,
    date: NaiveDate,
    revenue: Decimal,
    expense: Decimal,
) -> AppResult<DailyEntry> {
    validate_amounts(revenue, expense)?;
    Ok(DailyEntry {
        driver_id,
        date,
        weekday: WeekdayLabel::from_date(date),
        revenue: revenue.round_dp(2),
        expense: expense.round_dp(2),
    })
}

pub fn validate_amounts(revenue: Decimal, expense: Decimal) -> AppResult<()> {
    if validate_amount(&revenue).is_err() {
        return Err(validation_error("revenue", "Montant invalide"));
    }
    if validate_amount(&expense).is_err() {
        return Err(validation_error("expense", "Dépense invalide"));
    }
    Ok(())
}

/// Σrevenue y Σexpense sobre un conjunto de entradas
pub fn totals(entries: &[LedgerEntry]) -> LedgerTotals {
    entries.iter().fold(LedgerTotals::default(), |acc, entry| LedgerTotals {
        revenue: acc.revenue + entry.revenue,
        expense: acc.expense + entry.expense,
    })
}

/// Beneficio neto agregado = Σrevenue − Σexpense
pub fn net(totals: &LedgerTotals) -> Decimal {
    totals.revenue - totals.expense
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entry(revenue: i64, expense: i64) -> LedgerEntry {
        let date = NaiveDate::from_ymd_opt(2025, 8, 18).unwrap();
        LedgerEntry {
            id: Uuid::new_v4(),
            driver_id: Uuid::new_v4(),
            entry_date: date,
            weekday: WeekdayLabel::from_date(date),
            revenue: Decimal::from(revenue),
            expense: Decimal::from(expense),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_prepare_derives_weekday_from_entry_date() {
        let saturday = NaiveDate::from_ymd_opt(2025, 8, 23).unwrap();
        let prepared =
            prepare_daily_entry(Uuid::new_v4(), saturday, Decimal::from(5000), Decimal::from(1200))
                .unwrap();
        assert_eq!(prepared.weekday, WeekdayLabel::Samedi);
    }

    #[test]
    fn test_negative_amounts_are_rejected() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 18).unwrap();
        assert!(prepare_daily_entry(Uuid::new_v4(), date, Decimal::from(-5), Decimal::ZERO).is_err());
        assert!(prepare_daily_entry(Uuid::new_v4(), date, Decimal::ZERO, Decimal::from(-5)).is_err());
    }

    #[test]
    fn test_net_per_entry_and_aggregate() {
        let entries = vec![entry(6000, 1500), entry(4000, 1000)];
        assert_eq!(entries[0].net(), Decimal::from(4500));
        let totals = totals(&entries);
        assert_eq!(totals.revenue, Decimal::from(10000));
        assert_eq!(totals.expense, Decimal::from(2500));
        assert_eq!(net(&totals), Decimal::from(7500));
    }

    #[test]
    fn test_totals_of_nothing_is_zero() {
        let totals = totals(&[]);
        assert_eq!(net(&totals), Decimal::ZERO);
    }
}
