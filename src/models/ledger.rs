//! Modelos del libro diario del conductor: recettes y absences

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Día de la semana en francés - mapea al ENUM weekday_label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[sqlx(type_name = "weekday_label", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum WeekdayLabel {
    Lundi,
    Mardi,
    Mercredi,
    Jeudi,
    Vendredi,
    Samedi,
    Dimanche,
}

impl sqlx::postgres::PgHasArrayType for WeekdayLabel {
    fn array_type_info() -> sqlx::postgres::PgTypeInfo {
        sqlx::postgres::PgTypeInfo::with_name("_weekday_label")
    }
}

impl WeekdayLabel {
    pub fn from_date(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Mon => WeekdayLabel::Lundi,
            Weekday::Tue => WeekdayLabel::Mardi,
            Weekday::Wed => WeekdayLabel::Mercredi,
            Weekday::Thu => WeekdayLabel::Jeudi,
            Weekday::Fri => WeekdayLabel::Vendredi,
            Weekday::Sat => WeekdayLabel::Samedi,
            Weekday::Sun => WeekdayLabel::Dimanche,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeekdayLabel::Lundi => "lundi",
            WeekdayLabel::Mardi => "mardi",
            WeekdayLabel::Mercredi => "mercredi",
            WeekdayLabel::Jeudi => "jeudi",
            WeekdayLabel::Vendredi => "vendredi",
            WeekdayLabel::Samedi => "samedi",
            WeekdayLabel::Dimanche => "dimanche",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "lundi" => Some(WeekdayLabel::Lundi),
            "mardi" => Some(WeekdayLabel::Mardi),
            "mercredi" => Some(WeekdayLabel::Mercredi),
            "jeudi" => Some(WeekdayLabel::Jeudi),
            "vendredi" => Some(WeekdayLabel::Vendredi),
            "samedi" => Some(WeekdayLabel::Samedi),
            "dimanche" => Some(WeekdayLabel::Dimanche),
            _ => None,
        }
    }
}

/// Recette diaria - única por (driver_id, entry_date)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub driver_id: Uuid,
    pub entry_date: NaiveDate,
    pub weekday: WeekdayLabel,
    pub revenue: Decimal,
    pub expense: Decimal,
    pub updated_at: DateTime<Utc>,
}

impl LedgerEntry {
    /// Beneficio neto, siempre derivado
    pub fn net(&self) -> Decimal {
        self.revenue - self.expense
    }
}

/// Absence de un conductor; puede haber varias por día
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Absence {
    pub id: Uuid,
    pub driver_id: Uuid,
    pub absence_date: NaiveDate,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}
