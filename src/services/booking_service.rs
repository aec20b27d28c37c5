//! Ciclo de vida de reservations y abonnements
//!
//! `pending → approved | rejected | seen`. `seen` solo reemplaza a `pending`;
//! sobre un registro ya decidido queda como anotación en `seen_at`.

use chrono::{DateTime, Utc};

use crate::models::booking::{BookingDecision, BookingStatus};
use crate::models::ledger::WeekdayLabel;
use crate::utils::errors::{validation_error, AppResult};

/// Resultado de aplicar una transición
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingState {
    pub status: BookingStatus,
    pub seen_at: Option<DateTime<Utc>>,
}

/// Decisión del admin: sobrescribe siempre (last-write-wins)
pub fn decide(current: BookingState, decision: BookingDecision) -> BookingState {
    BookingState {
        status: decision.into(),
        seen_at: current.seen_at,
    }
}

/// Marcar como visto sin revertir una decisión ya tomada
pub fn mark_seen(current: BookingState, now: DateTime<Utc>) -> BookingState {
    let status = match current.status {
        BookingStatus::Pending => BookingStatus::Seen,
        decided => decided,
    };
    BookingState {
        status,
        seen_at: current.seen_at.or(Some(now)),
    }
}

/// Días del abonnement: al menos uno, sin duplicados, orden de la semana
pub fn normalize_weekdays(raw: &[String]) -> AppResult<Vec<WeekdayLabel>> {
    let mut days = Vec::with_capacity(raw.len());
    for value in raw {
        let day = WeekdayLabel::parse(value)
            .ok_or_else(|| validation_error("weekdays", "Jour invalide"))?;
        if !days.contains(&day) {
            days.push(day);
        }
    }
    if days.is_empty() {
        return Err(validation_error("weekdays", "Au moins un jour est requis"));
    }
    days.sort_by_key(|day| *day as u8);
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending() -> BookingState {
        BookingState { status: BookingStatus::Pending, seen_at: None }
    }

    #[test]
    fn test_decisions_are_last_write_wins() {
        let rejected = decide(pending(), BookingDecision::Rejected);
        assert_eq!(rejected.status, BookingStatus::Rejected);
        let approved = decide(rejected, BookingDecision::Approved);
        assert_eq!(approved.status, BookingStatus::Approved);
    }

    #[test]
    fn test_seen_replaces_only_pending() {
        let now = Utc::now();
        let seen = mark_seen(pending(), now);
        assert_eq!(seen.status, BookingStatus::Seen);
        assert_eq!(seen.seen_at, Some(now));

        let approved = decide(pending(), BookingDecision::Approved);
        let seen = mark_seen(approved, now);
        assert_eq!(seen.status, BookingStatus::Approved);
        assert_eq!(seen.seen_at, Some(now));
    }

    #[test]
    fn test_decision_after_seen_keeps_seen_at() {
        let now = Utc::now();
        let seen = mark_seen(pending(), now);
        let decided = decide(seen, BookingDecision::Rejected);
        assert_eq!(decided.status, BookingStatus::Rejected);
        assert_eq!(decided.seen_at, Some(now));
    }

    #[test]
    fn test_normalize_weekdays() {
        let raw = vec!["vendredi".to_string(), "Lundi".to_string(), "lundi".to_string()];
        assert_eq!(
            normalize_weekdays(&raw).unwrap(),
            vec![WeekdayLabel::Lundi, WeekdayLabel::Vendredi]
        );
        assert!(normalize_weekdays(&[]).is_err());
        assert!(normalize_weekdays(&["sunday".to_string()]).is_err());
    }
}
