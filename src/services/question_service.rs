//! Canal público de preguntas y FAQ rotativa

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::models::question::{Question, QuestionStatus};
use crate::utils::errors::{validation_error, AppError, AppResult};

/// Número máximo de preguntas mostradas en la FAQ pública
pub const FEED_SIZE: usize = 20;

/// Emails comparados sin mayúsculas ni espacios
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Ventana de 2 días: ⌊ordinal / 2⌋ con ordinal(0001-01-01) = 1
pub fn day_bucket(date: NaiveDate) -> u64 {
    (date.num_days_from_ce().max(0) as u64) / 2
}

/// Mezcla determinista para una semilla dada
pub fn shuffle<T>(mut items: Vec<T>, seed: u64) -> Vec<T> {
    let mut rng = StdRng::seed_from_u64(seed);
    items.shuffle(&mut rng);
    items
}

/// Selección pública: respondidas, más recientes primero, mezcladas por ventana
/// de 2 días y truncadas a [`FEED_SIZE`]
pub fn public_feed(questions: Vec<Question>, today: NaiveDate) -> Vec<Question> {
    let mut answered: Vec<Question> = questions
        .into_iter()
        .filter(|q| q.status == QuestionStatus::Answered)
        .collect();
    answered.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

    let mut feed = shuffle(answered, day_bucket(today));
    feed.truncate(FEED_SIZE);
    feed
}

/// Transición `pending → answered`; terminal
pub fn answer(question: &Question, reply: &str, now: DateTime<Utc>) -> AppResult<Question> {
    if question.status == QuestionStatus::Answered {
        return Err(AppError::Conflict(format!(
            "La question {} a déjà reçu une réponse",
            question.id
        )));
    }
    let reply = reply.trim();
    if reply.is_empty() {
        return Err(validation_error("reply", "La réponse est requise"));
    }

    let mut answered = question.clone();
    answered.reply = Some(reply.to_string());
    answered.status = QuestionStatus::Answered;
    answered.answered_at = Some(now);
    Ok(answered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn question(status: QuestionStatus, minutes_ago: i64) -> Question {
        Question {
            id: Uuid::new_v4(),
            name: "Kossi".to_string(),
            email: "kossi@example.com".to_string(),
            subject: "Tarifs".to_string(),
            message: "Combien pour Lomé centre ?".to_string(),
            reply: None,
            status,
            created_at: Utc::now() - Duration::minutes(minutes_ago),
            answered_at: None,
        }
    }

    fn answered_set(n: i64) -> Vec<Question> {
        (0..n).map(|i| question(QuestionStatus::Answered, i)).collect()
    }

    #[test]
    fn test_day_bucket_matches_ordinal_halves() {
        let first = NaiveDate::from_ymd_opt(1, 1, 1).unwrap();
        assert_eq!(first.num_days_from_ce(), 1);
        let even = NaiveDate::from_ymd_opt(2025, 8, 18).unwrap();
        let ordinal = even.num_days_from_ce() as u64;
        assert_eq!(day_bucket(even), ordinal / 2);
    }

    #[test]
    fn test_shuffle_is_deterministic() {
        let items: Vec<u32> = (0..50).collect();
        assert_eq!(shuffle(items.clone(), 42), shuffle(items.clone(), 42));
        let mut sorted = shuffle(items.clone(), 42);
        sorted.sort();
        assert_eq!(sorted, items);
    }

    #[test]
    fn test_feed_stable_within_same_day() {
        let questions = answered_set(30);
        let today = NaiveDate::from_ymd_opt(2025, 8, 18).unwrap();
        let first: Vec<Uuid> = public_feed(questions.clone(), today).iter().map(|q| q.id).collect();
        let second: Vec<Uuid> = public_feed(questions, today).iter().map(|q| q.id).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), FEED_SIZE);
    }

    #[test]
    fn test_feed_stable_across_bucket_days() {
        let questions = answered_set(30);
        let mut day = NaiveDate::from_ymd_opt(2025, 8, 18).unwrap();
        // Alinear con el inicio de una ventana
        if day.num_days_from_ce() % 2 == 1 {
            day = day.succ_opt().unwrap();
        }
        let next = day.succ_opt().unwrap();
        assert_eq!(day_bucket(day), day_bucket(next));
        let a: Vec<Uuid> = public_feed(questions.clone(), day).iter().map(|q| q.id).collect();
        let b: Vec<Uuid> = public_feed(questions, next).iter().map(|q| q.id).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_feed_excludes_pending() {
        let mut questions = answered_set(3);
        questions.push(question(QuestionStatus::Pending, 0));
        let today = NaiveDate::from_ymd_opt(2025, 8, 18).unwrap();
        let feed = public_feed(questions, today);
        assert_eq!(feed.len(), 3);
        assert!(feed.iter().all(|q| q.status == QuestionStatus::Answered));
    }

    #[test]
    fn test_answer_is_terminal() {
        let now = Utc::now();
        let pending = question(QuestionStatus::Pending, 0);
        let answered = answer(&pending, "500 FCFA", now).unwrap();
        assert_eq!(answered.status, QuestionStatus::Answered);
        assert_eq!(answered.reply.as_deref(), Some("500 FCFA"));
        assert_eq!(answered.answered_at, Some(now));
        assert!(matches!(answer(&answered, "encore", now), Err(AppError::Conflict(_))));
    }

    #[test]
    fn test_blank_reply_is_rejected() {
        let pending = question(QuestionStatus::Pending, 0);
        assert!(matches!(
            answer(&pending, "   ", Utc::now()),
            Err(AppError::Validation(_))
        ));
    }
}
