use crate::models::transcript::Transcript;

/// AFINN polarity score of a session's user-authored text, clamped to
/// `[-5, 5]`. The clamp lives in the constructor so every value of this type
/// is in range and the mood mapping stays total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct SentimentScore(i32);

impl SentimentScore {
    pub const MIN: i32 = -5;
    pub const MAX: i32 = 5;

    pub const NEUTRAL: SentimentScore = SentimentScore(0);

    pub fn clamped(raw: f32) -> Self {
        Self(raw.clamp(Self::MIN as f32, Self::MAX as f32).round() as i32)
    }

    pub fn value(self) -> i32 {
        self.0
    }
}

/// Scores the user side of a transcript: user-role turn contents are joined
/// with `"."` and run through the polarity analyzer. Returns `None` when the
/// transcript has no user turns; absence is not the same thing as a score
/// of 0, callers choose what it means.
pub fn score_transcript(transcript: &Transcript) -> Option<SentimentScore> {
    let contents = transcript.user_contents();
    if contents.is_empty() {
        return None;
    }

    let analysis = sentiment::analyze(contents.join("."));
    Some(SentimentScore::clamped(analysis.score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::transcript::Transcript;
    use crate::models::turn::{Role, Turn};
    use chrono::Utc;

    #[test]
    fn test_clamps_below_minimum() {
        assert_eq!(SentimentScore::clamped(-12.3).value(), -5);
        assert_eq!(SentimentScore::clamped(-5.0).value(), -5);
    }

    #[test]
    fn test_clamps_above_maximum() {
        assert_eq!(SentimentScore::clamped(7.0).value(), 5);
        assert_eq!(SentimentScore::clamped(5.0).value(), 5);
    }

    #[test]
    fn test_in_range_values_round() {
        assert_eq!(SentimentScore::clamped(2.4).value(), 2);
        assert_eq!(SentimentScore::clamped(-1.6).value(), -2);
        assert_eq!(SentimentScore::clamped(0.0).value(), 0);
    }

    fn transcript(turns: Vec<Turn>) -> Transcript {
        Transcript {
            user_id: "u1".into(),
            session_id: "s1".into(),
            prompt_log: vec![String::new(); turns.len()],
            chatlog: turns,
            started_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_no_user_turns_is_absent_not_neutral() {
        let t = transcript(vec![Turn::new(Role::Assistant, "hello, how are you?")]);
        assert_eq!(score_transcript(&t), None);
    }

    #[test]
    fn test_scored_transcript_is_in_range() {
        let t = transcript(vec![
            Turn::new(Role::User, "I feel terrible, sad and hopeless"),
            Turn::new(Role::Assistant, "I'm sorry to hear that"),
            Turn::new(Role::User, "everything is awful and bad"),
        ]);
        let score = score_transcript(&t).unwrap();
        assert!((SentimentScore::MIN..=SentimentScore::MAX).contains(&score.value()));
    }

    #[test]
    fn test_deterministic_for_same_text() {
        let t = transcript(vec![Turn::new(Role::User, "today was a good day")]);
        assert_eq!(score_transcript(&t), score_transcript(&t));
    }
}
