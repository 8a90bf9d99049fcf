use crate::sentiment::SentimentScore;

/// Maps a clamped sentiment score onto the `[0, 10]` mood scale shown on the
/// dashboard. Total over `SentimentScore` (11 buckets, identity shift), so a
/// higher score never yields a lower percentage.
pub fn to_mood_percentage(score: SentimentScore) -> i32 {
    score.value() + 5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_is_identity_shift() {
        for s in SentimentScore::MIN..=SentimentScore::MAX {
            let score = SentimentScore::clamped(s as f32);
            assert_eq!(to_mood_percentage(score), s + 5);
        }
    }

    #[test]
    fn test_mapping_is_strictly_monotonic() {
        let mut prev = None;
        for s in SentimentScore::MIN..=SentimentScore::MAX {
            let pct = to_mood_percentage(SentimentScore::clamped(s as f32));
            if let Some(p) = prev {
                assert!(pct > p, "mood percentage must increase with score");
            }
            prev = Some(pct);
        }
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(to_mood_percentage(SentimentScore::clamped(-5.0)), 0);
        assert_eq!(to_mood_percentage(SentimentScore::NEUTRAL), 5);
        assert_eq!(to_mood_percentage(SentimentScore::clamped(5.0)), 10);
    }
}
