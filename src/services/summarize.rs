//! Two-stage summarization: a short topic label and a long bullet-point
//! summary, each a single completion call over the full chat log. The long
//! template depends on how much conversation there is to compress.

use crate::error::AppResult;
use crate::models::turn::Turn;
use crate::services::model::ModelClient;

const SHORT_SUMMARY_INSTRUCTION: &str =
    "Give a category or a topic to this conversation in less than 4 words";
const LONG_SUMMARY_FIVE_INSTRUCTION: &str = "Summarize this conversation with 5 bullet points";
const LONG_SUMMARY_THREE_INSTRUCTION: &str = "Summarize this conversation with 3 bullet points";

/// Chat logs with at least this many turns get the 5-bullet template.
const FIVE_BULLET_TURN_THRESHOLD: usize = 10;

#[derive(Debug)]
pub struct SessionSummaries {
    pub short: String,
    pub long: String,
}

fn long_summary_instruction(turn_count: usize) -> &'static str {
    if turn_count >= FIVE_BULLET_TURN_THRESHOLD {
        LONG_SUMMARY_FIVE_INSTRUCTION
    } else {
        LONG_SUMMARY_THREE_INSTRUCTION
    }
}

/// Full chat log followed by one fixed system instruction.
fn with_instruction(chatlog: &[Turn], instruction: &str) -> Vec<Turn> {
    let mut messages = chatlog.to_vec();
    messages.push(Turn::system(instruction));
    messages
}

/// Runs both summary completions concurrently. No internal retry beyond the
/// model client's bounded attempts; a failure of either call propagates to
/// the finalizer before anything is persisted.
pub async fn summarize(model: &ModelClient, chatlog: &[Turn]) -> AppResult<SessionSummaries> {
    let short_prompt = with_instruction(chatlog, SHORT_SUMMARY_INSTRUCTION);
    let long_prompt = with_instruction(chatlog, long_summary_instruction(chatlog.len()));

    let (short, long) = tokio::try_join!(
        model.chat_completion(&short_prompt),
        model.chat_completion(&long_prompt),
    )?;

    Ok(SessionSummaries { short, long })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::turn::Role;

    #[test]
    fn test_short_logs_get_three_bullets() {
        assert_eq!(long_summary_instruction(0), LONG_SUMMARY_THREE_INSTRUCTION);
        assert_eq!(long_summary_instruction(9), LONG_SUMMARY_THREE_INSTRUCTION);
    }

    #[test]
    fn test_threshold_boundary_at_ten_turns() {
        assert_eq!(long_summary_instruction(10), LONG_SUMMARY_FIVE_INSTRUCTION);
        assert_eq!(long_summary_instruction(11), LONG_SUMMARY_FIVE_INSTRUCTION);
    }

    #[test]
    fn test_instruction_is_appended_last() {
        let chatlog = vec![
            Turn::new(Role::User, "hello"),
            Turn::new(Role::Assistant, "hi there"),
        ];
        let messages = with_instruction(&chatlog, SHORT_SUMMARY_INSTRUCTION);

        assert_eq!(messages.len(), 3);
        assert_eq!(&messages[..2], &chatlog[..]);
        assert_eq!(messages[2].role, Role::System);
        assert_eq!(messages[2].content, SHORT_SUMMARY_INSTRUCTION);
    }
}
