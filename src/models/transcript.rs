use chrono::{DateTime, Utc};

use crate::models::turn::{Role, Turn};

/// The live, mutable working state of one session, keyed by
/// `(user_id, session_id)`. `chatlog` and `prompt_log` stay in lock-step:
/// every appended turn carries exactly one raw prompt string, so the exact
/// language-model context can be reconstructed.
#[derive(Debug, Clone)]
pub struct Transcript {
    pub user_id: String,
    pub session_id: String,
    pub chatlog: Vec<Turn>,
    pub prompt_log: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transcript {
    /// Contents of the user-authored turns, in append order.
    pub fn user_contents(&self) -> Vec<&str> {
        self.chatlog
            .iter()
            .filter(|t| t.role == Role::User)
            .map(|t| t.content.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_user_contents_filters_roles_and_keeps_order() {
        let t = transcript(vec![
            Turn::new(Role::User, "first"),
            Turn::new(Role::Assistant, "reply"),
            Turn::new(Role::User, "second"),
            Turn::system("instruction"),
        ]);
        assert_eq!(t.user_contents(), vec!["first", "second"]);
    }

    #[test]
    fn test_user_contents_empty_when_no_user_turns() {
        let t = transcript(vec![Turn::new(Role::Assistant, "hello")]);
        assert!(t.user_contents().is_empty());
    }
}
