//! Footer notifications.
//!
//! Only informational messages are shown. Fetch failures go to the log and
//! never reach the screen.

use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.created_at >= ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_after_ttl() {
        let note = Notification::new(NotificationLevel::Success, "Saved");
        let ttl = Duration::seconds(4);
        assert!(!note.is_expired(note.created_at, ttl));
        assert!(note.is_expired(note.created_at + Duration::seconds(5), ttl));
    }
}
