//! User-visible notices and their history

use chrono::{DateTime, Duration, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

impl NoticeLevel {
    pub fn icon(&self) -> &str {
        match self {
            NoticeLevel::Success => "✓",
            NoticeLevel::Warning => "!",
            NoticeLevel::Error => "✗",
        }
    }
}

/// A message raised by a handler, not yet shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// A notice stamped with the time it was raised
#[derive(Debug, Clone)]
pub struct Notification {
    pub notice: Notice,
    pub raised_at: DateTime<Local>,
}

impl Notification {
    pub fn formatted_time(&self) -> String {
        self.raised_at.format("%H:%M:%S").to_string()
    }
}

/// Newest-first history of notifications
#[derive(Debug, Default)]
pub struct NotificationLog {
    entries: Vec<Notification>,
}

impl NotificationLog {
    const MAX_ENTRIES: usize = 100;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notice: Notice) {
        self.push_at(notice, Local::now());
    }

    pub fn push_at(&mut self, notice: Notice, raised_at: DateTime<Local>) {
        match notice.level {
            NoticeLevel::Error => tracing::warn!(message = %notice.message, "notice"),
            _ => tracing::debug!(message = %notice.message, "notice"),
        }
        self.entries.insert(0, Notification { notice, raised_at });
        self.entries.truncate(Self::MAX_ENTRIES);
    }

    /// Most recent notification, if younger than `ttl`
    pub fn current(&self, now: DateTime<Local>, ttl: Duration) -> Option<&Notification> {
        self.entries
            .first()
            .filter(|n| now.signed_duration_since(n.raised_at) < ttl)
    }

    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_is_newest_first() {
        let mut log = NotificationLog::new();
        log.push(Notice::success("first"));
        log.push(Notice::warning("second"));

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].notice.message, "second");
        assert_eq!(log.entries()[1].notice.level, NoticeLevel::Success);
    }

    #[test]
    fn test_current_expires() {
        let mut log = NotificationLog::new();
        let raised = Local::now();
        log.push_at(Notice::success("saved"), raised);

        let ttl = Duration::seconds(4);
        assert!(log.current(raised + Duration::seconds(1), ttl).is_some());
        assert!(log.current(raised + Duration::seconds(5), ttl).is_none());
        // Expired notifications stay in the history
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_log_is_bounded() {
        let mut log = NotificationLog::new();
        for i in 0..150 {
            log.push(Notice::success(format!("n{}", i)));
        }
        assert_eq!(log.len(), 100);
        assert_eq!(log.entries()[0].notice.message, "n149");
    }
}
