use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::info;

use crate::core::reminder::ScheduledReminder;

/// Errors an external calendar can report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// The calendar could not be reached or refused the event.
    Unavailable(String),
}

impl fmt::Display for CalendarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarError::Unavailable(msg) => write!(f, "calendar unavailable: {msg}"),
        }
    }
}

impl std::error::Error for CalendarError {}

#[async_trait]
pub trait CalendarService: Send + Sync {
    fn name(&self) -> &str;

    /// Add the reminder to the external calendar.
    async fn add_event(&self, reminder: ScheduledReminder) -> Result<(), CalendarError>;
}

/// Stand-in for a real calendar integration: logs, waits, succeeds.
pub struct StubCalendar {
    delay: Duration,
}

impl StubCalendar {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl CalendarService for StubCalendar {
    fn name(&self) -> &str {
        "stub"
    }

    async fn add_event(&self, reminder: ScheduledReminder) -> Result<(), CalendarError> {
        info!("Adding to calendar: {}", reminder.display());
        tokio::time::sleep(self.delay).await;
        info!("Added to calendar: {}", reminder.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::time::Instant;

    fn reminder() -> ScheduledReminder {
        ScheduledReminder::default_from(NaiveDate::from_ymd_opt(2026, 5, 1).unwrap())
    }

    #[tokio::test]
    async fn test_stub_waits_then_succeeds() {
        let calendar = StubCalendar::new(Duration::from_millis(20));
        let start = Instant::now();
        let result = calendar.add_event(reminder()).await;
        assert!(result.is_ok());
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_stub_with_zero_delay_completes_immediately() {
        let calendar = StubCalendar::new(Duration::ZERO);
        let result = tokio_test::block_on(calendar.add_event(reminder()));
        assert_eq!(result, Ok(()));
        assert_eq!(calendar.name(), "stub");
    }
}
