//! Session context and mock authentication
//!
//! A [`Session`] names whose form is loaded and saved. It is created by a
//! login and handed to the engine explicitly; nothing here is global.

mod credentials;
mod directory;

pub use credentials::{CredentialHasher, Argon2Hasher};
pub use directory::{UserDirectory, UserRecord};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Inactivity timeout applied when none is configured
pub const DEFAULT_SESSION_TIMEOUT_MINUTES: i64 = 30;

/// Authenticated identity plus inactivity tracking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    user_key: String,
    started_at: DateTime<Utc>,
    last_activity: DateTime<Utc>,
    timeout_minutes: i64,
}

impl Session {
    pub fn new(user_key: impl Into<String>, timeout_minutes: i64, now: DateTime<Utc>) -> Self {
        Self {
            user_key: user_key.into(),
            started_at: now,
            last_activity: now,
            timeout_minutes,
        }
    }

    /// Session starting now with the default timeout
    pub fn start(user_key: impl Into<String>) -> Self {
        Self::new(user_key, DEFAULT_SESSION_TIMEOUT_MINUTES, Utc::now())
    }

    pub fn user_key(&self) -> &str {
        &self.user_key
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// End of the inactivity window; a timeout past chrono's range never expires
    pub fn expires_at(&self) -> DateTime<Utc> {
        Duration::try_minutes(self.timeout_minutes)
            .and_then(|timeout| self.last_activity.checked_add_signed(timeout))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Record activity; an expired session stays expired
    pub fn touch(&mut self, now: DateTime<Utc>) {
        if !self.is_expired(now) && now > self.last_activity {
            self.last_activity = now;
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 15, 9, minute, 0).unwrap()
    }

    #[test]
    fn test_timeout_after_inactivity() {
        let session = Session::new("pat", 30, at(0));
        assert!(!session.is_expired(at(29)));
        assert!(session.is_expired(at(30)));
    }

    #[test]
    fn test_touch_extends() {
        let mut session = Session::new("pat", 30, at(0));
        session.touch(at(20));
        assert!(!session.is_expired(at(45)));
        assert_eq!(session.expires_at(), at(50));
        assert_eq!(session.started_at(), at(0));
    }

    #[test]
    fn test_huge_timeout_does_not_overflow() {
        let mut session = Session::new("pat", i64::MAX / 2, at(0));
        assert!(!session.is_expired(at(59)));
        session.touch(at(30));
        assert_eq!(session.expires_at(), DateTime::<Utc>::MAX_UTC);

        let session = Session::new("pat", i64::MAX, at(0));
        assert!(!session.is_expired(at(59)));
    }

    #[test]
    fn test_expired_session_cannot_be_revived() {
        let mut session = Session::new("pat", 10, at(0));
        session.touch(at(15));
        assert!(session.is_expired(at(16)));
    }
}
