//! Shared utilities and strongly-typed common values for workspace crates.
//!
//! ```rust
//! use qcommon::{SessionId, format_file_size, unique_id};
//!
//! let session = SessionId::from("session-1");
//!
//! assert_eq!(session.as_str(), "session-1");
//! assert_ne!(unique_id(), unique_id());
//! assert_eq!(format_file_size(1536), "1.5 KB");
//! ```

pub mod future {
    //! Shared async future aliases.
    //!
    //! ```rust
    //! use qcommon::BoxFuture;
    //!
    //! fn str_len<'a>(value: &'a str) -> BoxFuture<'a, usize> {
    //!     Box::pin(async move { value.len() })
    //! }
    //!
    //! let _future = str_len("hello");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod id {
    //! Collision-resistant identifiers for messages, uploads, turns, and sessions.
    //!
    //! Identifiers are UUIDv7 values rendered without hyphens: a millisecond timestamp,
    //! a monotonic counter for ids minted within the same millisecond, and random bits.
    //!
    //! ```rust
    //! use qcommon::unique_id;
    //!
    //! let first = unique_id();
    //! let second = unique_id();
    //! assert_eq!(first.len(), 32);
    //! assert!(first < second);
    //! ```

    use uuid::Uuid;

    pub fn unique_id() -> String {
        Uuid::now_v7().simple().to_string()
    }
}

pub mod context {
    //! Cross-crate identifier newtypes.
    //!
    //! ```rust
    //! use qcommon::SessionId;
    //!
    //! let session = SessionId::new("session-42");
    //!
    //! assert_eq!(session.to_string(), "session-42");
    //! assert_eq!(SessionId::generate().as_str().len(), 32);
    //! ```

    use std::fmt::{Display, Formatter};

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct SessionId(String);

    impl SessionId {
        pub fn new(value: impl Into<String>) -> Self {
            Self(value.into())
        }

        pub fn generate() -> Self {
            Self(crate::id::unique_id())
        }

        pub fn as_str(&self) -> &str {
            self.0.as_str()
        }
    }

    impl Display for SessionId {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl From<String> for SessionId {
        fn from(value: String) -> Self {
            Self(value)
        }
    }

    impl From<&str> for SessionId {
        fn from(value: &str) -> Self {
            Self(value.to_string())
        }
    }
}

pub mod format {
    //! Human-readable rendering of byte sizes and message timestamps.
    //!
    //! ```rust
    //! use chrono::{TimeDelta, Utc};
    //! use qcommon::{format_file_size, format_timestamp};
    //!
    //! let now = Utc::now();
    //! assert_eq!(format_file_size(10 * 1024 * 1024), "10 MB");
    //! assert_eq!(format_timestamp(now - TimeDelta::minutes(5), now), "5m ago");
    //! ```

    use chrono::{DateTime, TimeDelta, Utc};

    const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    pub fn format_file_size(bytes: u64) -> String {
        if bytes == 0 {
            return "0 Bytes".to_string();
        }

        let mut value = bytes as f64;
        let mut unit = 0;
        while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
            value /= 1024.0;
            unit += 1;
        }

        let rendered = format!("{value:.2}");
        let rendered = rendered.trim_end_matches('0').trim_end_matches('.');
        format!("{rendered} {}", SIZE_UNITS[unit])
    }

    /// Renders `at` relative to `now`; timestamps older than a day fall back to a calendar date.
    pub fn format_timestamp(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
        let elapsed = now.signed_duration_since(at);

        if elapsed < TimeDelta::minutes(1) {
            "Just now".to_string()
        } else if elapsed < TimeDelta::hours(1) {
            format!("{}m ago", elapsed.num_minutes())
        } else if elapsed < TimeDelta::days(1) {
            format!("{}h ago", elapsed.num_hours())
        } else {
            at.format("%Y-%m-%d").to_string()
        }
    }

    pub fn format_timestamp_now(at: DateTime<Utc>) -> String {
        format_timestamp(at, Utc::now())
    }
}

pub use context::SessionId;
pub use format::{format_file_size, format_timestamp, format_timestamp_now};
pub use future::BoxFuture;
pub use id::unique_id;

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::{TimeDelta, TimeZone, Utc};

    use super::{SessionId, format_file_size, format_timestamp, unique_id};

    #[test]
    fn session_id_round_trips_strings() {
        let session = SessionId::new("session-1");

        assert_eq!(session.as_str(), "session-1");
        assert_eq!(session.to_string(), "session-1");
        assert_eq!(SessionId::from("session-1".to_string()), session);
    }

    #[test]
    fn unique_ids_do_not_collide_in_a_tight_loop() {
        let ids = (0..10_000).map(|_| unique_id()).collect::<HashSet<_>>();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn unique_ids_sort_in_mint_order() {
        let ids = (0..256).map(|_| unique_id()).collect::<Vec<_>>();
        let mut sorted = ids.clone();
        sorted.sort();

        assert_eq!(ids, sorted);
    }

    #[test]
    fn file_sizes_use_binary_units_and_trim_zeros() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(1), "1 Bytes");
        assert_eq!(format_file_size(1023), "1023 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1_234_567), "1.18 MB");
        assert_eq!(format_file_size(10 * 1024 * 1024), "10 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3 GB");
        assert_eq!(format_file_size(2048 * 1024 * 1024 * 1024), "2048 GB");
    }

    #[test]
    fn timestamps_render_relative_then_absolute() {
        let now = Utc
            .with_ymd_and_hms(2026, 3, 14, 12, 0, 0)
            .single()
            .expect("valid date");

        assert_eq!(format_timestamp(now, now), "Just now");
        assert_eq!(format_timestamp(now - TimeDelta::seconds(59), now), "Just now");
        assert_eq!(format_timestamp(now - TimeDelta::minutes(1), now), "1m ago");
        assert_eq!(format_timestamp(now - TimeDelta::minutes(59), now), "59m ago");
        assert_eq!(format_timestamp(now - TimeDelta::hours(3), now), "3h ago");
        assert_eq!(format_timestamp(now - TimeDelta::days(2), now), "2026-03-12");
    }

    #[test]
    fn future_timestamps_render_as_just_now() {
        let now = Utc::now();
        assert_eq!(format_timestamp(now + TimeDelta::minutes(10), now), "Just now");
    }
}
