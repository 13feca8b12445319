use std::time::SystemTime;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

pub mod admin;
pub mod game;
pub mod health;
pub mod sse;
pub mod validation;

pub(crate) fn format_system_time(time: SystemTime) -> String {
    OffsetDateTime::from(time)
        .format(&Rfc3339)
        .unwrap_or_else(|_| "invalid-timestamp".into())
}

/// Parse an RFC 3339 timestamp supplied by an operator request.
pub fn parse_rfc3339(value: &str) -> Result<SystemTime, time::error::Parse> {
    OffsetDateTime::parse(value, &Rfc3339).map(SystemTime::from)
}
