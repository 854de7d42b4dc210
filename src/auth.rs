//! Authentication ticket types.
//!
//! The authenticate endpoint issues an opaque ticket that must accompany
//! every business API call. The server honors a ticket for one hour; the
//! client treats it as stale well before that so long-running paginated
//! operations never fail mid-batch.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Client-side soft expiry window, in minutes.
///
/// The server-side ticket lifetime is 60 minutes. Re-authenticating at 40
/// leaves enough margin that a request started just before the window closes
/// still completes on a valid ticket.
pub const SOFT_EXPIRY_MINUTES: i64 = 40;

/// A session ticket and the time it was issued.
///
/// Replaced wholesale on re-authentication; never partially mutated.
#[derive(Debug, Clone)]
pub struct Ticket {
    /// The opaque ticket value, sent in the `Authorization` header.
    pub value: String,
    /// When the server issued the ticket.
    pub issued_at: DateTime<Utc>,
}

impl Ticket {
    /// Whether the soft expiry window has elapsed at `now`.
    ///
    /// A ticket is stale once 40 minutes or more have passed since issuance.
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        now - self.issued_at >= Duration::minutes(SOFT_EXPIRY_MINUTES)
    }
}

/// Request body for the authenticate endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct AuthenticateRequest<'a> {
    #[serde(rename = "UserName")]
    pub user_name: &'a str,
    #[serde(rename = "Password")]
    pub password: &'a str,
}

/// Response body from the authenticate endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct AuthenticateResponse {
    /// The authentication ticket.
    #[serde(rename = "Ticket")]
    pub ticket: String,
    /// RFC 1123 timestamp. Despite the name, the server fills this with the
    /// time it issued the ticket; expiry is tracked server-side. The wire
    /// name is kept as-is for compatibility.
    #[serde(rename = "TicketExpires")]
    pub ticket_expires: String,
}

/// Format a timestamp as RFC 1123 in UTC, e.g. `Tue, 05 Aug 2026 17:03:11 GMT`.
pub(crate) fn to_rfc1123(value: DateTime<Utc>) -> String {
    value.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Parse an RFC 1123 timestamp into UTC.
///
/// RFC 1123 dates are a subset of RFC 2822, which chrono parses directly.
pub(crate) fn from_rfc1123(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ticket_issued_at(issued_at: DateTime<Utc>) -> Ticket {
        Ticket {
            value: "ticket-1".to_string(),
            issued_at,
        }
    }

    #[test]
    fn test_fresh_ticket_is_not_stale() {
        let issued = Utc.with_ymd_and_hms(2026, 8, 5, 12, 0, 0).unwrap();
        let ticket = ticket_issued_at(issued);

        assert!(!ticket.is_stale(issued));
        assert!(!ticket.is_stale(issued + Duration::minutes(39)));
    }

    #[test]
    fn test_stale_exactly_at_soft_expiry_boundary() {
        let issued = Utc.with_ymd_and_hms(2026, 8, 5, 12, 0, 0).unwrap();
        let ticket = ticket_issued_at(issued);

        // One second shy of the window: still fresh.
        assert!(!ticket.is_stale(issued + Duration::minutes(40) - Duration::seconds(1)));
        // At the boundary and beyond: stale.
        assert!(ticket.is_stale(issued + Duration::minutes(40)));
        assert!(ticket.is_stale(issued + Duration::minutes(41)));
        assert!(ticket.is_stale(issued + Duration::hours(2)));
    }

    #[test]
    fn test_rfc1123_round_trip() {
        let instant = Utc.with_ymd_and_hms(2026, 8, 5, 17, 3, 11).unwrap();
        let formatted = to_rfc1123(instant);
        assert_eq!(formatted, "Wed, 05 Aug 2026 17:03:11 GMT");
        assert_eq!(from_rfc1123(&formatted), Some(instant));
    }

    #[test]
    fn test_rfc1123_rejects_garbage() {
        assert_eq!(from_rfc1123("not a date"), None);
    }

    #[test]
    fn test_authenticate_response_wire_names() {
        let json = r#"{"Ticket":"abc123","TicketExpires":"Wed, 05 Aug 2026 17:03:11 GMT"}"#;
        let response: AuthenticateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.ticket, "abc123");
        assert!(from_rfc1123(&response.ticket_expires).is_some());
    }
}
