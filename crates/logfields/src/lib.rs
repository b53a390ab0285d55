//! Apache access-log field parsing
//!
//! Small, stateless helpers that turn raw access-log tokens into typed
//! values, plus a line parser that applies them to a whole record.
//!
//! # Architecture
//!
//! - `quoted.rs`: delimiter stripping for `"..."` and `[...]` fields
//! - `timestamp.rs`: `[DD/Mon/YYYY:HH:MM:SS ±HHMM]` to a fixed-offset time
//! - `ipv4.rs`: dotted-decimal IPv4 to `u32`, scalar and column-wise
//! - `record.rs`: common/combined log lines to `AccessRecord`
//! - `logging.rs`: tracing subscriber setup for callers

pub mod error;
pub mod quoted;
pub mod timestamp;
pub mod ipv4;
pub mod record;
pub mod logging;

// Re-export commonly used types
pub use error::{FieldError, FieldResult};
pub use quoted::{strip_delimiters, strip_delimiters_checked};
pub use timestamp::{format_timestamp, offset_minutes, parse_timestamp};
pub use ipv4::{int_to_ip, ip_to_int, ips_to_int, nested_ips_to_int};
pub use record::{tokenize, AccessRecord};
pub use logging::init_logging;

// Constants
pub const TIMESTAMP_TOKEN_LEN: usize = 28; // [13/Nov/2015:11:45:42 +0000]
pub const TIMESTAMP_BARE_LEN: usize = 26; // 13/Nov/2015:11:45:42 +0000
pub const TIMESTAMP_PATTERN: &str = "%d/%b/%Y:%H:%M:%S";
