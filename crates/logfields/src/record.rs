use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::error::{FieldError, FieldResult};
use crate::ipv4::ip_to_int;
use crate::quoted::strip_delimiters_checked;
use crate::timestamp::parse_timestamp;

/// One Apache access-log entry (Common or Combined Log Format).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessRecord {
    pub remote_host: String,
    /// Set only when `remote_host` is a dotted IPv4 address
    pub remote_ip: Option<u32>,
    pub ident: Option<String>,
    pub user: Option<String>,
    pub time: DateTime<FixedOffset>,
    /// Full request line, e.g. `GET /index.html HTTP/1.1`
    pub request: String,
    pub method: Option<String>,
    pub path: Option<String>,
    pub protocol: Option<String>,
    pub status: u16,
    pub size: Option<u64>,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
}

impl AccessRecord {
    /// Parse a single log line.
    ///
    /// Format: host ident authuser [date] "request" status bytes ["referrer" "user-agent"]
    /// Example: 127.0.0.1 - frank [10/Oct/2000:13:55:36 -0700] "GET /apache_pb.gif HTTP/1.0" 200 2326
    pub fn parse(line: &str) -> FieldResult<Self> {
        Self::parse_fields(line).inspect_err(|e| {
            tracing::debug!(kind = e.kind(), error = %e, "Failed to parse access log line");
        })
    }

    fn parse_fields(line: &str) -> FieldResult<Self> {
        let tokens = tokenize(line.trim());
        if tokens.len() != 7 && tokens.len() != 9 {
            return Err(FieldError::InvalidInput(format!(
                "expected 7 or 9 fields, got {}",
                tokens.len()
            )));
        }

        let remote_host = tokens[0].to_string();
        let remote_ip = ip_to_int(&remote_host).ok();
        let time = parse_timestamp(tokens[3])?;

        let request = strip_delimiters_checked(tokens[4], '"', '"')?.to_string();
        let mut req_parts = request.splitn(3, ' ').filter(|s| !s.is_empty());
        let method = req_parts.next().map(str::to_string);
        let path = req_parts.next().map(str::to_string);
        let protocol = req_parts.next().map(str::to_string);

        let status = tokens[5]
            .parse::<u16>()
            .map_err(|_| FieldError::Format(format!("invalid status {:?}", tokens[5])))?;
        let size = match tokens[6] {
            "-" => None,
            s => Some(
                s.parse::<u64>()
                    .map_err(|_| FieldError::Format(format!("invalid response size {:?}", s)))?,
            ),
        };

        let (referrer, user_agent) = if tokens.len() == 9 {
            (quoted_or_dash(tokens[7])?, quoted_or_dash(tokens[8])?)
        } else {
            (None, None)
        };

        Ok(Self {
            remote_host,
            remote_ip,
            ident: dash_to_none(tokens[1]),
            user: dash_to_none(tokens[2]),
            time,
            request,
            method,
            path,
            protocol,
            status,
            size,
            referrer,
            user_agent,
        })
    }

    /// Severity implied by the status code.
    pub fn level(&self) -> &'static str {
        if self.status >= 500 {
            "error"
        } else if self.status >= 400 {
            "warn"
        } else {
            "info"
        }
    }
}

impl FromStr for AccessRecord {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn dash_to_none(field: &str) -> Option<String> {
    if field == "-" {
        None
    } else {
        Some(field.to_string())
    }
}

fn quoted_or_dash(field: &str) -> FieldResult<Option<String>> {
    let inner = strip_delimiters_checked(field, '"', '"')?;
    Ok(dash_to_none(inner))
}

/// Split a log line on spaces that are outside `"..."` and `[...]` groups.
///
/// Backslash escapes inside quotes are kept verbatim, so `\"` does not end
/// the group. Runs of spaces produce no empty tokens.
pub fn tokenize(line: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    let mut in_quotes = false;
    let mut in_brackets = false;
    let mut escaped = false;

    for (i, c) in line.char_indices() {
        if in_quotes {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_quotes = false;
            }
            continue;
        }
        if in_brackets {
            if c == ']' {
                in_brackets = false;
            }
            continue;
        }

        match c {
            ' ' => {
                if let Some(s) = start.take() {
                    tokens.push(&line[s..i]);
                }
            }
            _ => {
                if start.is_none() {
                    start = Some(i);
                }
                match c {
                    '"' => in_quotes = true,
                    '[' => in_brackets = true,
                    _ => {}
                }
            }
        }
    }

    if let Some(s) = start {
        tokens.push(&line[s..]);
    }
    tokens
}
