use crate::error::{FieldError, FieldResult};

/// Encode one dotted-decimal IPv4 address as its 32-bit integer.
///
/// `"192.168.1.1"` becomes `3232235777`. Each of the four parts must be
/// 1-3 decimal digits with a value of at most 255.
pub fn ip_to_int(address: &str) -> FieldResult<u32> {
    let mut value: u32 = 0;
    let mut parts = 0usize;

    for part in address.split('.') {
        if parts == 4 {
            return Err(FieldError::Format(format!(
                "expected 4 octets in {:?}",
                address
            )));
        }
        let octet = parse_octet(part)
            .map_err(|reason| FieldError::Format(format!("{} in {:?}", reason, address)))?;
        value |= u32::from(octet) << (8 * (3 - parts));
        parts += 1;
    }

    if parts != 4 {
        return Err(FieldError::Format(format!(
            "expected 4 octets in {:?}, got {}",
            address, parts
        )));
    }
    Ok(value)
}

fn parse_octet(part: &str) -> Result<u8, String> {
    if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("invalid octet {:?}", part));
    }
    // At most 3 digits, so this cannot overflow u16
    let value: u16 = part.parse().map_err(|_| format!("invalid octet {:?}", part))?;
    u8::try_from(value).map_err(|_| format!("octet {} out of range", value))
}

/// Encode a column of addresses, preserving order.
pub fn ips_to_int<S: AsRef<str>>(column: &[S]) -> FieldResult<Vec<u32>> {
    column.iter().map(|address| ip_to_int(address.as_ref())).collect()
}

/// Encode grouped columns, keeping the outer grouping and its order.
pub fn nested_ips_to_int<S: AsRef<str>>(groups: &[Vec<S>]) -> FieldResult<Vec<Vec<u32>>> {
    groups.iter().map(|group| ips_to_int(group.as_slice())).collect()
}

/// Dotted-decimal rendering of an encoded address.
pub fn int_to_ip(value: u32) -> String {
    let [a, b, c, d] = value.to_be_bytes();
    format!("{}.{}.{}.{}", a, b, c, d)
}
