// Address validation shared by the address endpoints and statements

/// Returns the trimmed address when it is `0x` followed by 40 hex digits.
///
/// Casing is kept as given; lookups compare addresses case-insensitively so
/// checksummed and lower-case forms find the same records.
pub fn parse_address(input: &str) -> Option<String> {
    let input = input.trim();
    let hex = input.strip_prefix("0x").or_else(|| input.strip_prefix("0X"))?;

    if hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        Some(input.to_string())
    } else {
        None
    }
}
