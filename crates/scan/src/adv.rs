//! BLE advertisement payload parsing.
//!
//! A payload is a sequence of length-prefixed records: one byte holding
//! the record length L, then L bytes of which the first is the AD type tag
//! and the remaining L-1 the value. A record whose declared length would
//! read past the end of the payload makes the whole lookup fail ("not
//! found"), never an out-of-bounds read.

/// Incomplete list of 16-bit service UUIDs.
pub const AD_TYPE_SVC_UUIDS_16_INCOMP: u8 = 0x02;
/// Complete list of 16-bit service UUIDs.
pub const AD_TYPE_SVC_UUIDS_16_CMPL: u8 = 0x03;
/// Shortened local name.
pub const AD_TYPE_NAME_SHORT: u8 = 0x08;
/// Complete local name.
pub const AD_TYPE_NAME_CMPL: u8 = 0x09;

/// Output budget for the rendered UUID list; identifiers past it are
/// silently dropped rather than overflowing the summary line.
pub const UUID_RENDER_BUDGET: usize = 64;

/// Find the value bytes of the first record with the given AD type tag.
///
/// Returns `None` if no such record exists or if any record's declared
/// length overruns the remaining payload.
pub fn find_field(tag: u8, payload: &[u8]) -> Option<&[u8]> {
    let mut rest = payload;

    while rest.len() > 1 {
        let field_len = rest[0] as usize;
        let total = field_len + 1;

        if total > rest.len() {
            // Declared length runs past the payload end.
            return None;
        }

        if field_len >= 1 && rest[1] == tag {
            return Some(&rest[2..total]);
        }

        rest = &rest[total..];
    }

    None
}

/// Render little-endian 16-bit service UUIDs as uppercase 4-hex-digit
/// tokens joined by commas, truncating at `budget` rendered bytes.
pub fn format_uuids16(data: &[u8], budget: usize) -> String {
    let mut out = String::new();

    for pair in data.chunks_exact(2) {
        let uuid = u16::from_le_bytes([pair[0], pair[1]]);
        let sep = if out.is_empty() { 0 } else { 1 };
        // The budget covers a trailing terminator byte on the device, so
        // rendered text stops one byte short of it.
        if out.len() + sep + 4 + 1 > budget {
            break;
        }
        if sep == 1 {
            out.push(',');
        }
        out.push_str(&format!("{uuid:04X}"));
    }

    out
}

/// Render a raw device address as colon-separated lowercase hex.
///
/// BLE addresses arrive least-significant byte first; the printable form
/// reverses them.
pub fn format_addr(addr: &[u8; 6]) -> String {
    format!(
        "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
        addr[5], addr[4], addr[3], addr[2], addr[1], addr[0]
    )
}

/// Build the one-line summary for an advertisement frame, or `None` if the
/// frame carries neither a name nor any 16-bit service UUID.
///
/// Name lookup prefers the complete local name, falling back to the
/// shortened one; the UUID list prefers the complete list, falling back to
/// the incomplete one.
pub fn summarize(addr: &[u8; 6], addr_type: u8, rssi: i8, payload: &[u8]) -> Option<String> {
    let name = find_field(AD_TYPE_NAME_CMPL, payload)
        .or_else(|| find_field(AD_TYPE_NAME_SHORT, payload))
        .filter(|v| !v.is_empty())
        .map(|v| String::from_utf8_lossy(v).into_owned());

    let uuids = find_field(AD_TYPE_SVC_UUIDS_16_CMPL, payload)
        .or_else(|| find_field(AD_TYPE_SVC_UUIDS_16_INCOMP, payload))
        .filter(|v| !v.is_empty())
        .map(|v| format_uuids16(v, UUID_RENDER_BUDGET));

    let addr = format_addr(addr);

    match (name, uuids) {
        (Some(name), Some(uuids)) => Some(format!(
            "Device: {addr} (Type: {addr_type}), RSSI: {rssi}, Name: {name}, UUIDs: {uuids}"
        )),
        (None, Some(uuids)) => Some(format!(
            "Device: {addr} (Type: {addr_type}), RSSI: {rssi}, UUIDs: {uuids}"
        )),
        (Some(name), None) => Some(format!(
            "Device: {addr} (Type: {addr_type}), RSSI: {rssi}, Name: {name}"
        )),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_field_extracts_value_bytes() {
        // One record: length 4, tag 'N', value "ABC".
        let payload = [4u8, b'N', b'A', b'B', b'C'];
        assert_eq!(find_field(b'N', &payload), Some(&[b'A', b'B', b'C'][..]));
    }

    #[test]
    fn find_field_skips_to_later_record() {
        let payload = [2u8, 0x01, 0x06, 3, AD_TYPE_SVC_UUIDS_16_CMPL, 0x34, 0x12];
        assert_eq!(
            find_field(AD_TYPE_SVC_UUIDS_16_CMPL, &payload),
            Some(&[0x34, 0x12][..])
        );
    }

    #[test]
    fn overrunning_length_is_not_found() {
        // Declared length 9 with only 3 bytes remaining.
        let payload = [9u8, b'N', b'A', b'B'];
        assert_eq!(find_field(b'N', &payload), None);
    }

    #[test]
    fn missing_tag_is_not_found() {
        let payload = [2u8, 0x01, 0x06];
        assert_eq!(find_field(AD_TYPE_NAME_CMPL, &payload), None);
    }

    #[test]
    fn empty_and_tiny_payloads() {
        assert_eq!(find_field(b'N', &[]), None);
        assert_eq!(find_field(b'N', &[1]), None);
    }

    #[test]
    fn zero_length_record_is_skipped() {
        let payload = [0u8, 2, AD_TYPE_NAME_CMPL, b'x'];
        assert_eq!(find_field(AD_TYPE_NAME_CMPL, &payload), Some(&[b'x'][..]));
    }

    #[test]
    fn uuids_render_little_endian_uppercase() {
        assert_eq!(format_uuids16(&[0x34, 0x12, 0x78, 0x56], 64), "1234,5678");
    }

    #[test]
    fn uuid_odd_trailing_byte_ignored() {
        assert_eq!(format_uuids16(&[0x34, 0x12, 0xff], 64), "1234");
    }

    #[test]
    fn uuid_list_truncates_at_budget() {
        let data: Vec<u8> = (0..40).collect();
        let out = format_uuids16(&data, UUID_RENDER_BUDGET);
        // 12 tokens of 4 hex digits plus 11 commas is the most that fits
        // in 64 bytes with room for a terminator.
        assert_eq!(out.split(',').count(), 12);
        assert_eq!(out.len(), 59);
        // Only whole tokens survive truncation.
        for token in out.split(',') {
            assert_eq!(token.len(), 4);
        }
    }

    #[test]
    fn uuid_budget_reserves_terminator_byte() {
        // "1234,5678" is 9 bytes; a 9-byte budget leaves no terminator
        // room for the second token, a 10-byte budget does.
        let data = [0x34, 0x12, 0x78, 0x56];
        assert_eq!(format_uuids16(&data, 9), "1234");
        assert_eq!(format_uuids16(&data, 10), "1234,5678");
    }

    #[test]
    fn address_renders_reversed_lowercase() {
        let addr = [0x01, 0x23, 0x45, 0x67, 0x89, 0xab];
        assert_eq!(format_addr(&addr), "ab:89:67:45:23:01");
    }

    #[test]
    fn summary_with_name_and_uuids() {
        let mut payload = vec![5u8, AD_TYPE_NAME_CMPL, b'l', b'a', b'm', b'p'];
        payload.extend_from_slice(&[3, AD_TYPE_SVC_UUIDS_16_CMPL, 0x0f, 0x18]);

        let line = summarize(&[0, 0, 0, 0, 0, 0], 1, -60, &payload).unwrap();
        assert_eq!(
            line,
            "Device: 00:00:00:00:00:00 (Type: 1), RSSI: -60, Name: lamp, UUIDs: 180F"
        );
    }

    #[test]
    fn summary_name_only_and_uuids_only() {
        let name_only = [5u8, AD_TYPE_NAME_SHORT, b'l', b'a', b'm', b'p'];
        let line = summarize(&[1, 0, 0, 0, 0, 0], 0, -80, &name_only).unwrap();
        assert!(line.ends_with("Name: lamp"));
        assert!(!line.contains("UUIDs"));

        let uuids_only = [3u8, AD_TYPE_SVC_UUIDS_16_INCOMP, 0x34, 0x12];
        let line = summarize(&[1, 0, 0, 0, 0, 0], 0, -80, &uuids_only).unwrap();
        assert!(line.ends_with("UUIDs: 1234"));
        assert!(!line.contains("Name"));
    }

    #[test]
    fn nameless_uuidless_frame_is_dropped() {
        // Flags record only — nothing worth logging.
        let payload = [2u8, 0x01, 0x06];
        assert_eq!(summarize(&[0; 6], 0, -50, &payload), None);
    }

    #[test]
    fn complete_name_preferred_over_short() {
        let mut payload = vec![3u8, AD_TYPE_NAME_SHORT, b'a', b'b'];
        payload.extend_from_slice(&[3, AD_TYPE_NAME_CMPL, b'c', b'd']);
        let line = summarize(&[0; 6], 0, -50, &payload).unwrap();
        assert!(line.contains("Name: cd"));
    }
}
