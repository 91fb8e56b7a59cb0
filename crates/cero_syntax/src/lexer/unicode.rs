//! UTF-8 decoding and identifier classification for non-ASCII input.

/// Decode the code point at the start of `bytes`.
///
/// The sequence length comes from the lead byte's leading one bits. Returns `None` for a malformed lead byte or a
/// malformed, overlong or truncated sequence.
pub(super) fn decode(bytes: &[u8]) -> Option<(char, usize)> {
    let lead = *bytes.first()?;
    let len = match lead.leading_ones() {
        0 => 1,
        n @ 2..=4 => n as usize,
        _ => return None,
    };
    let sequence = bytes.get(..len)?;
    let c = std::str::from_utf8(sequence).ok()?.chars().next()?;
    Some((c, len))
}

/// Raw bytes of a sequence packed little-endian, as reported for invalid characters.
pub(super) fn pack_le(bytes: &[u8]) -> u32 {
    let mut packed = [0u8; 4];
    let len = bytes.len().min(4);
    packed[..len].copy_from_slice(&bytes[..len]);
    u32::from_le_bytes(packed)
}

pub(super) fn is_identifier_start(c: char) -> bool {
    unicode_ident::is_xid_start(c)
}

pub(super) fn is_identifier_continue(c: char) -> bool {
    unicode_ident::is_xid_continue(c)
}
