use crate::error::ItemError;

/// Size of the iNES header that precedes NES ROM data in headered dumps.
pub const DEFAULT_HEADER_LEN: usize = 16;

/// Drop the leading `header_len` bytes of a payload.
pub fn strip_header(payload: &[u8], header_len: usize) -> Result<&[u8], ItemError> {
    payload
        .get(header_len..)
        .ok_or(ItemError::PayloadTooShort {
            expected: header_len,
            actual: payload.len(),
        })
}

/// CRC32 of `data` as 8 lowercase hex digits.
pub fn crc32_hex(data: &[u8]) -> String {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(data);
    format!("{:08x}", hasher.finalize())
}

/// Strip the header from a payload and checksum what remains.
pub fn payload_checksum(payload: &[u8], header_len: usize) -> Result<String, ItemError> {
    strip_header(payload, header_len).map(crc32_hex)
}

#[cfg(test)]
#[path = "tests/hasher_tests.rs"]
mod tests;
