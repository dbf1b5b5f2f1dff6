// SPDX-License-Identifier: Apache-2.0

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Tokens longer than this are rejected before decoding. A `u64` id never
/// needs more than 28 base64 characters.
pub const MAX_PAGE_TOKEN_LEN: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum CursorErrorCode {
    InvalidFormat,
    InvalidPayload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorError {
    pub code: CursorErrorCode,
    pub message: String,
}

impl CursorError {
    #[must_use]
    pub fn new(code: CursorErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for CursorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for CursorError {}

impl From<CursorError> for phonebook_core::Error {
    fn from(value: CursorError) -> Self {
        phonebook_core::Error::invalid_argument(value.message)
    }
}

/// Standard-alphabet, padded base64 of the decimal id.
#[must_use]
pub fn encode_page_token(last_id: u64) -> String {
    STANDARD.encode(last_id.to_string())
}

/// Empty input means "first page" and decodes to `None`.
pub fn decode_page_token(token: &str) -> Result<Option<u64>, CursorError> {
    if token.is_empty() {
        return Ok(None);
    }
    if token.len() > MAX_PAGE_TOKEN_LEN {
        return Err(CursorError::new(
            CursorErrorCode::InvalidFormat,
            "page token exceeds max length",
        ));
    }
    let bytes = STANDARD.decode(token).map_err(|e| {
        CursorError::new(
            CursorErrorCode::InvalidFormat,
            format!("failed to parse page token: {e}"),
        )
    })?;
    // Only plain ASCII digits; `str::parse::<u64>` would also accept a leading '+'.
    if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
        return Err(CursorError::new(
            CursorErrorCode::InvalidPayload,
            "incorrect page token",
        ));
    }
    let text = String::from_utf8_lossy(&bytes);
    let id = text.parse::<u64>().map_err(|_| {
        CursorError::new(CursorErrorCode::InvalidPayload, "incorrect page token")
    })?;
    Ok(Some(id))
}
