//! Token authorization for the protected endpoint.

/// Compare a provided token against the expected one.
///
/// Returns false when no token was provided. The comparison is length-gated
/// but otherwise constant-shape: every byte of equal-length inputs is
/// examined, so a match cannot be narrowed down byte by byte through timing.
pub fn authorize(provided: Option<&str>, expected: &str) -> bool {
    let Some(provided) = provided else {
        return false;
    };

    let a = provided.as_bytes();
    let b = expected.as_bytes();
    if a.len() != b.len() {
        return false;
    }

    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
