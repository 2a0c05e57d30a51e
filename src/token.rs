use rand::{rngs::OsRng, Rng};

/// Mixed-case alphanumeric alphabet used for magic and session tokens.
pub const TOKEN_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Lowercase alphanumeric alphabet used for shareable event codes.
pub const CODE_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

pub const MAGIC_TOKEN_LENGTH: usize = 32;
pub const SESSION_TOKEN_LENGTH: usize = 48;
pub const SHAREABLE_CODE_LENGTH: usize = 8;

/// Generate a random string of `length` characters drawn from `alphabet`.
///
/// Uses the operating system's random source; predictable tokens would
/// defeat the entire authentication scheme.
pub fn generate(length: usize, alphabet: &[u8]) -> String {
    let mut rng = OsRng;
    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..alphabet.len());
            alphabet[idx] as char
        })
        .collect()
}

/// Single-use token embedded in a magic login link.
pub fn magic_token() -> String {
    generate(MAGIC_TOKEN_LENGTH, TOKEN_ALPHABET)
}

/// Bearer token for an established session. Longer than a magic token
/// because it stays valid for 30 days instead of 15 minutes.
pub fn session_token() -> String {
    generate(SESSION_TOKEN_LENGTH, TOKEN_ALPHABET)
}

/// Short public code identifying an event in shareable URLs.
pub fn shareable_code() -> String {
    generate(SHAREABLE_CODE_LENGTH, CODE_ALPHABET)
}
