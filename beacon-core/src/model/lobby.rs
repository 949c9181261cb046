use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Symbols lobby codes are drawn from.
pub const CODE_ALPHABET: &[u8; 62] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Fixed length of every lobby code.
pub const CODE_LENGTH: usize = 6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidCode {
    #[error("lobby code must be {CODE_LENGTH} characters, got {0}")]
    Length(usize),
    #[error("lobby code contains a character outside the alphabet")]
    Alphabet,
}

/// A lobby address: [`CODE_LENGTH`] symbols from [`CODE_ALPHABET`].
#[derive(Debug, Clone, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub struct LobbyCode(String);

impl LobbyCode {
    /// Validate an externally supplied code.
    pub fn parse(raw: &str) -> Result<Self, InvalidCode> {
        if raw.len() != CODE_LENGTH {
            return Err(InvalidCode::Length(raw.len()));
        }
        if !raw.bytes().all(|b| CODE_ALPHABET.contains(&b)) {
            return Err(InvalidCode::Alphabet);
        }
        Ok(Self(raw.to_owned()))
    }

    /// Draw a fresh code, each symbol uniform over the alphabet.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let code = (0..CODE_LENGTH)
            .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
            .collect();
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LobbyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
