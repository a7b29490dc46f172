#![allow(clippy::missing_errors_doc)]

use std::{error::Error, fmt};

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use maze_chase_core::DifficultyTier;
use serde::{Deserialize, Serialize};

const CODE_DOMAIN: &str = "chase";
const CODE_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded session payload.
pub(crate) const SESSION_CODE_HEADER: &str = "chase:v1";
/// Delimiter used to separate the prefix, grid dimensions and payload.
const FIELD_DELIMITER: char = ':';

/// Shareable description of a session: the tier and seed reproduce every
/// level layout, and the embedded dimension previews the opening maze.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SessionCode {
    /// Dimension of the session's first maze.
    pub grid_size: u32,
    /// Difficulty tier fixed for the session.
    pub tier: DifficultyTier,
    /// Seed from which every level layout is derived.
    pub seed: u64,
}

impl SessionCode {
    /// Encodes the session into a single-line string suitable for sharing.
    #[must_use]
    pub(crate) fn encode(&self) -> String {
        let payload = SerializablePayload {
            tier: self.tier,
            seed: self.seed,
        };
        let json = serde_json::to_vec(&payload).expect("session code serialization never fails");
        let encoded = STANDARD_NO_PAD.encode(json);
        format!(
            "{SESSION_CODE_HEADER}:{}x{}:{encoded}",
            self.grid_size, self.grid_size
        )
    }

    /// Decodes a session from the provided string representation.
    pub(crate) fn decode(value: &str) -> Result<Self, SessionCodeError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(SessionCodeError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(SessionCodeError::MissingPrefix)?;
        let version = parts.next().ok_or(SessionCodeError::MissingVersion)?;
        let dimensions = parts.next().ok_or(SessionCodeError::MissingDimensions)?;
        let payload = parts.next().ok_or(SessionCodeError::MissingPayload)?;

        if domain != CODE_DOMAIN {
            return Err(SessionCodeError::InvalidPrefix(domain.to_owned()));
        }
        if version != CODE_VERSION {
            return Err(SessionCodeError::UnsupportedVersion(version.to_owned()));
        }

        let grid_size = parse_dimension(dimensions)?;
        let bytes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(SessionCodeError::InvalidEncoding)?;
        let decoded: SerializablePayload =
            serde_json::from_slice(&bytes).map_err(SessionCodeError::InvalidPayload)?;

        Ok(Self {
            grid_size,
            tier: decoded.tier,
            seed: decoded.seed,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct SerializablePayload {
    tier: DifficultyTier,
    seed: u64,
}

/// Errors that can occur while decoding session code strings.
#[derive(Debug)]
pub(crate) enum SessionCodeError {
    /// The provided string was empty or contained only whitespace.
    EmptyPayload,
    /// The prefix segment was missing from the encoded session.
    MissingPrefix,
    /// The encoded session did not contain a version segment.
    MissingVersion,
    /// The encoded session did not include grid dimensions.
    MissingDimensions,
    /// The encoded session did not include the payload segment.
    MissingPayload,
    /// The encoded session used an unexpected prefix segment.
    InvalidPrefix(String),
    /// The encoded session used an unsupported version identifier.
    UnsupportedVersion(String),
    /// The grid dimensions could not be parsed or were not square.
    InvalidDimensions(String),
    /// The base64 payload could not be decoded.
    InvalidEncoding(base64::DecodeError),
    /// The decoded payload could not be deserialised.
    InvalidPayload(serde_json::Error),
}

impl fmt::Display for SessionCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPayload => write!(f, "session code was empty"),
            Self::MissingPrefix => write!(f, "session code is missing the prefix"),
            Self::MissingVersion => write!(f, "session code is missing the version"),
            Self::MissingDimensions => write!(f, "session code is missing the grid dimensions"),
            Self::MissingPayload => write!(f, "session code is missing the payload"),
            Self::InvalidPrefix(prefix) => {
                write!(f, "session prefix '{prefix}' is not supported")
            }
            Self::UnsupportedVersion(version) => {
                write!(f, "session version '{version}' is not supported")
            }
            Self::InvalidDimensions(dimensions) => {
                write!(f, "could not parse grid dimensions '{dimensions}'")
            }
            Self::InvalidEncoding(error) => {
                write!(f, "could not decode session payload: {error}")
            }
            Self::InvalidPayload(error) => {
                write!(f, "could not parse session payload: {error}")
            }
        }
    }
}

impl Error for SessionCodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEncoding(error) => Some(error),
            Self::InvalidPayload(error) => Some(error),
            _ => None,
        }
    }
}

fn parse_dimension(dimensions: &str) -> Result<u32, SessionCodeError> {
    let (columns, rows) = dimensions
        .split_once(['x', 'X'])
        .ok_or_else(|| SessionCodeError::InvalidDimensions(dimensions.to_owned()))?;

    let columns = columns
        .trim()
        .parse::<u32>()
        .map_err(|_| SessionCodeError::InvalidDimensions(dimensions.to_owned()))?;
    let rows = rows
        .trim()
        .parse::<u32>()
        .map_err(|_| SessionCodeError::InvalidDimensions(dimensions.to_owned()))?;

    // Mazes are square, so a lopsided header is a corrupted code.
    if columns == 0 || columns != rows {
        return Err(SessionCodeError::InvalidDimensions(dimensions.to_owned()));
    }

    Ok(columns)
}
