// Text wire format exchanged between clients through the relay.
//
//   POS <peer_id:u32> <x:f32> <y:f32>
//
// ASCII, whitespace-separated, one command per frame, coordinates with two decimals.

use crate::domain::{PeerUpdate, PositionCodec};
use glam::Vec2;
use std::fmt;
use std::num::{ParseFloatError, ParseIntError};

const POS: &str = "POS";

#[derive(Debug)]
pub enum ProtocolError {
    NotUtf8,
    Empty,
    UnknownCommand(String),
    TokenCount { expected: usize, found: usize },
    InvalidPeerId(ParseIntError),
    InvalidCoordinate(ParseFloatError),
    NonFinite,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::NotUtf8 => write!(f, "frame is not valid utf-8"),
            ProtocolError::Empty => write!(f, "frame has no command"),
            ProtocolError::UnknownCommand(cmd) => write!(f, "unknown command {cmd:?}"),
            ProtocolError::TokenCount { expected, found } => {
                write!(f, "expected {expected} tokens, found {found}")
            }
            ProtocolError::InvalidPeerId(err) => write!(f, "invalid peer id: {err}"),
            ProtocolError::InvalidCoordinate(err) => write!(f, "invalid coordinate: {err}"),
            ProtocolError::NonFinite => write!(f, "coordinate is not finite"),
        }
    }
}

impl std::error::Error for ProtocolError {}

pub fn encode_position(peer_id: u32, position: Vec2) -> String {
    format!("{POS} {peer_id} {:.2} {:.2}", position.x, position.y)
}

pub fn decode_position(payload: &[u8]) -> Result<PeerUpdate, ProtocolError> {
    let text = std::str::from_utf8(payload).map_err(|_| ProtocolError::NotUtf8)?;
    let tokens: Vec<&str> = text.split_whitespace().collect();

    let Some(&command) = tokens.first() else {
        return Err(ProtocolError::Empty);
    };
    if command != POS {
        return Err(ProtocolError::UnknownCommand(command.to_string()));
    }
    if tokens.len() != 4 {
        return Err(ProtocolError::TokenCount {
            expected: 4,
            found: tokens.len(),
        });
    }

    let peer_id = tokens[1].parse::<u32>().map_err(ProtocolError::InvalidPeerId)?;
    let x = parse_coordinate(tokens[2])?;
    let y = parse_coordinate(tokens[3])?;

    Ok(PeerUpdate {
        peer_id,
        position: Vec2::new(x, y),
    })
}

fn parse_coordinate(token: &str) -> Result<f32, ProtocolError> {
    let value = token.parse::<f32>().map_err(ProtocolError::InvalidCoordinate)?;
    if !value.is_finite() {
        return Err(ProtocolError::NonFinite);
    }
    Ok(value)
}

/// `PositionCodec` for the text `POS` format.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCodec;

impl PositionCodec for TextCodec {
    type Error = ProtocolError;

    fn encode(&self, update: &PeerUpdate) -> Vec<u8> {
        encode_position(update.peer_id, update.position).into_bytes()
    }

    fn decode(&self, payload: &[u8]) -> Result<PeerUpdate, ProtocolError> {
        decode_position(payload)
    }
}
