/*
Copyright 2020 Anish Jewalikar

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! The wire-message contract: what a remote client sends and what the core
//! sends back. These types describe the shape of the traffic; actually
//! opening a socket and framing it as WebSocket messages is left to
//! whatever transport layer embeds [`crate::scheduler`].

use serde::{Deserialize, Serialize};

/// A key-state change, carried as a 2-byte binary frame on the wire
/// (`[state_byte, key_index]`) but modeled here as a plain struct for the
/// `InputSink` boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyState {
    pub key_index: u8,
    pub pressed: bool,
}

/// The JSON text-frame shapes a client may send.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    SetSpeed { tps: i64 },
    #[serde(rename = "key_event_fx0a")]
    KeyEventFx0a { value: i64 },
}

/// The JSON text-frame shapes the core sends back, plus the binary frame
/// (modeled as a newtype so callers can't accidentally send the wrong byte
/// count).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Sound { state: SoundState },
    NeedKey { vx: u8 },
    Status { state: RunStatus },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundState {
    On,
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Halted,
    Crashed,
}

/// A 2048-byte row-major 0/1 framebuffer frame.
pub const FRAME_BYTES: usize = chip8_core::SCREEN_W * chip8_core::SCREEN_H;

/// Parse an incoming binary key frame: `[state_byte, key_index]`, ignoring
/// anything shorter than 2 bytes or whose key index is out of 0x0..0xF.
pub fn parse_key_frame(bytes: &[u8]) -> Option<KeyState> {
    if bytes.len() < 2 {
        return None;
    }
    let key_index = bytes[1];
    if key_index > 0xF {
        return None;
    }
    Some(KeyState {
        key_index,
        pressed: bytes[0] == 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_speed_round_trips() {
        let msg = ClientMessage::SetSpeed { tps: 1000 };
        let json = serde_json::to_string(&msg).unwrap();
        let back: ClientMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(msg, back);
    }

    #[test]
    fn key_frame_short_is_ignored() {
        assert_eq!(parse_key_frame(&[1]), None);
    }

    #[test]
    fn key_frame_out_of_range_is_ignored() {
        assert_eq!(parse_key_frame(&[1, 0x10]), None);
    }

    #[test]
    fn key_frame_parses_down_and_up() {
        assert_eq!(
            parse_key_frame(&[1, 0x9]),
            Some(KeyState {
                key_index: 0x9,
                pressed: true
            })
        );
        assert_eq!(
            parse_key_frame(&[0, 0x9]),
            Some(KeyState {
                key_index: 0x9,
                pressed: false
            })
        );
    }

    #[test]
    fn need_key_serializes_with_tag() {
        let msg = ServerMessage::NeedKey { vx: 2 };
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"type":"need_key","vx":2}"#);
    }
}
