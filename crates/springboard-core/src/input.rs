use serde::{Deserialize, Serialize};

/// Maximum encoded input payload size in bytes.
pub const MAX_INPUT_SIZE: usize = 256;

/// Per-frame controller sample crossing the input boundary.
///
/// `move_dir` is level-sampled every frame. `jump_pressed` and `jump_released`
/// are edge events: fired once on the press/release transition, latched until
/// a simulation tick consumes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerInput {
    pub move_dir: f32, // -1 (left), 0, +1 (right)
    pub jump_pressed: bool,
    pub jump_released: bool,
}

impl Default for ControllerInput {
    fn default() -> Self {
        Self {
            move_dir: 0.0,
            jump_pressed: false,
            jump_released: false,
        }
    }
}

impl ControllerInput {
    /// Merge a newer frame into a pending, not-yet-consumed input.
    ///
    /// Continuous values take the latest sample. Edge flags stay set until a
    /// tick consumes them; without this, a press in frame N gets overwritten
    /// by a frame N+1 with the flag cleared before the tick processes it.
    pub fn absorb(&mut self, newer: &ControllerInput) {
        self.move_dir = newer.move_dir;
        if newer.jump_pressed {
            self.jump_pressed = true;
        }
        if newer.jump_released {
            self.jump_released = true;
        }
    }
}

#[derive(Debug)]
pub enum InputCodecError {
    EmptyPayload,
    PayloadTooLarge(usize),
    Serialize(String),
    Deserialize(String),
}

impl std::fmt::Display for InputCodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPayload => write!(f, "empty input payload"),
            Self::PayloadTooLarge(size) => {
                write!(f, "input payload too large: {size} bytes (max {MAX_INPUT_SIZE})")
            },
            Self::Serialize(e) => write!(f, "serialize error: {e}"),
            Self::Deserialize(e) => write!(f, "deserialize error: {e}"),
        }
    }
}

impl std::error::Error for InputCodecError {}

/// Encode a controller input to MessagePack wire bytes.
pub fn encode_input(input: &ControllerInput) -> Result<Vec<u8>, InputCodecError> {
    let bytes =
        rmp_serde::to_vec(input).map_err(|e| InputCodecError::Serialize(e.to_string()))?;
    if bytes.len() > MAX_INPUT_SIZE {
        return Err(InputCodecError::PayloadTooLarge(bytes.len()));
    }
    Ok(bytes)
}

/// Decode wire bytes into a controller input.
pub fn decode_input(data: &[u8]) -> Result<ControllerInput, InputCodecError> {
    if data.is_empty() {
        return Err(InputCodecError::EmptyPayload);
    }
    if data.len() > MAX_INPUT_SIZE {
        return Err(InputCodecError::PayloadTooLarge(data.len()));
    }
    rmp_serde::from_slice(data).map_err(|e| InputCodecError::Deserialize(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorb_keeps_press_across_overwrite() {
        let mut pending = ControllerInput {
            move_dir: 1.0,
            jump_pressed: true,
            jump_released: false,
        };
        pending.absorb(&ControllerInput {
            move_dir: -1.0,
            jump_pressed: false,
            jump_released: false,
        });
        assert!(pending.jump_pressed, "Press edge must survive a later frame");
        assert_eq!(pending.move_dir, -1.0, "move_dir takes the latest sample");
    }

    #[test]
    fn absorb_accumulates_release() {
        let mut pending = ControllerInput::default();
        pending.absorb(&ControllerInput {
            move_dir: 0.0,
            jump_pressed: false,
            jump_released: true,
        });
        pending.absorb(&ControllerInput::default());
        assert!(pending.jump_released);
    }

    #[test]
    fn encode_decode_roundtrip() {
        let input = ControllerInput {
            move_dir: -1.0,
            jump_pressed: true,
            jump_released: true,
        };
        let bytes = encode_input(&input).unwrap();
        let decoded = decode_input(&bytes).unwrap();
        assert!((decoded.move_dir - input.move_dir).abs() < 1e-6);
        assert_eq!(decoded.jump_pressed, input.jump_pressed);
        assert_eq!(decoded.jump_released, input.jump_released);
    }

    #[test]
    fn decode_rejects_empty() {
        assert!(matches!(
            decode_input(&[]),
            Err(InputCodecError::EmptyPayload)
        ));
    }

    #[test]
    fn decode_rejects_oversized() {
        let big = vec![0u8; MAX_INPUT_SIZE + 1];
        assert!(matches!(
            decode_input(&big),
            Err(InputCodecError::PayloadTooLarge(_))
        ));
    }

    #[test]
    fn decode_rejects_garbage() {
        let garbage = [0xFF, 0xFE, 0x00, 0x01, 0xAB, 0xCD];
        assert!(decode_input(&garbage).is_err());
    }
}
