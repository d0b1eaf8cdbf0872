//! Draw commands for the display co-processor
//!
//! The co-processor owns the fonts and bitmaps; the watch only names them.

use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};
use heapless::Vec;

// Message type IDs: watch → display
pub const MSG_SET_TEXT: u8 = 0x20;
pub const MSG_SET_BITMAP: u8 = 0x21;
pub const MSG_MOVE_LAYER: u8 = 0x22;
pub const MSG_SET_VISIBLE: u8 = 0x23;
pub const MSG_SET_WIDTH: u8 = 0x24;

/// Text labels on the face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LabelId {
    Time,
    Date,
}

impl LabelId {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(LabelId::Time),
            0x01 => Some(LabelId::Date),
            _ => None,
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            LabelId::Time => 0x00,
            LabelId::Date => 0x01,
        }
    }
}

/// Bitmap layers that can be moved, swapped, hidden or cropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LayerId {
    Battery,
    Weather,
    Needle,
    /// The entity figure, doubling as the Bluetooth indicator
    Entity,
}

impl LayerId {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(LayerId::Battery),
            0x01 => Some(LayerId::Weather),
            0x02 => Some(LayerId::Needle),
            0x03 => Some(LayerId::Entity),
            _ => None,
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            LayerId::Battery => 0x00,
            LayerId::Weather => 0x01,
            LayerId::Needle => 0x02,
            LayerId::Entity => 0x03,
        }
    }
}

/// Bitmap resources held by the display co-processor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitmapId {
    BatteryMeter,
    ChargingMeter,
    Sunny,
    PartlyCloudy,
    Cloudy,
    Rainy,
    Snowy,
    Stormy,
}

impl BitmapId {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(BitmapId::BatteryMeter),
            0x01 => Some(BitmapId::ChargingMeter),
            0x10 => Some(BitmapId::Sunny),
            0x11 => Some(BitmapId::PartlyCloudy),
            0x12 => Some(BitmapId::Cloudy),
            0x13 => Some(BitmapId::Rainy),
            0x14 => Some(BitmapId::Snowy),
            0x15 => Some(BitmapId::Stormy),
            _ => None,
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            BitmapId::BatteryMeter => 0x00,
            BitmapId::ChargingMeter => 0x01,
            BitmapId::Sunny => 0x10,
            BitmapId::PartlyCloudy => 0x11,
            BitmapId::Cloudy => 0x12,
            BitmapId::Rainy => 0x13,
            BitmapId::Snowy => 0x14,
            BitmapId::Stormy => 0x15,
        }
    }
}

/// A single draw command
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrawCommand<'a> {
    /// Replace a label's text
    SetText { label: LabelId, text: &'a str },
    /// Show a bitmap on a layer
    SetBitmap { layer: LayerId, bitmap: BitmapId },
    /// Move a layer's origin
    MoveLayer { layer: LayerId, x: i16, y: i16 },
    /// Show or hide a layer
    SetVisible { layer: LayerId, visible: bool },
    /// Crop a layer to `width` pixels
    SetWidth { layer: LayerId, width: u8 },
}

impl<'a> DrawCommand<'a> {
    /// Encode this command into a frame
    pub fn to_frame(&self, seq: u8) -> Result<Frame, FrameError> {
        match self {
            DrawCommand::SetText { label, text } => {
                // Payload: [label][len][utf8...]
                let text_bytes = text.as_bytes();
                if text_bytes.len() > MAX_PAYLOAD_SIZE - 2 {
                    return Err(FrameError::PayloadTooLarge);
                }

                let mut payload = Vec::<u8, MAX_PAYLOAD_SIZE>::new();
                payload
                    .push(label.to_byte())
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                payload
                    .push(text_bytes.len() as u8)
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                payload
                    .extend_from_slice(text_bytes)
                    .map_err(|_| FrameError::PayloadTooLarge)?;

                Frame::new(MSG_SET_TEXT, seq, &payload)
            }
            DrawCommand::SetBitmap { layer, bitmap } => {
                Frame::new(MSG_SET_BITMAP, seq, &[layer.to_byte(), bitmap.to_byte()])
            }
            DrawCommand::MoveLayer { layer, x, y } => {
                let x = x.to_le_bytes();
                let y = y.to_le_bytes();
                Frame::new(MSG_MOVE_LAYER, seq, &[layer.to_byte(), x[0], x[1], y[0], y[1]])
            }
            DrawCommand::SetVisible { layer, visible } => {
                Frame::new(MSG_SET_VISIBLE, seq, &[layer.to_byte(), *visible as u8])
            }
            DrawCommand::SetWidth { layer, width } => {
                Frame::new(MSG_SET_WIDTH, seq, &[layer.to_byte(), *width])
            }
        }
    }

    /// Parse a command from a frame (display side, or for testing)
    pub fn from_frame(frame: &'a Frame) -> Result<Self, FrameError> {
        let p = frame.payload.as_slice();
        let layer = |byte: u8| LayerId::from_byte(byte).ok_or(FrameError::InvalidFrame);

        match (frame.msg_type, p) {
            (MSG_SET_TEXT, [label, len, text @ ..]) => {
                if text.len() != *len as usize {
                    return Err(FrameError::InvalidFrame);
                }
                let label = LabelId::from_byte(*label).ok_or(FrameError::InvalidFrame)?;
                let text = core::str::from_utf8(text).map_err(|_| FrameError::InvalidFrame)?;
                Ok(DrawCommand::SetText { label, text })
            }
            (MSG_SET_BITMAP, [l, b]) => Ok(DrawCommand::SetBitmap {
                layer: layer(*l)?,
                bitmap: BitmapId::from_byte(*b).ok_or(FrameError::InvalidFrame)?,
            }),
            (MSG_MOVE_LAYER, [l, x0, x1, y0, y1]) => Ok(DrawCommand::MoveLayer {
                layer: layer(*l)?,
                x: i16::from_le_bytes([*x0, *x1]),
                y: i16::from_le_bytes([*y0, *y1]),
            }),
            (MSG_SET_VISIBLE, [l, v]) => Ok(DrawCommand::SetVisible {
                layer: layer(*l)?,
                visible: *v != 0,
            }),
            (MSG_SET_WIDTH, [l, w]) => Ok(DrawCommand::SetWidth {
                layer: layer(*l)?,
                width: *w,
            }),
            _ => Err(FrameError::InvalidFrame),
        }
    }
}
