//! Draw command encoding
//!
//! Turns display calls into frames on the draw queue. Queueing never waits:
//! a full queue reports `QueueFull` and the face stays stale until the next
//! redraw.

use ascent_core::geometry::Point;
use ascent_core::traits::{DisplayError, WatchfaceDisplay};
use ascent_protocol::{BitmapId, DrawCommand, LabelId, LayerId};

use crate::channels::DRAW_CHANNEL;

pub struct FrameDisplay {
    seq: u8,
}

impl FrameDisplay {
    pub fn new() -> Self {
        Self { seq: 0 }
    }

    fn send(&mut self, command: DrawCommand<'_>) -> Result<(), DisplayError> {
        let frame = command
            .to_frame(self.seq)
            .map_err(|_| DisplayError::Encode)?;
        DRAW_CHANNEL
            .try_send(frame)
            .map_err(|_| DisplayError::QueueFull)?;
        self.seq = self.seq.wrapping_add(1);
        Ok(())
    }
}

impl WatchfaceDisplay for FrameDisplay {
    fn set_text(&mut self, label: LabelId, text: &str) -> Result<(), DisplayError> {
        self.send(DrawCommand::SetText { label, text })
    }

    fn set_bitmap(&mut self, layer: LayerId, bitmap: BitmapId) -> Result<(), DisplayError> {
        self.send(DrawCommand::SetBitmap { layer, bitmap })
    }

    fn move_layer(&mut self, layer: LayerId, origin: Point) -> Result<(), DisplayError> {
        let x = i16::try_from(origin.x).map_err(|_| DisplayError::OutOfRange)?;
        let y = i16::try_from(origin.y).map_err(|_| DisplayError::OutOfRange)?;
        self.send(DrawCommand::MoveLayer { layer, x, y })
    }

    fn set_visible(&mut self, layer: LayerId, visible: bool) -> Result<(), DisplayError> {
        self.send(DrawCommand::SetVisible { layer, visible })
    }

    fn set_width(&mut self, layer: LayerId, width: u8) -> Result<(), DisplayError> {
        self.send(DrawCommand::SetWidth { layer, width })
    }
}
