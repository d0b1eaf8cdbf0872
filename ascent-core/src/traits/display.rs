//! Display trait for the face's layers and labels

use ascent_protocol::{BitmapId, LabelId, LayerId};

use crate::geometry::Point;

/// Errors that can occur while issuing draw commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Draw queue is full
    QueueFull,
    /// Command could not be framed
    Encode,
    /// Coordinate outside the wire range
    OutOfRange,
}

/// Trait for driving the watchface layers
///
/// The face is a fixed scene; the watch only updates text, swaps bitmaps,
/// moves the needle and crops or hides layers.
pub trait WatchfaceDisplay {
    /// Replace the text of a label
    fn set_text(&mut self, label: LabelId, text: &str) -> Result<(), DisplayError>;

    /// Show a bitmap on a layer
    fn set_bitmap(&mut self, layer: LayerId, bitmap: BitmapId) -> Result<(), DisplayError>;

    /// Move a layer's origin in screen coordinates
    fn move_layer(&mut self, layer: LayerId, origin: Point) -> Result<(), DisplayError>;

    /// Show or hide a layer
    fn set_visible(&mut self, layer: LayerId, visible: bool) -> Result<(), DisplayError>;

    /// Crop a layer to `width` pixels
    fn set_width(&mut self, layer: LayerId, width: u8) -> Result<(), DisplayError>;
}
