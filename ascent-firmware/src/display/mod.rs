//! Display co-processor link
//!
//! The face bitmaps live on the display co-processor. The watch drives it
//! over UART1 with framed draw commands: text updates, bitmap swaps, layer
//! moves, visibility and crop width. No replies are expected.

pub mod renderer;

pub use renderer::FrameDisplay;
