//! UI definitions module

use embedded_graphics::primitives::Rectangle;

use crate::state::WatchFaceState;

pub mod analog_watchface;
pub mod angles;
pub mod frame;

pub use analog_watchface::AnalogWatchface;
pub use frame::{Frame, Primitive};

/// A watch face layout engine.
pub trait WatchFace {
    /// Lay out one frame for the given state within the canvas bounds.
    ///
    /// Pure: identical state and bounds produce an identical frame.
    fn layout(&self, state: &WatchFaceState, bounds: Rectangle) -> Frame;
}
