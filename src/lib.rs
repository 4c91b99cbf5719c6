//! Analog watch face engine.
//!
//! Turns a snapshot of wall-clock time, battery status, wireless-link
//! state and daily step count into an ordered list of drawing primitives
//! for a small round display, and decides when the next redraw fires.
//!
//! The crate is pure computation: host concerns (display driver, tick
//! services, notification subscriptions, vibration motor) live in a host
//! adapter that drives [`events::Core`] and rasterizes
//! [`ui::Frame`] onto its own draw target.

#![cfg_attr(not(test), no_std)]

pub mod alert;
pub mod events;
pub mod scheduler;
pub mod state;
pub mod ui;

pub use events::{Core, Effect, Event};
pub use scheduler::{RedrawScheduler, TickSource};
pub use state::{BatteryInfo, StateStore, WatchFaceState};
pub use ui::{AnalogWatchface, Frame, Primitive, WatchFace};
