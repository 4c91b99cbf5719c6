//! Watch state snapshot and staging.

use chrono::{NaiveDateTime, Timelike};

/// Battery status as last reported by the charger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryInfo {
    /// Battery percentage (0–100)
    percent: u8,
    /// External power present
    plugged: bool,
    /// Actively charging (implies `plugged`)
    charging: bool,
}

impl BatteryInfo {
    /// Create a battery status from raw host values.
    ///
    /// The percentage saturates at 100 and the charging flag is forced
    /// consistent with the plugged flag rather than trusted as delivered.
    /// This is the only construction path, so every value in circulation
    /// holds both invariants.
    pub fn new(percent: u8, plugged: bool, charging: bool) -> Self {
        Self {
            percent: percent.min(100),
            plugged,
            charging: charging && plugged,
        }
    }

    /// Battery percentage (0–100).
    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// Whether external power is present.
    pub fn plugged(&self) -> bool {
        self.plugged
    }

    /// Whether the battery is actively charging.
    pub fn charging(&self) -> bool {
        self.charging
    }
}

impl Default for BatteryInfo {
    fn default() -> Self {
        Self::new(100, false, false)
    }
}

/// State for the watch face.
///
/// One consistent set of values, captured together and used for exactly
/// one redraw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WatchFaceState {
    pub time: NaiveDateTime,
    pub battery: BatteryInfo,
    pub link_up: bool,
    pub steps: u32,
}

impl Default for WatchFaceState {
    fn default() -> Self {
        Self {
            time: NaiveDateTime::UNIX_EPOCH,
            battery: BatteryInfo::default(),
            link_up: false,
            steps: 0,
        }
    }
}

/// Staging area for asynchronously delivered status updates.
///
/// Notification updates land here as they arrive and become visible to
/// the renderer only when [`StateStore::commit`] captures the next
/// snapshot. The host event queue serializes all calls; there is no
/// interior mutability.
#[derive(Debug, Default)]
pub struct StateStore {
    staged: WatchFaceState,
    committed: WatchFaceState,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a fresh wall-clock sample.
    pub fn set_time(&mut self, time: NaiveDateTime) {
        self.staged.time = time;
    }

    /// Stage a battery update.
    pub fn set_battery(&mut self, battery: BatteryInfo) {
        self.staged.battery = battery;
    }

    /// Stage a link state change.
    pub fn set_link(&mut self, up: bool) {
        self.staged.link_up = up;
    }

    /// Stage a step count update.
    pub fn set_steps(&mut self, steps: u32) {
        self.staged.steps = steps;
    }

    /// Link state as currently staged.
    pub fn link_up(&self) -> bool {
        self.staged.link_up
    }

    /// Hour of the most recently staged wall-clock sample.
    pub fn staged_hour(&self) -> u32 {
        self.staged.time.hour()
    }

    /// Capture the staged values as the snapshot for the next redraw.
    pub fn commit(&mut self) -> WatchFaceState {
        self.committed = self.staged;
        self.committed
    }

    /// Latest committed snapshot.
    pub fn snapshot(&self) -> WatchFaceState {
        self.committed
    }
}
