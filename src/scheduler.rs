//! Redraw scheduling.
//!
//! Firings land on interval-aligned second boundaries rather than at
//! "now + interval", so a 20 s interval redraws at :00, :20 and :40 of
//! every minute no matter when it was armed. There is no catch-up: a
//! missed firing is simply followed by the next aligned one.

use embassy_time::Duration;

/// Longest supported redraw interval (one hour).
const MAX_INTERVAL_SECS: u32 = 3_600;

/// Host tick service that drives redraws for a given interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickSource {
    /// Native once-per-second tick, no re-arming needed.
    Second,
    /// Self-re-arming one-shot timer.
    Timer,
    /// Native once-per-minute tick.
    Minute,
}

/// Decides the instant of the next redraw.
pub struct RedrawScheduler {
    interval_secs: u32,
}

impl RedrawScheduler {
    /// Create a scheduler, normalizing the interval into the supported
    /// domain: at least one second, whole minutes above 59 s, at most
    /// one hour.
    pub fn new(interval_secs: u32) -> Self {
        let interval_secs = match interval_secs {
            0 => 1,
            1..=59 => interval_secs,
            _ => (interval_secs.min(MAX_INTERVAL_SECS) / 60) * 60,
        };
        Self { interval_secs }
    }

    /// Normalized redraw interval in seconds.
    pub fn interval_secs(&self) -> u32 {
        self.interval_secs
    }

    /// Tick service the host should drive this schedule with.
    pub fn tick_source(&self) -> TickSource {
        match self.interval_secs {
            1 => TickSource::Second,
            2..=59 => TickSource::Timer,
            _ => TickSource::Minute,
        }
    }

    /// Delay until the next interval-aligned firing, given the current
    /// second of the minute.
    ///
    /// An already-aligned second yields one full interval; an immediate
    /// re-fire is never requested.
    pub fn delay_to_next(&self, second_of_minute: u32) -> Duration {
        let rem = second_of_minute % self.interval_secs;
        let secs = if rem == 0 {
            self.interval_secs
        } else {
            self.interval_secs - rem
        };
        Duration::from_millis(u64::from(secs) * 1_000)
    }
}
