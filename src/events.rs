//! Host-facing event port.
//!
//! The host adapter owns every host API: tick services, the one-shot
//! timer, notification subscriptions, the vibration motor and the
//! display. It forwards decoded updates into [`Core::handle`] and
//! carries out the effects that come back, so the core never touches a
//! host type.
//!
//! Adapter contract: a failed subscription setup aborts startup after
//! releasing whatever was already acquired — there is no degraded mode.
//! On shutdown, cancel the one-shot timer first, then tear down
//! subscriptions in reverse setup order.

use chrono::{NaiveDateTime, Timelike};
use embassy_time::Duration;
use heapless::Vec;

use crate::alert::alerts_allowed;
use crate::scheduler::{RedrawScheduler, TickSource};
use crate::state::{BatteryInfo, StateStore, WatchFaceState};

/// Most effects a single event can produce.
pub const MAX_EFFECTS: usize = 4;

/// Effects returned from one event.
pub type Effects = Vec<Effect, MAX_EFFECTS>;

/// Decoded input delivered by the host adapter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// A tick-service or one-shot timer firing, carrying the wall clock
    /// sampled at delivery.
    Tick(NaiveDateTime),
    /// Battery status changed.
    Battery(BatteryInfo),
    /// Wireless link came up or went down.
    Link(bool),
    /// Daily step count changed.
    Steps(u32),
}

/// Action the host adapter must carry out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    /// Repaint from [`Core::snapshot`].
    Redraw,
    /// Arm the one-shot timer to fire after the delay.
    Rearm(Duration),
    /// Pulse the vibration motor once.
    Haptic,
}

/// Core state machine: staging, scheduling and alert policy.
pub struct Core {
    store: StateStore,
    scheduler: RedrawScheduler,
}

impl Core {
    /// Create a core redrawing every `interval_secs` (normalized by the
    /// scheduler).
    pub fn new(interval_secs: u32) -> Self {
        Self {
            store: StateStore::new(),
            scheduler: RedrawScheduler::new(interval_secs),
        }
    }

    /// Tick service the host must subscribe to.
    pub fn tick_source(&self) -> TickSource {
        self.scheduler.tick_source()
    }

    /// Normalized redraw interval in seconds.
    pub fn interval_secs(&self) -> u32 {
        self.scheduler.interval_secs()
    }

    /// Latest committed snapshot, valid for exactly one redraw.
    pub fn snapshot(&self) -> WatchFaceState {
        self.store.snapshot()
    }

    /// Commit the first snapshot and kick off the redraw cycle.
    pub fn start(&mut self, now: NaiveDateTime) -> Effects {
        self.redraw(now)
    }

    /// Feed one host event through the core.
    ///
    /// Notification updates stage only; they become visible with the
    /// snapshot committed at the next tick.
    pub fn handle(&mut self, event: Event) -> Effects {
        let mut effects = Effects::new();
        match event {
            Event::Tick(now) => return self.redraw(now),
            Event::Battery(battery) => {
                #[cfg(feature = "defmt")]
                defmt::info!("battery update: {}", battery);
                self.store.set_battery(battery);
            }
            Event::Steps(steps) => self.store.set_steps(steps),
            Event::Link(up) => {
                let was_up = self.store.link_up();
                self.store.set_link(up);
                // A drop gets one buzz, waking hours only. The staged
                // clock is at most one interval stale.
                if was_up && !up && alerts_allowed(self.store.staged_hour()) {
                    #[cfg(feature = "defmt")]
                    defmt::info!("link lost, requesting alert");
                    let _ = effects.push(Effect::Haptic);
                }
            }
        }
        effects
    }

    fn redraw(&mut self, now: NaiveDateTime) -> Effects {
        self.store.set_time(now);
        self.store.commit();

        let mut effects = Effects::new();
        let _ = effects.push(Effect::Redraw);
        if self.scheduler.tick_source() == TickSource::Timer {
            let _ = effects.push(Effect::Rearm(self.scheduler.delay_to_next(now.second())));
        }
        effects
    }
}
