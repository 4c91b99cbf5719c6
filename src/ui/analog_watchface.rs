//! Analog watchface with date, battery, link and step indicators.

use core::fmt::Write;

use chrono::{Datelike, Timelike};
use embedded_graphics::{
    geometry::{Point, Size},
    pixelcolor::{Rgb565, RgbColor, WebColors},
    primitives::Rectangle,
};
use heapless::String;

use super::angles::{self, TURN};
use super::frame::{Frame, Primitive, TEXT_LEN};
use super::WatchFace;
use crate::state::{BatteryInfo, WatchFaceState};

/// Base radial depth of the tick ring in pixels.
const TICK_DEPTH: u32 = 10;

/// Hand lengths as fractions of the face radius.
const HOUR_LENGTH: f32 = 0.45;
const MINUTE_LENGTH: f32 = 0.75;
const SECOND_LENGTH: f32 = 0.9;

/// Hand stroke widths in pixels.
const HOUR_STROKE: u32 = 6;
const MINUTE_STROKE: u32 = 2;
const SECOND_STROKE: u32 = 1;

/// Hub radius in pixels.
const HUB_RADIUS: u32 = 3;

const TICK_COLOR: Rgb565 = Rgb565::WHITE;
const HOUR_HAND_COLOR: Rgb565 = Rgb565::RED;
const MINUTE_HAND_COLOR: Rgb565 = Rgb565::WHITE;
const SECOND_COLOR: Rgb565 = Rgb565::YELLOW;
const HUB_LINKED_COLOR: Rgb565 = Rgb565::WHITE;
const HUB_UNLINKED_COLOR: Rgb565 = Rgb565::CSS_ORANGE;
const DATE_COLOR: Rgb565 = Rgb565::CSS_PALE_TURQUOISE;

/// Number of battery bar segments.
const BATTERY_SEGMENTS: usize = 10;

/// Per-position battery segment colors: alert, transitional, nominal,
/// high.
const BATTERY_RAMP: [Rgb565; BATTERY_SEGMENTS] = [
    Rgb565::RED,
    Rgb565::CSS_ORANGE,
    Rgb565::YELLOW,
    Rgb565::GREEN,
    Rgb565::GREEN,
    Rgb565::GREEN,
    Rgb565::GREEN,
    Rgb565::GREEN,
    Rgb565::CSS_DODGER_BLUE,
    Rgb565::CSS_DODGER_BLUE,
];

/// Battery bar geometry along the bottom edge.
const BAR_HEIGHT: u32 = 3;
const BAR_MARGIN: i32 = 2;

/// Corner marks (flat battery, external power).
const MARK_SIZE: u32 = 6;
const FLAT_MARK_COLOR: Rgb565 = Rgb565::RED;
const CHARGING_MARK_COLOR: Rgb565 = Rgb565::CSS_LIME_GREEN;
const PLUGGED_MARK_COLOR: Rgb565 = Rgb565::CSS_ORANGE;

/// Steps represented by one tick of the step bar.
const STEPS_PER_TICK: u32 = 1_000;

/// Step tick gradient, indexed by tick position and saturating at the
/// last entry.
const STEP_GRADIENT: [Rgb565; 11] = [
    Rgb565::RED,
    Rgb565::CSS_ORANGE_RED,
    Rgb565::CSS_ORANGE,
    Rgb565::CSS_GOLD,
    Rgb565::YELLOW,
    Rgb565::CSS_GREEN_YELLOW,
    Rgb565::CSS_LIME_GREEN,
    Rgb565::CSS_FOREST_GREEN,
    Rgb565::CSS_SEA_GREEN,
    Rgb565::CSS_ROYAL_BLUE,
    Rgb565::CSS_LIGHT_BLUE,
];

/// Tick position of the 10 000 step milestone.
const MILESTONE_TICK: u32 = 10;
const MILESTONE_COLOR: Rgb565 = Rgb565::WHITE;

/// Step bar geometry up the right edge.
const STEP_TICK_SIZE: Size = Size::new(3, 4);
const STEP_TICK_PITCH: i32 = 6;
const STEP_BAR_BOTTOM_INSET: i32 = 12;
const STEP_TICK_RIGHT_INSET: i32 = 5;

/// Analog watchface layout engine.
pub struct AnalogWatchface {
    interval_secs: u32,
}

impl AnalogWatchface {
    /// Create a face whose second indicator is quantized to the redraw
    /// interval.
    pub fn new(interval_secs: u32) -> Self {
        Self {
            interval_secs: interval_secs.max(1),
        }
    }

    /// Twelve tick marks around the rim; every third position is wider
    /// and deeper.
    fn tick_ring(&self, frame: &mut Frame, center: Point, radius: i32) {
        for i in 1..=12 {
            let cardinal = i % 3 == 0;
            let half_width = if cardinal {
                TURN * 8 / 1_800
            } else {
                TURN * 33 / 18_000
            };
            let depth = if cardinal {
                TICK_DEPTH * 12 / 10
            } else {
                TICK_DEPTH * 8 / 10
            };
            let angle = TURN * i / 12;
            frame.push(Primitive::Wedge {
                center,
                radius,
                depth,
                start: angles::normalize(angle - half_width),
                sweep: half_width * 2,
                color: TICK_COLOR,
            });
        }
    }

    fn hands(&self, frame: &mut Frame, state: &WatchFaceState, center: Point, radius: i32) {
        let time = state.time;
        let hour_angle = angles::hour_angle(time.hour(), time.minute());
        let minute_angle = angles::minute_angle(time.minute(), time.second());

        frame.push(Primitive::Line {
            start: center,
            end: angles::tip_point(center, radius, hour_angle, HOUR_LENGTH),
            color: HOUR_HAND_COLOR,
            stroke_width: HOUR_STROKE,
        });
        frame.push(Primitive::Line {
            start: center,
            end: angles::tip_point(center, radius, minute_angle, MINUTE_LENGTH),
            color: MINUTE_HAND_COLOR,
            stroke_width: MINUTE_STROKE,
        });

        let second_angle = angles::second_angle(time.second(), self.interval_secs);
        match self.interval_secs {
            1 => frame.push(Primitive::Line {
                start: center,
                end: angles::tip_point(center, radius, second_angle, SECOND_LENGTH),
                color: SECOND_COLOR,
                stroke_width: SECOND_STROKE,
            }),
            2..=59 => {
                // No continuous hand at this cadence; one rim wedge per
                // 5-second slot trails the quantized position instead.
                for k in 0..(self.interval_secs / 5) {
                    let slot = (5 * k) as i32;
                    frame.push(Primitive::Wedge {
                        center,
                        radius,
                        depth: TICK_DEPTH / 4,
                        start: angles::normalize(second_angle + TURN * (slot + 1) / 60),
                        sweep: TURN * 3 / 60,
                        color: SECOND_COLOR,
                    });
                }
            }
            _ => {}
        }
    }

    fn hub(&self, frame: &mut Frame, state: &WatchFaceState, center: Point) {
        let color = if state.link_up {
            HUB_LINKED_COLOR
        } else {
            HUB_UNLINKED_COLOR
        };
        frame.push(Primitive::Circle {
            center,
            diameter: HUB_RADIUS * 2 + 1,
            color,
        });
    }

    fn date_label(&self, frame: &mut Frame, state: &WatchFaceState, bounds: Rectangle) {
        let month = match state.time.month0() {
            0 => "Jan",
            1 => "Feb",
            2 => "Mar",
            3 => "Apr",
            4 => "May",
            5 => "Jun",
            6 => "Jul",
            7 => "Aug",
            8 => "Sep",
            9 => "Oct",
            10 => "Nov",
            11 => "Dec",
            _ => "",
        };
        let mut text: String<TEXT_LEN> = String::new();
        let _ = write!(
            text,
            "{} {:02}\n{}",
            month,
            state.time.day(),
            state.time.weekday()
        );
        frame.push(Primitive::Text {
            text,
            area: Rectangle::new(
                Point::new(bounds.top_left.x, bounds.top_left.y - 7),
                Size::new(bounds.size.width / 2, bounds.size.height),
            ),
            color: DATE_COLOR,
        });
    }

    fn battery_bar(&self, frame: &mut Frame, battery: &BatteryInfo, bounds: Rectangle) {
        let bottom = bounds.top_left.y + bounds.size.height as i32;
        let right = bounds.top_left.x + bounds.size.width as i32;
        let bar_y = bottom - BAR_MARGIN - BAR_HEIGHT as i32;
        let segment_width = bounds.size.width / BATTERY_SEGMENTS as u32;

        let percent = u32::from(battery.percent().min(100));
        let filled = (((percent + 4) / 10) as usize).min(BATTERY_SEGMENTS);

        for (i, color) in BATTERY_RAMP.iter().enumerate().take(filled) {
            frame.push(Primitive::Rect {
                area: Rectangle::new(
                    Point::new(bounds.top_left.x + i as i32 * segment_width as i32, bar_y),
                    Size::new(segment_width.saturating_sub(1), BAR_HEIGHT),
                ),
                color: *color,
            });
        }

        if filled == 0 {
            // A flat battery still deserves a mark, not a blank edge.
            frame.push(Primitive::Rect {
                area: Rectangle::new(
                    Point::new(bounds.top_left.x + BAR_MARGIN, bottom - BAR_MARGIN - MARK_SIZE as i32),
                    Size::new(MARK_SIZE, MARK_SIZE),
                ),
                color: FLAT_MARK_COLOR,
            });
        }

        if battery.plugged() {
            let color = if battery.charging() {
                CHARGING_MARK_COLOR
            } else {
                PLUGGED_MARK_COLOR
            };
            frame.push(Primitive::Rect {
                area: Rectangle::new(
                    Point::new(
                        right - BAR_MARGIN - MARK_SIZE as i32,
                        bottom - BAR_MARGIN - MARK_SIZE as i32,
                    ),
                    Size::new(MARK_SIZE, MARK_SIZE),
                ),
                color,
            });
        }
    }

    fn step_bar(&self, frame: &mut Frame, steps: u32, bounds: Rectangle) {
        let bottom = bounds.top_left.y + bounds.size.height as i32;
        let right = bounds.top_left.x + bounds.size.width as i32;

        // Only as many ticks as fit along the edge.
        let max_ticks =
            (bounds.size.height as i32 - STEP_BAR_BOTTOM_INSET).max(0) as u32 / STEP_TICK_PITCH as u32;
        let ticks = (steps / STEPS_PER_TICK).min(max_ticks);

        for i in 0..ticks {
            let color = STEP_GRADIENT[(i as usize).min(STEP_GRADIENT.len() - 1)];
            frame.push(Primitive::Rect {
                area: Rectangle::new(
                    Point::new(
                        right - STEP_TICK_RIGHT_INSET,
                        bottom - STEP_BAR_BOTTOM_INSET - i as i32 * STEP_TICK_PITCH,
                    ),
                    STEP_TICK_SIZE,
                ),
                color,
            });
        }

        if ticks >= MILESTONE_TICK {
            frame.push(Primitive::Rect {
                area: Rectangle::new(
                    Point::new(
                        right - STEP_TICK_RIGHT_INSET - 3,
                        bottom - STEP_BAR_BOTTOM_INSET - MILESTONE_TICK as i32 * STEP_TICK_PITCH,
                    ),
                    Size::new(STEP_TICK_SIZE.width + 3, STEP_TICK_SIZE.height),
                ),
                color: MILESTONE_COLOR,
            });
        }
    }
}

impl WatchFace for AnalogWatchface {
    fn layout(&self, state: &WatchFaceState, bounds: Rectangle) -> Frame {
        let mut frame = Frame::new();
        let center = Point::new(
            bounds.top_left.x + bounds.size.width as i32 / 2,
            bounds.top_left.y + bounds.size.height as i32 / 2,
        );
        let radius = bounds.size.width.min(bounds.size.height) as i32 / 2;

        self.tick_ring(&mut frame, center, radius);
        self.hands(&mut frame, state, center, radius);
        self.hub(&mut frame, state, center);
        self.date_label(&mut frame, state, bounds);
        self.battery_bar(&mut frame, &state.battery, bounds);
        self.step_bar(&mut frame, state.steps, bounds);
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    const BOUNDS: Rectangle = Rectangle::new(Point::zero(), Size::new(240, 240));

    fn state_at(hour: u32, minute: u32, second: u32) -> WatchFaceState {
        WatchFaceState {
            time: NaiveDate::from_ymd_opt(2024, 3, 3)
                .unwrap()
                .and_hms_opt(hour, minute, second)
                .unwrap(),
            battery: BatteryInfo::new(80, false, false),
            link_up: true,
            steps: 0,
        }
    }

    fn datetime(y: i32, mo: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(10, 15, 30)
            .unwrap()
    }

    fn wedges(frame: &Frame) -> impl Iterator<Item = &Primitive> {
        frame
            .primitives()
            .iter()
            .filter(|p| matches!(p, Primitive::Wedge { .. }))
    }

    fn rects_of_size(frame: &Frame, size: Size) -> usize {
        frame
            .primitives()
            .iter()
            .filter(|p| matches!(p, Primitive::Rect { area, .. } if area.size == size))
            .count()
    }

    #[test]
    fn layout_is_idempotent() {
        let face = AnalogWatchface::new(5);
        let state = state_at(10, 8, 47);
        assert_eq!(
            face.layout(&state, BOUNDS),
            face.layout(&state, BOUNDS),
            "identical snapshot and bounds must produce an identical frame"
        );
    }

    #[test]
    fn tick_ring_has_twelve_wedges_in_two_sizes() {
        let face = AnalogWatchface::new(60);
        let frame = face.layout(&state_at(10, 8, 0), BOUNDS);

        let deep = wedges(&frame)
            .filter(|p| matches!(p, Primitive::Wedge { depth: 12, .. }))
            .count();
        let shallow = wedges(&frame)
            .filter(|p| matches!(p, Primitive::Wedge { depth: 8, .. }))
            .count();
        assert_eq!(deep, 4, "cardinal ticks at 3, 6, 9 and 12");
        assert_eq!(shallow, 8);
    }

    #[test]
    fn second_indicator_follows_interval() {
        let state = state_at(10, 8, 47);

        // Per-second cadence: a true second hand, no rim wedges.
        let frame = AnalogWatchface::new(1).layout(&state, BOUNDS);
        let second_hands = frame
            .primitives()
            .iter()
            .filter(|p| matches!(p, Primitive::Line { stroke_width: 1, .. }))
            .count();
        assert_eq!(second_hands, 1);
        assert_eq!(wedges(&frame).count(), 12, "tick ring only");

        // 20 s cadence: four rim wedges, one per 5-second slot.
        let frame = AnalogWatchface::new(20).layout(&state, BOUNDS);
        assert_eq!(wedges(&frame).count(), 12 + 4);

        // Minute cadence and slower: no second indicator at all.
        let frame = AnalogWatchface::new(60).layout(&state, BOUNDS);
        assert_eq!(wedges(&frame).count(), 12);
        let second_hands = frame
            .primitives()
            .iter()
            .filter(|p| matches!(p, Primitive::Line { stroke_width: 1, .. }))
            .count();
        assert_eq!(second_hands, 0);
    }

    #[test]
    fn hub_color_encodes_link_state() {
        let face = AnalogWatchface::new(5);
        let mut state = state_at(10, 8, 0);

        let frame = face.layout(&state, BOUNDS);
        assert!(frame
            .primitives()
            .iter()
            .any(|p| matches!(p, Primitive::Circle { color, .. } if *color == HUB_LINKED_COLOR)));

        state.link_up = false;
        let frame = face.layout(&state, BOUNDS);
        assert!(frame
            .primitives()
            .iter()
            .any(|p| matches!(p, Primitive::Circle { color, .. } if *color == HUB_UNLINKED_COLOR)));
    }

    #[test]
    fn date_label_text() {
        let face = AnalogWatchface::new(5);
        let mut state = state_at(0, 0, 0);
        state.time = datetime(2024, 3, 3);

        let frame = face.layout(&state, BOUNDS);
        let text = frame
            .primitives()
            .iter()
            .find_map(|p| match p {
                Primitive::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .expect("frame should carry a date label");
        assert_eq!(text, "Mar 03\nSun");

        state.time = datetime(2025, 12, 31);
        let frame = face.layout(&state, BOUNDS);
        assert!(frame
            .primitives()
            .iter()
            .any(|p| matches!(p, Primitive::Text { text, .. } if text.as_str() == "Dec 31\nWed")));
    }

    fn battery_frame(percent: u8, plugged: bool, charging: bool) -> Frame {
        let mut state = state_at(10, 8, 0);
        state.battery = BatteryInfo::new(percent, plugged, charging);
        AnalogWatchface::new(60).layout(&state, BOUNDS)
    }

    #[test]
    fn battery_segment_count() {
        let segment_size = Size::new(23, BAR_HEIGHT);
        assert_eq!(rects_of_size(&battery_frame(100, false, false), segment_size), 10);
        assert_eq!(
            rects_of_size(&battery_frame(55, false, false), segment_size),
            5,
            "55 percent rounds to five segments"
        );
        assert_eq!(rects_of_size(&battery_frame(5, false, false), segment_size), 0);
        assert_eq!(rects_of_size(&battery_frame(6, false, false), segment_size), 1);
        assert_eq!(rects_of_size(&battery_frame(0, false, false), segment_size), 0);
    }

    #[test]
    fn flat_battery_shows_alert_mark() {
        let mark_size = Size::new(MARK_SIZE, MARK_SIZE);
        let frame = battery_frame(0, false, false);
        assert_eq!(rects_of_size(&frame, mark_size), 1, "flat battery draws the corner mark");

        let frame = battery_frame(100, false, false);
        assert_eq!(rects_of_size(&frame, mark_size), 0);
    }

    #[test]
    fn external_power_marks() {
        let mark_size = Size::new(MARK_SIZE, MARK_SIZE);

        let frame = battery_frame(50, true, true);
        assert!(frame
            .primitives()
            .iter()
            .any(|p| matches!(p, Primitive::Rect { area, color }
                if area.size == mark_size && *color == CHARGING_MARK_COLOR)));

        let frame = battery_frame(50, true, false);
        assert!(frame
            .primitives()
            .iter()
            .any(|p| matches!(p, Primitive::Rect { area, color }
                if area.size == mark_size && *color == PLUGGED_MARK_COLOR)));

        let frame = battery_frame(50, false, false);
        assert_eq!(rects_of_size(&frame, mark_size), 0);
    }

    fn step_frame(steps: u32) -> Frame {
        let mut state = state_at(10, 8, 0);
        state.steps = steps;
        AnalogWatchface::new(60).layout(&state, BOUNDS)
    }

    #[test]
    fn step_ticks_per_thousand() {
        assert_eq!(rects_of_size(&step_frame(0), STEP_TICK_SIZE), 0);
        assert_eq!(rects_of_size(&step_frame(999), STEP_TICK_SIZE), 0);
        assert_eq!(rects_of_size(&step_frame(2_500), STEP_TICK_SIZE), 2);
        assert_eq!(rects_of_size(&step_frame(11_000), STEP_TICK_SIZE), 11);
    }

    #[test]
    fn step_gradient_saturates_past_table_end() {
        let frame = step_frame(13_000);
        let last = *STEP_GRADIENT.last().unwrap();
        let saturated = frame
            .primitives()
            .iter()
            .filter(|p| matches!(p, Primitive::Rect { area, color }
                if area.size == STEP_TICK_SIZE && *color == last))
            .count();
        // Ticks 10, 11 and 12 all reuse the final gradient entry.
        assert_eq!(saturated, 3);
    }

    #[test]
    fn milestone_tick_at_ten_thousand() {
        let milestone_size = Size::new(STEP_TICK_SIZE.width + 3, STEP_TICK_SIZE.height);
        assert_eq!(rects_of_size(&step_frame(9_999), milestone_size), 0);
        assert_eq!(rects_of_size(&step_frame(10_000), milestone_size), 1);
        assert_eq!(rects_of_size(&step_frame(11_000), milestone_size), 1);
    }

    #[test]
    fn oversized_step_counts_stay_on_canvas() {
        let frame = step_frame(u32::MAX);
        // 240 px tall canvas: (240 - 12) / 6 = 38 tick positions.
        assert_eq!(rects_of_size(&frame, STEP_TICK_SIZE), 38);
        for p in frame.primitives() {
            if let Primitive::Rect { area, .. } = p {
                assert!(area.top_left.y >= 0, "tick pushed off the canvas top");
            }
        }
    }

    #[test]
    fn degenerate_bounds_collapse_to_center() {
        let face = AnalogWatchface::new(5);
        let bounds = Rectangle::new(Point::new(20, 20), Size::zero());
        let frame = face.layout(&state_at(10, 8, 47), bounds);

        let center = Point::new(20, 20);
        for p in frame.primitives() {
            match p {
                Primitive::Line { start, end, .. } => {
                    assert_eq!(*start, center);
                    assert_eq!(*end, center, "hands must collapse to the center point");
                }
                Primitive::Wedge { radius, .. } => assert_eq!(*radius, 0),
                Primitive::Circle { center: c, .. } => assert_eq!(*c, center),
                _ => {}
            }
        }
    }

    #[test]
    fn paint_order_puts_hands_over_ticks_and_hub_over_hands() {
        let face = AnalogWatchface::new(1);
        let frame = face.layout(&state_at(10, 8, 47), BOUNDS);
        let primitives = frame.primitives();

        let last_wedge = primitives
            .iter()
            .rposition(|p| matches!(p, Primitive::Wedge { .. }))
            .unwrap();
        let first_line = primitives
            .iter()
            .position(|p| matches!(p, Primitive::Line { .. }))
            .unwrap();
        let hub = primitives
            .iter()
            .position(|p| matches!(p, Primitive::Circle { .. }))
            .unwrap();
        assert!(last_wedge < first_line, "tick ring paints before the hands");
        assert!(first_line < hub, "hub paints over the hands");
    }
}
