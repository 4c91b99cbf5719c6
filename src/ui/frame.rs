//! Retained drawing primitives and their rasterization.
//!
//! The layout engine emits a flat list of primitives in paint order; the
//! host hands the list a draw target whenever it wants pixels. Keeping
//! the list as plain data makes layout testable without a framebuffer.

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{Angle, Point},
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    primitives::{Arc, Circle, Line, Primitive as _, PrimitiveStyle, Rectangle},
    Drawable,
};
use embedded_text::{
    alignment::HorizontalAlignment,
    style::{HeightMode, TextBoxStyleBuilder},
    TextBox,
};
use heapless::{String, Vec};
use profont::PROFONT_18_POINT;

use super::angles::to_degrees;

/// Longest text a single label primitive can carry.
pub const TEXT_LEN: usize = 16;

/// Upper bound on primitives per frame.
pub const FRAME_CAPACITY: usize = 96;

/// One drawing command.
///
/// Coordinates are integer pixels with origin top-left. Wedge angles are
/// in turn units with 0 at 12 o'clock, increasing clockwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Primitive {
    /// Straight stroked segment.
    Line {
        start: Point,
        end: Point,
        color: Rgb565,
        stroke_width: u32,
    },
    /// Filled annular sector hanging inward from the face rim:
    /// radially `radius - depth ..= radius`, angularly `start ..
    /// start + sweep`.
    Wedge {
        center: Point,
        radius: i32,
        depth: u32,
        start: i32,
        sweep: i32,
        color: Rgb565,
    },
    /// Filled circle.
    Circle {
        center: Point,
        diameter: u32,
        color: Rgb565,
    },
    /// Filled axis-aligned rectangle.
    Rect { area: Rectangle, color: Rgb565 },
    /// Left-aligned, word-wrapped text block.
    Text {
        text: String<TEXT_LEN>,
        area: Rectangle,
        color: Rgb565,
    },
}

/// An ordered list of primitives for one redraw.
///
/// Later primitives paint over earlier ones; there is no other
/// z-ordering.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    primitives: Vec<Primitive, FRAME_CAPACITY>,
}

impl Frame {
    pub const fn new() -> Self {
        Self {
            primitives: Vec::new(),
        }
    }

    /// Append a primitive.
    ///
    /// A full frame drops the primitive: incomplete output is preferable
    /// to a failed redraw.
    pub fn push(&mut self, primitive: Primitive) {
        let _ = self.primitives.push(primitive);
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Rasterize the frame in order onto `target`.
    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        for primitive in &self.primitives {
            match primitive {
                Primitive::Line {
                    start,
                    end,
                    color,
                    stroke_width,
                } => {
                    Line::new(*start, *end)
                        .into_styled(PrimitiveStyle::with_stroke(*color, *stroke_width))
                        .draw(target)?;
                }
                Primitive::Wedge {
                    center,
                    radius,
                    depth,
                    start,
                    sweep,
                    color,
                } => {
                    let radius = (*radius).max(0) as u32;
                    let depth = (*depth).min(radius);
                    if depth == 0 {
                        continue;
                    }
                    // Stroke an arc whose circle runs through the middle
                    // of the band, so the stroke covers
                    // [radius - depth, radius].
                    let diameter = 2 * radius - depth;
                    let (angle_start, angle_sweep) = arc_angles(*start, *sweep);
                    Arc::with_center(*center, diameter, angle_start, angle_sweep)
                        .into_styled(PrimitiveStyle::with_stroke(*color, depth))
                        .draw(target)?;
                }
                Primitive::Circle {
                    center,
                    diameter,
                    color,
                } => {
                    Circle::with_center(*center, *diameter)
                        .into_styled(PrimitiveStyle::with_fill(*color))
                        .draw(target)?;
                }
                Primitive::Rect { area, color } => {
                    area.into_styled(PrimitiveStyle::with_fill(*color))
                        .draw(target)?;
                }
                Primitive::Text { text, area, color } => {
                    if area.size.width == 0 {
                        continue;
                    }
                    let character_style = MonoTextStyle::new(&PROFONT_18_POINT, *color);
                    let textbox_style = TextBoxStyleBuilder::new()
                        .height_mode(HeightMode::FitToText)
                        .alignment(HorizontalAlignment::Left)
                        .build();
                    TextBox::with_textbox_style(text.as_str(), *area, character_style, textbox_style)
                        .draw(target)?;
                }
            }
        }
        Ok(())
    }
}

/// Clockwise-from-12 turn units → the counterclockwise-from-3-o'clock
/// degrees that [`Arc`] expects. The band is a direction set, so the
/// sweep runs backwards across it from the converted end angle.
fn arc_angles(start: i32, sweep: i32) -> (Angle, Angle) {
    (
        Angle::from_degrees(90.0 - to_degrees(start + sweep)),
        Angle::from_degrees(to_degrees(sweep)),
    )
}
