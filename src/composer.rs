//! # Clock Face Composition
//!
//! Lays out the `HH:MM:SS` readout from digit glyphs and colon marks.
//!
//! Every glyph is positioned by composing transforms on the frame's stack:
//! the scene applies an italic slant and shrinks the readout into view,
//! each digit sits at a fixed pitch from the previous one, and each bar sits
//! at its slot within the digit cell.
//!
//! The whole readout is drawn five times per frame. Four dim copies offset
//! by a hair in each direction bleed around the edges of the bars, then one
//! bright copy lands on top. That is what makes the bars look like lit LEDs
//! rather than flat shapes.

use crate::digits::{definition, Digit, SegmentSlot, SLOT_SPACING};
use crate::geometry::{Mat4, Vec2};
use crate::segment::draw_segment;
use crate::surface::{DrawContext, PolygonKind, Rgb};
use crate::time24::TimeOfDay;
use crate::transform::StackError;

/// Advance from a tens digit to its ones digit.
pub const DIGIT_PITCH: f64 = 0.78;
/// Advance from a ones digit to the following colon.
pub const COLON_LEAD: f64 = 0.59;
/// Advance from a colon to the next tens digit.
pub const COLON_TRAIL: f64 = 0.55;

/// Centering offsets are tiny; they are amplified by this before use.
const CENTERING_GAIN: f64 = 4.0;

pub const COLON_DOT_SIZE: f64 = 0.12;
const COLON_UPPER_DROP: f64 = 0.2;
const COLON_LOWER_DROP: f64 = 0.36;

/// Slant of the italic readout (`x' = x + SLANT * y`).
pub const SLANT: f64 = 0.14;
const SCENE_SHIFT: f64 = -0.7;
const SCENE_SCALE: f64 = 0.3;

/// Offsets of the four glow copies.
pub const GLOW_OFFSETS: [(f64, f64); 4] = [(-0.01, 0.0), (0.01, 0.0), (0.0, -0.01), (0.0, 0.01)];

const LED_R: f64 = 160.0;
const LED_G: f64 = 148.0;
const LED_B: f64 = 30.0;

/// Color of the four offset glow copies.
pub fn glow_color() -> Rgb {
    Rgb::scaled(LED_R, LED_G, LED_B, 377.0)
}

/// Color of the final crisp copy.
pub fn lit_color() -> Rgb {
    Rgb::scaled(LED_R, LED_G, LED_B, 255.0)
}

fn place_slot(ctx: &mut DrawContext<'_>, slot: SegmentSlot) {
    let (dx, dy) = slot.offset();
    ctx.translate(dx, dy);
    if slot.is_vertical() {
        ctx.rotate_z(90.0);
    }
}

/// Draw a digit normalized to a unit cell centred on the current origin.
pub fn draw_digit(ctx: &mut DrawContext<'_>, digit: Digit) -> Result<(), StackError> {
    let def = definition(digit);
    ctx.scoped(|ctx| {
        ctx.scale(1.0 / (2.0 * SLOT_SPACING));
        for lit in def.segments {
            ctx.scoped(|ctx| {
                place_slot(ctx, lit.slot);
                let kind = PolygonKind::Segment {
                    digit,
                    slot: lit.slot,
                };
                draw_segment(ctx, kind, &lit.segment)
            })?;
        }
        Ok(())
    })
}

/// Draw a digit nudged by its centering offset.
pub fn draw_glyph(ctx: &mut DrawContext<'_>, digit: Digit) -> Result<(), StackError> {
    let offset = definition(digit).centering_offset;
    ctx.scoped(|ctx| {
        ctx.translate(offset * CENTERING_GAIN, 0.0);
        draw_digit(ctx, digit)
    })
}

fn colon_square(ctx: &mut DrawContext<'_>) {
    let s = COLON_DOT_SIZE;
    ctx.fill(
        PolygonKind::ColonDot,
        &[
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, s),
            Vec2::new(s, s),
            Vec2::new(s, 0.0),
        ],
    );
}

/// Two stacked dots hanging below the current origin.
pub fn draw_colon(ctx: &mut DrawContext<'_>) -> Result<(), StackError> {
    ctx.scoped(|ctx| {
        ctx.translate(0.0, -COLON_UPPER_DROP);
        colon_square(ctx);
        ctx.translate(0.0, -COLON_LOWER_DROP);
        colon_square(ctx);
        Ok(())
    })
}

/// Draw one copy of the `HH:MM:SS` readout, starting at the current origin.
pub fn draw_clock(ctx: &mut DrawContext<'_>, time: &TimeOfDay) -> Result<(), StackError> {
    let [h1, h0, m1, m0, s1, s0] = time.digits();
    ctx.scoped(|ctx| {
        for (tens, ones, colon) in [(h1, h0, true), (m1, m0, true), (s1, s0, false)] {
            draw_glyph(ctx, tens)?;
            ctx.translate(DIGIT_PITCH, 0.0);
            draw_glyph(ctx, ones)?;
            if colon {
                ctx.translate(COLON_LEAD, 0.0);
                draw_colon(ctx)?;
                ctx.translate(COLON_TRAIL, 0.0);
            }
        }
        Ok(())
    })
}

/// Draw the full scene: slanted, placed, four glow copies and a crisp copy.
pub fn draw_scene(ctx: &mut DrawContext<'_>, time: &TimeOfDay) -> Result<(), StackError> {
    ctx.scoped(|ctx| {
        ctx.multiply(&Mat4::shear_x(SLANT));
        ctx.translate(SCENE_SHIFT, 0.0);
        ctx.scale(SCENE_SCALE);

        ctx.set_color(glow_color());
        for (dx, dy) in GLOW_OFFSETS {
            ctx.scoped(|ctx| {
                ctx.translate(dx, dy);
                draw_clock(ctx, time)
            })?;
        }

        ctx.set_color(lit_color());
        draw_clock(ctx, time)
    })
}
