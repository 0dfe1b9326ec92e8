//! # LED Segment Shapes
//!
//! One lit bar of a seven-segment digit. A bar is built around its own
//! origin: it extends `2 + start` units one way and `2 + end` units the other,
//! one unit thick, and each end is either a blunt point or a mitred corner.
//! The final outline is always eight vertices.

use crate::geometry::Vec2;
use crate::surface::{DrawContext, PolygonKind};
use crate::transform::StackError;
use serde::{Deserialize, Serialize};
use std::ops::BitOr;

/// Nominal half-length of a bar in raw units.
pub const LED_WIDTH: f64 = 2.0;

/// End-cap flags for a segment.
///
/// Only the `*_RIGHT` variants move a vertex; `*_LEFT` names the default
/// orientation of a mitred end. A `*_RIGHT` flag without its matching
/// `SHARP_*` flag has no effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentFlags(u8);

impl SegmentFlags {
    pub const NONE: Self = Self(0);
    pub const SHARP_START: Self = Self(1);
    pub const SHARP_END: Self = Self(2);
    pub const SHARP_START_LEFT: Self = Self(4);
    pub const SHARP_START_RIGHT: Self = Self(8);
    pub const SHARP_END_RIGHT: Self = Self(16);
    pub const SHARP_END_LEFT: Self = Self(32);

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & 0b11_1111)
    }
}

impl BitOr for SegmentFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// Shape parameters for one bar. All zero is a blunt, nominal-length bar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub flags: SegmentFlags,
    /// Extra length at the start end. Negative values shorten the bar.
    pub start: f64,
    /// Extra length at the end end.
    pub end: f64,
    /// Offset of the whole bar along its long axis.
    pub shift: f64,
}

impl Segment {
    pub const BLUNT: Segment = Segment {
        flags: SegmentFlags::NONE,
        start: 0.0,
        end: 0.0,
        shift: 0.0,
    };

    pub const fn with_flags(self, flags: SegmentFlags) -> Self {
        Segment { flags, ..self }
    }

    pub const fn with_start(self, start: f64) -> Self {
        Segment { start, ..self }
    }

    pub const fn with_end(self, end: f64) -> Self {
        Segment { end, ..self }
    }

    pub const fn with_shift(self, shift: f64) -> Self {
        Segment { shift, ..self }
    }

    /// The bar's outline in raw units, before scaling and shifting.
    ///
    /// Vertices run counter-clockwise: base edge toward the start end, the
    /// start cap, the top edge, the end cap, and back.
    pub fn outline(&self) -> [Vec2; 8] {
        let start_width = LED_WIDTH + self.start;
        let end_width = LED_WIDTH + self.end;
        let flags = self.flags;

        let start_cap = if flags.contains(SegmentFlags::SHARP_START) {
            if flags.contains(SegmentFlags::SHARP_START_RIGHT) {
                Vec2::new(start_width + 0.5, 0.5)
            } else {
                Vec2::new(start_width + 0.5, -0.5)
            }
        } else {
            Vec2::new(start_width, 0.0)
        };

        let end_cap = if flags.contains(SegmentFlags::SHARP_END) {
            if flags.contains(SegmentFlags::SHARP_END_RIGHT) {
                Vec2::new(-end_width - 0.5, -0.5)
            } else {
                Vec2::new(-end_width - 0.5, 0.5)
            }
        } else {
            Vec2::new(-end_width, 0.0)
        };

        [
            Vec2::new(0.0, -0.5),
            Vec2::new(start_width - 0.5, -0.5),
            start_cap,
            Vec2::new(start_width - 0.5, 0.5),
            Vec2::new(0.0, 0.5),
            Vec2::new(-(end_width - 0.5), 0.5),
            end_cap,
            Vec2::new(-(end_width - 0.5), -0.5),
        ]
    }
}

/// Draw one bar into the current transform.
///
/// The `1 / LED_WIDTH²` scale keeps `start`/`end` tweaks, which are entered
/// in raw units, in proportion with the nominal bar.
pub fn draw_segment(
    ctx: &mut DrawContext<'_>,
    kind: PolygonKind,
    segment: &Segment,
) -> Result<(), StackError> {
    ctx.scoped(|ctx| {
        ctx.scale(1.0 / LED_WIDTH);
        ctx.scale(1.0 / LED_WIDTH);
        ctx.translate(segment.shift, 0.0);
        ctx.fill(kind, &segment.outline());
        Ok(())
    })
}
