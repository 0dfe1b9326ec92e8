//! # Seven-Segment Digit Layouts
//!
//! Which bars are lit for each digit, and how each lit bar is tweaked so the
//! glyphs read like a real LED display: serifed `1` and `7`, mitred joints on
//! `2`, `5` and `6`, slightly longer verticals where bars meet.
//!
//! Slots are positions in the canonical layout; digits are values. The two
//! are separate types so a slot can never be mistaken for a digit.

use crate::segment::{Segment, SegmentFlags};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A decimal digit value.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Digit {
    Zero = 0,
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
}

impl Digit {
    pub const ALL: [Digit; 10] = [
        Digit::Zero,
        Digit::One,
        Digit::Two,
        Digit::Three,
        Digit::Four,
        Digit::Five,
        Digit::Six,
        Digit::Seven,
        Digit::Eight,
        Digit::Nine,
    ];

    /// `None` for anything above 9.
    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Tens and ones digits of a two-digit number (taken modulo 100).
    pub fn pair(n: u8) -> (Digit, Digit) {
        let n = n % 100;
        (Self::ALL[(n / 10) as usize], Self::ALL[(n % 10) as usize])
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Bar position within a digit cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SegmentSlot {
    Top,
    UpperLeft,
    UpperRight,
    Middle,
    LowerLeft,
    LowerRight,
    Bottom,
}

/// Spacing between bar centres within a digit.
pub const SLOT_SPACING: f64 = 1.2;

impl SegmentSlot {
    pub const ALL: [SegmentSlot; 7] = [
        SegmentSlot::Top,
        SegmentSlot::UpperLeft,
        SegmentSlot::UpperRight,
        SegmentSlot::Middle,
        SegmentSlot::LowerLeft,
        SegmentSlot::LowerRight,
        SegmentSlot::Bottom,
    ];

    /// Canonical index: 0 = top, 1/2 = upper left/right, 3 = middle,
    /// 4/5 = lower left/right, 6 = bottom.
    pub const fn index(self) -> usize {
        match self {
            SegmentSlot::Top => 0,
            SegmentSlot::UpperLeft => 1,
            SegmentSlot::UpperRight => 2,
            SegmentSlot::Middle => 3,
            SegmentSlot::LowerLeft => 4,
            SegmentSlot::LowerRight => 5,
            SegmentSlot::Bottom => 6,
        }
    }

    /// Vertical bars are drawn rotated a quarter turn.
    pub const fn is_vertical(self) -> bool {
        matches!(
            self,
            SegmentSlot::UpperLeft
                | SegmentSlot::UpperRight
                | SegmentSlot::LowerLeft
                | SegmentSlot::LowerRight
        )
    }

    /// Offset of the bar's centre from the digit centre, in slot units.
    pub fn offset(self) -> (f64, f64) {
        let half = 0.5 * SLOT_SPACING;
        match self {
            SegmentSlot::Top => (0.0, SLOT_SPACING),
            SegmentSlot::Bottom => (0.0, -SLOT_SPACING),
            SegmentSlot::Middle => (0.0, 0.0),
            SegmentSlot::UpperLeft => (-half, half),
            SegmentSlot::UpperRight => (half, half),
            SegmentSlot::LowerLeft => (-half, -half),
            SegmentSlot::LowerRight => (half, -half),
        }
    }
}

/// A lit bar: where it sits and how it is shaped.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlottedSegment {
    pub slot: SegmentSlot,
    pub segment: Segment,
}

/// The lit bars of one digit, in drawing order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DigitDefinition {
    pub segments: &'static [SlottedSegment],
    /// Horizontal nudge that balances narrow or lopsided glyphs.
    pub centering_offset: f64,
}

impl DigitDefinition {
    pub fn is_lit(&self, slot: SegmentSlot) -> bool {
        self.segments.iter().any(|s| s.slot == slot)
    }
}

const fn lit(slot: SegmentSlot, segment: Segment) -> SlottedSegment {
    SlottedSegment { slot, segment }
}

const fn plain(slot: SegmentSlot) -> SlottedSegment {
    lit(slot, Segment::BLUNT)
}

use SegmentSlot::{Bottom, LowerLeft, LowerRight, Middle, Top, UpperLeft, UpperRight};

const SHARP_START_LEFT: SegmentFlags = SegmentFlags::SHARP_START.union(SegmentFlags::SHARP_START_LEFT);
const SHARP_START_RIGHT: SegmentFlags =
    SegmentFlags::SHARP_START.union(SegmentFlags::SHARP_START_RIGHT);
const SHARP_END_LEFT: SegmentFlags = SegmentFlags::SHARP_END.union(SegmentFlags::SHARP_END_LEFT);
const SHARP_END_RIGHT: SegmentFlags = SegmentFlags::SHARP_END.union(SegmentFlags::SHARP_END_RIGHT);
// Carries a start-side direction without SHARP_START, so only the end is mitred.
const SHARP_END_START_RIGHT: SegmentFlags =
    SegmentFlags::SHARP_END.union(SegmentFlags::SHARP_START_RIGHT);

const ZERO: [SlottedSegment; 6] = [
    plain(Top),
    lit(UpperLeft, Segment::BLUNT.with_end(0.15)),
    lit(UpperRight, Segment::BLUNT.with_end(0.15)),
    lit(LowerLeft, Segment::BLUNT.with_start(0.15)),
    lit(LowerRight, Segment::BLUNT.with_start(0.15)),
    plain(Bottom),
];

const ONE: [SlottedSegment; 3] = [
    lit(
        Top,
        Segment::BLUNT
            .with_start(-1.0)
            .with_end(-1.0)
            .with_shift(1.0)
            .with_flags(SHARP_START_RIGHT),
    ),
    lit(UpperRight, Segment::BLUNT.with_end(0.15).with_flags(SHARP_START_LEFT)),
    lit(LowerRight, Segment::BLUNT.with_start(0.15).with_end(0.5)),
];

const TWO: [SlottedSegment; 5] = [
    plain(Top),
    plain(UpperRight),
    plain(Middle),
    lit(LowerLeft, Segment::BLUNT.with_flags(SHARP_END_LEFT)),
    lit(Bottom, Segment::BLUNT.with_flags(SHARP_END_RIGHT)),
];

const THREE: [SlottedSegment; 5] = [
    plain(Top),
    plain(UpperRight),
    plain(Middle),
    plain(LowerRight),
    plain(Bottom),
];

const FOUR: [SlottedSegment; 4] = [
    lit(UpperLeft, Segment::BLUNT.with_start(0.5)),
    lit(UpperRight, Segment::BLUNT.with_start(0.5)),
    plain(Middle),
    lit(LowerRight, Segment::BLUNT.with_end(0.5)),
];

const FIVE: [SlottedSegment; 5] = [
    lit(Top, Segment::BLUNT.with_flags(SHARP_END_START_RIGHT)),
    lit(UpperLeft, Segment::BLUNT.with_flags(SHARP_START_RIGHT)),
    plain(Middle),
    plain(LowerRight),
    plain(Bottom),
];

const SIX: [SlottedSegment; 6] = [
    lit(Top, Segment::BLUNT.with_flags(SHARP_END_START_RIGHT)),
    lit(UpperLeft, Segment::BLUNT.with_flags(SHARP_START_RIGHT)),
    plain(Middle),
    plain(LowerRight),
    plain(LowerLeft),
    plain(Bottom),
];

const SEVEN: [SlottedSegment; 3] = [
    lit(Top, Segment::BLUNT.with_flags(SHARP_START_RIGHT)),
    lit(UpperRight, Segment::BLUNT.with_end(0.15).with_flags(SHARP_START_LEFT)),
    lit(LowerRight, Segment::BLUNT.with_start(0.15).with_end(0.5)),
];

const EIGHT: [SlottedSegment; 7] = [
    plain(Top),
    plain(UpperLeft),
    plain(UpperRight),
    plain(Middle),
    plain(LowerLeft),
    plain(LowerRight),
    plain(Bottom),
];

const NINE: [SlottedSegment; 6] = [
    plain(Top),
    plain(UpperLeft),
    plain(UpperRight),
    plain(Middle),
    plain(LowerRight),
    plain(Bottom),
];

static DEFINITIONS: [DigitDefinition; 10] = [
    DigitDefinition { segments: &ZERO, centering_offset: 0.010 },
    DigitDefinition { segments: &ONE, centering_offset: 0.012 },
    DigitDefinition { segments: &TWO, centering_offset: 0.008 },
    DigitDefinition { segments: &THREE, centering_offset: 0.011 },
    DigitDefinition { segments: &FOUR, centering_offset: 0.012 },
    DigitDefinition { segments: &FIVE, centering_offset: 0.013 },
    DigitDefinition { segments: &SIX, centering_offset: 0.010 },
    DigitDefinition { segments: &SEVEN, centering_offset: 0.009 },
    DigitDefinition { segments: &EIGHT, centering_offset: 0.011 },
    DigitDefinition { segments: &NINE, centering_offset: 0.012 },
];

pub fn definition(digit: Digit) -> &'static DigitDefinition {
    &DEFINITIONS[digit.value() as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn digit_values_round_trip() {
        for value in 0..10u8 {
            assert_eq!(Digit::from_value(value).map(Digit::value), Some(value));
        }
        assert_eq!(Digit::from_value(10), None);
    }

    #[test]
    fn pair_splits_tens_and_ones() {
        assert_eq!(Digit::pair(7), (Digit::Zero, Digit::Seven));
        assert_eq!(Digit::pair(45), (Digit::Four, Digit::Five));
        assert_eq!(Digit::pair(23), (Digit::Two, Digit::Three));
    }

    #[test]
    fn slots_are_unique_within_each_digit() {
        for digit in Digit::ALL {
            let def = definition(digit);
            let unique: HashSet<_> = def.segments.iter().map(|s| s.slot).collect();
            assert_eq!(unique.len(), def.segments.len(), "duplicate slot in {digit}");
        }
    }

    #[test]
    fn only_side_slots_are_vertical() {
        let vertical: Vec<_> = SegmentSlot::ALL
            .into_iter()
            .filter(|s| s.is_vertical())
            .map(SegmentSlot::index)
            .collect();
        assert_eq!(vertical, vec![1, 2, 4, 5]);
    }

    #[test]
    fn eight_lights_every_slot() {
        let eight = definition(Digit::Eight);
        assert!(SegmentSlot::ALL.iter().all(|&slot| eight.is_lit(slot)));
    }

    #[test]
    fn one_is_a_serif_and_two_right_bars() {
        let one = definition(Digit::One);
        let slots: Vec<_> = one.segments.iter().map(|s| s.slot).collect();
        assert_eq!(slots, vec![Top, UpperRight, LowerRight]);
        assert_eq!(one.segments[0].segment.start, -1.0);
        assert_eq!(one.segments[0].segment.shift, 1.0);
    }
}
