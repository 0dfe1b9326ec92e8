//! # Surface Target Selection
//!
//! The clock either opens its own window or, when a screensaver host passes
//! a window id through the environment, draws into that window instead.
//! Ids use C `strtoul` base-0 syntax: `0x` prefix for hex, a leading `0`
//! for octal, decimal otherwise. An id that does not parse is fatal.
//!
//! Only the choice is made here. The terminal stand-in has no native window
//! to attach to, so an embedded id is validated and logged, and frames still
//! go to the terminal.

use crate::config::WindowConfig;
use crate::error::ClockError;
use std::fmt;

/// Native id of a host-owned window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Where frames go.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurfaceTarget {
    /// Create a window of our own.
    NewWindow {
        width: u32,
        height: u32,
        title: String,
    },
    /// Skip window creation and draw into the host's window.
    Embedded(WindowId),
}

pub fn parse_window_id(raw: &str) -> Result<WindowId, ClockError> {
    let invalid = || ClockError::InvalidWindowId(raw.to_string());
    let s = raw.trim();
    let (digits, radix) = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        (hex, 16)
    } else if s.len() > 1 && s.starts_with('0') {
        (&s[1..], 8)
    } else {
        (s, 10)
    };
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return Err(invalid());
    }
    u64::from_str_radix(digits, radix)
        .map(WindowId)
        .map_err(|_| invalid())
}

/// Pick the target from the embed variable's value, if it is set.
pub fn resolve_target(
    window: &WindowConfig,
    embed_value: Option<&str>,
) -> Result<SurfaceTarget, ClockError> {
    match embed_value {
        Some(raw) => parse_window_id(raw).map(SurfaceTarget::Embedded),
        None => Ok(SurfaceTarget::NewWindow {
            width: window.width,
            height: window.height,
            title: window.title.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn parses_all_three_radixes() {
        assert_eq!(parse_window_id("4194311").unwrap(), WindowId(4_194_311));
        assert_eq!(parse_window_id("0x400007").unwrap(), WindowId(0x40_0007));
        assert_eq!(parse_window_id("017").unwrap(), WindowId(15));
        assert_eq!(parse_window_id("0").unwrap(), WindowId(0));
        assert_eq!(parse_window_id(" 42\n").unwrap(), WindowId(42));
    }

    #[test]
    fn rejects_garbage() {
        for raw in ["", "0x", "window", "12abc", "-5", "09"] {
            assert!(
                matches!(parse_window_id(raw), Err(ClockError::InvalidWindowId(_))),
                "{raw:?} should not parse"
            );
        }
    }

    #[test]
    fn absent_variable_means_new_window() {
        let config = Config::default();
        assert_eq!(
            resolve_target(&config.window, None).unwrap(),
            SurfaceTarget::NewWindow {
                width: 640,
                height: 480,
                title: "24clock".to_string()
            }
        );
    }

    #[test]
    fn present_variable_means_embedded() {
        let config = Config::default();
        assert_eq!(
            resolve_target(&config.window, Some("0x1e00003")).unwrap(),
            SurfaceTarget::Embedded(WindowId(0x1e0_0003))
        );
        assert!(resolve_target(&config.window, Some("nope")).is_err());
    }
}
