use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Inclusive screen rectangle the pointer may be confined to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Region {
    /// A one-pixel region that pins the pointer to `point`.
    pub const fn pixel(point: Point) -> Self {
        Self {
            left: point.x,
            top: point.y,
            right: point.x,
            bottom: point.y,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        (self.left..=self.right).contains(&point.x) && (self.top..=self.bottom).contains(&point.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ClickerState {
    Idle = 0,
    Active = 1,
}

impl From<u8> for ClickerState {
    fn from(val: u8) -> Self {
        match val {
            1 => Self::Active,
            _ => Self::Idle,
        }
    }
}

impl fmt::Display for ClickerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Active => write!(f, "Active"),
        }
    }
}

/// Where each tick clicks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorPolicy {
    /// Query the pointer on every tick and click wherever it is.
    #[default]
    LivePosition,
    /// Capture the pointer once at start, pin it there and click that spot
    /// until automation stops.
    LockedPosition,
}

impl CursorPolicy {
    pub fn from_lock(locked: bool) -> Self {
        if locked {
            Self::LockedPosition
        } else {
            Self::LivePosition
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, Self::LockedPosition)
    }
}

impl fmt::Display for CursorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LivePosition => write!(f, "Follow Cursor"),
            Self::LockedPosition => write!(f, "Lock Cursor"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clicker_state_from_raw() {
        assert_eq!(ClickerState::from(0), ClickerState::Idle);
        assert_eq!(ClickerState::from(1), ClickerState::Active);
        assert_eq!(ClickerState::from(7), ClickerState::Idle);
    }

    #[test]
    fn test_pixel_region_contains_only_its_point() {
        let region = Region::pixel(Point::new(640, 360));

        assert!(region.contains(Point::new(640, 360)));
        assert!(!region.contains(Point::new(641, 360)));
        assert!(!region.contains(Point::new(640, 359)));
    }

    #[test]
    fn test_cursor_policy_from_lock() {
        assert_eq!(CursorPolicy::from_lock(true), CursorPolicy::LockedPosition);
        assert_eq!(CursorPolicy::from_lock(false), CursorPolicy::LivePosition);
        assert!(!CursorPolicy::default().is_locked());
    }
}
