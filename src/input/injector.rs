use crate::core::{Point, Region};

/// Pointer capabilities the click engine drives.
///
/// Calls are fire-and-forget: synthesized OS input has no meaningful failure
/// the engine could react to, so implementations log problems themselves.
pub trait InputInjector: Send + Sync {
    fn cursor_position(&self) -> Point;

    fn set_cursor_position(&self, position: Point);

    /// Press and release the left button. The click lands wherever the
    /// pointer currently is; `at` is where the caller expects that to be.
    fn click(&self, at: Point);

    /// Restrict pointer movement to `region`, or lift the restriction.
    fn confine_cursor(&self, region: Option<Region>);
}
