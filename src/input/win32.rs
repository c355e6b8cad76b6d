use crate::core::{Point, Region};
use crate::input::InputInjector;
use std::mem::size_of;
use tracing::warn;
use windows::Win32::Foundation::{POINT, RECT};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    INPUT, INPUT_0, INPUT_MOUSE, MOUSE_EVENT_FLAGS, MOUSEEVENTF_LEFTDOWN, MOUSEEVENTF_LEFTUP,
    MOUSEINPUT, SendInput,
};
use windows::Win32::UI::WindowsAndMessaging::{ClipCursor, GetCursorPos, SetCursorPos};

/// Synthesizes pointer input through `SendInput`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32Injector;

impl Win32Injector {
    pub fn new() -> Self {
        Self
    }

    #[inline]
    fn mouse_input(flags: MOUSE_EVENT_FLAGS) -> INPUT {
        INPUT {
            r#type: INPUT_MOUSE,
            Anonymous: INPUT_0 {
                mi: MOUSEINPUT {
                    dx: 0,
                    dy: 0,
                    mouseData: 0,
                    dwFlags: flags,
                    time: 0,
                    dwExtraInfo: 0,
                },
            },
        }
    }
}

impl InputInjector for Win32Injector {
    fn cursor_position(&self) -> Point {
        let mut point = POINT::default();

        match unsafe { GetCursorPos(&mut point) } {
            Ok(()) => Point::new(point.x, point.y),
            Err(e) => {
                warn!(error = %e, "failed to read cursor position");
                Point::default()
            }
        }
    }

    fn set_cursor_position(&self, position: Point) {
        if let Err(e) = unsafe { SetCursorPos(position.x, position.y) } {
            warn!(error = %e, %position, "failed to move cursor");
        }
    }

    fn click(&self, at: Point) {
        let inputs = [
            Self::mouse_input(MOUSEEVENTF_LEFTDOWN),
            Self::mouse_input(MOUSEEVENTF_LEFTUP),
        ];

        let sent = unsafe { SendInput(&inputs, size_of::<INPUT>() as i32) };

        if sent as usize != inputs.len() {
            warn!(
                sent,
                expected = inputs.len(),
                position = %at,
                error = %windows::core::Error::from_win32(),
                "click input was blocked"
            );
        }
    }

    fn confine_cursor(&self, region: Option<Region>) {
        let result = match region {
            // RECT is right/bottom exclusive.
            Some(region) => {
                let rect = RECT {
                    left: region.left,
                    top: region.top,
                    right: region.right + 1,
                    bottom: region.bottom + 1,
                };
                unsafe { ClipCursor(Some(&rect)) }
            }
            None => unsafe { ClipCursor(None) },
        };

        if let Err(e) = result {
            warn!(error = %e, ?region, "failed to update cursor confinement");
        }
    }
}
