//! Notification-area icon and global hotkey, both serviced by one hidden
//! window on a dedicated message-loop thread.

use crate::core::{ClickerError, ClickerResult};
use crate::input::{HotkeyBridge, HotkeySlot};
use crate::window::WindowHandle;
use crate::window::events::{MENU_EXIT, MENU_SHOW, ShellEvent, menu_command};
use crossbeam_channel::{Receiver, Sender, bounded, unbounded};
use std::mem::size_of;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{Builder, JoinHandle};
use std::time::Duration;
use tracing::{debug, error, info, warn};
use windows::Win32::Foundation::{HINSTANCE, HWND, LPARAM, LRESULT, POINT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::Shell::{
    NIF_ICON, NIF_INFO, NIF_MESSAGE, NIF_TIP, NIIF_INFO, NIM_ADD, NIM_DELETE, NIM_MODIFY,
    NOTIFYICONDATAW, Shell_NotifyIconW,
};
use windows::Win32::UI::WindowsAndMessaging::{
    AppendMenuW, CreatePopupMenu, CreateWindowExW, DefWindowProcW, DestroyIcon, DestroyMenu,
    DestroyWindow, DispatchMessageW, GWLP_USERDATA, GetCursorPos, GetMessageW, GetWindowLongPtrW,
    HICON, IDI_APPLICATION, IMAGE_ICON, LR_DEFAULTSIZE, LR_LOADFROMFILE, LoadIconW, LoadImageW,
    MF_SEPARATOR, MF_STRING, MSG, PostQuitMessage, RegisterClassW,
    SetForegroundWindow, SetWindowLongPtrW, TPM_NONOTIFY, TPM_RETURNCMD, TPM_RIGHTBUTTON,
    TrackPopupMenuEx, TranslateMessage, WINDOW_EX_STYLE, WINDOW_STYLE, WM_APP, WM_CONTEXTMENU,
    WM_DESTROY, WM_HOTKEY, WM_LBUTTONDBLCLK, WM_RBUTTONUP, WNDCLASSW,
};
use windows::core::{HSTRING, PCWSTR, w};

pub const TRAY_TOOLTIP: &str = "AutoClicker Pro";
pub const TRAY_BALLOON: &str = "Application minimized to tray";

const WINDOW_CLASS: PCWSTR = w!("AutoClickerShellWindow");
const HOTKEY_ID: i32 = 1;
const TRAY_ICON_ID: u32 = 1;

const WM_TRAY_CALLBACK: u32 = WM_APP + 1;
const WM_REGISTER_HOTKEY: u32 = WM_APP + 2;
const WM_SHOW_TRAY: u32 = WM_APP + 3;
const WM_HIDE_TRAY: u32 = WM_APP + 4;
const WM_SHUTDOWN: u32 = WM_APP + 5;

const REPLY_TIMEOUT: Duration = Duration::from_secs(2);

/// Handle to the message-loop thread. Requests are posted to its window;
/// what the user does with the tray or hotkey comes back as [`ShellEvent`]s.
pub struct ShellThread {
    window: Arc<WindowHandle>,
    replies: Receiver<ClickerResult<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ShellThread {
    pub fn start(icon_path: PathBuf) -> ClickerResult<(Self, Receiver<ShellEvent>)> {
        let (events_tx, events_rx) = unbounded();
        let (replies_tx, replies_rx) = bounded(1);
        let (ready_tx, ready_rx) = bounded(1);

        let window = Arc::new(WindowHandle::new());
        let thread_window = Arc::clone(&window);

        let handle = Builder::new()
            .name("ShellMessageLoop".to_string())
            .spawn(move || {
                run_message_loop(&icon_path, &thread_window, events_tx, replies_tx, ready_tx);
            })
            .map_err(|e| ClickerError::Thread(format!("Failed to spawn shell thread: {}", e)))?;

        let startup = ready_rx.recv().unwrap_or_else(|_| {
            Err(ClickerError::Thread(
                "Shell thread exited during startup".to_string(),
            ))
        });

        if let Err(e) = startup {
            let _ = handle.join();
            return Err(e);
        }

        let shell = Self {
            window,
            replies: replies_rx,
            handle: Some(handle),
        };

        Ok((shell, events_rx))
    }

    /// Rebinds the global hotkey and waits for the outcome.
    pub fn register_hotkey(&self, slot: HotkeySlot) -> ClickerResult<()> {
        while self.replies.try_recv().is_ok() {}

        self.post(WM_REGISTER_HOTKEY, WPARAM(slot.index() as usize))?;

        self.replies
            .recv_timeout(REPLY_TIMEOUT)
            .map_err(|_| ClickerError::hotkey(slot.name(), "message thread did not respond"))?
    }

    pub fn show_tray(&self) -> ClickerResult<()> {
        self.post(WM_SHOW_TRAY, WPARAM(0))
    }

    pub fn hide_tray(&self) -> ClickerResult<()> {
        self.post(WM_HIDE_TRAY, WPARAM(0))
    }

    /// Unregisters the hotkey, removes the tray icon and joins the thread.
    pub fn shutdown(&mut self) -> ClickerResult<()> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };

        self.post(WM_SHUTDOWN, WPARAM(0))?;

        handle
            .join()
            .map_err(|e| ClickerError::Thread(format!("Failed to join shell thread: {:?}", e)))?;

        info!("shell thread stopped");
        Ok(())
    }

    fn post(&self, message: u32, wparam: WPARAM) -> ClickerResult<()> {
        self.window.post(message, wparam)
    }
}

impl Drop for ShellThread {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            warn!(error = %e, "shell thread shutdown failed");
        }
    }
}

fn run_message_loop(
    icon_path: &Path,
    window: &WindowHandle,
    events: Sender<ShellEvent>,
    replies: Sender<ClickerResult<()>>,
    ready: Sender<ClickerResult<()>>,
) {
    let hwnd = match create_window() {
        Ok(hwnd) => hwnd,
        Err(e) => {
            error!(error = %e, "failed to create shell window");
            let _ = ready.send(Err(e));
            return;
        }
    };

    let context = Box::into_raw(Box::new(ShellContext {
        hwnd,
        events,
        replies,
        hotkey: HotkeyBridge::new(hwnd, HOTKEY_ID),
        tray: TrayIcon::load(hwnd, icon_path),
    }));

    unsafe {
        SetWindowLongPtrW(hwnd, GWLP_USERDATA, context as isize);
    }
    window.publish(hwnd);
    let _ = ready.send(Ok(()));
    debug!("shell message loop running");

    let mut message = MSG::default();
    loop {
        let result = unsafe { GetMessageW(&mut message, None, 0, 0) };

        if result.0 == 0 {
            break;
        }
        if result.0 < 0 {
            warn!(error = %windows::core::Error::from_win32(), "message loop failed");
            break;
        }

        unsafe {
            let _ = TranslateMessage(&message);
            DispatchMessageW(&message);
        }
    }

    window.retract();

    // The window is destroyed; nothing can reach the context any more.
    drop(unsafe { Box::from_raw(context) });
}

fn create_window() -> ClickerResult<HWND> {
    unsafe {
        let module = GetModuleHandleW(None)?;
        let instance = HINSTANCE(module.0);

        let class = WNDCLASSW {
            lpfnWndProc: Some(window_proc),
            hInstance: instance,
            lpszClassName: WINDOW_CLASS,
            ..Default::default()
        };

        if RegisterClassW(&class) == 0 {
            debug!("shell window class already registered");
        }

        let hwnd = CreateWindowExW(
            WINDOW_EX_STYLE::default(),
            WINDOW_CLASS,
            w!("AutoClicker"),
            WINDOW_STYLE::default(),
            0,
            0,
            0,
            0,
            None,
            None,
            Some(instance),
            None,
        )?;

        Ok(hwnd)
    }
}

unsafe extern "system" fn window_proc(
    hwnd: HWND,
    message: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let context = unsafe { GetWindowLongPtrW(hwnd, GWLP_USERDATA) } as *mut ShellContext;

    if !context.is_null() {
        let context = unsafe { &mut *context };
        if context.handle(message, wparam, lparam) {
            return LRESULT(0);
        }
    }

    unsafe { DefWindowProcW(hwnd, message, wparam, lparam) }
}

struct ShellContext {
    hwnd: HWND,
    events: Sender<ShellEvent>,
    replies: Sender<ClickerResult<()>>,
    hotkey: HotkeyBridge,
    tray: TrayIcon,
}

impl ShellContext {
    fn handle(&mut self, message: u32, wparam: WPARAM, lparam: LPARAM) -> bool {
        match message {
            WM_HOTKEY if wparam.0 as i32 == self.hotkey.id() => {
                self.emit(ShellEvent::HotkeyPressed);
            }
            WM_TRAY_CALLBACK => match lparam.0 as u32 & 0xFFFF {
                WM_LBUTTONDBLCLK => self.emit(ShellEvent::RestoreRequested),
                WM_RBUTTONUP | WM_CONTEXTMENU => {
                    if let Some(event) = self.tray.show_menu() {
                        self.emit(event);
                    }
                }
                _ => {}
            },
            WM_REGISTER_HOTKEY => {
                let result = HotkeySlot::new(wparam.0 as u8)
                    .and_then(|slot| self.hotkey.register(slot));
                let _ = self.replies.try_send(result);
            }
            WM_SHOW_TRAY => {
                if let Err(e) = self.tray.show() {
                    warn!(error = %e, "failed to show tray icon");
                }
            }
            WM_HIDE_TRAY => self.tray.hide(),
            WM_SHUTDOWN => unsafe {
                if let Err(e) = DestroyWindow(self.hwnd) {
                    warn!(error = %e, "failed to destroy shell window");
                    PostQuitMessage(0);
                }
            },
            WM_DESTROY => {
                self.hotkey.unregister();
                self.tray.hide();
                unsafe { PostQuitMessage(0) };
            }
            _ => return false,
        }

        true
    }

    fn emit(&self, event: ShellEvent) {
        debug!(?event, "shell event");
        let _ = self.events.send(event);
    }
}

struct TrayIcon {
    hwnd: HWND,
    icon: HICON,
    owned: bool,
    visible: bool,
}

impl TrayIcon {
    /// Loads the icon file, or the stock application icon if that fails.
    fn load(hwnd: HWND, path: &Path) -> Self {
        let name = HSTRING::from(path.as_os_str());
        let loaded = unsafe {
            LoadImageW(
                None,
                &name,
                IMAGE_ICON,
                0,
                0,
                LR_LOADFROMFILE | LR_DEFAULTSIZE,
            )
        };

        let (icon, owned) = match loaded {
            Ok(handle) if !handle.is_invalid() => (HICON(handle.0), true),
            Ok(_) => {
                warn!(path = %path.display(), "icon file empty, using stock icon");
                (Self::stock_icon(), false)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load icon, using stock icon");
                (Self::stock_icon(), false)
            }
        };

        Self {
            hwnd,
            icon,
            owned,
            visible: false,
        }
    }

    fn stock_icon() -> HICON {
        unsafe { LoadIconW(None, IDI_APPLICATION) }.unwrap_or_default()
    }

    fn notify_data(&self) -> NOTIFYICONDATAW {
        NOTIFYICONDATAW {
            cbSize: size_of::<NOTIFYICONDATAW>() as u32,
            hWnd: self.hwnd,
            uID: TRAY_ICON_ID,
            ..Default::default()
        }
    }

    fn show(&mut self) -> ClickerResult<()> {
        if !self.visible {
            let mut data = self.notify_data();
            data.uFlags = NIF_MESSAGE | NIF_ICON | NIF_TIP;
            data.uCallbackMessage = WM_TRAY_CALLBACK;
            data.hIcon = self.icon;
            copy_wide(&mut data.szTip, TRAY_TOOLTIP);

            if !unsafe { Shell_NotifyIconW(NIM_ADD, &data) }.as_bool() {
                return Err(ClickerError::platform("Shell refused the tray icon"));
            }
            self.visible = true;
        }

        let mut balloon = self.notify_data();
        balloon.uFlags = NIF_INFO;
        balloon.dwInfoFlags = NIIF_INFO;
        copy_wide(&mut balloon.szInfoTitle, TRAY_TOOLTIP);
        copy_wide(&mut balloon.szInfo, TRAY_BALLOON);

        if !unsafe { Shell_NotifyIconW(NIM_MODIFY, &balloon) }.as_bool() {
            debug!("balloon notification not shown");
        }

        Ok(())
    }

    fn hide(&mut self) {
        if !self.visible {
            return;
        }

        let data = self.notify_data();
        if !unsafe { Shell_NotifyIconW(NIM_DELETE, &data) }.as_bool() {
            warn!("failed to remove tray icon");
        }
        self.visible = false;
    }

    fn show_menu(&self) -> Option<ShellEvent> {
        unsafe {
            let menu = CreatePopupMenu().ok()?;
            let _ = AppendMenuW(menu, MF_STRING, MENU_SHOW, w!("Show"));
            let _ = AppendMenuW(menu, MF_SEPARATOR, 0, PCWSTR::null());
            let _ = AppendMenuW(menu, MF_STRING, MENU_EXIT, w!("Exit"));

            let mut cursor = POINT::default();
            let _ = GetCursorPos(&mut cursor);
            let _ = SetForegroundWindow(self.hwnd);

            let command = TrackPopupMenuEx(
                menu,
                (TPM_RETURNCMD | TPM_NONOTIFY | TPM_RIGHTBUTTON).0,
                cursor.x,
                cursor.y,
                self.hwnd,
                None,
            );
            let _ = DestroyMenu(menu);

            menu_command(command.0 as usize)
        }
    }
}

impl Drop for TrayIcon {
    fn drop(&mut self) {
        self.hide();

        if self.owned && !self.icon.is_invalid() {
            let _ = unsafe { DestroyIcon(self.icon) };
        }
    }
}

fn copy_wide(target: &mut [u16], text: &str) {
    let capacity = target.len().saturating_sub(1);

    for (slot, unit) in target.iter_mut().zip(text.encode_utf16().take(capacity)) {
        *slot = unit;
    }
}
