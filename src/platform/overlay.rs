use std::mem::size_of;
use windows::core::*;
use windows::Win32::{
    Foundation::*,
    Graphics::Gdi::*,
    System::LibraryLoader::*,
    UI::WindowsAndMessaging::*,
};
use crate::{
    compositor::{Compositor, PresentError},
    control::EventPump,
    error::{AppError, Kind},
    events::{Action, EventKind, Response, SurfaceRole},
    layout::{BandLayout, SurfaceRect},
    scan::ScreenGeometry,
};

/// The hidden control window and the two black occluders.
pub struct Surfaces {
    instance: HMODULE,
    classes: Vec<HSTRING>,
    main: HWND,
    top: HWND,
    bottom: HWND,
}

impl Surfaces {
    const OCCLUDER_EX_STYLE: WINDOW_EX_STYLE = WINDOW_EX_STYLE(
        WS_EX_LAYERED.0 |
        WS_EX_TOPMOST.0 |
        WS_EX_TRANSPARENT.0 |
        WS_EX_TOOLWINDOW.0 |
        WS_EX_NOACTIVATE.0
    );

    pub fn create(screen: ScreenGeometry) -> std::result::Result<Self, AppError> {
        unsafe {
            let instance = GetModuleHandleW(None)
                .map_err(|_| AppError::new(Kind::ClassRegistration(SurfaceRole::Main)))?;

            let mut result = Self {
                instance,
                classes: Vec::new(),
                main: HWND::default(),
                top: HWND::default(),
                bottom: HWND::default(),
            };
            for role in SurfaceRole::ALL {
                result.register_class(role)?;
            }

            let covered = BandLayout::covered(screen.width, screen.height);
            result.main = result.create_window(
                SurfaceRole::Main,
                &SurfaceRect { x: 0, y: 0, width: 1, height: 1 },
            )?;
            result.top = result.create_window(SurfaceRole::TopOccluder, &covered.top)?;
            result.bottom = result.create_window(SurfaceRole::BottomOccluder, &covered.bottom)?;

            for hwnd in [result.top, result.bottom] {
                let _ = SetLayeredWindowAttributes(hwnd, COLORREF(0), 255, LWA_ALPHA);
                let _ = ShowWindow(hwnd, SW_SHOWNOACTIVATE);
            }
            Ok(result)
        }
    }

    pub fn main(&self) -> HWND {
        self.main
    }

    unsafe fn register_class(&mut self, role: SurfaceRole) -> std::result::Result<(), AppError> {
        let class_name = HSTRING::from(role.class_name());
        let wc = WNDCLASSEXW {
            cbSize: size_of::<WNDCLASSEXW>() as u32,
            lpfnWndProc: Some(wndproc),
            hInstance: self.instance.into(),
            hIcon: LoadIconW(None, IDI_APPLICATION).unwrap_or_default(),
            hIconSm: LoadIconW(None, IDI_APPLICATION).unwrap_or_default(),
            hCursor: LoadCursorW(None, IDC_ARROW).unwrap_or_default(),
            lpszClassName: PCWSTR(class_name.as_ptr()),
            ..Default::default()
        };

        match RegisterClassExW(&wc) {
            0 => Err(AppError::new(Kind::ClassRegistration(role))),
            _ => {
                self.classes.push(class_name);
                Ok(())
            },
        }
    }

    unsafe fn create_window(
        &self,
        role: SurfaceRole,
        rect: &SurfaceRect,
    ) -> std::result::Result<HWND, AppError> {
        let (ex_style, style, title) = match role {
            SurfaceRole::Main => (WINDOW_EX_STYLE::default(), WS_OVERLAPPED, w!("RollingBFI")),
            _ => (Self::OCCLUDER_EX_STYLE, WS_POPUP, PCWSTR::null()),
        };
        CreateWindowExW(
            ex_style,
            &HSTRING::from(role.class_name()),
            title,
            style,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            None,
            None,
            self.instance,
            Some(role_tag(role) as *const _),
        )
        .map_err(|_| AppError::new(Kind::WindowCreation(role)))
    }

    fn place(hwnd: HWND, role: SurfaceRole, rect: &SurfaceRect) -> std::result::Result<(), PresentError> {
        unsafe {
            SetWindowPos(
                hwnd,
                HWND_TOPMOST,
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                SWP_SHOWWINDOW | SWP_NOACTIVATE,
            )
            .map_err(|e| PresentError { surface: role, code: e.code().0 })
        }
    }
}

impl Compositor for Surfaces {
    fn present(&mut self, layout: &BandLayout) -> std::result::Result<(), PresentError> {
        let top = Self::place(self.top, SurfaceRole::TopOccluder, &layout.top);
        let bottom = Self::place(self.bottom, SurfaceRole::BottomOccluder, &layout.bottom);
        top.and(bottom)
    }
}

impl Drop for Surfaces {
    fn drop(&mut self) {
        unsafe {
            for hwnd in [self.bottom, self.top, self.main] {
                if !hwnd.is_invalid() && IsWindow(hwnd).as_bool() {
                    let _ = DestroyWindow(hwnd);
                }
            }
            for class_name in &self.classes {
                let _ = UnregisterClassW(class_name, self.instance);
            }
        }
    }
}

/// Non-blocking drain of the thread's message queue.
pub struct MessagePump;

impl EventPump for MessagePump {
    fn drain(&mut self) -> Option<i32> {
        let mut quit = None;
        let mut message = MSG::default();
        unsafe {
            while PeekMessageW(&mut message, None, 0, 0, PM_REMOVE).as_bool() {
                if message.message == WM_QUIT {
                    quit = Some(message.wParam.0 as i32);
                    continue;
                }
                let _ = TranslateMessage(&message);
                DispatchMessageW(&message);
            }
        }
        quit
    }
}

// GWLP_USERDATA holds the role index plus one; zero means "not ours yet".
fn role_tag(role: SurfaceRole) -> isize {
    role.index() as isize + 1
}

fn role_from_tag(tag: isize) -> Option<SurfaceRole> {
    tag.checked_sub(1)
        .and_then(|i| usize::try_from(i).ok())
        .and_then(|i| SurfaceRole::ALL.get(i).copied())
}

fn event_kind(message: u32) -> EventKind {
    match message {
        WM_PAINT => EventKind::Paint,
        WM_NCHITTEST => EventKind::HitTest,
        WM_CLOSE => EventKind::Close,
        WM_DESTROY => EventKind::Destroy,
        _ => EventKind::Other,
    }
}

extern "system" fn wndproc(
    window: HWND,
    message: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    unsafe {
        if message == WM_NCCREATE {
            let cs = lparam.0 as *const CREATESTRUCTW;
            SetWindowLongPtrW(window, GWLP_USERDATA, (*cs).lpCreateParams as isize);
        } else if let Some(role) = role_from_tag(GetWindowLongPtrW(window, GWLP_USERDATA)) {
            if let Response::Handled(action) = role.on_event(event_kind(message)) {
                return perform(window, action);
            }
        }

        DefWindowProcW(window, message, wparam, lparam)
    }
}

unsafe fn perform(window: HWND, action: Action) -> LRESULT {
    match action {
        Action::FillBlack => {
            let mut ps = PAINTSTRUCT::default();
            let hdc = BeginPaint(window, &mut ps);
            let mut rect = RECT::default();
            if GetClientRect(window, &mut rect).is_ok() {
                FillRect(hdc, &rect, HBRUSH(GetStockObject(BLACK_BRUSH).0));
            }
            let _ = EndPaint(window, &ps);
            LRESULT(0)
        },
        Action::PassThrough => LRESULT(HTTRANSPARENT as i32 as isize),
        Action::DestroySurface => {
            let _ = DestroyWindow(window);
            LRESULT(0)
        },
        Action::Quit(code) => {
            PostQuitMessage(code);
            LRESULT(0)
        },
    }
}
