use windows::core::*;
use windows::Win32::UI::WindowsAndMessaging::*;

pub fn pop_error(msg: &str) -> MESSAGEBOX_RESULT {
    unsafe {
        MessageBoxW(
            None,
            &HSTRING::from(msg),
            w!("Error!"),
            MB_ICONEXCLAMATION | MB_OK,
        )
    }
}
