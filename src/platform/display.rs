use windows::core::Result;
use windows::Win32::{
    System::Threading::*,
    UI::{HiDpi::*, WindowsAndMessaging::*},
};
use crate::scan::ScreenGeometry;

/// Primary screen size in physical pixels.
pub fn screen_geometry() -> ScreenGeometry {
    unsafe {
        let width = GetSystemMetrics(SM_CXSCREEN).max(0) as u32;
        let height = GetSystemMetrics(SM_CYSCREEN).max(0) as u32;
        ScreenGeometry::new(width, height)
    }
}

/// Keeps the scheduler from preempting the wait/poll sequence.
pub fn raise_thread_priority() -> Result<()> {
    unsafe { SetThreadPriority(GetCurrentThread(), THREAD_PRIORITY_TIME_CRITICAL) }
}

/// Fails with access denied when the manifest already set the awareness.
pub fn set_dpiawareness_v2() -> Result<()> {
    unsafe { SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2) }
}
