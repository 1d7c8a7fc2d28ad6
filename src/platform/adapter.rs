use windows::Wdk::Graphics::Direct3D::*;
use windows::Win32::{
    Foundation::*,
    Graphics::Gdi::*,
};
use crate::{
    error::{AppError, Kind},
    sync::{SyncError, VBlankSource},
};

/// Kernel-mode handle to the adapter and video output driving a window's
/// display. Closed on drop.
pub struct Adapter {
    window: HWND,
    hdc: HDC,
    handle: u32,
    source_id: u32,
}

impl Adapter {
    pub fn open(window: HWND) -> Result<Self, AppError> {
        unsafe {
            let hdc = GetDC(window);
            let mut oa = D3DKMT_OPENADAPTERFROMHDC {
                hDc: hdc,
                ..Default::default()
            };
            let status = D3DKMTOpenAdapterFromHdc(&mut oa);
            if status.is_err() {
                ReleaseDC(window, hdc);
                let kind = match status {
                    STATUS_INVALID_PARAMETER => Kind::AdapterInvalidParameter,
                    STATUS_NO_MEMORY => Kind::AdapterOutOfMemory,
                    other => Kind::AdapterOpen(other.0),
                };
                return Err(AppError::new(kind));
            }

            Ok(Self {
                window,
                hdc,
                handle: oa.hAdapter,
                source_id: oa.VidPnSourceId,
            })
        }
    }
}

fn check(status: NTSTATUS) -> Result<(), SyncError> {
    match status.is_ok() {
        true => Ok(()),
        false => Err(SyncError { status: status.0 }),
    }
}

impl VBlankSource for Adapter {
    fn wait_for_blank_start(&mut self) -> Result<(), SyncError> {
        let we = D3DKMT_WAITFORVERTICALBLANKEVENT {
            hAdapter: self.handle,
            hDevice: 0,
            VidPnSourceId: self.source_id,
        };
        check(unsafe { D3DKMTWaitForVerticalBlankEvent(&we) })
    }

    fn is_in_blank(&mut self) -> Result<bool, SyncError> {
        let mut gsl = D3DKMT_GETSCANLINE {
            hAdapter: self.handle,
            VidPnSourceId: self.source_id,
            ..Default::default()
        };
        check(unsafe { D3DKMTGetScanLine(&mut gsl) })?;
        Ok(gsl.InVerticalBlank.as_bool())
    }
}

impl Drop for Adapter {
    fn drop(&mut self) {
        unsafe {
            let close = D3DKMT_CLOSEADAPTER { hAdapter: self.handle };
            let _ = D3DKMTCloseAdapter(&close);
            ReleaseDC(self.window, self.hdc);
        }
    }
}
