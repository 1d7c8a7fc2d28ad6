//! Occluder geometry for a given scan position.

use crate::scan::ScanState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl SurfaceRect {
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }
}

/// Placement of both occluders. The rows between them stay visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandLayout {
    pub top: SurfaceRect,
    pub bottom: SurfaceRect,
}

impl BandLayout {
    /// Computes the occluders for a band starting at `position`.
    ///
    /// When the band runs past the bottom edge the bottom occluder collapses
    /// to zero height at `screen_height` instead of going negative.
    pub fn compute(position: u32, scan_height: u32, screen_width: u32, screen_height: u32) -> Self {
        let screen_height = to_coord(screen_height);
        let width = to_coord(screen_width);
        let top_height = to_coord(position).min(screen_height);
        let band_end = (top_height as i64 + scan_height as i64).min(screen_height as i64) as i32;

        Self {
            top: SurfaceRect {
                x: 0,
                y: 0,
                width,
                height: top_height,
            },
            bottom: SurfaceRect {
                x: 0,
                y: band_end,
                width,
                height: screen_height - band_end,
            },
        }
    }

    pub fn for_state(state: &ScanState) -> Self {
        let screen = state.screen();
        Self::compute(state.position(), state.scan_height(), screen.width, screen.height)
    }

    /// Layout used before the first sync: everything covered.
    pub fn covered(screen_width: u32, screen_height: u32) -> Self {
        let width = to_coord(screen_width);
        let height = to_coord(screen_height);
        Self {
            top: SurfaceRect { x: 0, y: 0, width, height },
            bottom: SurfaceRect { x: 0, y: height, width, height: 0 },
        }
    }

    pub fn visible_rows(&self) -> i32 {
        self.bottom.y - self.top.bottom()
    }
}

fn to_coord(value: u32) -> i32 {
    value.min(i32::MAX as u32) as i32
}
