//! Scan position bookkeeping for the rolling band.

/// Band height as a fraction of the screen height.
pub const BAND_DIVISOR: u32 = 4;
/// Per-refresh advance as a fraction of the band height.
pub const STEP_DIVISOR: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenGeometry {
    pub width: u32,
    pub height: u32,
}

impl ScreenGeometry {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanState {
    position: u32,
    scan_height: u32,
    step: u32,
    screen: ScreenGeometry,
}

impl ScanState {
    /// Band is a quarter of the screen, step a third of the band.
    pub fn new(screen: ScreenGeometry) -> Self {
        let scan_height = screen.height / BAND_DIVISOR;
        Self::with_band(screen, scan_height, scan_height / STEP_DIVISOR)
    }

    pub fn with_band(screen: ScreenGeometry, scan_height: u32, step: u32) -> Self {
        Self {
            position: 0,
            scan_height,
            step,
            screen,
        }
    }

    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn scan_height(&self) -> u32 {
        self.scan_height
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn screen(&self) -> ScreenGeometry {
        self.screen
    }

    /// Moves the band down by one step, wrapping at the bottom of the screen.
    #[must_use]
    pub fn advance(self) -> Self {
        if self.screen.height == 0 {
            return self;
        }
        let position = ((self.position as u64 + self.step as u64)
            % self.screen.height as u64) as u32;
        Self { position, ..self }
    }

    /// Number of advances before the position sequence repeats.
    pub fn period(&self) -> u32 {
        if self.screen.height == 0 {
            return 1;
        }
        self.screen.height / gcd(self.step, self.screen.height)
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
