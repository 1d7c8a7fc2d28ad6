use crate::{events::SurfaceRole, layout::BandLayout};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentError {
    pub surface: SurfaceRole,
    pub code: i32,
}

impl std::error::Error for PresentError {}

impl std::fmt::Display for PresentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} placement rejected ({:#010x})", self.surface.label(), self.code)
    }
}

/// Places the two occluders. Implementations keep both surfaces topmost,
/// visible and out of the input path.
pub trait Compositor {
    fn present(&mut self, layout: &BandLayout) -> Result<(), PresentError>;
}
