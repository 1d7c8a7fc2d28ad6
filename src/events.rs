//! Per-surface event handling.
//!
//! Every window the tool creates carries a [`SurfaceRole`]. The platform
//! window procedure translates raw messages into an [`EventKind`], asks the
//! role what to do, and carries out the returned [`Action`].

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceRole {
    /// Hidden control window; owns the adapter DC and receives close/destroy.
    Main,
    /// Black surface above the visible band.
    TopOccluder,
    /// Black surface below the visible band.
    BottomOccluder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Paint,
    HitTest,
    Close,
    Destroy,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Fill the whole client area with opaque black.
    FillBlack,
    /// Report the surface as transparent to hit-testing.
    PassThrough,
    /// Destroy the receiving surface.
    DestroySurface,
    /// Post a quit request with the given exit code.
    Quit(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Handled(Action),
    Unhandled,
}

impl SurfaceRole {
    pub const ALL: [SurfaceRole; 3] = [
        SurfaceRole::Main,
        SurfaceRole::TopOccluder,
        SurfaceRole::BottomOccluder,
    ];

    pub fn index(self) -> u16 {
        match self {
            SurfaceRole::Main => 0,
            SurfaceRole::TopOccluder => 1,
            SurfaceRole::BottomOccluder => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SurfaceRole::Main => "Main",
            SurfaceRole::TopOccluder => "Top Black",
            SurfaceRole::BottomOccluder => "Bottom Black",
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            SurfaceRole::Main => "RollingBFIwindowClass",
            SurfaceRole::TopOccluder => "TopBlackClass",
            SurfaceRole::BottomOccluder => "BottomBlackClass",
        }
    }

    pub fn on_event(self, event: EventKind) -> Response {
        match (self, event) {
            (SurfaceRole::Main, EventKind::Close) => {
                Response::Handled(Action::DestroySurface)
            },
            (SurfaceRole::Main, EventKind::Destroy) => {
                Response::Handled(Action::Quit(0))
            },
            (SurfaceRole::TopOccluder | SurfaceRole::BottomOccluder, EventKind::Paint) => {
                Response::Handled(Action::FillBlack)
            },
            (SurfaceRole::TopOccluder | SurfaceRole::BottomOccluder, EventKind::HitTest) => {
                Response::Handled(Action::PassThrough)
            },
            _ => Response::Unhandled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_surface_turns_close_into_quit() {
        let role = SurfaceRole::Main;
        assert_eq!(role.on_event(EventKind::Close), Response::Handled(Action::DestroySurface));
        assert_eq!(role.on_event(EventKind::Destroy), Response::Handled(Action::Quit(0)));
        assert_eq!(role.on_event(EventKind::Paint), Response::Unhandled);
        assert_eq!(role.on_event(EventKind::HitTest), Response::Unhandled);
    }

    #[test]
    fn occluders_paint_black_and_let_input_through() {
        for role in [SurfaceRole::TopOccluder, SurfaceRole::BottomOccluder] {
            assert_eq!(role.on_event(EventKind::Paint), Response::Handled(Action::FillBlack));
            assert_eq!(role.on_event(EventKind::HitTest), Response::Handled(Action::PassThrough));
            assert_eq!(role.on_event(EventKind::Close), Response::Unhandled);
            assert_eq!(role.on_event(EventKind::Other), Response::Unhandled);
        }
    }

    #[test]
    fn class_names_are_unique() {
        let names: Vec<&str> = SurfaceRole::ALL.iter().map(|r| r.class_name()).collect();
        assert_eq!(names.len(), 3);
        assert!(names[0] != names[1] && names[1] != names[2] && names[0] != names[2]);
    }
}
