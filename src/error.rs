use std::error::Error;
use crate::events::SurfaceRole;

#[derive(Debug)]
pub struct AppError {
    kind: Kind,
    code: u16,
}

impl AppError {
    pub fn new(kind: Kind) -> Self {
        let code = match kind {
            Kind::InvalidFlags => 101,
            Kind::ClassRegistration(role) => 201 + role.index(),
            Kind::WindowCreation(role) => 211 + role.index(),
            Kind::AdapterInvalidParameter => 301,
            Kind::AdapterOutOfMemory => 302,
            Kind::AdapterOpen(_) => 303,
            Kind::UnsupportedPlatform => 401,
        };
        Self { kind, code }
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    /// Text shown in the startup diagnostic box.
    pub fn description(&self) -> String {
        match self.kind {
            Kind::InvalidFlags => "Invalid Flags".to_owned(),
            Kind::ClassRegistration(role) => {
                format!("{} Window Registration Failed!", role.label())
            },
            Kind::WindowCreation(role) => {
                format!("{} Window Creation Failed!", role.label())
            },
            Kind::AdapterInvalidParameter => {
                "D3DKMTOpenAdapterFromHdc function received an invalid parameter."
                    .to_owned()
            },
            Kind::AdapterOutOfMemory => {
                "D3DKMTOpenAdapterFromHdc function, kernel ran out of memory."
                    .to_owned()
            },
            Kind::AdapterOpen(status) => {
                format!("D3DKMTOpenAdapterFromHdc failed with status {:#010x}.", status)
            },
            Kind::UnsupportedPlatform => {
                "Vertical blank sync needs a Windows display adapter.".to_owned()
            },
        }
    }
}

impl Error for AppError {}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.code, &self.description())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    InvalidFlags,
    ClassRegistration(SurfaceRole),
    WindowCreation(SurfaceRole),
    AdapterInvalidParameter,
    AdapterOutOfMemory,
    AdapterOpen(i32),
    UnsupportedPlatform,
}
