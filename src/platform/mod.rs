//! Win32 collaborators: display metrics, the D3DKMT adapter, the overlay
//! windows and the modal diagnostics.

pub mod adapter;
pub mod dialog;
pub mod display;
pub mod overlay;
