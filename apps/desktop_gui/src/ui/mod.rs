//! UI layer for the seat finder window.

pub mod app;

pub use app::SeatFinderApp;
