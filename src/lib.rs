//! Tourdesk: terminal admin console for a tour-booking backend.

pub mod api;
pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;
