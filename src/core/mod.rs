//! # Core Application Logic
//!
//! This module contains the console's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • App (containers)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                  ┌─────────────┴─────────────┐
//!                  ▼                           ▼
//!           ┌────────────┐              ┌────────────┐
//!           │    TUI     │              │    API     │
//!           │  Adapter   │ ── spawns ─► │  Backend   │
//!           │ (ratatui)  │              │ (reqwest)  │
//!           └────────────┘              └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`store`]: Per-resource containers
//! - [`request`]: Loading/error lifecycle and stale-response tickets
//! - [`operation`]: Backend calls as data
//! - [`route`]: Paths, views, and the auth gate
//! - [`form`]: Schema-driven edit forms
//! - [`metrics`]: Dashboard figures
//! - [`config`]: Settings and their override order

pub mod action;
pub mod config;
pub mod form;
pub mod metrics;
pub mod operation;
pub mod request;
pub mod route;
pub mod state;
pub mod store;
