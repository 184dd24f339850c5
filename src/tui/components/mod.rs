//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as fields:
//! - `TitleBar`: view title, user, status, spinner
//! - `Sidebar`: numbered navigation
//! - `Dashboard`: headline figures and recent bookings
//! - `TourDetails`: one tour, its prices and reviews
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that hold local state and emit events:
//! - `FormEditor`: edits any schema-driven form, emits `FormEvent`
//! - `ConfirmState`: yes/no overlay for deletes, emits `ConfirmEvent`
//! - `ResourceTable`: list views; selection lives in a `TableState`
//!
//! Components receive external data as props, never by reaching into `App`,
//! so each can be rendered against a `TestBackend` in isolation.
//!
//! ```text
//! components/
//! ├── mod.rs             (this file)
//! ├── title_bar.rs
//! ├── sidebar.rs
//! ├── dashboard.rs
//! ├── resource_table.rs  (users, tours, bookings, reviews)
//! ├── tour_details.rs
//! ├── form_view.rs
//! └── confirm.rs
//! ```

pub mod confirm;
pub mod dashboard;
pub mod form_view;
pub mod resource_table;
pub mod sidebar;
pub mod title_bar;
pub mod tour_details;

pub use confirm::{ConfirmDialog, ConfirmEvent, ConfirmState};
pub use dashboard::Dashboard;
pub use form_view::{FormEditor, FormEvent, FormPurpose};
pub use resource_table::ResourceTable;
pub use sidebar::Sidebar;
pub use title_bar::TitleBar;
pub use tour_details::TourDetails;
