//! Editor session: owned note store plus an explicit view-state machine.
//!
//! # Responsibility
//! - Drive note selection, editing and two-phase deletion through events.
//! - Expose the list/detail projections a presentation layer renders.
//! - Route between editor and shared-viewer modes from a query string.
//!
//! # Invariants
//! - One `Session` owns exactly one store; nothing is shared or global.
//! - A rejected event leaves both the store and the view state unchanged,
//!   except that a view pointing at a vanished note falls back to
//!   `NoSelection`.

mod editor;
mod mode;
mod view;

pub use editor::{Session, SessionEvent, SessionOutput};
pub use mode::{AccessGate, AppMode};
pub use view::ViewState;
