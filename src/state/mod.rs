//! Client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern so the view can depend on small focused
//! models: `tasks` owns the board contents, `ui` owns interaction state
//! (focus, the move gesture in flight, the delete confirmation, and the
//! create prompt).

pub mod tasks;
pub mod ui;
