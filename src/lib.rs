//! # taskboard
//!
//! Terminal client for a synchronized kanban task board. The board renders
//! three fixed status columns and keeps its in-memory task list in
//! agreement with a REST task service and with every other client
//! connected to the same push channel.
//!
//! Moves apply optimistically so the gesture feels instantaneous; creates
//! and remote notifications apply only after authoritative confirmation,
//! because their ids and content are not known locally in advance.

pub mod app;
pub mod net;
pub mod state;
pub mod view;
