//! Bridge between the egui thread and the backend worker that owns the
//! catalog controller.

pub mod commands;
pub mod runtime;
