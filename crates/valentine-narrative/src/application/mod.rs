//! Application layer: drives the session aggregate and builds render views.

pub mod command_handlers;
pub mod query_handlers;
