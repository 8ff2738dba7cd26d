//! Commands Layer
//!
//! Handlers that bridge the CLI to the reminder store. Each one validates
//! its input the way the add/edit form does and reports failures as
//! plain strings for display.

mod reminder_cmd;
mod view_cmd;

pub use reminder_cmd::*;
pub use view_cmd::*;
