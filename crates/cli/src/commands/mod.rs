//! Subcommands. Each module owns its arguments and execution.

mod list;
mod run;

pub use list::List;
pub use run::Run;
