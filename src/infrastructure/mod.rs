pub mod process_invoker;

pub use process_invoker::{CommandOutcome, CommandResult, CommandRunner, CommandSpec, SystemRunner};
