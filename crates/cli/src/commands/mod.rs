pub mod describe;
pub mod list;
pub mod run;

pub use describe::describe_command;
pub use list::list_command;
pub use run::{run_command, RunOptions};
