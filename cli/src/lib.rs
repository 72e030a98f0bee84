pub mod commands;
pub mod repl;
pub mod samples;
pub mod state;

pub use repl::readline;
pub use state::HarnessState;
