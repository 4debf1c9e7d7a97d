pub mod console;

pub use console::{ConsoleInput, InteractiveShell};
