//! Operator console: terminal input adapter and the interactive menu.

pub mod input;
pub mod shell;

pub use input::ConsoleInput;
pub use shell::{InteractiveShell, MenuOption};
