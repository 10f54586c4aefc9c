pub mod color;
pub mod command;

pub use color::Color;
pub use command::{Command, ParseCommandError, Rect, Shape};
