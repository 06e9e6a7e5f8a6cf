pub mod draw;
pub mod events;

pub use draw::{render, SPINNER};
pub use events::{Command, EventHandler};
