pub mod board;
pub mod error;
pub mod gui;
pub mod logging;
pub mod settings;
pub mod transport;

pub use error::{Result, WhiteboardError};
