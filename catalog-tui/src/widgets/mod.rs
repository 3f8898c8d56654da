//! Reusable widget components.

pub mod status;
pub mod title_input;

pub use status::StatusIndicator;
pub use title_input::TitleInput;
