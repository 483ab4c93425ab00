//! Terminal feedback: batch progress bar and call spinner

pub mod progress;
pub mod spinner;

pub use progress::ProgressDisplay;
pub use spinner::Spinner;
