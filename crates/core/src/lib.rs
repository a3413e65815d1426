pub mod error;
pub mod event;
pub mod state;

pub use error::{BoardError, Result};
pub use event::Message;
pub use state::{Level, Reading, Sample, SeriesSnapshot};
