//! Flatten scraped business-review exports into CSV, and take a quick
//! look at scraped CSV files.

pub mod config;
pub mod error;
pub mod extract;
pub mod inspect;
pub mod json;
pub mod logging;
pub mod pipeline;
pub mod sink;
pub mod walker;

pub use config::Settings;
pub use error::{ExtractError, InspectError};
pub use inspect::{Frame, RenderOptions};
pub use walker::{walk, ReviewRecord, CSV_HEADER};
