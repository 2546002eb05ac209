//! Convenience re-exports for typical consumers.
//!
//! ```ignore
//! use driftscape::prelude::*;
//! ```

pub use crate::api::{
    ImageProvider, OpenAiImageClient, OpenAiImageConfig, RetryConfig, SwarmUiClient,
    SwarmUiConfig,
};
pub use crate::blend::{CalendarConfig, DateQuery, SeasonBlender, WeightTable};
pub use crate::seasons::{Season, SeasonRegistry};
