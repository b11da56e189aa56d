//! Entity structs for the photo archive pipeline.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! output and schema validation.

mod caption;
mod event;
mod photo;

pub use caption::{CaptionRequestItem, CaptionResult};
pub use event::{DisplayEvent, EventGroup};
pub use photo::{NO_DESCRIPTION, PhotoRecord};
