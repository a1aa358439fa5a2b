//! Entity structs for the rows read from the warehouse.
//!
//! Counts are `u64`; the warehouse layer is responsible for decoding whatever
//! wire representation the backend uses.

mod camera;
mod event_type;
mod ranch;

pub use camera::CameraActivity;
pub use event_type::EventTypeCount;
pub use ranch::{Ranch, RanchName};
