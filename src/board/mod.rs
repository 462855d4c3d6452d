//! The battlefield: seven locations on a fixed adjacency graph, three
//! zones each, plus the capture ledger for area control.

mod battlefield;
mod location;
mod zone;

pub use battlefield::{Battlefield, LocationState};
pub use location::{LocationId, ZoneId, CAPTURE_BASE_THRESHOLD};
pub use zone::{Zone, ZoneMap};
