//! Core identity types shared by every layer: the two sides of a match
//! and per-side data storage.

mod side;

pub use side::{Side, SideMap};
