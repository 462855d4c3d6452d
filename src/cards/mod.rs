//! Card data: static definitions, the process-wide catalog, and runtime
//! unit instances.
//!
//! `CardDef` is immutable and shared by reference; all mutable combat
//! state lives on `Unit`.

pub mod catalog;
mod definition;
mod instance;
mod tags;

pub use definition::{CardDef, CardType};
pub use instance::Unit;
pub use tags::{Species, Tag};
