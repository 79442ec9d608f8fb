//! Canvas - Retained-mode drawing surface
//!
//! The shape engine never draws pixels itself. It addresses polygon
//! primitives on a drawing surface by tag and asks the surface to store,
//! move, scale and report them. This crate defines that surface interface
//! and ships `MemoryCanvas`, an in-memory surface used by tests and
//! headless callers.

mod error;
mod options;
mod event;
mod surface;
mod memory;

pub use error::*;
pub use options::*;
pub use event::*;
pub use surface::*;
pub use memory::*;
