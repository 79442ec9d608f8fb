//! Event binding types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Identifies one bound handler so it can be unbound later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HandlerId(pub u64);

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handler{}", self.0)
    }
}

/// Identifies one primitive on a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An input event delivered to handlers bound on a tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasEvent {
    /// Event pattern, e.g. `<Button-1>`
    pub pattern: String,
    /// Pointer position in surface coordinates
    pub x: f64,
    pub y: f64,
}

impl CanvasEvent {
    pub fn new(pattern: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            pattern: pattern.into(),
            x,
            y,
        }
    }
}

/// Event callback. Handlers are shared so a surface can hand out copies
/// without holding its own borrow while they run.
pub type EventHandler = Rc<dyn Fn(&CanvasEvent)>;
