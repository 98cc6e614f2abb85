// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. buffer::BufferError)
    clippy::module_name_repetitions
)]

//! # Treebuf
//!
//! A text buffer backed by an order-statistic binary search tree.
//!
//! Treebuf answers three kinds of query in time proportional to the tree
//! height:
//! - Character lookup and replacement by absolute index
//! - Insertion and removal of single characters
//! - Line lookups: where a line starts, how long it is, which line holds a
//!   given character
//!
//! ## Architecture
//!
//! Each character is one tree node. Nodes carry the size of their left
//! subtree and the number of newlines in it, which turns both index and
//! line lookups into a single descent from the root.
//!
//! ## Modules
//!
//! - [`buffer`]: The tree and its public [`TextBuffer`](buffer::TextBuffer) API
//! - [`script`]: Edit scripts replayed by the demo binary

pub mod buffer;
pub mod script;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::buffer::{BufferError, BufferResult, TextBuffer};
    pub use crate::script::{Script, Step};
}
