//! # inkpatch-core
//!
//! Patch-based undo and redo for layered raster documents.
//!
//! Tools draw straight into a [`pixels::PixelBuffer`] while reporting what they touch to a
//! [`patch::DirtyRegionAccumulator`]. When the gesture ends, the touched rectangle's before and after pixels become a
//! [`patch::Patch`], which is pushed onto a [`history::HistoryStack`]. Undo and redo hand the patch back to be replayed
//! by the [`patch::PatchPlayer`]. [`state::DocumentSession`] wires all of these together for one open document.

pub mod history;
pub mod id;
pub mod patch;
pub mod pixels;
pub mod state;
pub mod util;

pub use id::InkID;
