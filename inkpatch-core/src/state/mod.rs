pub mod document;
pub mod layers;

pub use document::{DocumentSession, SessionError};

pub type DocumentID = crate::InkID<document::DocumentSession>;
pub type LayerID = crate::InkID<layers::RasterLayer>;
