//! Citation graph adjacency module

pub mod index;

pub use index::ReferenceIndex;
