//! Data model: raw source records and the normalized [`item::WorkItem`].

pub mod item;
pub mod source;
