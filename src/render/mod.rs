//! Mapping from steps to drawable primitives, plus a plain-text backend.

pub(crate) mod layout;
pub(crate) mod primitives;
pub(crate) mod text;
