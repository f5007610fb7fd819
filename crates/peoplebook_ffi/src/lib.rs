//! Flutter-facing bindings for the Peoplebook core.

pub mod api;
