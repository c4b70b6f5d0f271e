//! Application layer: the gateway client orchestrating validate → send →
//! decode → cache for every call.

pub mod client;
