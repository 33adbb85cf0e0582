//! Value types shared by the store, the rule engine and the server.

pub mod types;
