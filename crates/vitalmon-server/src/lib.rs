pub mod config;
pub mod monitor;
pub mod rule_builder;
