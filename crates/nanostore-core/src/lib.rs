pub mod config;
pub mod logging;

pub mod app;
pub mod capability;
pub mod checksum;
pub mod display;
pub mod form;
pub mod http;
pub mod input;
pub mod liveness;
pub mod media;
pub mod publish;
pub mod registry;
pub mod retrieve;
pub mod retry;
