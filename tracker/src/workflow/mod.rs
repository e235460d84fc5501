pub mod clock;
pub mod config;
pub mod link;
pub mod runner;
