pub mod buildcore;
pub mod config;
pub mod error;
pub mod event;
pub mod kitchen;
pub mod log;
pub mod menu;
pub mod order;
pub mod queue;
