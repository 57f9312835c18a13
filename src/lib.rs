pub mod config;
pub mod events;
pub mod export;
pub mod gui;
pub mod sys;
