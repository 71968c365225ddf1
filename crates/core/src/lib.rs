#![deny(rust_2018_idioms)]

pub mod config;
pub mod directory;
pub mod dispatch;
pub mod event;
pub mod format;
pub mod intercept;
pub mod plugin;
