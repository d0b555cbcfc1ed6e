pub mod app;
pub mod catalog;
pub mod commands;
