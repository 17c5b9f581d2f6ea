pub mod config;
pub mod crawler;
pub mod library;
