pub mod api;
pub mod client;
pub mod commands;
pub mod config;
pub mod db;
pub mod home;
pub mod output;
pub mod serve;
pub mod session;
