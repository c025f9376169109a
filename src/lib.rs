pub mod api;
pub mod app;
pub mod auth;
pub mod browser;
pub mod components;
pub mod config;
pub mod flash;
pub mod models;
pub mod pages;
pub mod routes;
pub mod sync;
pub mod theme;
pub mod upload;
