pub mod api;
pub mod config;
pub mod controller;
pub mod data_models;
pub mod error;
pub mod notify;
pub mod render;
pub mod transport;
pub mod view;
