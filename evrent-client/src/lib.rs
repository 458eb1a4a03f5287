pub mod api_client;
pub mod domain;
pub mod error;
pub mod filter;
pub mod forms;
pub mod messages;
pub mod notify;
pub mod pricing;
pub mod screens;
pub mod settings;
pub mod upload;
pub mod utils;
