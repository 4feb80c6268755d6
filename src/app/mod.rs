pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod resource_client;
pub mod task_input;
pub mod task_list;
pub mod ui;

#[cfg(test)]
mod mock_server;
