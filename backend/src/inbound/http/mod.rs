//! HTTP inbound adapter serving the quiz pages and health probes.

pub mod error;
pub mod health;
pub mod messages;
pub mod quiz;
pub mod quiz_form;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod views;

pub use error::ApiResult;
