// src/lib.rs

use std::sync::Arc;

pub mod api;
pub mod bidding;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod openrtb;

use config::ConfigManager;
use logging::bid_log_writer::BidLogWriter;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ConfigManager>,
    pub bid_log: Arc<BidLogWriter>,
}
