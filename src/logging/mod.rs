pub mod bid_log;
pub mod bid_log_writer;
pub mod logger;
