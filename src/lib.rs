// src/lib.rs

//! NTvG article scraper and nested file merger library

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
