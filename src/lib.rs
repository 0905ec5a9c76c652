//! Scraper, analyzer and visualizer for the hackathon listings on
//! allhackathons.com.

pub use client::HackathonClient;
pub use config::{RenderConfig, ScraperConfig};
pub use error::{HackathonError, Result};
pub use model::*;
pub use scraper::fetch::{HttpFetcher, PageFetcher};

pub mod analysis;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub(crate) mod scraper;
pub mod storage;
pub mod visualize;
