//! Statistics, filtering and CSV export over scraped hackathons.

mod export;
mod filter;
mod stats;

pub use export::*;
pub use filter::*;
pub use stats::*;
