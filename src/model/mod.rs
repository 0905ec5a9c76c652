mod hackathon;
mod theme;

pub use hackathon::*;
pub use theme::*;
