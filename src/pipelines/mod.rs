pub mod emotion;
pub mod stats;
pub mod utils;
