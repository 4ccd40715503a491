pub mod classifier;
pub mod distance;
pub mod search;
pub mod session;
