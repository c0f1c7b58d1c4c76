//! Generic helpers shared by operon crates

pub mod parallel;
pub mod window;

pub use parallel::configure_thread_pool;
pub use window::{sliding_window, SlidingWindow, Window};
