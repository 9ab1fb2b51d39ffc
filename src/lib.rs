// Re-export all public modules so they can be used from main.rs
pub mod logging;
pub mod utils;

// MVC architecture (this demo has no view layer: the host window only
// collects input)
pub mod controller;
pub mod model;
