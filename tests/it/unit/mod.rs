//! Unit tests for the funnel canvas.

mod model_tests;
mod snapshot_tests;
mod transform_tests;
