//! Core data structures shared by transformations, models and the detective.

mod forecast;
mod series;

pub use forecast::Forecast;
pub use series::{Series, Split};
