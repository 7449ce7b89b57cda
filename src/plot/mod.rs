//! Charts: scatter of training rows with the regression line.
//!
//! - series/bounds preparation (`series`)
//! - fixed-grid text chart (`ascii`)
//! - plotters drawing shared by SVG and terminal (`chart`, `svg`)

pub mod ascii;
pub mod chart;
pub mod series;
pub mod svg;

pub use ascii::*;
pub use chart::*;
pub use series::*;
pub use svg::*;
