pub mod connection;
pub mod endpoints;

pub use connection::{write_nutrient_csv, FdcClient, FdcConnectionError};
pub use endpoints::{NutrientCsvRow, REFERENCE_FOODS};
