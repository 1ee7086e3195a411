pub mod catalog;
pub mod dat;
pub mod error;

pub use catalog::{CatalogEntry, CatalogIndex, load_catalog};
pub use dat::{DatFile, DatGame, DatRom, parse_dat, parse_dat_file};
pub use error::DatError;
