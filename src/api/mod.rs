pub mod cities;
pub mod nomina;
