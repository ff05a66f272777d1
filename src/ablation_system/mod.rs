pub mod luminosity;
pub mod thermal;
