pub mod atmosphere;
pub mod dynamics;
