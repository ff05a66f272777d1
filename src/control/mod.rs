pub mod meteoroid;
pub mod simulation;
