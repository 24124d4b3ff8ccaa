pub mod bullet;
pub mod collision;
pub mod constants;
pub mod order;
pub mod simulation;
pub mod unit;
pub mod vec;
pub mod zone;
