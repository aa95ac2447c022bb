pub mod clock;
pub mod physics_world;
pub mod tiles;

pub use clock::FrameClock;
pub use physics_world::{Contact, SightLine, TickReport, World};
pub use tiles::TileGrid;
