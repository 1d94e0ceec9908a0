pub mod movement;
pub mod placement;
