pub mod combat;
pub mod intensity;
pub mod movement;
pub mod render;
