pub mod gamepad;
pub mod icons;
pub mod input;
pub mod renderer;
pub mod sound;
