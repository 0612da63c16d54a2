pub mod console;
pub mod constants;
pub mod render;
