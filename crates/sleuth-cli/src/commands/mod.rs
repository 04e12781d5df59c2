pub mod generate;
pub mod play;
