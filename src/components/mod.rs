pub mod clock;
pub mod palette;
