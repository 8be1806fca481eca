pub mod clock;
pub mod json_canonical;
pub mod seed;
