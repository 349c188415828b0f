pub mod image;
pub mod quote;
pub mod text;
pub mod video;
