pub mod character;
pub mod puzzle;
pub mod view;
