pub mod canvas;
pub mod collision;
pub mod entity;
pub mod font;
pub mod palette;
pub mod sprite;
