pub mod assets;
pub mod event;
pub mod input;
pub mod scene;
pub mod session;
pub mod step;
