pub mod driver;
pub mod gamepad;
pub mod input;
pub mod present;
pub mod terminal;

#[cfg(test)]
pub mod fakes;
