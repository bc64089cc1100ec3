//! Brightness control - percentage conversion, fades and the effects built on them

pub mod brightness_controller;
pub mod fade;
pub mod request;

pub use brightness_controller::{BrightnessController, ControllerSettings};

#[cfg(test)]
mod test;
