//! Provides abstractions over the system components controlled by bright

pub mod backlight;
