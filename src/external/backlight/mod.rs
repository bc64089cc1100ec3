//! Control of display backlights

pub mod discovery;
pub mod interface;
#[cfg(test)]
pub mod mock;
pub mod sysfs;

pub use interface::*;

#[cfg(test)]
mod test;
