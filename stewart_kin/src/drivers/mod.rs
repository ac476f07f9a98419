#[cfg(feature = "driver")]
mod viz_driver;

#[cfg(feature = "driver")]
pub use viz_driver::*;

mod viz_config;

pub use viz_config::*;
