pub mod channel;
pub mod config;
pub mod dashboard;
pub mod driver;
pub mod fade;
pub mod lights;
pub mod slider;

pub mod prelude {
    pub use crate::{channel::*, config::*, dashboard::*, driver::*, fade::*, lights::*, slider::*};
}

/// Starts the logger the same way for every binary. `RUST_LOG` overrides the
/// default `info` filter.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
