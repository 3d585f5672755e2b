pub mod file;
pub mod paths;
pub mod types;

pub use file::{ConfigFile, Overrides};
pub use types::{PanelConfig, Verbosity};
