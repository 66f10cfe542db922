pub mod labels;
pub mod main;
pub mod system;
pub mod utils;

pub use labels::LabelCleaningConfig;
pub use main::Config;
pub use system::SystemConfig;
