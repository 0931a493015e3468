pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::CatalogConfig;
pub use crate::core::{
    menu::{MenuChoice, MenuSession, MenuState},
    registry::Registry,
};
pub use utils::error::{RegistryError, Result};
