use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "course-registry")]
#[command(about = "Interactive in-memory course registration")]
pub struct CliConfig {
    /// TOML catalog of courses and students; the built-in sample is used when omitted
    #[arg(short, long)]
    pub catalog: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.catalog {
            validate_path("catalog", path)?;
        }
        Ok(())
    }
}
