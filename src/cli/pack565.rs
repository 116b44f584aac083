//! Pack565 command: print RGB565 values for colors.

use crate::cli::common::{CliError, CliResult};
use crate::models::RgbColor;
use clap::Args;

/// Print the RGB565 value of each color
#[derive(Debug, Clone, Args)]
pub struct Pack565Args {
    /// Colors as #RRGGBB
    #[arg(required = true, value_name = "COLOR")]
    pub colors: Vec<String>,
}

impl Pack565Args {
    /// Execute the pack565 command
    pub fn execute(&self) -> CliResult<()> {
        for line in pack_lines(&self.colors)? {
            println!("{line}");
        }
        Ok(())
    }
}

/// Formats `#RRGGBB -> 0xXXXX` for each color, failing on the first bad one.
fn pack_lines(colors: &[String]) -> CliResult<Vec<String>> {
    colors
        .iter()
        .map(|input| {
            let color = RgbColor::from_hex(input)
                .map_err(|e| CliError::validation(format!("Invalid color '{input}': {e}")))?;
            Ok(format!("{} -> 0x{:04X}", color, color.to_rgb565()))
        })
        .collect()
}
