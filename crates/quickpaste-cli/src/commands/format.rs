use quickpaste_core::{Accelerator, Platform};

use crate::error::CliError;

pub fn run_format(accelerator: &str, platform: Option<Platform>) -> Result<(), CliError> {
    println!("{}", render_label(accelerator, platform.unwrap_or_else(Platform::current))?);
    Ok(())
}

pub fn render_label(accelerator: &str, platform: Platform) -> Result<String, CliError> {
    let accelerator = Accelerator::parse(accelerator.trim())?;
    Ok(accelerator.format(platform))
}
