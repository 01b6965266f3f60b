//! CLI command for configuration

use clap::Args;

use crate::config::{ReportPaths, Settings};
use crate::error::ReportResult;

/// Config arguments
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Write the current settings to the config file, creating directories
    #[arg(long)]
    pub init: bool,
}

/// Show paths and settings, optionally writing them out
pub fn handle_config_command(
    paths: &ReportPaths,
    settings: &Settings,
    args: ConfigArgs,
) -> ReportResult<()> {
    if args.init {
        settings.save(paths)?;
        println!("Settings written to: {}", paths.settings_file().display());
        println!();
    }

    println!("finreport Configuration");
    println!("=======================");
    println!("Base directory:    {}", paths.base_dir().display());
    println!("Settings file:     {}", paths.settings_file().display());
    println!("Profile file:      {}", paths.profile_file().display());
    println!("Exports directory: {}", paths.exports_dir().display());
    println!();
    println!("Sources (highest precedence first):");
    for source in settings.resolved_sources(paths) {
        println!("  {:<8} {}", source.name, source.dir.display());
    }
    println!();
    println!("Settings:");
    println!("  Product name:    {}", settings.product_name);
    println!("  Currency symbol: {}", settings.currency_symbol);
    println!("  Date format:     {}", settings.date_format);
    println!("  Top N:           {}", settings.effective_top_n());
    println!(
        "  Page:            {:.2} x {:.2} pt",
        settings.page.width, settings.page.height
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_settings() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ReportPaths::with_base_dir(temp_dir.path().to_path_buf());

        handle_config_command(&paths, &Settings::default(), ConfigArgs { init: true }).unwrap();
        assert!(paths.settings_file().exists());
        assert_eq!(Settings::load_or_create(&paths).unwrap(), Settings::default());
    }
}
