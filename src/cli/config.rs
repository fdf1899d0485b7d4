//! Config init command implementation

use crate::cli::ConfigInitArgs;

/// Example configuration written by `relay config init`.
const EXAMPLE_CONFIG: &str = include_str!("../../relay.example.toml");

/// Write an example configuration file.
pub fn handle_config_init(args: &ConfigInitArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.output.exists() && !args.force {
        return Err(format!(
            "{} already exists (use --force to overwrite)",
            args.output.display()
        )
        .into());
    }

    std::fs::write(&args.output, EXAMPLE_CONFIG)?;
    println!("Wrote {}", args.output.display());
    Ok(())
}
