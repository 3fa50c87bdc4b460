//! `tblsgen init` command - Write a default configuration file.

use tblsgen_tbls::TblsConfig;

use crate::cli::InitArgs;
use crate::config::CONFIG_FILE_NAME;
use crate::error::{CliError, CliResult};
use crate::output::{self, success};

/// Run the init command
pub async fn run(args: InitArgs) -> CliResult<()> {
    output::header("Initialize tblsgen");

    let config_path = args.path.join(CONFIG_FILE_NAME);
    if config_path.exists() && !args.force {
        return Err(CliError::Command(format!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        )));
    }

    tokio::fs::create_dir_all(&args.path).await?;

    let config = TblsConfig::default();
    tokio::fs::write(&config_path, config.to_toml()?).await?;

    success(&format!("Created {}", config_path.display()));
    output::newline();

    output::section("Next steps");
    output::list_item(&format!("Point [input] path at your schema (default {})", config.input.path));
    output::list_item("Run `tblsgen generate` to write the tbls schema document");
    output::list_item(&format!(
        "Use `json://{}` as the tbls DSN to render documentation",
        config.output.path
    ));

    Ok(())
}
