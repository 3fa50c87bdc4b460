//! `tblsgen generate` command - Convert a schema into a tbls schema document.

use std::path::{Path, PathBuf};

use tblsgen_tbls::{InputFormat, SchemaDocument, convert_input};
use tracing::info;

use crate::cli::GenerateArgs;
use crate::config::{load_config, resolve_path};
use crate::error::{CliError, CliResult};
use crate::output::{self, success};

/// Output path meaning "write to stdout"
const STDOUT: &str = "-";

/// Run the generate command
pub async fn run(args: GenerateArgs, config_path: Option<PathBuf>) -> CliResult<()> {
    let config = load_config(config_path.as_deref())?;

    let schema_path = resolve_path(args.schema.clone(), &config.input.path);
    let output_path = resolve_path(args.output.clone(), &config.output.path);
    let format = args.format.map(InputFormat::from).unwrap_or(config.input.format);
    let pretty = args.pretty_override().unwrap_or(config.output.pretty);
    let to_stdout = output_path.as_os_str() == STDOUT;

    if !schema_path.exists() {
        return Err(CliError::Config(format!(
            "Schema file not found: {}",
            schema_path.display()
        )));
    }

    let source = tokio::fs::read_to_string(&schema_path).await?;
    let document = convert_input(&source, format, &config)?;
    let json = document.to_json(pretty)?;

    info!(
        schema = %schema_path.display(),
        output = %output_path.display(),
        %format,
        "generated schema document"
    );

    if to_stdout {
        println!("{json}");
        return Ok(());
    }

    write_output(&output_path, &json).await?;
    report(&schema_path, &output_path, format, &document);
    Ok(())
}

async fn write_output(path: &Path, json: &str) -> CliResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, format!("{json}\n")).await?;
    Ok(())
}

fn report(schema_path: &Path, output_path: &Path, format: InputFormat, document: &SchemaDocument) {
    output::header("Generate tbls Schema");
    output::kv("Schema", &schema_path.display().to_string());
    output::kv("Format", format.as_str());
    output::kv("Output", &output_path.display().to_string());
    output::newline();

    output::section("Document");
    output::kv("Tables", &document.tables.len().to_string());
    output::kv("Relations", &document.relations.len().to_string());
    output::kv("Enums", &document.enums.len().to_string());
    output::newline();

    success(&format!("Wrote {}", output_path.display()));
}
