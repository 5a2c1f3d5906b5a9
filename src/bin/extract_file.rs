use anyhow::Result;
use medalscraper::{fetch, output::Payload, pipeline, Config, Document, IdentityTable, SourceMode};
use std::{env, path::PathBuf, process::exit};
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    // Expect a saved page, optionally followed by `structured` or `text`.
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!(
            "Usage: {} <HTML_OR_TEXT_FILE> [structured|text]",
            program_name(&args)
        );
        exit(1);
    }
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = extract_file(&args[1], args.get(2).map(String::as_str)) {
        eprintln!("Error: {:#}", e);
        exit(1);
    }
}

fn program_name(args: &[String]) -> &str {
    args.first().map_or("extract_file", String::as_str)
}

/// Run the full pipeline on a local file and print the payload to stdout.
fn extract_file(path: &str, mode: Option<&str>) -> Result<()> {
    let mut cfg = Config::load()?;
    cfg.source_path = Some(PathBuf::from(path));
    if let Some(m) = mode {
        cfg.source_mode = SourceMode::from_str(m)
            .ok_or_else(|| anyhow::anyhow!("unknown mode {:?}", m))?;
    }

    let table = match &cfg.identity_table {
        Some(p) => IdentityTable::from_json_file(p)?,
        None => IdentityTable::builtin(),
    };
    let body = fetch::read_document(path)?;
    let doc = Document::parse(cfg.source_mode, &body, &cfg.anchor);
    let standings = pipeline::run(&doc, &table, &cfg);

    println!("{}", Payload::new(cfg.source_descriptor(), standings).to_json()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_name_without_argv() {
        assert_eq!(program_name(&[]), "extract_file");
        assert_eq!(program_name(&["bin/extract".to_string()]), "bin/extract");
    }
}
