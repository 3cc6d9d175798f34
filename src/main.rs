use anyhow::{bail, Context, Result};
use clap::Parser;
use log::debug;
use std::path::Path;

use yamldig::{
    args::{Commands, ValueType},
    io::{read_to_string, write_atomic},
    Document,
};

#[derive(Parser)]
#[command(name = "yamldig", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Get(args) => {
            let doc = load(&args.file)?;
            match doc.query(&args.path)? {
                Some(element) => {
                    let node = doc
                        .node(&element)
                        .context("resolved element vanished from tree")?;
                    print!("{}", serde_yaml::to_string(&node.to_value()?)?);
                }
                None => bail!("no value at path {}", args.path),
            }
        }
        Commands::Set(args) => {
            let mut doc = load(&args.file)?;
            let value = parse_cli_value(&args.value, args.as_type)?;
            doc.set(&args.path, value)?;
            store(&doc, &args.file, args.dry_run)?;
        }
        Commands::Remove(args) => {
            let mut doc = load(&args.file)?;
            doc.remove_path(&args.path)?;
            store(&doc, &args.file, args.dry_run)?;
        }
        Commands::Kind(args) => {
            let doc = load(&args.file)?;
            match doc.query(&args.path)? {
                Some(element) => {
                    let node = doc
                        .node(&element)
                        .context("resolved element vanished from tree")?;
                    println!("{}", node.kind());
                }
                None => bail!("no value at path {}", args.path),
            }
        }
    }

    Ok(())
}

fn load(path: &Path) -> Result<Document> {
    let content = read_to_string(path)?;
    debug!("loaded {} ({} bytes)", path.display(), content.len());
    Ok(Document::from_yaml_str(&content)?)
}

fn store(doc: &Document, path: &Path, dry_run: bool) -> Result<()> {
    let text = doc.to_yaml_string()?;
    if dry_run {
        print!("{text}");
        Ok(())
    } else {
        write_atomic(path, &text)
    }
}

fn parse_cli_value(raw: &str, as_type: Option<ValueType>) -> Result<serde_yaml::Value> {
    use serde_yaml::Value;
    Ok(match as_type {
        Some(ValueType::String) => Value::String(raw.to_string()),
        Some(ValueType::Int) => Value::from(
            raw.trim()
                .parse::<i64>()
                .with_context(|| format!("cannot parse {raw:?} as int"))?,
        ),
        Some(ValueType::Float) => Value::from(
            raw.trim()
                .parse::<f64>()
                .with_context(|| format!("cannot parse {raw:?} as float"))?,
        ),
        Some(ValueType::Bool) => Value::Bool(match raw.trim() {
            "true" | "yes" | "on" | "1" => true,
            "false" | "no" | "off" | "0" => false,
            _ => bail!("cannot parse {raw:?} as bool"),
        }),
        Some(ValueType::Yaml) | None => serde_yaml::from_str(raw)
            .with_context(|| format!("cannot parse {raw:?} as YAML"))?,
    })
}
