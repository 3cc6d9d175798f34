//! Command-line argument types for the yamldig binary.

use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Print the value at PATH in FILE
    Get(GetArgs),
    /// Set the value at PATH in FILE, creating structure as needed
    Set(SetArgs),
    /// Remove the value at PATH from FILE
    Remove(RemoveArgs),
    /// Print the derived kind of the value at PATH
    Kind(KindArgs),
}

#[derive(Args)]
pub struct GetArgs {
    /// YAML file to read
    pub file: PathBuf,
    /// Path to resolve, e.g. "users.(name='josie').roles"
    pub path: String,
}

#[derive(Args)]
pub struct SetArgs {
    /// YAML file to modify
    pub file: PathBuf,
    /// Path to set
    pub path: String,
    /// Value to store
    pub value: String,
    /// Coerce VALUE to this type instead of parsing it as YAML
    #[arg(long = "as", value_name = "TYPE")]
    pub as_type: Option<ValueType>,
    /// Print the result instead of writing FILE
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct RemoveArgs {
    /// YAML file to modify
    pub file: PathBuf,
    /// Path to remove
    pub path: String,
    /// Print the result instead of writing FILE
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct KindArgs {
    /// YAML file to read
    pub file: PathBuf,
    /// Path to inspect
    pub path: String,
}

/// Forced interpretation of a value given on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ValueType {
    String,
    Int,
    Float,
    Bool,
    Yaml,
}
