//! Utils

use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::Parser;
use rustc_hash::FxHashMap;

use crate::{access::ActorAuthorization, config::ConfigError};

/// Arguments for the cart example
#[derive(Debug, Parser)]
pub struct ExampleCartArgs {
    /// Menu fixture to pick dishes from
    #[clap(short, long, default_value = "fixtures/menu.yml")]
    pub menu: PathBuf,

    /// Order configuration; built-in defaults when omitted
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// Directory to persist the cart in; kept in memory when omitted
    #[clap(short, long)]
    pub storage: Option<PathBuf>,

    /// Dishes to add, as `DISH_ID` or `DISH_ID:QUANTITY`
    #[clap(short, long = "add", value_delimiter = ',')]
    pub add: Vec<String>,
}

/// Arguments for the access example
#[derive(Debug, Parser)]
pub struct ExampleAccessArgs {
    /// Actors fixture
    #[clap(short, long, default_value = "fixtures/actors.yml")]
    pub actors: PathBuf,

    /// Actor to evaluate; every actor when omitted
    #[clap(short = 'n', long)]
    pub actor: Option<String>,
}

/// Load named actors from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_actors(
    path: impl AsRef<Path>,
) -> Result<FxHashMap<String, ActorAuthorization>, ConfigError> {
    let contents = fs::read_to_string(path)?;

    Ok(serde_norway::from_str(&contents)?)
}

/// Parse `DISH_ID` or `DISH_ID:QUANTITY`; the quantity defaults to one.
pub fn parse_dish_quantity(arg: &str) -> Option<(u64, u32)> {
    match arg.split_once(':') {
        Some((id, quantity)) => Some((id.trim().parse().ok()?, quantity.trim().parse().ok()?)),
        None => Some((arg.trim().parse().ok()?, 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dish_quantity_pairs() {
        assert_eq!(parse_dish_quantity("11"), Some((11, 1)));
        assert_eq!(parse_dish_quantity("11:3"), Some((11, 3)));
        assert_eq!(parse_dish_quantity("x:3"), None);
        assert_eq!(parse_dish_quantity("11:-1"), None);
    }
}
