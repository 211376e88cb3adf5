pub mod errors;

use crate::errors::ConfigError;
use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::{Deserialize, Serialize};
use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
};
use tracing::debug;
use weft_middle::options::CompilerOptions;

pub const CONFIG_FILE: &str = "weft.toml";
pub const ENV_PREFIX: &str = "WEFT_";

#[derive(Deserialize, Debug, Clone, Default, Serialize)]
pub struct WeftConfig {
    #[serde(default)]
    pub compiler: CompilerOptions,
}

/// Reads the `[compiler]` table of a `weft.toml`. A file without the table yields
/// the default options.
pub fn load(path: &Path) -> Result<CompilerOptions, ConfigError> {
    let content = read_to_string(path)?;
    let config: WeftConfig = toml::from_str(&content)?;

    debug!("loaded compiler options from {}", path.display());
    Ok(config.compiler)
}

/// Walks up from `dir` looking for `weft.toml` and loads the first one found.
pub fn find_and_load(dir: &Path) -> Result<CompilerOptions, ConfigError> {
    match find_config(dir) {
        Some(path) => load(&path),
        None => {
            debug!("no {} above {}, using defaults", CONFIG_FILE, dir.display());
            Ok(CompilerOptions::default())
        }
    }
}

pub fn find_config(dir: &Path) -> Option<PathBuf> {
    dir.ancestors()
        .map(|dir| dir.join(CONFIG_FILE))
        .find(|path| path.is_file())
}

/// Environment variable controlling `flag`, eg. `WEFT_IGNORE_ERRORS` for
/// `ignore-errors`.
pub fn env_var(flag: &str) -> String {
    format!("{ENV_PREFIX}{}", flag.replace('-', "_").to_uppercase())
}

/// Applies `WEFT_*` overrides on top of `opts`. `lookup` resolves a variable name
/// to its value, normally `std::env::var`.
pub fn apply_env(
    mut opts: CompilerOptions,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<CompilerOptions, ConfigError> {
    for flag in CompilerOptions::FLAGS {
        let var = env_var(flag);
        let Some(value) = lookup(&var) else {
            continue;
        };

        let enabled = match value.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" => true,
            "0" | "false" | "no" => false,
            _ => return Err(ConfigError::InvalidEnvValue { var, value }),
        };
        debug!("{} overrides {} = {}", var, flag, enabled);
        opts.set(flag, enabled);
    }

    Ok(opts)
}

/// Resolves the options for a compilation started in `cwd`: `weft.toml`, then the
/// process environment, then command-line flags.
pub fn resolve(cwd: &Path, args: Option<&ArgMatches>) -> Result<CompilerOptions> {
    let opts = find_and_load(cwd).context("Failed to load weft.toml")?;
    let opts = apply_env(opts, |var| std::env::var(var).ok())
        .context("Invalid compiler option in environment")?;

    Ok(match args {
        Some(args) => opts.from_args(args),
        None => opts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{collections::HashMap, fs};
    use tempfile::tempdir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn loads_compiler_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[compiler]\nignore-errors = true\nprint-passes = true\n").unwrap();

        let opts = load(&path).unwrap();

        assert!(opts.ignore_errors);
        assert!(opts.print_passes);
        assert!(!opts.developer);
    }

    #[test]
    fn missing_table_means_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "").unwrap();

        assert_eq!(load(&path).unwrap(), CompilerOptions::default());
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[compiler]\nignore-errors = \"sometimes\"\n").unwrap();

        assert!(matches!(load(&path), Err(ConfigError::TomlParseError(_))));
    }

    #[test]
    fn finds_config_in_parent_directory() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "[compiler]\nno-codegen = true\n").unwrap();
        let nested = dir.path().join("src").join("nested");
        fs::create_dir_all(&nested).unwrap();

        let opts = find_and_load(&nested).unwrap();

        assert!(opts.no_codegen);
    }

    #[test]
    fn env_overrides_file_values() {
        let opts = CompilerOptions {
            ignore_errors: true,
            ..CompilerOptions::default()
        };

        let opts = apply_env(
            opts,
            env(&[("WEFT_IGNORE_ERRORS", "0"), ("WEFT_DEVELOPER", "Yes")]),
        )
        .unwrap();

        assert!(!opts.ignore_errors);
        assert!(opts.developer);
    }

    #[test]
    fn rejects_unrecognised_env_value() {
        let err = apply_env(CompilerOptions::default(), env(&[("WEFT_NO_CODEGEN", "maybe")]))
            .unwrap_err();

        match err {
            ConfigError::InvalidEnvValue { var, value } => {
                assert_eq!(var, "WEFT_NO_CODEGEN");
                assert_eq!(value, "maybe");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn env_var_names() {
        assert_eq!(env_var("print-passes"), "WEFT_PRINT_PASSES");
        assert_eq!(env_var("developer"), "WEFT_DEVELOPER");
    }
}
