// ==========================================
// Nominal Compounds - Run Configuration
// ==========================================
// Loads the run parameters either from a Java-style properties file
// (config.properties next to the executable) or from six positional
// command-line arguments, in this order: master file, input directory,
// database URI, user, password, database name.
// ==========================================

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Default configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.properties";

// properties keys
const KEY_MASTER_FILE: &str = "master.file";
const KEY_INPUT_DIR: &str = "input.dir";
const KEY_DB_URI: &str = "db.uri";
const KEY_DB_USER: &str = "db.user";
const KEY_DB_PASSWORD: &str = "db.password";
const KEY_DB_NAME: &str = "db.name";

const REQUIRED_KEYS: [&str; 6] = [
    KEY_MASTER_FILE,
    KEY_INPUT_DIR,
    KEY_DB_URI,
    KEY_DB_USER,
    KEY_DB_PASSWORD,
    KEY_DB_NAME,
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read configuration file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed configuration line {line}: '{text}' (expected key=value)")]
    MalformedLine { line: usize, text: String },
    #[error("missing configuration keys: {0}")]
    MissingKeys(String),
}

/// Everything one import run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Workbook with the master compound sheet and the duplicate sheet.
    pub master_file: PathBuf,
    /// Directory scanned for per-work workbooks.
    pub input_dir: PathBuf,
    pub db_uri: String,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
}

impl RunConfig {
    /// Loads the configuration from a properties file. Lines are
    /// `key=value`; blank lines and `#`/`!` comment lines are skipped.
    /// All missing keys are reported in one error.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_properties(&text)
    }

    /// Builds the configuration from the six positional arguments.
    pub fn from_args(args: &[String]) -> Self {
        RunConfig {
            master_file: PathBuf::from(&args[0]),
            input_dir: PathBuf::from(&args[1]),
            db_uri: args[2].clone(),
            db_user: args[3].clone(),
            db_password: args[4].clone(),
            db_name: args[5].clone(),
        }
    }

    fn from_properties(text: &str) -> Result<Self, ConfigError> {
        let mut values: HashMap<&str, String> = HashMap::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(ConfigError::MalformedLine {
                    line: idx + 1,
                    text: line.to_string(),
                });
            };
            values.insert(key.trim(), value.trim().to_string());
        }

        let missing: Vec<&str> = REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| values.get(key).map_or(true, |v| v.is_empty()))
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingKeys(missing.join(", ")));
        }

        let mut take = |key: &str| values.remove(key).unwrap_or_default();
        Ok(RunConfig {
            master_file: PathBuf::from(take(KEY_MASTER_FILE)),
            input_dir: PathBuf::from(take(KEY_INPUT_DIR)),
            db_uri: take(KEY_DB_URI),
            db_user: take(KEY_DB_USER),
            db_password: take(KEY_DB_PASSWORD),
            db_name: take(KEY_DB_NAME),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FULL: &str = "\
# graph connection
master.file = data/compounds.xlsx
input.dir = data/works
db.uri = neo4j://localhost:7687
db.user = neo4j
db.password = secret
db.name = compounds
";

    #[test]
    fn parses_full_properties_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FULL.as_bytes()).unwrap();
        let config = RunConfig::from_file(file.path()).unwrap();
        assert_eq!(config.master_file, PathBuf::from("data/compounds.xlsx"));
        assert_eq!(config.db_name, "compounds");
    }

    #[test]
    fn reports_all_missing_keys_at_once() {
        let err = RunConfig::from_properties("db.uri=neo4j://localhost:7687\n").unwrap_err();
        let ConfigError::MissingKeys(keys) = err else {
            panic!("expected MissingKeys");
        };
        assert!(keys.contains(KEY_MASTER_FILE));
        assert!(keys.contains(KEY_DB_PASSWORD));
        assert!(!keys.contains(KEY_DB_URI));
    }

    #[test]
    fn rejects_lines_without_separator() {
        let err = RunConfig::from_properties("master.file\n").unwrap_err();
        assert!(matches!(err, ConfigError::MalformedLine { line: 1, .. }));
    }

    #[test]
    fn positional_args_fill_all_fields() {
        let args: Vec<String> = ["m.xlsx", "works", "uri", "user", "pw", "db"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let config = RunConfig::from_args(&args);
        assert_eq!(config.input_dir, PathBuf::from("works"));
        assert_eq!(config.db_password, "pw");
    }
}
