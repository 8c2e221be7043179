use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Deserialize;

use darc::chunk::DEFAULT_MAX_META_SIZE;

use crate::error::AppError;

#[derive(Parser)]
#[command(name = "docex")]
#[command(about = "Extract document chunks from a chunk stream container")]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Maximum allowed size for metadata in bytes
    #[arg(long, value_name = "BYTES")]
    pub max_meta_size: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Extracts every document chunk into the output directory (default)
    Extract {
        /// Container file to read
        input: Option<PathBuf>,

        /// Directory the documents are written to
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Dumps the header and metadata of every chunk
    Analyze {
        /// Container file to read
        input: Option<PathBuf>,
    },
}

// Configuration
// Flags on the command line win over the config file, which wins over the
// defaults below
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub max_meta_size: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input: PathBuf::from("sample.env"),
            output_dir: PathBuf::from("output"),
            max_meta_size: DEFAULT_MAX_META_SIZE,
        }
    }
}

impl Config {
    pub fn from_toml(path: &Path, data: &str) -> Result<Config, AppError> {
        toml::from_str(data).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: Option<&Path>) -> Result<Config, AppError> {
        match path {
            None => Ok(Config::default()),
            Some(path) => {
                let data =
                    std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
                        path: path.to_path_buf(),
                        source,
                    })?;
                Config::from_toml(path, &data)
            }
        }
    }
}

/// What to run, with every setting resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum Job {
    Extract {
        input: PathBuf,
        output_dir: PathBuf,
        max_meta_size: u64,
    },
    Analyze {
        input: PathBuf,
        max_meta_size: u64,
    },
}

impl Cli {
    pub fn resolve(self, config: Config) -> Job {
        let max_meta_size = self.max_meta_size.unwrap_or(config.max_meta_size);

        match self.command {
            None => Job::Extract {
                input: config.input,
                output_dir: config.output_dir,
                max_meta_size,
            },
            Some(Commands::Extract { input, output_dir }) => Job::Extract {
                input: input.unwrap_or(config.input),
                output_dir: output_dir.unwrap_or(config.output_dir),
                max_meta_size,
            },
            Some(Commands::Analyze { input }) => Job::Analyze {
                input: input.unwrap_or(config.input),
                max_meta_size,
            },
        }
    }
}

#[cfg(test)]
mod test_cli {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_is_extract_with_defaults() {
        let cli = Cli::try_parse_from(["docex"]).unwrap();

        assert_eq!(
            cli.resolve(Config::default()),
            Job::Extract {
                input: PathBuf::from("sample.env"),
                output_dir: PathBuf::from("output"),
                max_meta_size: 10 * 1024 * 1024,
            }
        );
    }

    #[test]
    fn extract_flags() {
        let cli = Cli::try_parse_from([
            "docex",
            "--max-meta-size",
            "1024",
            "extract",
            "in.env",
            "-o",
            "out",
        ])
        .unwrap();

        assert_eq!(
            cli.resolve(Config::default()),
            Job::Extract {
                input: PathBuf::from("in.env"),
                output_dir: PathBuf::from("out"),
                max_meta_size: 1024,
            }
        );
    }

    #[test]
    fn analyze_uses_config() {
        let config = Config::from_toml(
            Path::new("test.toml"),
            r#"
            input = "from-config.env"
            max_meta_size = 4096
        "#,
        )
        .unwrap();
        let cli = Cli::try_parse_from(["docex", "analyze"]).unwrap();

        assert_eq!(
            cli.resolve(config),
            Job::Analyze {
                input: PathBuf::from("from-config.env"),
                max_meta_size: 4096,
            }
        );
    }

    #[test]
    fn flag_beats_config() {
        let config = Config {
            max_meta_size: 4096,
            ..Config::default()
        };
        let cli = Cli::try_parse_from(["docex", "--max-meta-size", "12", "analyze", "x.env"])
            .unwrap();

        assert_eq!(
            cli.resolve(config),
            Job::Analyze {
                input: PathBuf::from("x.env"),
                max_meta_size: 12,
            }
        );
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config = Config::from_toml(Path::new("test.toml"), "output_dir = \"docs\"").unwrap();

        assert_eq!(config.output_dir, PathBuf::from("docs"));
        assert_eq!(config.input, PathBuf::from("sample.env"));
        assert_eq!(config.max_meta_size, DEFAULT_MAX_META_SIZE);
    }

    #[test]
    fn unknown_config_key() {
        let res = Config::from_toml(Path::new("test.toml"), "max_meta = 12");
        assert!(matches!(res, Err(AppError::ConfigParse { .. })));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_meta_size = 77").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.max_meta_size, 77);
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let res = Config::load(Some(dir.path().join("nope.toml").as_path()));
        assert!(matches!(res, Err(AppError::ConfigRead { .. })));
    }

    #[test]
    fn load_none_is_default() {
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }
}
