//! Layered configuration for cheatsheet retrieval.
//!
//! Sources, lowest precedence first:
//!
//! 1. Built-in defaults (Dash's cheatsheet directory, 8 MiB content cap).
//! 2. An optional TOML, YAML or JSON file.
//! 3. `CHEATSHEET_*` environment variables, nested keys split on `__`
//!    (`CHEATSHEET_EXTRACT__MAX_CONTENT_BYTES=1048576`).
//!
//! ```toml
//! [catalog]
//! directories = ["~/Library/Application Support/Dash/Cheat Sheets"]
//!
//! [catalog.cheatsheets]
//! git = "/opt/sheets/Git.docset"
//!
//! [extract]
//! max_content_bytes = 8388608
//! ```

pub mod error;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use cheatsheet_catalog::{DirectoryCatalog, StaticCatalog};
use cheatsheet_extract::{DEFAULT_MAX_CONTENT_BYTES, Extractor, Options};
use directories::BaseDirs;
use exn::{OptionExt, ResultExt};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{ErrorKind, Result};

pub const ENV_PREFIX: &str = "CHEATSHEET_";
/// Where Dash keeps cheatsheets, relative to the platform data directory.
const DASH_CHEATSHEETS: &str = "Dash/Cheat Sheets";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub extract: ExtractConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Directories scanned for `*.docset` bundles. A leading `~` is the home
    /// directory.
    pub directories: Vec<PathBuf>,
    /// Explicit name to bundle mapping; wins over scanned bundles.
    pub cheatsheets: BTreeMap<String, PathBuf>,
}
impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            directories: dash_cheatsheet_directory().ok().into_iter().collect(),
            cheatsheets: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub max_content_bytes: usize,
}
impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            max_content_bytes: DEFAULT_MAX_CONTENT_BYTES,
        }
    }
}

impl Config {
    /// Defaults overridden by the environment.
    #[instrument]
    pub fn load() -> Result<Self> {
        Self::from_figment(Self::figment(None)?)
    }

    /// Defaults, overridden by the file at `path`, overridden by the
    /// environment. The format follows the file extension.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_figment(Self::figment(Some(path.as_ref()))?)
    }

    fn figment(path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            if !path.is_file() {
                tracing::warn!(path = %path.display(), "Configuration file does not exist");
                exn::bail!(ErrorKind::Invalid);
            }
            let extension = path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase);
            figment = match extension.as_deref() {
                Some("toml") => figment.merge(Toml::file(path)),
                Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
                Some("json") => figment.merge(Json::file(path)),
                _ => {
                    tracing::warn!(path = %path.display(), "Unsupported configuration file format");
                    exn::bail!(ErrorKind::Invalid);
                },
            };
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    fn from_figment(figment: Figment) -> Result<Self> {
        let config: Self = figment.extract().or_raise(|| ErrorKind::Invalid)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.extract.max_content_bytes == 0 {
            tracing::warn!("extract.max_content_bytes must be greater than zero");
            exn::bail!(ErrorKind::Invalid);
        }
        Ok(())
    }

    /// Catalog scanning the configured directories, with the explicit
    /// mapping layered on top.
    pub fn catalog(&self) -> Result<DirectoryCatalog> {
        let mut explicit = StaticCatalog::new();
        for (name, path) in &self.catalog.cheatsheets {
            explicit = explicit.with(name.as_str(), expand_home(path)?).or_raise(|| ErrorKind::Invalid)?;
        }
        let directories = self.catalog.directories.iter().map(|directory| expand_home(directory)).collect::<Result<Vec<_>>>()?;
        Ok(DirectoryCatalog::new(directories).with_explicit(explicit))
    }

    pub fn options(&self) -> Options {
        Options::default().with_max_content_bytes(self.extract.max_content_bytes)
    }

    pub fn extractor(&self) -> Result<Extractor> {
        Ok(Extractor::new(self.catalog()?).with_options(self.options()))
    }
}

/// `<data dir>/Dash/Cheat Sheets`, which on macOS is
/// `~/Library/Application Support/Dash/Cheat Sheets`.
pub fn dash_cheatsheet_directory() -> Result<PathBuf> {
    let dirs = BaseDirs::new().ok_or_raise(|| ErrorKind::NoHomeDirectory)?;
    Ok(dirs.data_dir().join(DASH_CHEATSHEETS))
}

fn expand_home(path: &Path) -> Result<PathBuf> {
    match path.strip_prefix("~") {
        Ok(rest) => {
            let dirs = BaseDirs::new().ok_or_raise(|| ErrorKind::NoHomeDirectory)?;
            Ok(dirs.home_dir().join(rest))
        },
        Err(_) => Ok(path.to_path_buf()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cheatsheet_catalog::Catalog;
    use figment::Jail;
    use rstest::rstest;
    use std::fs;

    fn config_error(err: error::Error) -> figment::Error {
        err.to_string().into()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.extract.max_content_bytes, DEFAULT_MAX_CONTENT_BYTES);
        assert!(config.catalog.cheatsheets.is_empty());
        assert_eq!(config.options().max_content_bytes, DEFAULT_MAX_CONTENT_BYTES);
        if let Ok(directory) = dash_cheatsheet_directory() {
            assert_eq!(config.catalog.directories, [directory]);
        }
    }

    #[rstest]
    #[case(
        "config.toml",
        "[catalog]\ndirectories = [\"/opt/sheets\"]\n[catalog.cheatsheets]\ngit = \"/opt/Git.docset\"\n[extract]\nmax_content_bytes = 4096\n"
    )]
    #[case(
        "config.yaml",
        "catalog:\n  directories: [/opt/sheets]\n  cheatsheets:\n    git: /opt/Git.docset\nextract:\n  max_content_bytes: 4096\n"
    )]
    #[case(
        "config.json",
        r#"{"catalog": {"directories": ["/opt/sheets"], "cheatsheets": {"git": "/opt/Git.docset"}}, "extract": {"max_content_bytes": 4096}}"#
    )]
    fn test_from_file(#[case] file: &str, #[case] contents: &str) {
        Jail::expect_with(|jail| {
            jail.create_file(file, contents)?;
            let config = Config::from_file(file).map_err(config_error)?;
            assert_eq!(config.catalog.directories, [PathBuf::from("/opt/sheets")]);
            assert_eq!(config.catalog.cheatsheets.get("git"), Some(&PathBuf::from("/opt/Git.docset")));
            assert_eq!(config.extract.max_content_bytes, 4096);
            Ok(())
        });
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[catalog.cheatsheets]\nvim = \"/opt/Vim.docset\"\n")?;
            let config = Config::from_file("config.toml").map_err(config_error)?;
            assert_eq!(config.extract, ExtractConfig::default());
            assert_eq!(config.catalog.directories, CatalogConfig::default().directories);
            Ok(())
        });
    }

    #[test]
    fn test_environment_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[extract]\nmax_content_bytes = 4096\n")?;
            jail.set_env("CHEATSHEET_EXTRACT__MAX_CONTENT_BYTES", "2048");
            assert_eq!(Config::from_file("config.toml").map_err(config_error)?.extract.max_content_bytes, 2048);
            assert_eq!(Config::load().map_err(config_error)?.extract.max_content_bytes, 2048);
            Ok(())
        });
    }

    #[rstest]
    #[case("config.toml", "[extract]\nmax_content_bytes = 0\n")]
    #[case("config.toml", "[extract]\nmax_content_bytes = \"lots\"\n")]
    #[case("config.toml", "this is not toml")]
    #[case("config.ini", "[extract]\nmax_content_bytes = 10\n")]
    fn test_invalid(#[case] file: &str, #[case] contents: &str) {
        Jail::expect_with(|jail| {
            jail.create_file(file, contents)?;
            let err = Config::from_file(file).unwrap_err();
            assert_eq!(*err, ErrorKind::Invalid);
            Ok(())
        });
    }

    #[test]
    fn test_missing_file_is_invalid() {
        Jail::expect_with(|_| {
            assert_eq!(*Config::from_file("missing.toml").unwrap_err(), ErrorKind::Invalid);
            Ok(())
        });
    }

    #[test]
    fn test_catalog_prefers_explicit_mapping() {
        let config = Config {
            catalog: CatalogConfig {
                directories: vec![PathBuf::from("/nonexistent/sheets")],
                cheatsheets: BTreeMap::from([("git".to_string(), PathBuf::from("/opt/Git.docset"))]),
            },
            ..Config::default()
        };
        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.directories(), [PathBuf::from("/nonexistent/sheets")]);
        assert_eq!(catalog.resolve("git").unwrap(), Some(PathBuf::from("/opt/Git.docset")));
        assert_eq!(catalog.resolve("vim").unwrap(), None);
    }

    #[test]
    fn test_home_expansion() {
        let Some(dirs) = BaseDirs::new() else {
            return;
        };
        assert_eq!(expand_home(Path::new("~/sheets")).unwrap(), dirs.home_dir().join("sheets"));
        assert_eq!(expand_home(Path::new("/abs/~/sheets")).unwrap(), PathBuf::from("/abs/~/sheets"));
    }

    #[test]
    fn test_extractor_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("shell");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("index.json"), r#"{"entries": [{"name": "ls", "category": "Files", "anchor": "ls"}]}"#).unwrap();
        fs::write(root.join("index.md"), "# Shell\n\n## ls\nList files\n").unwrap();
        let config = Config {
            catalog: CatalogConfig {
                directories: Vec::new(),
                cheatsheets: BTreeMap::from([("shell".to_string(), root)]),
            },
            extract: ExtractConfig { max_content_bytes: 1024 },
        };
        let extractor = config.extractor().unwrap();
        assert_eq!(extractor.options().max_content_bytes, 1024);
        assert_eq!(extractor.categories("shell").unwrap(), ["Files"]);
        assert_eq!(extractor.render("shell", Some("Files")).unwrap(), "# Shell\n\n## ls\n\nList files\n");
    }
}
