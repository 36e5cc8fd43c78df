//! This is the `ConfigFile` struct.
//!
//! This is for finding the right default location for the configuration file of the `locmap`
//! tools.  This is a configuration file/struct neutral loading engine, storing only the
//! base directory and with `load()` read the proper file or fall back on defaults.
//!
//! This encapsulates the configuration, available with `.inner()` or `.into_inner()`.
//!

use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use eyre::{eyre, Result};
use serde::de::DeserializeOwned;
use tracing::{debug, trace, warn};

use crate::makepath;

/// Config filename
const CONFIG: &str = "config.hcl";

/// Main name for the directory base
const TAG: &str = "locmap";

/// Every configuration struct carries a version number, checked on load.
///
pub trait Versioned {
    /// Version read from the file
    fn version(&self) -> usize;
    /// Version this binary understands
    fn expected() -> usize;
}

#[derive(Debug)]
pub struct ConfigFile<T: Debug + Default + DeserializeOwned + Versioned> {
    /// Tag is the project name.
    tag: String,
    /// This is the base directory for all files.
    basedir: PathBuf,
    inner: T,
}

impl<T> ConfigFile<T>
where
    T: Debug + Default + DeserializeOwned + Versioned,
{
    #[tracing::instrument]
    fn new(tag: &str) -> Self {
        let basedir: PathBuf = match BaseDirs::new() {
            Some(base) => {
                #[cfg(unix)]
                let base: PathBuf = makepath!(base.home_dir(), ".config", tag);

                #[cfg(windows)]
                let base: PathBuf = makepath!(base.data_local_dir(), tag);

                base
            }
            // No home directory, look into the current one
            None => PathBuf::from("."),
        };
        debug!("base = {basedir:?}");
        ConfigFile {
            tag: String::from(tag),
            basedir,
            inner: T::default(),
        }
    }

    /// Returns the project tag
    ///
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the path of the default config directory
    ///
    pub fn config_path(&self) -> PathBuf {
        self.basedir.clone()
    }

    /// Returns the path of the default config file
    ///
    pub fn default_file(&self) -> PathBuf {
        self.config_path().join(CONFIG)
    }

    /// Load the file and return a struct T in the right format.
    ///
    /// Use the following search path:
    /// - file specified on CLI, which must exist
    /// - default file in basedir (based on $HOME or $LOCALAPPDATA), defaults if absent
    ///
    #[tracing::instrument]
    pub fn load(fname: Option<&Path>) -> Result<ConfigFile<T>> {
        let mut cfg = ConfigFile::<T>::new(TAG);

        let fname = match fname {
            Some(fname) => {
                if !fname.exists() {
                    return Err(eyre!("Unknown config file {:?}", fname));
                }
                fname.to_path_buf()
            }
            None => {
                let def = cfg.default_file();
                if !def.exists() {
                    warn!("No config file in {:?}, using defaults", def);
                    return Ok(cfg);
                }
                def
            }
        };

        trace!("Loading config file {fname:?}");

        let data = fs::read_to_string(&fname)?;
        let data: T = hcl::from_str(&data)?;
        debug!("struct data = {data:?}");

        if data.version() != T::expected() {
            return Err(eyre!(
                "Bad config file version {} in {:?}, expected {}",
                data.version(),
                fname,
                T::expected()
            ));
        }
        cfg.inner = data;
        Ok(cfg)
    }

    /// Return the inner configuration
    ///
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Consume the loader and keep only the configuration
    ///
    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde::Deserialize;
    use std::io::Write;

    const CVERSION: usize = 1;

    #[derive(Debug, Deserialize)]
    #[serde(default)]
    struct Foo {
        version: usize,
        name: String,
    }

    impl Default for Foo {
        fn default() -> Self {
            Foo {
                version: CVERSION,
                name: "default".to_string(),
            }
        }
    }

    impl Versioned for Foo {
        fn version(&self) -> usize {
            self.version
        }

        fn expected() -> usize {
            CVERSION
        }
    }

    fn write_cfg(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_config_engine_load_file() -> Result<()> {
        let file = write_cfg("version = 1\nname = \"foo\"\n");
        let cfg = ConfigFile::<Foo>::load(Some(file.path()))?;
        assert_eq!(CVERSION, cfg.inner().version());
        assert_eq!("foo", cfg.inner().name);
        assert_eq!(TAG, cfg.tag());
        Ok(())
    }

    #[test]
    fn test_config_engine_missing_file() {
        let cfg = ConfigFile::<Foo>::load(Some(Path::new("/nonexistent/locmap.hcl")));
        assert!(cfg.is_err());
    }

    #[test]
    fn test_config_engine_bad_version() {
        let file = write_cfg("version = 42\n");
        let cfg = ConfigFile::<Foo>::load(Some(file.path()));
        assert!(cfg.is_err());
    }

    #[test]
    fn test_config_engine_default_file() {
        let cfg = ConfigFile::<Foo>::new(TAG);
        assert!(cfg.default_file().ends_with("locmap/config.hcl"));
        assert_eq!("default", cfg.inner().name);
    }
}
