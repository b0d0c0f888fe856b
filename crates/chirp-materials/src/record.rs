//! Material records and the sources that supply them.
//!
//! A record names a material and lists Sellmeier groups, each with optional
//! `A`, `B` and `C` coefficients (µm units, missing values default to 0).
//! The index is $n = \sqrt{1 + \sum (A + B\lambda^2/(\lambda^2 - C))}$.
//!
//! Records are stored as TOML:
//!
//! ```toml
//! name = "bk7"
//!
//! [[sellmeier]]
//! B = 1.03961212
//! C = 0.00600069867
//!
//! [[sellmeier]]
//! B = 0.231792344
//! C = 0.0200179144
//! ```
//!
//! How records are obtained is a strategy: anything implementing
//! [`MaterialSource`] can feed the catalog, including plain closures, so the
//! catalog never touches the file system unless asked to.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::provider::MaterialError;
use crate::sellmeier::{DispersionFormula, SellmeierTerm};

/// One coefficient group of a material record.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct SellmeierGroup {
    #[serde(rename = "A", default)]
    pub a: f64,
    #[serde(rename = "B", default)]
    pub b: f64,
    #[serde(rename = "C", default)]
    pub c: f64,
}

/// A parsed material definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MaterialRecord {
    pub name: String,
    #[serde(default)]
    pub sellmeier: Vec<SellmeierGroup>,
}

impl MaterialRecord {
    /// Parse a record from TOML text. `origin` is only used in error messages.
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, MaterialError> {
        toml::from_str(content).map_err(|e| MaterialError::Parse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// The extended Sellmeier formula described by this record.
    pub fn formula(&self) -> DispersionFormula {
        DispersionFormula::Sellmeier(
            self.sellmeier
                .iter()
                .map(|g| SellmeierTerm { a: g.a, b: g.b, c: g.c })
                .collect(),
        )
    }
}

/// Supplies material records for a location.
pub trait MaterialSource {
    fn load(&self, path: &Path) -> Result<Vec<MaterialRecord>, MaterialError>;
}

impl<F> MaterialSource for F
where
    F: Fn(&Path) -> Result<Vec<MaterialRecord>, MaterialError>,
{
    fn load(&self, path: &Path) -> Result<Vec<MaterialRecord>, MaterialError> {
        self(path)
    }
}

/// Reads every `*.toml` file in a directory as one material record.
///
/// Files are visited in path order, so when two files define the same name
/// the later one wins once loaded into a catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlDirectory;

impl MaterialSource for TomlDirectory {
    fn load(&self, path: &Path) -> Result<Vec<MaterialRecord>, MaterialError> {
        let io_err = |source: std::io::Error| MaterialError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut files: Vec<PathBuf> = std::fs::read_dir(path)
            .map_err(io_err)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "toml"))
            .collect();
        files.sort();

        log::info!("Found {} material files in {}", files.len(), path.display());

        files
            .iter()
            .map(|file| {
                let content = std::fs::read_to_string(file).map_err(|source| MaterialError::Io {
                    path: file.clone(),
                    source,
                })?;
                MaterialRecord::from_toml_str(&content, file)
            })
            .collect()
    }
}
