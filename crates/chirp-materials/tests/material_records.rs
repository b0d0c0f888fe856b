//! Loading the bundled material records from disk.

use std::path::PathBuf;

use approx::assert_abs_diff_eq;

use chirp_materials::{MaterialCatalog, RefractiveIndex, TomlDirectory};

fn materials_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../materials")
}

#[test]
fn test_bundled_records_load() {
    let mut catalog = MaterialCatalog::with_builtins().unwrap();
    let added = catalog.load_from(&TomlDirectory, &materials_dir()).unwrap();
    assert_eq!(added, 2);
    assert!(catalog.contains("bk7"));
    assert!(catalog.contains("caf2"));
    assert_eq!(catalog.len(), 9);
}

#[test]
fn test_bundled_caf2_index() {
    let mut catalog = MaterialCatalog::empty();
    catalog.load_from(&TomlDirectory, &materials_dir()).unwrap();
    let caf2 = catalog.require("caf2").unwrap();
    assert_abs_diff_eq!(caf2.index_at_wavelength(800e-9).unwrap(), 1.4305, epsilon = 1e-4);
}

#[test]
fn test_records_in_scratch_directory() {
    let dir = std::env::temp_dir().join(format!("chirp-materials-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("glass.toml"), "name = \"glass\"\n[[sellmeier]]\nB = 1.2\nC = 0.01\n").unwrap();
    std::fs::write(dir.join("notes.txt"), "not a material").unwrap();

    let mut catalog = MaterialCatalog::empty();
    let added = catalog.load_from(&TomlDirectory, &dir).unwrap();
    std::fs::remove_dir_all(&dir).unwrap();

    assert_eq!(added, 1);
    let glass = catalog.require("glass").unwrap();
    let l2: f64 = 0.8 * 0.8;
    let expected = (1.0 + 1.2 * l2 / (l2 - 0.01)).sqrt();
    assert_abs_diff_eq!(glass.index_at_wavelength(800e-9).unwrap(), expected, epsilon = 1e-8);
}
