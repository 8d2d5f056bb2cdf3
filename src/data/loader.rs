/// Directory loading: every two-column text file becomes one curve

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::data::collection::SpectrumCollection;
use crate::data::curve::Curve;
use crate::error::{Result, ViewerError};

/// File extensions picked up by `read_dir` (case-insensitive)
pub const SPECTRUM_EXTENSIONS: &[&str] = &["txt", "csv", "tsv", "dat"];

/// List spectrum files in a directory, sorted by file name
pub fn list_spectrum_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| ViewerError::io(dir, e))?;
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file())
        .filter(|p| {
            p.extension()
                .map(|e| e.to_string_lossy().to_lowercase())
                .is_some_and(|e| SPECTRUM_EXTENSIONS.contains(&e.as_str()))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Parse `x y` pairs separated by whitespace, commas, tabs or semicolons.
///
/// Lines whose first field is not a number (headers, comments) are skipped.
/// A numeric first field without a numeric second field is an error.
pub fn parse_samples(content: &str, path: &Path) -> Result<Vec<[f64; 2]>> {
    let mut samples = Vec::new();
    for (i, line) in content.lines().enumerate() {
        let mut fields = line
            .split(|c: char| c.is_whitespace() || c == ',' || c == ';')
            .filter(|f| !f.is_empty());
        let Some(x) = fields.next().and_then(|f| f.parse::<f64>().ok()) else {
            continue;
        };
        let y = fields
            .next()
            .and_then(|f| f.parse::<f64>().ok())
            .ok_or_else(|| ViewerError::Parse {
                path: path.to_path_buf(),
                line: i + 1,
                message: format!("expected two numeric columns, got {:?}", line.trim()),
            })?;
        samples.push([x, y]);
    }
    samples.sort_by(|a, b| a[0].total_cmp(&b[0]));
    Ok(samples)
}

pub fn read_curve(path: &Path) -> Result<Curve> {
    let content = std::fs::read_to_string(path).map_err(|e| ViewerError::io(path, e))?;
    let samples = parse_samples(&content, path)?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    Ok(Curve::new(name, samples))
}

/// Read every spectrum file of `dir` into a collection.
///
/// Unreadable or empty files are skipped with a warning, as is a file whose
/// stem repeats an earlier one (the first in file-name order wins). A
/// directory that yields nothing is an error.
pub fn read_dir(dir: &Path, name: &str, measure_type: &str) -> Result<SpectrumCollection> {
    let mut curves = Vec::new();
    let mut seen = HashSet::new();
    for path in list_spectrum_files(dir)? {
        match read_curve(&path) {
            Ok(curve) if curve.is_empty() => {
                log::warn!("Skipping {}: no samples", path.display());
            }
            Ok(curve) if seen.contains(&curve.name) => {
                log::warn!(
                    "Skipping {}: a spectrum named `{}` is already loaded",
                    path.display(),
                    curve.name
                );
            }
            Ok(curve) => {
                seen.insert(curve.name.clone());
                curves.push(curve);
            }
            Err(e) => log::warn!("Skipping {}", e),
        }
    }
    if curves.is_empty() {
        return Err(ViewerError::EmptyCollection(dir.to_path_buf()));
    }
    log::info!("Read {} spectra from {}", curves.len(), dir.display());
    SpectrumCollection::new(name, measure_type, curves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::curve::CurveCollection;

    fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("spectral_viewer_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_parse_skips_headers_and_sorts() {
        let text = "Wavelength,Reflectance\n# comment\n2,0.5\n1,0.25\n\n3;0.75\n";
        let samples = parse_samples(text, Path::new("x.csv")).unwrap();
        assert_eq!(samples, vec![[1.0, 0.25], [2.0, 0.5], [3.0, 0.75]]);
    }

    #[test]
    fn test_parse_reports_line_of_bad_row() {
        let text = "x y\n1 2\n3\n";
        match parse_samples(text, Path::new("bad.txt")) {
            Err(ViewerError::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_read_dir_builds_collection() {
        let dir = scratch_dir();
        std::fs::write(dir.join("b.txt"), "1 9\n2 1\n").unwrap();
        std::fs::write(dir.join("a.csv"), "1,1\n2,5\n").unwrap();
        std::fs::write(dir.join("empty.txt"), "header only\n").unwrap();
        std::fs::write(dir.join("notes.md"), "1 2\n").unwrap();

        let c = read_dir(&dir, "collection", "pct_reflect").unwrap();
        assert_eq!(c.member_names(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(c.measure_type(), "pct_reflect");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_read_dir_skips_repeated_stem() {
        let dir = scratch_dir();
        for i in 0..5 {
            std::fs::write(dir.join(format!("s{}.txt", i)), format!("1 {}\n2 {}\n", i, i)).unwrap();
        }
        std::fs::write(dir.join("s0.csv"), "1,42\n2,42\n").unwrap();

        let c = read_dir(&dir, "collection", "").unwrap();
        let expected: Vec<String> = (0..5).map(|i| format!("s{}", i)).collect();
        assert_eq!(c.member_names(), expected);
        // s0.csv sorts before s0.txt
        assert_eq!(c.curve(0).unwrap().samples, vec![[1.0, 42.0], [2.0, 42.0]]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_read_dir_without_spectra_fails() {
        let dir = scratch_dir();
        let result = read_dir(&dir, "collection", "");
        assert!(matches!(result, Err(ViewerError::EmptyCollection(_))));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
