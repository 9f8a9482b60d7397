use std::path::Path;

use anyhow::{Context, Result};

use crate::record::QuestionRecord;

/// Write records as a pretty-printed JSON array, creating parent directories.
pub fn write_records(path: &Path, records: &[QuestionRecord]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }
    let mut json = serde_json::to_string_pretty(records)?;
    json.push('\n');
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::parser::Pipeline;

    #[test]
    fn writes_array_with_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/breast.json");
        let report = Pipeline::new(Settings::default())
            .unwrap()
            .scan_file(Path::new("tests/fixtures/breast.html"), None)
            .unwrap();

        write_records(&path, &report.records).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.ends_with("]\n"));
        let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed.as_array().map(|a| a.len()), Some(3));
        assert_eq!(parsed[0]["_metadata"]["category"], "Anatomic Pathology > Breast");
    }

    #[test]
    fn empty_result_is_an_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        write_records(&path, &[]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]\n");
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // a directory where the file should go
        let err = write_records(dir.path(), &[]).unwrap_err();
        assert!(err.to_string().contains("Failed to write"));
    }
}
