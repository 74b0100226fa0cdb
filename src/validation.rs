//! Sheet-name rules and safe archive writing.
use crate::types::{Error, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const MAX_SHEET_NAME_LEN: usize = 31;
const INVALID_SHEET_CHARS: &str = "[]:*?/\\";

/// Validate sheet name meets reader requirements
pub fn validate_sheet_name(name: &str) -> std::result::Result<(), String> {
    if name.is_empty() {
        return Err("Sheet name cannot be empty".to_string());
    }

    if name.chars().count() > MAX_SHEET_NAME_LEN {
        return Err(format!(
            "Sheet name '{}' exceeds {} characters",
            name, MAX_SHEET_NAME_LEN
        ));
    }

    if let Some(c) = name.chars().find(|c| INVALID_SHEET_CHARS.contains(*c)) {
        return Err(format!("Sheet name '{}' contains invalid character '{}'", name, c));
    }

    if name.starts_with('\'') || name.ends_with('\'') {
        return Err(format!(
            "Sheet name '{}' cannot start or end with an apostrophe",
            name
        ));
    }

    Ok(())
}

/// Check a new sheet name against the rules and the names already in use.
/// Readers compare sheet names case-insensitively.
pub fn check_new_sheet_name<'n, I>(name: &str, existing: I) -> Result<()>
where
    I: IntoIterator<Item = &'n str>,
{
    validate_sheet_name(name).map_err(Error::InvalidSheetName)?;

    let lower = name.to_lowercase();
    if existing.into_iter().any(|n| n.to_lowercase() == lower) {
        return Err(Error::InvalidSheetName(format!(
            "Duplicate sheet name '{}'",
            name
        )));
    }
    Ok(())
}

/// Atomic file writing with rollback on error
pub fn write_file_atomic<F>(path: &Path, write_fn: F) -> Result<()>
where
    F: FnOnce(&mut fs::File) -> Result<()>,
{
    if path.as_os_str().is_empty() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "Filename cannot be empty",
        )));
    }

    // Temp file in the same directory so the final rename stays atomic.
    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(format!(".tmp.{}", std::process::id()));
    let temp_path = PathBuf::from(temp_name);

    let write_result = (|| -> Result<()> {
        let mut temp_file = fs::File::create(&temp_path)?;
        write_fn(&mut temp_file)?;
        temp_file.flush()?;
        temp_file.sync_all()?;
        Ok(())
    })();

    match write_result {
        Ok(()) => {
            if let Err(e) = fs::rename(&temp_path, path) {
                let _ = fs::remove_file(&temp_path);
                return Err(Error::Io(e));
            }
            Ok(())
        }
        Err(e) => {
            let _ = fs::remove_file(&temp_path);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_sheet_name() {
        assert!(validate_sheet_name("Sheet1").is_ok());
        assert!(validate_sheet_name("People & Places").is_ok());
        assert!(validate_sheet_name("").is_err());
        assert!(validate_sheet_name(&"A".repeat(32)).is_err());
        assert!(validate_sheet_name("Invalid:Name").is_err());
        assert!(validate_sheet_name("'quoted'").is_err());
    }

    #[test]
    fn test_duplicate_sheet_names() {
        assert!(check_new_sheet_name("sheet1", ["Sheet1"]).is_err());
        assert!(check_new_sheet_name("Sheet2", ["Sheet1"]).is_ok());
        assert!(matches!(
            check_new_sheet_name("a/b", [] as [&str; 0]),
            Err(Error::InvalidSheetName(_))
        ));
    }

    #[test]
    fn test_atomic_write_success() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");
        write_file_atomic(&path, |f| {
            f.write_all(b"hello")?;
            Ok(())
        })
        .unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"hello");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_atomic_write_failure_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");
        let result = write_file_atomic(&path, |f| {
            f.write_all(b"partial")?;
            Err(Error::Io(std::io::Error::new(std::io::ErrorKind::Other, "boom")))
        });
        assert!(matches!(result, Err(Error::Io(e)) if e.kind() == std::io::ErrorKind::Other));
        assert!(!path.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_atomic_write_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.bin");
        let result = write_file_atomic(&path, |_| Ok(()));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
