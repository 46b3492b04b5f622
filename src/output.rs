//! Writing transpiled source to disk.

use std::io;
use std::path::Path;

/// Write `text` to `path`, creating parent directories as needed.
pub fn write_output(path: &Path, text: &str) -> Result<(), io::Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, text)?;
    tracing::info!(path = %path.display(), bytes = text.len(), "wrote output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("set.tidal");
        write_output(&path, "d1 $ \"bd\"\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "d1 $ \"bd\"\n");
    }

    #[test]
    fn write_overwrites_existing_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        write_output(file.path(), "old\n").unwrap();
        write_output(file.path(), "new\n").unwrap();
        assert_eq!(std::fs::read_to_string(file.path()).unwrap(), "new\n");
    }
}
