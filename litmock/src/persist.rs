//! Atomic write-back of rewritten files.

use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

/// Writes `content` to a temporary file next to `path`, then renames it
/// over `path`. Readers see either the old or the new file, never a mix.
pub fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|err| err.error)?;
    debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("handler_test.go");
        fs::write(&path, "package old\n").unwrap();

        write_atomic(&path, "package new\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "package new\n");
        let entries = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1, "temporary file left behind");
    }

    #[test]
    fn test_write_atomic_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.go");

        write_atomic(&path, "package p\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "package p\n");
    }
}
