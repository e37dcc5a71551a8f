// files.rs

use crate::error::{HistoryError, OpenMode};
use crate::paths::HistoryPath;
use nix::fcntl::{open, OFlag};
use nix::sys::stat::Mode;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::os::unix::io::FromRawFd;

fn open_file(path: &HistoryPath, flags: OFlag, mode: OpenMode) -> Result<File, HistoryError> {
    let fd = open(
        path.full.as_path(),
        flags | OFlag::O_CLOEXEC,
        Mode::S_IRUSR | Mode::S_IWUSR,
    )
    .map_err(|source| HistoryError::Open {
        path: path.shown.clone(),
        mode,
        source,
    })?;
    // fd was just returned by open(2) and is owned by nothing else
    Ok(unsafe { File::from_raw_fd(fd) })
}

/// Opens a history file to load from. The default file is created if missing.
pub fn open_for_reading(path: &HistoryPath) -> Result<BufReader<File>, HistoryError> {
    let mut flags = OFlag::O_RDONLY;
    if path.is_default {
        flags |= OFlag::O_CREAT;
    }
    open_file(path, flags, OpenMode::Reading).map(BufReader::new)
}

/// Opens a history file to save to, truncating it unless `append` is set.
pub fn open_for_writing(path: &HistoryPath, append: bool) -> Result<BufWriter<File>, HistoryError> {
    let mut flags = OFlag::O_CREAT | OFlag::O_WRONLY;
    flags |= if append { OFlag::O_APPEND } else { OFlag::O_TRUNC };
    open_file(path, flags, OpenMode::Writing).map(BufWriter::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn explicit(dir: &TempDir, name: &str) -> HistoryPath {
        HistoryPath::resolve(Some(Path::new(name)), dir.path(), || None).unwrap()
    }

    #[test]
    fn missing_explicit_file_is_not_created() {
        let dir = TempDir::new().unwrap();
        let path = explicit(&dir, "absent");
        let err = open_for_reading(&path).unwrap_err();
        assert_eq!(
            err.to_string(),
            "can't open absent for reading: No such file or directory"
        );
        assert!(!dir.path().join("absent").exists());
    }

    #[test]
    fn missing_default_file_is_created_private() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().to_path_buf();
        let path = HistoryPath::resolve(None, &PathBuf::from("/"), || Some(home)).unwrap();

        let mut contents = String::new();
        open_for_reading(&path).unwrap().read_to_string(&mut contents).unwrap();
        assert!(contents.is_empty());

        let mode = std::fs::metadata(&path.full).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn writing_truncates_by_default() {
        let dir = TempDir::new().unwrap();
        let path = explicit(&dir, "h");
        std::fs::write(&path.full, "previous\n").unwrap();

        let mut out = open_for_writing(&path, false).unwrap();
        out.write_all(b"fresh\n").unwrap();
        drop(out);

        assert_eq!(std::fs::read_to_string(&path.full).unwrap(), "fresh\n");
    }

    #[test]
    fn writing_with_append_keeps_contents() {
        let dir = TempDir::new().unwrap();
        let path = explicit(&dir, "h");
        std::fs::write(&path.full, "previous\n").unwrap();

        let mut out = open_for_writing(&path, true).unwrap();
        out.write_all(b"fresh\n").unwrap();
        drop(out);

        assert_eq!(
            std::fs::read_to_string(&path.full).unwrap(),
            "previous\nfresh\n"
        );
    }

    #[test]
    fn unwritable_location_reports_writing() {
        let dir = TempDir::new().unwrap();
        let path = explicit(&dir, "no/such/dir/h");
        let err = open_for_writing(&path, false).unwrap_err();
        assert!(err.to_string().starts_with("can't open no/such/dir/h for writing: "));
    }
}
