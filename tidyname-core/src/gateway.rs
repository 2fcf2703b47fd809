use std::fs;
use std::io;
use std::path::Path;

/// The filesystem capabilities the batch orchestrator needs.
///
/// Every call is independent and may fail; the orchestrator turns failures
/// into per-item results instead of propagating them.
pub trait FsGateway {
    /// Whether anything (file, directory or symlink) occupies `path`
    fn exists(&self, path: &Path) -> bool;

    /// Move `from` to `to`
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Whether both paths name the same file on disk. Used to let a case-only
    /// rename through on case-insensitive filesystems, where the target path
    /// resolves to the source itself.
    fn is_same_file(&self, _a: &Path, _b: &Path) -> bool {
        false
    }

    /// Whether the parent directory holds an entry named exactly like the last
    /// component of `path`, byte for byte. `exists` may also match a name that
    /// differs only by case on a case-insensitive filesystem.
    fn has_exact_entry(&self, path: &Path) -> bool {
        self.exists(path)
    }
}

/// Gateway backed by `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFs;

impl FsGateway for StdFs {
    fn exists(&self, path: &Path) -> bool {
        // symlink_metadata so a dangling link still counts as taken
        fs::symlink_metadata(path).is_ok()
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    #[cfg(unix)]
    fn is_same_file(&self, a: &Path, b: &Path) -> bool {
        use std::os::unix::fs::MetadataExt;

        match (fs::symlink_metadata(a), fs::symlink_metadata(b)) {
            (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
            _ => false,
        }
    }

    #[cfg(not(unix))]
    fn is_same_file(&self, a: &Path, b: &Path) -> bool {
        match (fs::canonicalize(a), fs::canonicalize(b)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    fn has_exact_entry(&self, path: &Path) -> bool {
        let (Some(dir), Some(name)) = (path.parent(), path.file_name()) else {
            return self.exists(path);
        };
        let dir = if dir.as_os_str().is_empty() {
            Path::new(".")
        } else {
            dir
        };
        match fs::read_dir(dir) {
            Ok(entries) => entries
                .filter_map(Result::ok)
                .any(|entry| entry.file_name() == name),
            // Can't list it, so treat the name as taken
            Err(_) => self.exists(path),
        }
    }
}

impl<G: FsGateway + ?Sized> FsGateway for &G {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        (**self).rename(from, to)
    }

    fn is_same_file(&self, a: &Path, b: &Path) -> bool {
        (**self).is_same_file(a, b)
    }

    fn has_exact_entry(&self, path: &Path) -> bool {
        (**self).has_exact_entry(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_std_fs_exists_and_rename() {
        let temp_dir = TempDir::new().unwrap();
        let from = temp_dir.path().join("a.txt");
        let to = temp_dir.path().join("b.txt");
        fs::write(&from, "content").unwrap();

        let gateway = StdFs;
        assert!(gateway.exists(&from));
        assert!(!gateway.exists(&to));

        gateway.rename(&from, &to).unwrap();
        assert!(!gateway.exists(&from));
        assert!(gateway.exists(&to));
        assert_eq!(fs::read_to_string(&to).unwrap(), "content");
    }

    #[test]
    fn test_std_fs_rename_missing_source_errors() {
        let temp_dir = TempDir::new().unwrap();
        let result = StdFs.rename(
            &temp_dir.path().join("missing.txt"),
            &temp_dir.path().join("other.txt"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_is_same_file() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.txt");
        let b = temp_dir.path().join("b.txt");
        fs::write(&a, "a").unwrap();
        fs::write(&b, "b").unwrap();

        assert!(StdFs.is_same_file(&a, &a));
        assert!(!StdFs.is_same_file(&a, &b));
        assert!(!StdFs.is_same_file(&a, &temp_dir.path().join("missing.txt")));
    }

    #[test]
    fn test_has_exact_entry_compares_names_byte_for_byte() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("photo.jpg");
        fs::write(&file, "").unwrap();

        assert!(StdFs.has_exact_entry(&file));
        assert!(!StdFs.has_exact_entry(&temp_dir.path().join("Photo.jpg")));
        assert!(!StdFs.has_exact_entry(&temp_dir.path().join("other.jpg")));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_counts_as_existing() {
        let temp_dir = TempDir::new().unwrap();
        let link = temp_dir.path().join("link");
        std::os::unix::fs::symlink(temp_dir.path().join("nowhere"), &link).unwrap();

        assert!(!link.exists());
        assert!(StdFs.exists(&link));
    }
}
