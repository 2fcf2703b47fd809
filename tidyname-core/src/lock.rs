use anyhow::{anyhow, Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

const LOCK_FILE_NAME: &str = "tidyname.lock";
const STALE_LOCK_TIMEOUT_SECS: u64 = 300; // 5 minutes

/// Who holds a lock, as written to the lock file (`pid:timestamp`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LockOwner {
    pid: u32,
    timestamp: u64,
}

impl LockOwner {
    fn current() -> Self {
        Self {
            pid: process::id(),
            timestamp: now_secs(),
        }
    }

    fn parse(content: &str) -> Option<Self> {
        let (pid, timestamp) = content.trim().split_once(':')?;
        Some(Self {
            pid: pid.parse().ok()?,
            timestamp: timestamp.parse().ok()?,
        })
    }

    fn is_stale(&self) -> bool {
        now_secs().saturating_sub(self.timestamp) > STALE_LOCK_TIMEOUT_SECS
    }

    fn to_content(self) -> String {
        format!("{}:{}", self.pid, self.timestamp)
    }
}

/// Exclusive lock on a state directory, held while a batch is applied or
/// undone so two processes never mutate the same history at once.
#[derive(Debug)]
pub struct LockFile {
    path: PathBuf,
    owner: LockOwner,
}

impl LockFile {
    /// Acquire the lock in `state_dir`, clearing it first when the previous
    /// holder is gone or the lock is older than five minutes.
    pub fn acquire(state_dir: &Path) -> Result<Self> {
        let lock_path = state_dir.join(LOCK_FILE_NAME);

        if lock_path.exists() {
            let content = fs::read_to_string(&lock_path).context("Failed to read lock file")?;

            match LockOwner::parse(&content) {
                Some(holder) if !holder.is_stale() && is_process_running(holder.pid) => {
                    return Err(anyhow!(
                        "Another tidyname process is already running (PID: {}). \
                        If this is incorrect, remove the lock file at: {}",
                        holder.pid,
                        lock_path.display()
                    ));
                },
                Some(holder) => {
                    tracing::debug!(pid = holder.pid, "Removing abandoned lock file");
                    fs::remove_file(&lock_path).context("Failed to remove stale lock file")?;
                },
                None => {
                    return Err(anyhow!(
                        "invalid lock file contents at {}, remove it and try again",
                        lock_path.display()
                    ));
                },
            }
        }

        fs::create_dir_all(state_dir).context("Failed to create tidyname state directory")?;

        let owner = LockOwner::current();
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true) // Fail if another process won the race
            .open(&lock_path)
            .context("Failed to create lock file")?;
        file.write_all(owner.to_content().as_bytes())
            .context("Failed to write lock file")?;

        Ok(Self {
            path: lock_path,
            owner,
        })
    }

    /// Release the lock, leaving the file alone if someone else now owns it
    pub fn release(self) -> Result<()> {
        self.remove_if_owned()
    }

    fn remove_if_owned(&self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let content = fs::read_to_string(&self.path).context("Failed to read lock file")?;
        if LockOwner::parse(&content) == Some(self.owner) {
            fs::remove_file(&self.path).context("Failed to remove lock file")?;
        }
        Ok(())
    }
}

impl Drop for LockFile {
    fn drop(&mut self) {
        let _ = self.remove_if_owned();
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Check if a process with the given PID is running
#[cfg(unix)]
fn is_process_running(pid: u32) -> bool {
    // Signal 0 only checks for existence
    #[allow(clippy::cast_possible_wrap)]
    unsafe {
        libc::kill(pid as libc::pid_t, 0) == 0
    }
}

#[cfg(windows)]
fn is_process_running(pid: u32) -> bool {
    use winapi::um::handleapi::CloseHandle;
    use winapi::um::processthreadsapi::OpenProcess;
    use winapi::um::winnt::PROCESS_QUERY_INFORMATION;

    unsafe {
        let handle = OpenProcess(PROCESS_QUERY_INFORMATION, 0, pid);
        if handle.is_null() {
            false
        } else {
            CloseHandle(handle);
            true
        }
    }
}

#[cfg(not(any(unix, windows)))]
fn is_process_running(_pid: u32) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_acquire_and_release() {
        let temp_dir = TempDir::new().unwrap();
        let state_dir = temp_dir.path().join(".tidyname");

        let lock = LockFile::acquire(&state_dir).unwrap();
        assert!(state_dir.join(LOCK_FILE_NAME).exists());
        assert_eq!(lock.owner.pid, process::id());

        lock.release().unwrap();
        assert!(!state_dir.join(LOCK_FILE_NAME).exists());
    }

    #[test]
    fn test_second_acquire_fails_while_held() {
        let temp_dir = TempDir::new().unwrap();
        let state_dir = temp_dir.path().join(".tidyname");

        let _lock = LockFile::acquire(&state_dir).unwrap();
        let err = LockFile::acquire(&state_dir).unwrap_err();
        assert!(err.to_string().contains("already running"));
    }

    #[test]
    fn test_stale_lock_is_replaced() {
        let temp_dir = TempDir::new().unwrap();
        let state_dir = temp_dir.path().join(".tidyname");
        fs::create_dir_all(&state_dir).unwrap();
        let lock_path = state_dir.join(LOCK_FILE_NAME);

        // Our own (running) PID, but far too old
        let old = now_secs() - (STALE_LOCK_TIMEOUT_SECS + 100);
        fs::write(&lock_path, format!("{}:{}", process::id(), old)).unwrap();

        let lock = LockFile::acquire(&state_dir).unwrap();
        let content = fs::read_to_string(&lock_path).unwrap();
        assert_eq!(LockOwner::parse(&content), Some(lock.owner));
    }

    #[cfg(any(unix, windows))]
    #[test]
    fn test_orphaned_lock_is_replaced() {
        let temp_dir = TempDir::new().unwrap();
        let state_dir = temp_dir.path().join(".tidyname");
        fs::create_dir_all(&state_dir).unwrap();
        let lock_path = state_dir.join(LOCK_FILE_NAME);

        fs::write(&lock_path, format!("999999:{}", now_secs() - 10)).unwrap();

        let lock = LockFile::acquire(&state_dir).unwrap();
        assert!(lock_path.exists());
        lock.release().unwrap();
    }

    #[test]
    fn test_malformed_lock_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let state_dir = temp_dir.path().join(".tidyname");
        fs::create_dir_all(&state_dir).unwrap();
        fs::write(state_dir.join(LOCK_FILE_NAME), "garbage").unwrap();

        let err = LockFile::acquire(&state_dir).unwrap_err();
        assert!(err.to_string().contains("invalid lock file"));
    }

    #[test]
    fn test_drop_releases_lock() {
        let temp_dir = TempDir::new().unwrap();
        let state_dir = temp_dir.path().join(".tidyname");
        let lock_path = state_dir.join(LOCK_FILE_NAME);

        {
            let _lock = LockFile::acquire(&state_dir).unwrap();
            assert!(lock_path.exists());
        }

        assert!(!lock_path.exists());
    }

    #[test]
    fn test_release_leaves_foreign_lock_alone() {
        let temp_dir = TempDir::new().unwrap();
        let state_dir = temp_dir.path().join(".tidyname");
        let lock_path = state_dir.join(LOCK_FILE_NAME);

        let lock = LockFile::acquire(&state_dir).unwrap();
        fs::write(&lock_path, "1:1").unwrap();

        lock.release().unwrap();
        assert!(lock_path.exists());
    }

    #[test]
    fn test_parse_owner() {
        assert_eq!(
            LockOwner::parse("42:1700000000\n"),
            Some(LockOwner {
                pid: 42,
                timestamp: 1_700_000_000
            })
        );
        assert_eq!(LockOwner::parse("42"), None);
        assert_eq!(LockOwner::parse("x:1"), None);
    }

    #[cfg(any(unix, windows))]
    #[test]
    fn test_process_running_detection() {
        assert!(is_process_running(process::id()));
        assert!(!is_process_running(999_999));
    }
}
