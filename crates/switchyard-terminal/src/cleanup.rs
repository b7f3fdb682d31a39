//! Temporary launch scripts

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

/// Default time a terminal gets to read its script before it is deleted
pub const DEFAULT_CLEANUP_DELAY: Duration = Duration::from_secs(10);

/// Write `contents` to a new executable `.sh` file that outlives this call.
///
/// The file goes into `dir` when given, otherwise the system temp directory.
pub fn write_script(contents: &str, dir: Option<&Path>) -> io::Result<PathBuf> {
    let mut builder = tempfile::Builder::new();
    builder.prefix("switchyard-launch-").suffix(".sh");
    let mut file = match dir {
        Some(dir) => builder.tempfile_in(dir)?,
        None => builder.tempfile()?,
    };
    file.write_all(contents.as_bytes())?;
    file.flush()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(file.path(), std::fs::Permissions::from_mode(0o755))?;
    }

    file.into_temp_path().keep().map_err(|e| e.error)
}

/// Delete the script after `delay` on a detached task. Failures are ignored.
pub fn schedule_removal(path: PathBuf, delay: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        remove_now(&path).await;
    });
}

pub async fn remove_now(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        debug!(path = %path.display(), error = %e, "Launch script already gone");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_script() {
        let path = write_script("#!/bin/bash\necho hi", None).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "#!/bin/bash\necho hi");
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("sh"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o755);
        }
        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn test_scheduled_removal() {
        let path = write_script("true", None).unwrap();
        schedule_removal(path.clone(), Duration::from_millis(20));
        assert!(path.exists());

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(!path.exists());
    }

    #[test]
    fn test_write_script_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_script("true", Some(dir.path())).unwrap();
        assert_eq!(path.parent(), Some(dir.path()));

        let missing = dir.path().join("missing");
        assert!(write_script("true", Some(&missing)).is_err());
    }

    #[tokio::test]
    async fn test_removing_missing_file_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        remove_now(&dir.path().join("gone.sh")).await;
    }
}
