//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "edu";
const ORGANIZATION: &str = "artic";
const APPLICATION: &str = "artic";

/// Maximum number of old log files to keep.
const MAX_OLD_LOGS: usize = 25;

/// Get project directories, or None if home directory cannot be determined.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the cache directory, where logs live.
///
/// - Linux: `$XDG_CACHE_HOME/artic` or `~/.cache/artic`
/// - macOS: `~/Library/Caches/edu.artic.artic`
/// - Windows: `C:\Users\<User>\AppData\Local\artic\artic\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the path to the latest log file.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("latest.log"))
}

/// Rotate logs: rename latest.log to timestamped name, clean up old logs.
///
/// Call this at startup before creating the new log file.
pub fn rotate_logs() {
    let Some(cache) = cache_dir() else { return };
    rotate_logs_in(&cache, &chrono::Local::now().format("%Y%m%d_%H%M%S").to_string());
}

fn rotate_logs_in(dir: &Path, timestamp: &str) {
    let latest = dir.join("latest.log");

    if latest.exists() {
        let archived = dir.join(format!("{}.log", timestamp));
        let _ = fs::rename(&latest, &archived);
    }

    cleanup_old_logs(dir, MAX_OLD_LOGS);
}

/// Remove old log files, keeping only the most recent `keep`.
fn cleanup_old_logs(dir: &Path, keep: usize) {
    let Ok(entries) = fs::read_dir(dir) else { return };

    let mut logs: Vec<_> = entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.ends_with(".log") && name != "latest.log"
        })
        .collect();

    // Oldest first; the timestamped names sort chronologically
    logs.sort_by_key(|e| e.file_name());

    if logs.len() > keep {
        for entry in logs.iter().take(logs.len() - keep) {
            let _ = fs::remove_file(entry.path());
        }
    }
}
