use std::{
    env,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

const DEFAULT_DAPR_DIR_NAME: &str = ".dapr";
const DEFAULT_DAPR_DIR_NO_HOME: &str = "/usr/local/dapr";
const DEFAULT_DAPR_BIN_DIR_NAME: &str = "bin";
const DEFAULT_COMPONENTS_DIR_NAME: &str = "components";
const DEFAULT_CONFIG_FILE_NAME: &str = "config.yaml";

pub const WINDOWS_OS: &str = "windows";

/// The operating system identifier of the host, as reported by `std::env::consts::OS`
pub fn current_os() -> &'static str {
    env::consts::OS
}

/// Default dapr installation root, `$HOME/.dapr`
///
/// Falls back to `/usr/local/dapr` when the home directory can't be determined
pub fn default_dapr_dir_path() -> PathBuf {
    dapr_dir_path_from_home(dirs::home_dir().as_deref())
}

pub fn dapr_dir_path_from_home(home_dir: Option<&Path>) -> PathBuf {
    match home_dir {
        Some(home_dir) => home_dir.join(DEFAULT_DAPR_DIR_NAME),
        None => {
            warn!(
                "Couldn't determine your home directory, using {}",
                DEFAULT_DAPR_DIR_NO_HOME
            );
            PathBuf::from(DEFAULT_DAPR_DIR_NO_HOME)
        }
    }
}

pub fn dapr_bin_path(dapr_dir: &Path) -> PathBuf {
    dapr_dir.join(DEFAULT_DAPR_BIN_DIR_NAME)
}

pub fn dapr_components_path(dapr_dir: &Path) -> PathBuf {
    dapr_dir.join(DEFAULT_COMPONENTS_DIR_NAME)
}

pub fn dapr_config_path(dapr_dir: &Path) -> PathBuf {
    dapr_dir.join(DEFAULT_CONFIG_FILE_NAME)
}

pub fn executable_name(binary_prefix: &str, target_os: &str) -> String {
    match target_os {
        WINDOWS_OS => format!("{}.exe", binary_prefix),
        _ => binary_prefix.to_string(),
    }
}

pub fn binary_file_path_with_dir(binary_dir: &Path, binary_prefix: &str, target_os: &str) -> PathBuf {
    binary_dir.join(executable_name(binary_prefix, target_os))
}

/// Finds a binary on `PATH`, or where we would have installed it otherwise.
/// The returned path isn't checked for existence.
pub fn lookup_binary_file_path(binary_prefix: &str, target_os: &str) -> PathBuf {
    lookup_binary_file_path_with(binary_prefix, target_os, |name| which::which(name).ok())
}

pub fn lookup_binary_file_path_with<F>(binary_prefix: &str, target_os: &str, search: F) -> PathBuf
where
    F: FnOnce(&str) -> Option<PathBuf>,
{
    let binary_file = executable_name(binary_prefix, target_os);
    match search(&binary_file) {
        Some(path) => path,
        None => {
            // the user may not have added the install directory to PATH
            let fallback =
                binary_file_path_with_dir(&dapr_bin_path(&default_dapr_dir_path()), binary_prefix, target_os);
            debug!(
                "{} not found on PATH, falling back to {}",
                binary_file,
                fallback.display()
            );
            fallback
        }
    }
}
