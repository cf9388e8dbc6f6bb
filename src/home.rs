//! Application home resolution.
//!
//! The home is the installation root containing `conf/` and `lib/`. It is
//! found from the executable's own location first
//! (parent of the `bin` directory holding the binary) and from the
//! profile's home environment variable second. A candidate only counts when
//! it actually holds the starter conf file; this rejects stray copies of
//! the binary living outside an installation.

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::LaunchError;
use crate::profile::AppProfile;

/// Relative location of the starter conf file inside a valid home. The
/// file name is profile-specific, so a groovy installation is not mistaken
/// for a gant one.
pub fn conf_file_relative(profile: AppProfile) -> PathBuf {
    Path::new("conf").join(profile.conf_file_name())
}

fn is_valid_home(profile: AppProfile, candidate: &Path) -> bool {
    candidate.join(conf_file_relative(profile)).is_file()
}

/// Resolve the installation root for `profile`. Resolved once at startup
/// and passed down; never cached globally.
pub fn resolve_app_home(profile: AppProfile) -> Result<PathBuf, LaunchError> {
    let env_var = profile.app_home_env_var();

    if let Some(candidate) = home_from_executable() {
        if is_valid_home(profile, &candidate) {
            debug!(home = %candidate.display(), "application home from executable location");
            return Ok(candidate);
        }
        debug!(
            candidate = %candidate.display(),
            "executable location is not inside an installation, trying {env_var}"
        );
    }

    match env::var(env_var) {
        Ok(value) if value.is_empty() => Err(LaunchError::AppHomeNotFound {
            reason: format!("{env_var} is set but empty"),
        }),
        Ok(value) => {
            let candidate = PathBuf::from(value);
            if is_valid_home(profile, &candidate) {
                debug!(home = %candidate.display(), "application home from {env_var}");
                Ok(candidate)
            } else {
                Err(LaunchError::AppHomeNotFound {
                    reason: format!(
                        "{env_var} points to '{}' which does not contain {}",
                        candidate.display(),
                        conf_file_relative(profile).display()
                    ),
                })
            }
        }
        Err(_) => Err(LaunchError::AppHomeNotFound {
            reason: format!(
                "executable is not inside an installation and {env_var} is not set"
            ),
        }),
    }
}

/// Parent of the directory holding the running binary, i.e. `<home>` for a
/// binary installed at `<home>/bin/<name>`. Symlinks are followed so a
/// `/usr/local/bin` symlink still finds the real installation.
fn home_from_executable() -> Option<PathBuf> {
    let exe = env::current_exe().ok()?;
    let exe = exe.canonicalize().unwrap_or(exe);
    let bin_dir = exe.parent()?;
    bin_dir.parent().map(Path::to_path_buf)
}
