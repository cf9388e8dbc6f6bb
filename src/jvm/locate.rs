//! Java home resolution and JVM shared-library location.

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::LaunchError;

/// JVM implementation flavor, named after the classic HotSpot variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VmFlavor {
    Client,
    Server,
}

impl VmFlavor {
    pub fn as_str(self) -> &'static str {
        match self {
            VmFlavor::Client => "client",
            VmFlavor::Server => "server",
        }
    }
}

/// The order in which flavors are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VmSelectStrategy {
    /// Client first, server as fallback. Matches the `java` launcher's
    /// default bias; on modern runtimes only the server VM exists and the
    /// fallback finds it.
    ClientFirst,
    ServerFirst,
    /// Only the requested flavor; no fallback.
    Explicit(VmFlavor),
}

impl VmSelectStrategy {
    pub fn flavors(self) -> &'static [VmFlavor] {
        match self {
            VmSelectStrategy::ClientFirst => &[VmFlavor::Client, VmFlavor::Server],
            VmSelectStrategy::ServerFirst => &[VmFlavor::Server, VmFlavor::Client],
            VmSelectStrategy::Explicit(VmFlavor::Client) => &[VmFlavor::Client],
            VmSelectStrategy::Explicit(VmFlavor::Server) => &[VmFlavor::Server],
        }
    }
}

/// Which fallback sources may supply the java home.
#[derive(Debug, Clone, Copy)]
pub struct JavaHomePolicy {
    pub allow_argument: bool,
    pub allow_env_var: bool,
}

impl JavaHomePolicy {
    pub const ALL: JavaHomePolicy = JavaHomePolicy {
        allow_argument: true,
        allow_env_var: true,
    };
}

/// Resolve the runtime installation root. Precedence: an explicit home from
/// the caller, then the command-line value, then `JAVA_HOME`, each gated by
/// `policy`. The winner must be an existing directory.
pub fn resolve_java_home(
    explicit: Option<&Path>,
    from_args: Option<&str>,
    policy: JavaHomePolicy,
) -> Result<PathBuf, LaunchError> {
    let (home, source) = if let Some(path) = explicit {
        (path.to_path_buf(), "explicit setting")
    } else if let (true, Some(value)) = (policy.allow_argument, from_args) {
        (PathBuf::from(value), "command line")
    } else if let (true, Ok(value)) =
        (policy.allow_env_var, env::var("JAVA_HOME"))
    {
        (PathBuf::from(value), "JAVA_HOME environment variable")
    } else {
        return Err(LaunchError::JavaHomeNotFound(match (
            policy.allow_argument,
            policy.allow_env_var,
        ) {
            (true, true) => {
                "java home not set; give -jh / --javahome or set JAVA_HOME"
            }
            (true, false) => "java home not set; give -jh / --javahome",
            (false, true) => "java home not set; set JAVA_HOME",
            (false, false) => "java home not set and no lookup source is allowed",
        }));
    };

    if !home.is_dir() {
        return Err(LaunchError::JavaHomeInvalid { path: home });
    }
    debug!(home = %home.display(), source, "resolved java home");
    Ok(home)
}

// Relative shared-library locations per platform, most recent layout first.
// The legacy arch subdirectories cover pre-9 JREs.
#[cfg(target_os = "windows")]
fn flavor_subpaths(flavor: VmFlavor) -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("bin").join(flavor.as_str()).join("jvm.dll")];
    if flavor == VmFlavor::Server {
        paths.push(PathBuf::from("bin").join("jrockit").join("jvm.dll"));
    }
    paths
}

#[cfg(target_os = "macos")]
fn flavor_subpaths(flavor: VmFlavor) -> Vec<PathBuf> {
    vec![
        PathBuf::from("lib").join(flavor.as_str()).join("libjvm.dylib"),
        PathBuf::from("lib")
            .join("jli")
            .join(flavor.as_str())
            .join("libjvm.dylib"),
    ]
}

#[cfg(all(unix, not(target_os = "macos")))]
fn flavor_subpaths(flavor: VmFlavor) -> Vec<PathBuf> {
    let lib = PathBuf::from("lib");
    vec![
        lib.join(flavor.as_str()).join("libjvm.so"),
        lib.join("amd64").join(flavor.as_str()).join("libjvm.so"),
        lib.join("i386").join(flavor.as_str()).join("libjvm.so"),
        lib.join("aarch64").join(flavor.as_str()).join("libjvm.so"),
    ]
}

/// All candidate library paths under `java_home` for one flavor. The JDK
/// layout (`<home>/jre/...`) is tried before the plain JRE layout so a home
/// pointing at a JDK finds its bundled runtime first.
pub fn jvm_library_candidates(java_home: &Path, flavor: VmFlavor) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    for sub in flavor_subpaths(flavor) {
        candidates.push(java_home.join("jre").join(&sub));
        candidates.push(java_home.join(&sub));
    }
    candidates
}

/// First existing candidate across the strategy's flavors.
pub fn find_jvm_library(
    java_home: &Path,
    strategy: VmSelectStrategy,
) -> Result<PathBuf, LaunchError> {
    for flavor in strategy.flavors() {
        for candidate in jvm_library_candidates(java_home, *flavor) {
            debug!(candidate = %candidate.display(), "probing jvm library");
            if candidate.is_file() {
                debug!(library = %candidate.display(), "found jvm library");
                return Ok(candidate);
            }
        }
    }
    Err(LaunchError::JvmLibraryNotFound {
        home: java_home.to_path_buf(),
        flavor: match strategy {
            VmSelectStrategy::Explicit(flavor) => flavor.as_str(),
            _ => "any",
        },
    })
}
