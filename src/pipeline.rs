//! Launch preparation pipeline: raw arguments in, `LaunchOptions` out.
//!
//! Stages run in a fixed order, each a plain function over the previous
//! stage's output:
//!
//! ```text
//! classify → resolve homes and conf → locate startup jar
//!          → accumulate vm options → assemble launchee args
//! ```

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::args::{classify, Classification};
use crate::error::LaunchError;
use crate::home::{conf_file_relative, resolve_app_home};
use crate::jvm::{
    find_startup_jar, path_separator, resolve_user_classpath, ClasspathPolicy,
    JavaHomePolicy, LaunchOptions, ToolsJarPolicy, VmFlavor, VmOptions,
    VmSelectStrategy,
};
use crate::profile::{
    AppProfile, GROOVY_STARTUP_JAR, STARTER_CLASS, STARTER_METHOD,
};

/// A fully prepared launch plus what the front end needs to know about it.
#[derive(Debug)]
pub struct PreparedLaunch {
    pub options: LaunchOptions,
    /// The run is a help run; the launcher prints its own flag summary
    /// after the application's.
    pub show_launcher_help: bool,
}

/// Build the complete launch configuration for `profile` from the raw
/// command line (without the program name).
pub fn prepare_launch(
    profile: AppProfile,
    raw_args: &[String],
) -> Result<PreparedLaunch, LaunchError> {
    let raw_args: Vec<String> =
        if raw_args.is_empty() && profile.help_on_empty_args() {
            vec!["-h".to_string()]
        } else {
            raw_args.to_vec()
        };

    debug!(profile = ?profile, args = ?raw_args, "preparing launch");
    let table = profile.param_table();
    let classification =
        classify(&raw_args, &table, profile.terminating_suffixes())?;

    let app_home = resolve_app_home(profile)?;
    let conf_file = resolve_conf_file(profile, &app_home, &classification);
    let startup_jar = locate_startup_jar(profile, &app_home)?;
    let user_classpath = classification.value_of("-cp").map(str::to_string);

    let vm_strategy = if classification.has_flag("-server") {
        VmSelectStrategy::Explicit(VmFlavor::Server)
    } else if classification.has_flag("-client") {
        VmSelectStrategy::Explicit(VmFlavor::Client)
    } else {
        VmSelectStrategy::ClientFirst
    };

    let policy = profile.unrecognized_policy();
    let mut jars = vec![startup_jar];
    let mut vm_options = VmOptions::new();
    // gant relies on the starter conf to resolve the script, not on a
    // script.name property
    if profile != AppProfile::Gant {
        if let Some(script) = classification.first_tail_token() {
            vm_options
                .push(format!("-Dscript.name={}", absolute_script_path(script)));
        }
    }
    vm_options.push(format!(
        "-Dgroovy.starter.conf={}",
        conf_file.display()
    ));
    vm_options.push(format!(
        "-D{}={}",
        profile.home_property(),
        app_home.display()
    ));
    if profile == AppProfile::Gant {
        let (groovy_jar, groovy_home) = gant_groovy_runtime(&app_home)?;
        if let Some(jar) = groovy_jar {
            jars.push(jar);
        }
        vm_options.push(format!("-Dgroovy.home={}", groovy_home.display()));
        vm_options.push(format!("-Dant.home={}", resolve_ant_home()?.display()));
    }
    if let Ok(java_opts) = env::var("JAVA_OPTS") {
        vm_options.push_env_options(&java_opts);
    }
    for opt in classification.jvm_args(policy) {
        vm_options.push(opt);
    }

    let extra_program_options = vec![
        "--main".to_string(),
        profile.launchee_main_class().to_string(),
        "--conf".to_string(),
        conf_file.display().to_string(),
        "--classpath".to_string(),
        forwarded_classpath(user_classpath.as_deref()),
    ];

    let show_launcher_help =
        classification.has_flag("-h") || classification.has_flag("--help");

    let options = LaunchOptions {
        java_home: None,
        java_home_from_args: classification.value_of("-jh").map(str::to_string),
        java_home_policy: JavaHomePolicy::ALL,
        vm_strategy,
        classpath_policy: ClasspathPolicy::IgnoreGlobal,
        // the starter receives the user classpath via --classpath; the jvm
        // classpath carries only the startup jars
        user_classpath: None,
        jar_dirs: Vec::new(),
        jars,
        tools_jar: ToolsJarPolicy {
            as_sysprop: true,
            on_classpath: false,
        },
        vm_options,
        extra_program_options,
        launchee_args: classification.launchee_args(policy),
        entry_class: STARTER_CLASS.to_string(),
        entry_method: STARTER_METHOD.to_string(),
    };

    Ok(PreparedLaunch {
        options,
        show_launcher_help,
    })
}

/// Conf file precedence: `--conf` argument, the profile's conf env var,
/// then the stock file under the application home. The path is passed
/// through to the starter; its contents are never read here.
fn resolve_conf_file(
    profile: AppProfile,
    app_home: &Path,
    classification: &Classification<'_>,
) -> PathBuf {
    if let Some(value) = classification.value_of("--conf") {
        return PathBuf::from(value);
    }
    if let Ok(value) = env::var(profile.conf_env_var()) {
        if !value.is_empty() {
            return PathBuf::from(value);
        }
    }
    app_home.join(conf_file_relative(profile))
}

/// The bootstrap jar under the installation's `lib/`. The profile decides
/// how it is named; the versioned lookup enforces unambiguity.
fn locate_startup_jar(
    profile: AppProfile,
    app_home: &Path,
) -> Result<PathBuf, LaunchError> {
    let lib = app_home.join("lib");
    let spec = profile.startup_jar();
    match find_startup_jar(&lib, &spec, false)? {
        Some(jar) => Ok(jar),
        None => Err(LaunchError::StartupJarNotFound {
            dir: lib,
            prefix: spec.prefix.to_string(),
        }),
    }
}

/// The groovy runtime a gant installation runs on: a groovy jar bundled in
/// gant's own `lib/`, or one from a `GROOVY_HOME` installation. A gant
/// distribution that embeds groovy in its startup jar has neither, so a
/// missing jar is tolerated. The returned home feeds the `groovy.home`
/// system property.
fn gant_groovy_runtime(
    gant_home: &Path,
) -> Result<(Option<PathBuf>, PathBuf), LaunchError> {
    if let Some(jar) =
        find_startup_jar(&gant_home.join("lib"), &GROOVY_STARTUP_JAR, true)?
    {
        return Ok((Some(jar), gant_home.to_path_buf()));
    }
    if let Ok(value) = env::var("GROOVY_HOME") {
        if !value.is_empty() {
            let groovy_home = PathBuf::from(value);
            let jar = find_startup_jar(
                &groovy_home.join("lib"),
                &GROOVY_STARTUP_JAR,
                true,
            )?;
            return Ok((jar, groovy_home));
        }
    }
    Ok((None, gant_home.to_path_buf()))
}

/// Gant delegates all real work to ant, so an ant installation is required.
fn resolve_ant_home() -> Result<PathBuf, LaunchError> {
    match env::var("ANT_HOME") {
        Ok(value) if !value.is_empty() => Ok(PathBuf::from(value)),
        _ => Err(LaunchError::AntHomeNotFound),
    }
}

/// The `--classpath` value handed to the starter: the user classpath (flag
/// first, `CLASSPATH` env as fallback) with the working directory appended,
/// or just the working directory.
fn forwarded_classpath(user_classpath: Option<&str>) -> String {
    match resolve_user_classpath(
        ClasspathPolicy::GlobalUnlessUserSupplied,
        user_classpath,
    ) {
        Some(cp) => format!("{cp}{}.", path_separator()),
        None => ".".to_string(),
    }
}

/// Absolute form of the script path for the `script.name` property, the
/// path as given when it cannot be resolved.
fn absolute_script_path(script: &str) -> String {
    match std::fs::canonicalize(script) {
        Ok(path) => path.display().to_string(),
        Err(_) => script.to_string(),
    }
}

/// Extra flag summary printed on help runs, covering the flags the launcher
/// consumes before the application sees the command line.
pub fn launcher_help() -> String {
    [
        "launcher options:",
        " -cp,-classpath,--classpath <path>  classpath for the launched application",
        " --conf <file>                      starter configuration file",
        " -jh,--javahome <dir>               java installation to use",
        " -client / -server                  jvm flavor to prefer",
    ]
    .join("\n")
}
