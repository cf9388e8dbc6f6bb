//! End-to-end launch preparation against a synthetic installation.
//!
//! These tests build a throwaway installation layout on disk, point the
//! home environment variable at it and check the prepared `LaunchOptions`.
//! They stop short of creating a real JVM. Environment-dependent tests
//! share one lock because the test harness runs threads in parallel.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, OnceLock};

use jlaunch::error::LaunchError;
use jlaunch::pipeline::prepare_launch;
use jlaunch::profile::AppProfile;
use tempfile::TempDir;

fn env_lock() -> MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    match LOCK.get_or_init(|| Mutex::new(())).lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// A minimal but valid installation: conf file plus starter jar.
fn fake_install() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("conf")).unwrap();
    fs::write(
        tmp.path().join("conf").join("groovy-starter.conf"),
        b"# starter conf\n",
    )
    .unwrap();
    fs::create_dir_all(tmp.path().join("lib")).unwrap();
    fs::write(tmp.path().join("lib").join("groovy-starter.jar"), b"").unwrap();
    tmp
}

fn set_home(home: &Path) {
    std::env::set_var("GROOVY_HOME", home);
    std::env::remove_var("GROOVY_CONF");
    std::env::remove_var("JAVA_OPTS");
    std::env::remove_var("CLASSPATH");
}

/// A minimal gant installation: its own conf file plus a versioned jar.
fn fake_gant_install() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("conf")).unwrap();
    fs::write(
        tmp.path().join("conf").join("gant-starter.conf"),
        b"# starter conf\n",
    )
    .unwrap();
    fs::create_dir_all(tmp.path().join("lib")).unwrap();
    fs::write(tmp.path().join("lib").join("gant-1.9.12.jar"), b"").unwrap();
    tmp
}

fn set_gant_home(home: &Path, ant_home: &Path) {
    std::env::set_var("GANT_HOME", home);
    std::env::set_var("ANT_HOME", ant_home);
    std::env::remove_var("GROOVY_HOME");
    std::env::remove_var("GANT_CONF");
    std::env::remove_var("JAVA_OPTS");
    std::env::remove_var("CLASSPATH");
}

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn prepared_launch_carries_the_starter_contract() {
    let _guard = env_lock();
    let install = fake_install();
    set_home(install.path());

    let prepared =
        prepare_launch(AppProfile::Groovy, &args(&["-e", "println 1"])).unwrap();
    let opts = &prepared.options;

    assert_eq!(opts.entry_class, "org/codehaus/groovy/tools/GroovyStarter");
    assert_eq!(opts.entry_method, "main");
    assert_eq!(opts.jars, vec![install.path().join("lib/groovy-starter.jar")]);

    // --main/--conf/--classpath precede the user's arguments
    assert_eq!(opts.extra_program_options[0], "--main");
    assert_eq!(opts.extra_program_options[1], "groovy.ui.GroovyMain");
    assert_eq!(opts.extra_program_options[2], "--conf");
    assert_eq!(
        PathBuf::from(&opts.extra_program_options[3]),
        install.path().join("conf").join("groovy-starter.conf")
    );
    assert_eq!(opts.extra_program_options[4], "--classpath");
    assert_eq!(opts.extra_program_options[5], ".");
    assert_eq!(opts.launchee_args, args(&["-e", "println 1"]));
}

#[test]
fn home_and_conf_become_system_properties() {
    let _guard = env_lock();
    let install = fake_install();
    set_home(install.path());

    let prepared =
        prepare_launch(AppProfile::Groovy, &args(&["run.groovy"])).unwrap();
    let vm_opts: Vec<&str> = prepared.options.vm_options.iter().collect();

    assert!(vm_opts
        .iter()
        .any(|opt| opt.starts_with("-Dgroovy.starter.conf=")));
    let home_prop = format!("-Dgroovy.home={}", install.path().display());
    assert!(vm_opts.contains(&home_prop.as_str()));
    // the script did not exist, so script.name keeps the given form
    assert!(vm_opts.contains(&"-Dscript.name=run.groovy"));
}

#[test]
fn java_opts_precede_command_line_jvm_flags() {
    let _guard = env_lock();
    let install = fake_install();
    set_home(install.path());
    std::env::set_var("JAVA_OPTS", "-Xms64m -Xmx256m");

    let prepared =
        prepare_launch(AppProfile::Groovy, &args(&["-Xmx512m", "run.groovy"]))
            .unwrap();
    let vm_opts: Vec<&str> = prepared.options.vm_options.iter().collect();
    std::env::remove_var("JAVA_OPTS");

    let env_pos = vm_opts.iter().position(|o| *o == "-Xmx256m").unwrap();
    let cli_pos = vm_opts.iter().position(|o| *o == "-Xmx512m").unwrap();
    assert!(env_pos < cli_pos);
}

#[test]
fn conf_flag_overrides_env_and_default() {
    let _guard = env_lock();
    let install = fake_install();
    set_home(install.path());
    std::env::set_var("GROOVY_CONF", "/from/env.conf");

    let prepared = prepare_launch(
        AppProfile::Groovy,
        &args(&["--conf", "/from/flag.conf", "run.groovy"]),
    )
    .unwrap();
    std::env::remove_var("GROOVY_CONF");

    assert_eq!(prepared.options.extra_program_options[3], "/from/flag.conf");
    assert!(prepared
        .options
        .vm_options
        .iter()
        .any(|opt| opt == "-Dgroovy.starter.conf=/from/flag.conf"));
}

#[test]
fn user_classpath_is_forwarded_with_cwd_appended() {
    let _guard = env_lock();
    let install = fake_install();
    set_home(install.path());

    let prepared = prepare_launch(
        AppProfile::Groovy,
        &args(&["-cp", "a.jar", "run.groovy"]),
    )
    .unwrap();

    let sep = jlaunch::jvm::path_separator();
    assert_eq!(
        prepared.options.extra_program_options[5],
        format!("a.jar{sep}.")
    );
}

#[test]
fn zero_args_for_groovy_is_a_help_run() {
    let _guard = env_lock();
    let install = fake_install();
    set_home(install.path());

    let prepared = prepare_launch(AppProfile::Groovy, &[]).unwrap();
    assert!(prepared.show_launcher_help);
    assert_eq!(prepared.options.launchee_args, args(&["-h"]));
}

#[test]
fn missing_installation_is_a_specific_error() {
    let _guard = env_lock();
    let empty = TempDir::new().unwrap();
    set_home(empty.path());

    let err = prepare_launch(AppProfile::Groovy, &args(&["run.groovy"]))
        .unwrap_err();
    assert!(matches!(err, LaunchError::AppHomeNotFound { .. }));
}

#[test]
fn gant_launches_from_its_own_installation_layout() {
    let _guard = env_lock();
    let install = fake_gant_install();
    let ant_home = TempDir::new().unwrap();
    set_gant_home(install.path(), ant_home.path());

    let prepared =
        prepare_launch(AppProfile::Gant, &args(&["build.gant"])).unwrap();
    let opts = &prepared.options;

    assert_eq!(opts.jars, vec![install.path().join("lib/gant-1.9.12.jar")]);
    assert_eq!(opts.extra_program_options[1], "gant.Gant");
    assert_eq!(
        PathBuf::from(&opts.extra_program_options[3]),
        install.path().join("conf").join("gant-starter.conf")
    );

    let vm_opts: Vec<&str> = opts.vm_options.iter().collect();
    let gant_home_prop = format!("-Dgant.home={}", install.path().display());
    assert!(vm_opts.contains(&gant_home_prop.as_str()));
    // without a bundled or external groovy, groovy.home falls back to the
    // gant home
    let groovy_home_prop = format!("-Dgroovy.home={}", install.path().display());
    assert!(vm_opts.contains(&groovy_home_prop.as_str()));
    let ant_home_prop = format!("-Dant.home={}", ant_home.path().display());
    assert!(vm_opts.contains(&ant_home_prop.as_str()));
    assert!(!vm_opts.iter().any(|opt| opt.starts_with("-Dscript.name=")));
}

#[test]
fn gant_requires_an_ant_installation() {
    let _guard = env_lock();
    let install = fake_gant_install();
    let ant_home = TempDir::new().unwrap();
    set_gant_home(install.path(), ant_home.path());
    std::env::remove_var("ANT_HOME");

    let err =
        prepare_launch(AppProfile::Gant, &args(&["build.gant"])).unwrap_err();
    assert!(matches!(err, LaunchError::AntHomeNotFound));
}

#[test]
fn gant_borrows_a_groovy_runtime_from_groovy_home() {
    let _guard = env_lock();
    let install = fake_gant_install();
    let ant_home = TempDir::new().unwrap();
    let groovy = TempDir::new().unwrap();
    fs::create_dir_all(groovy.path().join("lib")).unwrap();
    fs::write(groovy.path().join("lib").join("groovy-2.4.21.jar"), b"")
        .unwrap();
    set_gant_home(install.path(), ant_home.path());
    std::env::set_var("GROOVY_HOME", groovy.path());

    let prepared =
        prepare_launch(AppProfile::Gant, &args(&["build.gant"])).unwrap();
    std::env::remove_var("GROOVY_HOME");
    let opts = &prepared.options;

    assert_eq!(
        opts.jars,
        vec![
            install.path().join("lib/gant-1.9.12.jar"),
            groovy.path().join("lib/groovy-2.4.21.jar"),
        ]
    );
    let vm_opts: Vec<&str> = opts.vm_options.iter().collect();
    let groovy_home_prop = format!("-Dgroovy.home={}", groovy.path().display());
    assert!(vm_opts.contains(&groovy_home_prop.as_str()));
}

#[test]
fn gant_prefers_a_groovy_jar_bundled_in_its_own_lib() {
    let _guard = env_lock();
    let install = fake_gant_install();
    let ant_home = TempDir::new().unwrap();
    fs::write(
        install.path().join("lib").join("groovy-all-2.4.21.jar"),
        b"",
    )
    .unwrap();
    set_gant_home(install.path(), ant_home.path());

    let prepared =
        prepare_launch(AppProfile::Gant, &args(&["build.gant"])).unwrap();
    let opts = &prepared.options;

    assert_eq!(
        opts.jars,
        vec![
            install.path().join("lib/gant-1.9.12.jar"),
            install.path().join("lib/groovy-all-2.4.21.jar"),
        ]
    );
    // groovy.home stays the gant home when the jar is bundled
    let vm_opts: Vec<&str> = opts.vm_options.iter().collect();
    let groovy_home_prop = format!("-Dgroovy.home={}", install.path().display());
    assert!(vm_opts.contains(&groovy_home_prop.as_str()));
}

#[test]
fn server_flag_selects_the_server_vm() {
    let _guard = env_lock();
    let install = fake_install();
    set_home(install.path());

    let prepared = prepare_launch(
        AppProfile::Groovy,
        &args(&["-server", "run.groovy"]),
    )
    .unwrap();
    assert_eq!(
        prepared.options.vm_strategy,
        jlaunch::jvm::VmSelectStrategy::Explicit(jlaunch::jvm::VmFlavor::Server)
    );
    // -server was consumed by the launcher
    assert_eq!(prepared.options.launchee_args, args(&["run.groovy"]));
}
