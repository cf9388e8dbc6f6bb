//! Executable-name dispatch and profile wiring.

use jlaunch::profile::{AppProfile, STARTER_CLASS, STARTER_METHOD};

#[test]
fn family_members_map_to_their_profiles() {
    for (name, profile) in [
        ("groovy", AppProfile::Groovy),
        ("groovyc", AppProfile::GroovyCompiler),
        ("groovysh", AppProfile::GroovyShell),
        ("gant", AppProfile::Gant),
    ] {
        assert_eq!(AppProfile::for_exec_name(name), profile, "{name}");
    }
}

#[test]
fn dispatch_ignores_case_and_exe_suffix() {
    assert_eq!(
        AppProfile::for_exec_name("GroovyC.exe"),
        AppProfile::GroovyCompiler
    );
}

#[test]
fn every_profile_boots_through_the_starter() {
    assert_eq!(STARTER_CLASS, "org/codehaus/groovy/tools/GroovyStarter");
    assert_eq!(STARTER_METHOD, "main");
}

#[test]
fn main_classes_differ_per_profile() {
    assert_eq!(
        AppProfile::Groovy.launchee_main_class(),
        "groovy.ui.GroovyMain"
    );
    assert_eq!(
        AppProfile::GroovyCompiler.launchee_main_class(),
        "org.codehaus.groovy.tools.FileSystemCompiler"
    );
    assert_eq!(AppProfile::Gant.launchee_main_class(), "gant.Gant");
}

#[test]
fn shell_honours_the_oldshell_toggle() {
    std::env::remove_var("OLDSHELL");
    assert_eq!(
        AppProfile::GroovyShell.launchee_main_class(),
        "org.codehaus.groovy.tools.shell.Main"
    );
    std::env::set_var("OLDSHELL", "1");
    assert_eq!(
        AppProfile::GroovyShell.launchee_main_class(),
        "groovy.ui.InteractiveShell"
    );
    std::env::remove_var("OLDSHELL");
}

#[test]
fn every_profile_has_a_complete_table() {
    for profile in [
        AppProfile::Groovy,
        AppProfile::GroovyCompiler,
        AppProfile::GroovyShell,
        AppProfile::Gant,
    ] {
        let table = profile.param_table();
        // the launcher-owned flags are always present
        assert!(table.iter().any(|spec| spec.has_alias("-cp")));
        assert!(table.iter().any(|spec| spec.has_alias("--conf")));
        assert!(table.iter().any(|spec| spec.has_alias("-jh")));
        // and so is some form of help
        assert!(table.iter().any(|spec| spec.has_alias("--help")));
    }
}
