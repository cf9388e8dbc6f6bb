use std::path::Path;
use std::process::exit;

use jlaunch::jvm;
use jlaunch::logging::init_tracing;
use jlaunch::pipeline::{launcher_help, prepare_launch};
use jlaunch::profile::AppProfile;

fn main() {
    init_tracing();

    let mut argv = std::env::args();
    let exec_name = argv
        .next()
        .map(|arg0| {
            Path::new(&arg0)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or(arg0)
        })
        .unwrap_or_default();
    let raw_args: Vec<String> = argv.collect();

    let profile = AppProfile::for_exec_name(&exec_name);

    let prepared = match prepare_launch(profile, &raw_args) {
        Ok(prepared) => prepared,
        Err(err) => {
            eprintln!("error: {err}");
            exit(err.exit_code());
        }
    };

    let result = jvm::launch(&prepared.options);

    // Application help has printed by now; append the flags the launcher
    // consumed so they show up too.
    if prepared.show_launcher_help {
        eprintln!("\n{}", launcher_help());
    }

    if let Err(err) = result {
        eprintln!("error: {err}");
        exit(err.exit_code());
    }
}
