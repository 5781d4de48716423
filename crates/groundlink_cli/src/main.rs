//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `groundlink_core` linkage by building shared state and one module.
//! - Print unit-formatted sample values for the given settings file.
//! - Start file logging when a log directory is given.
//!
//! Usage: `groundlink_cli [settings.json] [log_dir]`

use groundlink_core::{
    core_version, default_log_level, init_logging, into_handle, MemoryConsole, Module,
    ModuleBase, Settings, SharedState,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let settings_path = args.next();
    let log_dir = match args.next().map(absolute_log_dir).transpose() {
        Ok(log_dir) => log_dir,
        Err(err) => {
            eprintln!("groundlink_cli: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(log_dir) = &log_dir {
        if let Err(err) = init_logging(default_log_level(), log_dir) {
            eprintln!("groundlink_cli: {err}");
            return ExitCode::FAILURE;
        }
    }

    let settings = match settings_path {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(err) => {
                eprintln!("groundlink_cli: {path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };

    let console = Rc::new(MemoryConsole::new());
    let mut builder = SharedState::builder()
        .settings(settings)
        .console(console.clone());
    if let Some(log_dir) = log_dir {
        builder = builder.log_dir(log_dir);
    }
    let state = builder.build();
    let probe = into_handle(
        ModuleBase::new(state.context(), "probe")
            .with_description("linkage probe")
            .public(),
    );
    if let Err(err) = state.register_module(&probe) {
        eprintln!("groundlink_cli: {err}");
        return ExitCode::FAILURE;
    }

    let module = probe.borrow();
    let base = module.base();
    base.console().writeln(&format!(
        "distance={} height={} speed={}",
        base.dist_string(1852.0),
        base.height_string(120.0),
        base.speed_string(12.5)
    ));

    println!("groundlink_core version={}", core_version());
    println!("public modules={}", state.public_module_names().join(","));
    for line in console.drain() {
        println!("{line}");
    }
    ExitCode::SUCCESS
}

fn absolute_log_dir(raw: String) -> Result<PathBuf, String> {
    let path = PathBuf::from(raw);
    if path.is_absolute() {
        return Ok(path);
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|err| format!("cannot resolve log directory: {err}"))
}

#[cfg(test)]
mod tests {
    use super::absolute_log_dir;

    #[test]
    fn relative_log_dir_is_resolved_against_cwd() {
        let resolved = absolute_log_dir("logs/flight1".to_string()).expect("cwd available");
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("logs/flight1"));
    }

    #[test]
    fn absolute_log_dir_is_kept() {
        let dir = std::env::temp_dir().join("groundlink-cli-logs");
        assert_eq!(absolute_log_dir(dir.display().to_string()).expect("absolute"), dir);
    }
}
