#![warn(clippy::pedantic)]

pub mod global;
pub mod runner;
pub mod script;
pub mod tools;

use anyhow::Result as AnyResult;

fn main() -> AnyResult<()> {
    let has_term = std::io::IsTerminal::is_terminal(&std::io::stdin());
    // Log to a terminal, if available. Else, log to "inkpatch.log" in the working directory.
    if has_term {
        env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        let _ = simple_logging::log_to_file("inkpatch.log", log::LevelFilter::Debug);
    }

    let paths: Vec<std::path::PathBuf> = std::env::args_os().skip(1).map(Into::into).collect();
    let settings = global::settings();

    // Write out the settings in use, so the user has a documented file to edit.
    if paths.first().is_some_and(|arg| arg.as_os_str() == "--write-settings") {
        settings.save()?;
        log::info!("Wrote settings to {:?}", global::preferences_dir());
        return Ok(());
    }
    if paths.is_empty() {
        anyhow::bail!(
            "usage: {0} <script.toml>... | {0} --write-settings",
            env!("CARGO_PKG_NAME")
        );
    }
    if settings.did_fail_to_load() {
        log::warn!("Using default settings: {settings:?}");
    }

    // Each script gets its own document, so they can't interfere.
    for path in &paths {
        let script = script::Script::read(path)?;
        let name = script
            .name
            .clone()
            .unwrap_or_else(|| path.display().to_string());
        log::info!("Running {name} ({} steps)", script.steps.len());

        let mut runner = runner::Runner::new(name, settings)?;
        runner.log_changes();
        if let Err(e) = runner.run(&script) {
            log::error!("{} failed: {e:#}", path.display());
            return Err(e.context(format!("running {}", path.display())));
        }
        print!("{}", runner.report());
    }
    Ok(())
}
