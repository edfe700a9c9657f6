use std::{fs, panic::PanicInfo};

use color_eyre::{
    config::{HookBuilder, PanicHook},
    eyre::{eyre, Result},
};
use directories::ProjectDirs;
use tracing_error::ErrorLayer;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

const LOG_ENV: &str = "LAGMETER_LOGLEVEL";
const LOG_FILE: &str = concat!(env!("CARGO_PKG_NAME"), ".log");

/// Installs the panic hooks, then starts logging to the data directory.
pub fn init() -> Result<()> {
    let (panic_hook, eyre_hook) = HookBuilder::default()
        .panic_section(format!(
            "This is a bug. Consider reporting it at {}",
            env!("CARGO_PKG_REPOSITORY")
        ))
        .capture_span_trace_by_default(false)
        .display_location_section(false)
        .display_env_section(false)
        .into_hooks();
    eyre_hook.install()?;
    std::panic::set_hook(Box::new(move |info| report_panic(&panic_hook, info)));

    init_logging()
}

fn report_panic(hook: &PanicHook, info: &PanicInfo<'_>) {
    // leave raw mode first or the report is unreadable
    if let Err(e) = crate::tui::restore() {
        tracing::error!("Unable to restore terminal: {e:?}");
    }

    let report = hook.panic_report(info).to_string();
    log::error!("Error: {}", strip_ansi_escapes::strip_str(&report));

    #[cfg(not(debug_assertions))]
    {
        let meta = human_panic::metadata!();
        let dump = human_panic::handle_dump(&meta, info);
        let _ = human_panic::print_msg(dump, &meta);
        eprintln!("{report}");
    }

    #[cfg(debug_assertions)]
    better_panic::Settings::auto()
        .most_recent_first(false)
        .lineno_suffix(true)
        .verbosity(better_panic::Verbosity::Full)
        .create_panic_handler()(info);

    std::process::exit(1);
}

fn init_logging() -> Result<()> {
    let data_dir = project_directory()?.data_local_dir().to_path_buf();
    fs::create_dir_all(&data_dir)?;
    let log_file = fs::File::create(data_dir.join(LOG_FILE))?;

    let filter = std::env::var("RUST_LOG")
        .or_else(|_| std::env::var(LOG_ENV))
        .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")));

    let file_layer = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .with_ansi(false)
        .with_filter(EnvFilter::try_new(filter)?);
    tracing_subscriber::registry()
        .with(file_layer)
        .with(ErrorLayer::default())
        .init();
    Ok(())
}

/// Where the config file and the log live.
pub fn project_directory() -> Result<ProjectDirs> {
    ProjectDirs::from("cool", "jacoblin", env!("CARGO_PKG_NAME"))
        .ok_or_else(|| eyre!("no home directory to keep config and logs in"))
}
