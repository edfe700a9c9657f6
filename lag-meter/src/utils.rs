use std::path::PathBuf;

use crate::{init::project_directory, settings::default_config_path};

const VERSION_MESSAGE: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "-",
    env!("VERGEN_GIT_DESCRIBE"),
    " (",
    env!("VERGEN_BUILD_DATE"),
    ")"
);

pub fn version() -> String {
    let author = clap::crate_authors!();

    let current_exe_path = PathBuf::from(clap::crate_name!());
    let current_exe_path = current_exe_path.display();
    let data_dir = project_directory()
        .map(|dirs| dirs.data_local_dir().display().to_string())
        .unwrap_or_else(|e| e.to_string());
    let config_path = default_config_path()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|e| e.to_string());

    format!(
        "\
{VERSION_MESSAGE}

Authors: {author}

Executable: {current_exe_path}
Logs: {data_dir}
Config: {config_path}
"
    )
}
