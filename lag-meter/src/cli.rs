use std::path::PathBuf;

use clap::Parser;

use crate::utils::version;

#[derive(Parser, Debug, Default)]
#[command(author, version = version(), about)]
pub struct AppArgs {
    #[arg(
        short,
        long = "fps",
        value_name = "FRAME_RATE",
        help = "Frames drawn per second; latency is measured against these frames"
    )]
    pub frame_rate: Option<f64>,

    #[arg(
        short,
        long,
        value_name = "SECONDS",
        help = "How long a measurement stays on screen"
    )]
    pub reset_delay: Option<f64>,

    #[arg(
        short,
        long,
        value_name = "PATH",
        help = "Path to the config file [default: <config dir>/config.toml]"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        help = "Do not ask the terminal to report key releases",
        default_value_t = false
    )]
    pub no_keyboard_enhancement: bool,
}
