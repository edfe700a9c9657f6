use std::{path::PathBuf, time::Duration};

use color_eyre::eyre::{bail, eyre, Result};
use config::{Config, Environment, File, FileFormat, Source};
use lag_core::{DisplaySettings, DEFAULT_RESET_DELAY};
use serde::Deserialize;

use crate::{cli::AppArgs, init::project_directory};

pub const DEFAULT_FRAME_RATE: f64 = 60.0;
pub const ENV_PREFIX: &str = "LAGMETER";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Frames per second; every frame polls input and redraws.
    pub frame_rate: f64,
    /// Seconds a measurement stays on screen.
    pub reset_delay: f64,
    /// Ask the terminal to report key releases, so held keys are not re-measured.
    pub keyboard_enhancement: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            frame_rate: DEFAULT_FRAME_RATE,
            reset_delay: DEFAULT_RESET_DELAY.as_secs_f64(),
            keyboard_enhancement: true,
        }
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(project_directory()?.config_dir().join("config.toml"))
}

fn seconds(name: &str, secs: f64) -> Result<Duration> {
    let duration = Duration::try_from_secs_f64(secs)
        .map_err(|e| eyre!("{name} of {secs} seconds is out of range: {e}"))?;
    if duration.is_zero() {
        bail!("{name} of {secs} seconds rounds down to zero");
    }
    Ok(duration)
}

impl Settings {
    /// Defaults, then the config file, then `LAGMETER_*`, then the command line.
    pub fn load(args: &AppArgs) -> Result<Self> {
        let path = match &args.config {
            Some(path) => path.clone(),
            None => default_config_path()?,
        };
        let file = File::from(path)
            .format(FileFormat::Toml)
            .required(args.config.is_some());
        let env = Environment::with_prefix(ENV_PREFIX).try_parsing(true);
        let settings = Self::layered(file, env, args)?;
        tracing::info!(?settings, "settings loaded");
        Ok(settings)
    }

    fn layered<F>(file: F, env: Environment, args: &AppArgs) -> Result<Self>
    where
        F: Source + Send + Sync + 'static,
    {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("frame_rate", defaults.frame_rate)?
            .set_default("reset_delay", defaults.reset_delay)?
            .set_default("keyboard_enhancement", defaults.keyboard_enhancement)?
            .add_source(file)
            .add_source(env)
            .set_override_option("frame_rate", args.frame_rate)?
            .set_override_option("reset_delay", args.reset_delay)?;
        if args.no_keyboard_enhancement {
            builder = builder.set_override("keyboard_enhancement", false)?;
        }

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            bail!("frame_rate must be a positive number, got {}", self.frame_rate);
        }
        if !self.reset_delay.is_finite() || self.reset_delay <= 0.0 {
            bail!("reset_delay must be a positive number of seconds, got {}", self.reset_delay);
        }
        self.frame_interval()?;
        self.display()?;
        Ok(())
    }

    /// Time between two frames.
    pub fn frame_interval(&self) -> Result<Duration> {
        seconds("frame interval", 1.0 / self.frame_rate)
    }

    pub fn display(&self) -> Result<DisplaySettings> {
        Ok(DisplaySettings {
            reset_delay: seconds("reset_delay", self.reset_delay)?,
        })
    }
}
