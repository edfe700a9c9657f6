use std::{io, time::Duration};

use crate::{
    error::Error,
    key::{KeyEvent, LatencySample},
    scheduler::{FrameScheduler, TimerHandle},
};

pub const DEFAULT_PROMPT: &str = "Press any key to measure input lag";
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_secs(2);

/// Where the measured text ends up.
pub trait DisplaySurface {
    fn set_text(&mut self, text: &str);
}

/// Best-effort log of every message shown. Errors are ignored.
pub trait DiagnosticSink {
    fn log(&mut self, message: &str) -> io::Result<()>;
}

/// A sink that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn log(&mut self, _message: &str) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySettings {
    /// How long a latency message stays up before the prompt returns.
    pub reset_delay: Duration,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            reset_delay: DEFAULT_RESET_DELAY,
        }
    }
}

impl DisplaySettings {
    pub fn validate(&self) -> Result<(), Error> {
        if self.reset_delay.is_zero() {
            return Err(Error::InvalidResetDelay(self.reset_delay));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Showing the prompt, nothing pending.
    Idle,
    /// Showing a latency message with its reset armed.
    Showing,
}

/// The displayed text and the reset timer that owns its lifetime.
#[derive(Debug)]
pub struct LatencyDisplay<S, L> {
    surface: S,
    sink: L,
    settings: DisplaySettings,
    text: String,
    pending_reset: Option<TimerHandle>,
    last_sample: Option<LatencySample>,
}

impl<S, L> LatencyDisplay<S, L>
where
    S: DisplaySurface + 'static,
    L: DiagnosticSink + 'static,
{
    pub fn new(mut surface: S, sink: L, settings: DisplaySettings) -> Result<Self, Error> {
        settings.validate()?;
        surface.set_text(DEFAULT_PROMPT);
        Ok(Self {
            surface,
            sink,
            settings,
            text: DEFAULT_PROMPT.to_string(),
            pending_reset: None,
            last_sample: None,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn mode(&self) -> DisplayMode {
        if self.pending_reset.is_some() {
            DisplayMode::Showing
        } else {
            DisplayMode::Idle
        }
    }

    pub fn pending_reset(&self) -> Option<TimerHandle> {
        self.pending_reset
    }

    /// The sample behind the current message, if one is shown.
    pub fn last_sample(&self) -> Option<LatencySample> {
        self.last_sample
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn sink(&self) -> &L {
        &self.sink
    }

    /// Measures `event` against the start of the next tick.
    pub fn on_key_event(&mut self, event: KeyEvent, scheduler: &mut FrameScheduler<Self>) {
        scheduler.defer_to_next_tick(move |display, scheduler, frame_start| {
            display.show(LatencySample::new(event, frame_start), scheduler);
        });
    }

    fn show(&mut self, sample: LatencySample, scheduler: &mut FrameScheduler<Self>) {
        let message = sample.to_string();
        self.set_text(&message);
        self.last_sample = Some(sample);
        let _ = self.sink.log(&message);

        if let Some(handle) = self.pending_reset.take() {
            scheduler.cancel(handle);
        }
        let handle = scheduler.schedule_after(
            sample.visible_at,
            self.settings.reset_delay,
            |display, _, _| display.reset(),
        );
        self.pending_reset = Some(handle);
    }

    fn reset(&mut self) {
        self.pending_reset = None;
        self.last_sample = None;
        self.set_text(DEFAULT_PROMPT);
    }

    fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.surface.set_text(text);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{clock::Timestamp, key::KeySymbol};
    use pretty_assertions::assert_eq;

    #[derive(Debug, Default)]
    pub(crate) struct RecordingSurface {
        pub texts: Vec<String>,
    }

    impl DisplaySurface for RecordingSurface {
        fn set_text(&mut self, text: &str) {
            self.texts.push(text.to_string());
        }
    }

    #[derive(Debug, Default)]
    pub(crate) struct FailingSink {
        pub attempts: usize,
    }

    impl DiagnosticSink for FailingSink {
        fn log(&mut self, _message: &str) -> io::Result<()> {
            self.attempts += 1;
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
        }
    }

    fn at(millis: u64) -> Timestamp {
        Timestamp::from_millis(millis)
    }

    #[test]
    fn test_starts_idle_with_prompt() {
        let display =
            LatencyDisplay::new(RecordingSurface::default(), NullSink, Default::default()).unwrap();
        assert_eq!(display.mode(), DisplayMode::Idle);
        assert_eq!(display.text(), DEFAULT_PROMPT);
        assert_eq!(display.surface().texts, vec![DEFAULT_PROMPT]);
    }

    #[test]
    fn test_zero_reset_delay_is_rejected() {
        let settings = DisplaySettings {
            reset_delay: Duration::ZERO,
        };
        let err = LatencyDisplay::new(RecordingSurface::default(), NullSink, settings).unwrap_err();
        assert_eq!(err, Error::InvalidResetDelay(Duration::ZERO));
    }

    #[test]
    fn test_message_waits_for_next_tick() {
        let mut display =
            LatencyDisplay::new(RecordingSurface::default(), NullSink, Default::default()).unwrap();
        let mut scheduler = FrameScheduler::new();

        display.on_key_event(KeyEvent::new(KeySymbol::A, at(10_000)), &mut scheduler);
        assert_eq!(display.text(), DEFAULT_PROMPT);
        assert_eq!(display.mode(), DisplayMode::Idle);

        scheduler.tick(&mut display, at(10_016));
        assert_eq!(display.text(), "Input lag for A: 16.00 ms");
        assert_eq!(display.mode(), DisplayMode::Showing);
        assert_eq!(scheduler.pending_timers(), 1);
        assert_eq!(scheduler.next_deadline(), Some(at(12_016)));
    }

    #[test]
    fn test_log_failure_does_not_affect_display() {
        let mut display =
            LatencyDisplay::new(RecordingSurface::default(), FailingSink::default(), Default::default())
                .unwrap();
        let mut scheduler = FrameScheduler::new();

        display.on_key_event(KeyEvent::new(KeySymbol::Space, at(0)), &mut scheduler);
        scheduler.tick(&mut display, at(20));

        assert_eq!(display.sink().attempts, 1);
        assert_eq!(display.text(), "Input lag for Space: 20.00 ms");
        assert_eq!(display.mode(), DisplayMode::Showing);
    }

    #[test]
    fn test_reset_restores_prompt() {
        let mut display =
            LatencyDisplay::new(RecordingSurface::default(), NullSink, Default::default()).unwrap();
        let mut scheduler = FrameScheduler::new();

        display.on_key_event(KeyEvent::new(KeySymbol::Return, at(0)), &mut scheduler);
        scheduler.tick(&mut display, at(16));
        scheduler.tick(&mut display, at(2_016));

        assert_eq!(display.text(), DEFAULT_PROMPT);
        assert_eq!(display.mode(), DisplayMode::Idle);
        assert_eq!(display.pending_reset(), None);
        assert_eq!(display.last_sample(), None);
        assert_eq!(
            display.surface().texts,
            vec![
                DEFAULT_PROMPT,
                "Input lag for Return: 16.00 ms",
                DEFAULT_PROMPT
            ]
        );
    }

    #[test]
    fn test_custom_reset_delay() {
        let settings = DisplaySettings {
            reset_delay: Duration::from_millis(500),
        };
        let mut display =
            LatencyDisplay::new(RecordingSurface::default(), NullSink, settings).unwrap();
        let mut scheduler = FrameScheduler::new();

        display.on_key_event(KeyEvent::new(KeySymbol::Z, at(0)), &mut scheduler);
        scheduler.tick(&mut display, at(10));
        scheduler.tick(&mut display, at(509));
        assert_eq!(display.mode(), DisplayMode::Showing);
        scheduler.tick(&mut display, at(510));
        assert_eq!(display.mode(), DisplayMode::Idle);
    }
}
