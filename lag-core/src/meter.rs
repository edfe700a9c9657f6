use crate::{
    clock::{Clock, MonotonicClock},
    display::{DiagnosticSink, DisplayMode, DisplaySettings, DisplaySurface, LatencyDisplay},
    error::Error,
    key::KeyEvent,
    poller::{InputPoller, InputSource},
    scheduler::FrameScheduler,
};

/// One input poller and one display, driven a frame at a time.
pub struct LagMeter<S, L, C = MonotonicClock> {
    clock: C,
    poller: InputPoller,
    scheduler: FrameScheduler<LatencyDisplay<S, L>>,
    display: LatencyDisplay<S, L>,
}

impl<S, L, C> LagMeter<S, L, C>
where
    S: DisplaySurface + 'static,
    L: DiagnosticSink + 'static,
    C: Clock,
{
    pub fn new(surface: S, sink: L, clock: C, settings: DisplaySettings) -> Result<Self, Error> {
        Ok(Self {
            clock,
            poller: InputPoller::new(),
            scheduler: FrameScheduler::new(),
            display: LatencyDisplay::new(surface, sink, settings)?,
        })
    }

    /// Runs one frame: finishes work waiting on this frame, fires due resets,
    /// then looks for a new key press.
    pub fn frame(&mut self, input: &impl InputSource) -> Option<KeyEvent> {
        let now = self.clock.now();
        self.scheduler.tick(&mut self.display, now);

        let event = self.poller.poll(input, &self.clock)?;
        self.display.on_key_event(event, &mut self.scheduler);
        Some(event)
    }

    pub fn display(&self) -> &LatencyDisplay<S, L> {
        &self.display
    }

    pub fn mode(&self) -> DisplayMode {
        self.display.mode()
    }

    pub fn text(&self) -> &str {
        self.display.text()
    }

    pub fn scheduler(&self) -> &FrameScheduler<LatencyDisplay<S, L>> {
        &self.scheduler
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
