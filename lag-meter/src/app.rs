use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use lag_core::{KeyboardState, LagMeter, MonotonicClock};
use ratatui::prelude::Rect;
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::{
    action::Action,
    component::{Component, Label},
    diagnostics::TracingSink,
    input::{self, KeyInput},
    settings::Settings,
    tui::{self, Frame},
};

pub struct App {
    pub settings: Settings,
    pub meter: LagMeter<Label, TracingSink, MonotonicClock>,
    pub keyboard: KeyboardState,
    pub pending_quit: bool,
    pub pending_suspend: bool,
}

impl App {
    pub fn new(settings: Settings) -> Result<Self> {
        let meter = LagMeter::new(
            Label::new(),
            TracingSink,
            MonotonicClock::new(),
            settings.display()?,
        )?;

        Ok(Self {
            settings,
            meter,
            keyboard: KeyboardState::new(),
            pending_quit: false,
            pending_suspend: false,
        })
    }

    fn tui(&self) -> Result<tui::Tui> {
        Ok(tui::Tui::new()?
            .render_interval(self.settings.frame_interval()?)
            .keyboard_enhancement(self.settings.keyboard_enhancement))
    }

    fn enter(&mut self, tui: &mut tui::Tui) -> Result<()> {
        tui.enter()?;
        self.keyboard.set_reports_releases(tui.reports_releases());
        Ok(())
    }

    pub async fn run(&mut self) -> Result<()> {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();

        let mut tui = self.tui()?;
        self.enter(&mut tui)?;

        loop {
            if let Some(e) = tui.next().await {
                match e {
                    tui::Event::Closed | tui::Event::Error => action_tx.send(Action::Quit)?,
                    tui::Event::Render => action_tx.send(Action::Frame)?,
                    tui::Event::Resize(x, y) => action_tx.send(Action::Resize(x, y))?,
                    tui::Event::Key(key) => self.handle_key(key, &action_tx)?,
                    // releases of keys held while unfocused never arrive
                    tui::Event::FocusLost => self.keyboard.release_all(),
                    _ => {}
                }
            }

            while let Ok(action) = action_rx.try_recv() {
                if action != Action::Frame {
                    tracing::debug!("{action}");
                }
                match action {
                    Action::Frame => {
                        if let Some(event) = self.meter.frame(&self.keyboard) {
                            tracing::debug!(key = %event.key, at = %event.captured_at, "key down");
                        }
                        self.keyboard.end_tick();

                        let mut rendered = Ok(());
                        tui.draw(|f| rendered = self.render(f))?;
                        rendered?;
                    }
                    Action::Quit => self.pending_quit = true,
                    Action::Suspend => self.pending_suspend = true,
                    Action::Resume => self.pending_suspend = false,
                    Action::Resize(w, h) => tui.resize(Rect::new(0, 0, w, h))?,
                }
            }

            if self.pending_suspend {
                tui.suspend()?;
                action_tx.send(Action::Resume)?;
                tui = self.tui()?;
                self.enter(&mut tui)?;
            } else if self.pending_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent, tx: &UnboundedSender<Action>) -> Result<()> {
        match input::translate(&key) {
            KeyInput::Quit => tx.send(Action::Quit)?,
            KeyInput::Suspend => tx.send(Action::Suspend)?,
            KeyInput::Key(symbol, transition) => self.keyboard.apply(symbol, transition),
            KeyInput::Ignored => tracing::trace!(?key, "unmapped key"),
        }
        Ok(())
    }

    fn render(&self, f: &mut Frame<'_>) -> Result<()> {
        let area = f.size();
        self.meter.display().surface().render(f, area)
    }
}
