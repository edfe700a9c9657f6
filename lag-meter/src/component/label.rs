use color_eyre::eyre::Result;
use derive_deref::{Deref, DerefMut};
use lag_core::DisplaySurface;
use ratatui::{prelude::*, widgets::*};

use crate::tui::Frame;

use super::Component;

/// The single line of text the meter writes to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, DerefMut)]
pub struct Label(String);

impl Component for Label {
    fn new() -> Self {
        Self(String::new())
    }

    fn render(&self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                [
                    Constraint::Fill(1),
                    Constraint::Length(1),
                    Constraint::Fill(1),
                ]
                .as_ref(),
            )
            .split(area);

        let label = Paragraph::new(self.0.as_str()).alignment(Alignment::Center);
        f.render_widget(label, chunks[1]);

        Ok(())
    }
}

impl DisplaySurface for Label {
    fn set_text(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ratatui::backend::TestBackend;

    fn rendered_rows(label: &Label, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| label.render(f, f.size()).unwrap())
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer.get(x, y).symbol())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn test_set_text_replaces() {
        let mut label = Label::new();
        label.set_text("Press any key to measure input lag");
        label.set_text("Input lag for A: 16.00 ms");
        assert_eq!(label.as_str(), "Input lag for A: 16.00 ms");
    }

    #[test]
    fn test_renders_centered() {
        let mut label = Label::new();
        label.set_text("Input lag for A: 16.00 ms");

        let rows = rendered_rows(&label, 45, 5);
        assert_eq!(rows[0].trim(), "");
        assert_eq!(rows[1].trim(), "");
        assert_eq!(rows[2].trim(), "Input lag for A: 16.00 ms");
        assert_eq!(rows[3].trim(), "");
        assert_eq!(rows[4].trim(), "");
        assert_eq!(rows[2], format!("{:^45}", "Input lag for A: 16.00 ms"));
    }
}
