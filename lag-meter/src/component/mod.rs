pub mod label;

pub use label::*;
use ratatui::layout::Rect;

use color_eyre::eyre::Result;

use crate::tui::Frame;

pub trait Component {
    fn new() -> Self;

    fn render(&self, _f: &mut Frame<'_>, _area: Rect) -> Result<()> {
        Ok(())
    }
}
