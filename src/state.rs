use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::figure::Figure;
use crate::render;

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// The full viewer state, independent of rendering.
pub struct ViewerState {
    /// Every figure produced by this run, in the order they were saved.
    pub figures: Vec<Figure>,

    /// Index of the figure shown in the central panel.
    pub selected: usize,

    /// Directory the figures were written to; default for "Save image…".
    pub output_dir: PathBuf,

    /// Error message shown in the UI.
    pub status_message: Option<String>,
}

impl ViewerState {
    pub fn new(figures: Vec<Figure>, output_dir: PathBuf) -> Self {
        Self {
            figures,
            selected: 0,
            output_dir,
            status_message: None,
        }
    }

    pub fn selected_figure(&self) -> Option<&Figure> {
        self.figures.get(self.selected)
    }

    /// Select a figure by index; out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.figures.len() {
            self.selected = index;
        }
    }

    pub fn select_next(&mut self) {
        self.select(self.selected + 1);
    }

    pub fn select_previous(&mut self) {
        self.select(self.selected.saturating_sub(1));
    }

    /// Render the selected figure to `path`, reporting failures in the UI.
    pub fn save_selected_to(&mut self, path: &Path) {
        let Some(figure) = self.selected_figure() else {
            return;
        };
        let result = render::save_figure_as(figure, path)
            .with_context(|| format!("saving '{}'", figure.title));
        match result {
            Ok(()) => {
                log::info!("Plot saved as '{}'", path.display());
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to save figure: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(n: usize) -> ViewerState {
        let figures = (0..n)
            .map(|i| Figure::new(format!("figure {i}"), format!("f{i}.png")))
            .collect();
        ViewerState::new(figures, PathBuf::from("."))
    }

    #[test]
    fn navigation_stays_in_range() {
        let mut state = state_with(3);
        state.select_previous();
        assert_eq!(state.selected, 0);

        state.select_next();
        state.select_next();
        state.select_next();
        assert_eq!(state.selected, 2);
        assert_eq!(state.selected_figure().map(|f| f.title.as_str()), Some("figure 2"));

        state.select(10);
        assert_eq!(state.selected, 2);
    }

    #[test]
    fn empty_state_has_no_selection() {
        let mut state = state_with(0);
        assert!(state.selected_figure().is_none());
        state.select_next();
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn failed_save_sets_status_message() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(1);
        state.save_selected_to(&dir.path().join("figure.pdf"));
        let msg = state.status_message.expect("status message");
        assert!(msg.contains("unsupported image format"), "{msg}");
    }
}
