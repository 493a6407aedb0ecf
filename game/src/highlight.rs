use std::collections::HashMap;

use engine::graphics::Color;

use crate::button::ButtonId;

/// Lit/unlit state of the clue buttons.
///
/// `backgrounds` is what the view paints. Lighting a button stashes its current background in
/// `saved` (first activation only) and restoring pops it back, so redundant calls in either
/// direction cannot lose the original color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualFeedback {
    backgrounds: [Color; 4],
    saved: HashMap<ButtonId, Color>,
}

impl Default for VisualFeedback {
    fn default() -> Self {
        Self::new()
    }
}

impl VisualFeedback {
    pub fn new() -> Self {
        Self {
            backgrounds: ButtonId::ALL.map(ButtonId::idle_color),
            saved: HashMap::new(),
        }
    }

    pub fn background(&self, button: ButtonId) -> Color {
        self.backgrounds[button.index()]
    }

    pub fn is_highlighted(&self, button: ButtonId) -> bool {
        self.saved.contains_key(&button)
    }

    pub fn set_highlight(&mut self, button: ButtonId, active: bool) {
        let slot = &mut self.backgrounds[button.index()];
        if active {
            self.saved.entry(button).or_insert(*slot);
            *slot = button.highlight_color();
        } else if let Some(prior) = self.saved.remove(&button) {
            *slot = prior;
        }
    }

    pub fn reset_all(&mut self) {
        for button in ButtonId::ALL {
            self.set_highlight(button, false);
        }
    }
}
