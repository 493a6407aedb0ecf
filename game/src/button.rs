use engine::graphics::Color;
use serde::{Deserialize, Serialize};

/// The four clue buttons, in on-screen order (top-left, top-right, bottom-left, bottom-right).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ButtonId {
    Red,
    Blue,
    Green,
    Yellow,
}

impl ButtonId {
    pub const ALL: [ButtonId; 4] = [
        ButtonId::Red,
        ButtonId::Blue,
        ButtonId::Green,
        ButtonId::Yellow,
    ];

    pub fn index(self) -> usize {
        match self {
            ButtonId::Red => 0,
            ButtonId::Blue => 1,
            ButtonId::Green => 2,
            ButtonId::Yellow => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Tone pitch: a D major arpeggio (D4, F#4, A4, D5).
    pub fn frequency_hz(self) -> f32 {
        match self {
            ButtonId::Red => 293.66,
            ButtonId::Blue => 370.00,
            ButtonId::Green => 440.00,
            ButtonId::Yellow => 587.33,
        }
    }

    /// Background while lit.
    pub fn highlight_color(self) -> Color {
        match self {
            ButtonId::Red => [255, 0, 0, 255],
            ButtonId::Blue => [0, 0, 255, 255],
            ButtonId::Green => [0, 128, 0, 255],
            ButtonId::Yellow => [255, 255, 0, 255],
        }
    }

    /// Background at rest.
    pub fn idle_color(self) -> Color {
        match self {
            ButtonId::Red => [96, 28, 28, 255],
            ButtonId::Blue => [28, 32, 96, 255],
            ButtonId::Green => [24, 72, 32, 255],
            ButtonId::Yellow => [100, 92, 24, 255],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ButtonId::Red => "red",
            ButtonId::Blue => "blue",
            ButtonId::Green => "green",
            ButtonId::Yellow => "yellow",
        }
    }
}

impl std::fmt::Display for ButtonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
