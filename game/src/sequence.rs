use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::button::ButtonId;

/// Number of clues a player must reproduce to win.
pub const SEQUENCE_LENGTH: usize = 8;

/// The target clue order for one game. Fixed once built; there are no mutating accessors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence(Vec<ButtonId>);

impl Sequence {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<ButtonId> {
        self.0.get(index).copied()
    }

    pub fn as_slice(&self) -> &[ButtonId] {
        &self.0
    }

    /// The leading `n` clues (clamped to the sequence length).
    pub fn prefix(&self, n: usize) -> &[ButtonId] {
        &self.0[..n.min(self.0.len())]
    }
}

impl From<Vec<ButtonId>> for Sequence {
    fn from(buttons: Vec<ButtonId>) -> Self {
        Self(buttons)
    }
}

/// `length` independent uniform draws over the four buttons. Repeats are allowed.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, length: usize) -> Sequence {
    let buttons = (0..length)
        .map(|_| ButtonId::ALL[rng.gen_range(0..ButtonId::ALL.len())])
        .collect();
    Sequence(buttons)
}
