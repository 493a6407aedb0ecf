use std::time::Duration;

use crate::button::ButtonId;
use crate::sequence::Sequence;

/// Playback and pacing constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// How long each clue stays lit and audible.
    pub hold_clue: Duration,
    /// Gap between one clue ending and the next starting.
    pub pause: Duration,
    /// Lead-in before the first clue of a round.
    pub wait_next_clue: Duration,
    /// Delay between a completed round and the next playback.
    pub inter_round: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            hold_clue: Duration::from_millis(600),
            pause: Duration::from_millis(300),
            wait_next_clue: Duration::from_millis(300),
            inter_round: Duration::from_millis(1000),
        }
    }
}

impl Timing {
    /// Start offset of the clue at `index` within a round, relative to the round's start.
    pub fn clue_offset(&self, index: usize) -> Duration {
        self.wait_next_clue + (self.hold_clue + self.pause) * index as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledClue {
    pub button: ButtonId,
    pub offset: Duration,
}

/// When each clue of a round starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackSchedule {
    clues: Vec<ScheduledClue>,
}

impl PlaybackSchedule {
    pub fn for_round(sequence: &Sequence, round: usize, timing: &Timing) -> Self {
        let clues = sequence
            .prefix(round)
            .iter()
            .enumerate()
            .map(|(i, &button)| ScheduledClue {
                button,
                offset: timing.clue_offset(i),
            })
            .collect();
        Self { clues }
    }

    pub fn clues(&self) -> &[ScheduledClue] {
        &self.clues
    }
}
