//! Round playback and input validation.
//!
//! [`GameController`] owns the whole game: the target sequence, the round counter, the player's
//! input for the current round, the tone and highlight state, and the deferred events that pace
//! playback. Nothing here touches a window or a clock; the owner feeds pointer input through
//! [`GameController::press`]/[`GameController::release`] and time through
//! [`GameController::tick`].
//!
//! Deferred events are never cancelled. Each one carries the epoch it was scheduled in, and the
//! epoch moves on every start and stop, so anything left over from an earlier game is dropped
//! when it fires.

use std::collections::VecDeque;
use std::time::Duration;

use engine::timers::TimerQueue;
use rand::Rng;

use crate::button::ButtonId;
use crate::highlight::VisualFeedback;
use crate::sequence::{self, SEQUENCE_LENGTH, Sequence};
use crate::timing::{PlaybackSchedule, Timing};
use crate::tone::{ToneEmitter, ToneOutput};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    Stopped,
    Playing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    Won,
    Lost,
}

impl Notification {
    pub fn message(self) -> &'static str {
        match self {
            Notification::Won => "Congratulations! You won the game!",
            Notification::Lost => "Game Over! You lost, try again!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimedAction {
    ClueOn(ButtonId),
    ClueOff(ButtonId),
    NextRound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TimedEvent {
    epoch: u64,
    action: TimedAction,
}

pub struct GameController<O, R> {
    state: GameState,
    epoch: u64,
    sequence: Sequence,
    round: usize,
    input: Vec<ButtonId>,
    held: Option<ButtonId>,
    timers: TimerQueue<TimedEvent>,
    tone: ToneEmitter<O>,
    visuals: VisualFeedback,
    notifications: VecDeque<Notification>,
    timing: Timing,
    sequence_length: usize,
    rng: R,
}

impl<O: ToneOutput, R: Rng> GameController<O, R> {
    pub fn new(tone: ToneEmitter<O>, rng: R) -> Self {
        Self {
            state: GameState::Stopped,
            epoch: 0,
            sequence: Sequence::default(),
            round: 0,
            input: Vec::new(),
            held: None,
            timers: TimerQueue::new(),
            tone,
            visuals: VisualFeedback::new(),
            notifications: VecDeque::new(),
            timing: Timing::default(),
            sequence_length: SEQUENCE_LENGTH,
            rng,
        }
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == GameState::Playing
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn round(&self) -> usize {
        self.round
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn player_input(&self) -> &[ButtonId] {
        &self.input
    }

    pub fn held(&self) -> Option<ButtonId> {
        self.held
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    pub fn tone(&self) -> &ToneEmitter<O> {
        &self.tone
    }

    pub fn visuals(&self) -> &VisualFeedback {
        &self.visuals
    }

    pub fn pending_events(&self) -> usize {
        self.timers.len()
    }

    /// Label for the start/stop control.
    pub fn control_label(&self) -> &'static str {
        match self.state {
            GameState::Stopped => "Start",
            GameState::Playing => "Stop",
        }
    }

    pub fn take_notification(&mut self) -> Option<Notification> {
        self.notifications.pop_front()
    }

    /// The start/stop control: starts a game when stopped, stops it when playing.
    pub fn toggle(&mut self) {
        match self.state {
            GameState::Stopped => self.start_game(),
            GameState::Playing => self.stop_game(),
        }
    }

    pub fn start_game(&mut self) {
        if self.is_playing() {
            return;
        }
        let sequence = sequence::generate(&mut self.rng, self.sequence_length);
        self.start_game_with_sequence(sequence);
    }

    /// Starts a game against a caller-chosen sequence.
    pub fn start_game_with_sequence(&mut self, sequence: Sequence) {
        if self.is_playing() {
            return;
        }
        self.sequence = sequence;
        self.round = 0;
        self.input.clear();
        self.held = None;
        self.epoch += 1;
        self.state = GameState::Playing;
        log::info!("game started ({} clues)", self.sequence.len());
        self.play_round();
    }

    /// Silences the tone, clears all highlights and stops. Safe to call when already stopped.
    pub fn stop_game(&mut self) {
        if self.is_playing() {
            log::info!("game stopped in round {}", self.round);
        }
        self.state = GameState::Stopped;
        self.epoch += 1;
        self.held = None;
        self.tone.stop_tone();
        self.visuals.reset_all();
    }

    /// Advances to the next round and schedules its playback.
    pub fn play_round(&mut self) {
        if !self.is_playing() {
            return;
        }
        self.input.clear();
        self.round += 1;
        log::debug!("round {}/{}", self.round, self.sequence.len());

        let schedule = PlaybackSchedule::for_round(&self.sequence, self.round, &self.timing);
        for clue in schedule.clues() {
            self.schedule(clue.offset, TimedAction::ClueOn(clue.button));
        }
    }

    /// Lights and sounds one clue now; it goes dark after `hold_clue`.
    pub fn play_clue(&mut self, button: ButtonId) {
        if !self.is_playing() {
            return;
        }
        log::debug!("clue {button}");
        self.tone.start_tone(button, true);
        self.visuals.set_highlight(button, true);
        self.schedule(self.timing.hold_clue, TimedAction::ClueOff(button));
    }

    /// Player pushes `button` down: tone, highlight, and record the press.
    ///
    /// Ignored when stopped, while another button is held, or once this round's input is
    /// complete and the next round has not started yet.
    pub fn press(&mut self, button: ButtonId) {
        if !self.is_playing() || self.held.is_some() || self.input.len() >= self.round {
            return;
        }
        self.tone.start_tone(button, false);
        self.visuals.set_highlight(button, true);
        self.input.push(button);
        self.held = Some(button);
    }

    /// Player lets go of the held button, which completes the press and validates it.
    pub fn release(&mut self) {
        let Some(button) = self.held.take() else {
            return;
        };
        self.tone.stop_tone();
        self.visuals.set_highlight(button, false);
        self.check_input();
    }

    /// Validates the newest input against the sequence and decides the round's outcome.
    pub fn check_input(&mut self) {
        if !self.is_playing() || self.input.is_empty() {
            return;
        }
        let idx = self.input.len() - 1;
        if self.sequence.get(idx) != Some(self.input[idx]) {
            log::info!("incorrect input at position {}", idx + 1);
            self.game_lost();
            return;
        }

        if self.input.len() == self.round {
            if self.round == self.sequence.len() {
                self.game_won();
            } else {
                self.schedule(self.timing.inter_round, TimedAction::NextRound);
            }
        }
    }

    /// Advances the clock by `dt`, firing due events in order.
    pub fn tick(&mut self, dt: Duration) {
        let deadline = self.timers.now().saturating_add(dt);
        while let Some(event) = self.timers.pop_due(deadline) {
            if event.epoch != self.epoch || !self.is_playing() {
                continue;
            }
            match event.action {
                TimedAction::ClueOn(button) => self.play_clue(button),
                TimedAction::ClueOff(button) => {
                    self.tone.stop_tone();
                    self.visuals.set_highlight(button, false);
                }
                TimedAction::NextRound => self.play_round(),
            }
        }
        self.timers.advance_to(deadline);
    }

    fn game_lost(&mut self) {
        self.stop_game();
        self.notifications.push_back(Notification::Lost);
    }

    fn game_won(&mut self) {
        log::info!("game won after {} rounds", self.round);
        self.stop_game();
        self.notifications.push_back(Notification::Won);
    }

    fn schedule(&mut self, delay: Duration, action: TimedAction) {
        let event = TimedEvent {
            epoch: self.epoch,
            action,
        };
        self.timers.schedule(delay, event);
    }
}
