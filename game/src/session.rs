use std::time::Duration;

use engine::app::{PointerFrame, PointerPhase};
use rand::Rng;

use crate::controller::{GameController, Notification};
use crate::tone::ToneOutput;
use crate::view::SimonAction;

/// A running game plus the win/lose notice currently on screen.
///
/// The notice is modal: until it is dismissed the game clock is frozen and only the notice's
/// own button responds.
pub struct Session<O, R> {
    game: GameController<O, R>,
    notice: Option<Notification>,
}

impl<O: ToneOutput, R: Rng> Session<O, R> {
    pub fn new(game: GameController<O, R>) -> Self {
        Self { game, notice: None }
    }

    pub fn game(&self) -> &GameController<O, R> {
        &self.game
    }

    pub fn notice(&self) -> Option<Notification> {
        self.notice
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
        self.pull_notification();
    }

    /// Applies one frame of pointer input, event by event.
    pub fn handle_pointer(&mut self, pointer: &PointerFrame<SimonAction>) {
        for event in &pointer.events {
            match event.phase {
                PointerPhase::Down => self.pointer_down(event.target),
                PointerPhase::Up => self.pointer_up(event.target),
            }
        }
    }

    fn pointer_down(&mut self, target: Option<SimonAction>) {
        if self.notice.is_some() {
            return;
        }
        if let Some(SimonAction::Clue(button)) = target {
            self.game.press(button);
        }
    }

    fn pointer_up(&mut self, target: Option<SimonAction>) {
        // Releasing anywhere ends the held press, even if the pointer slid off the pad.
        self.game.release();
        self.pull_notification();

        match target {
            Some(SimonAction::DismissNotice) => self.dismiss_notice(),
            Some(SimonAction::ToggleGame) if self.notice.is_none() => self.game.toggle(),
            _ => {}
        }
    }

    pub fn tick(&mut self, dt: Duration) {
        if self.notice.is_some() {
            return;
        }
        self.game.tick(dt);
        self.pull_notification();
    }

    fn pull_notification(&mut self) {
        if self.notice.is_none() {
            self.notice = self.game.take_notification();
            if let Some(notice) = self.notice {
                log::info!("{}", notice.message());
            }
        }
    }
}
