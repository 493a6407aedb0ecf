use std::time::Duration;

use game::button::ButtonId::{self, Blue, Green, Red, Yellow};
use game::controller::{GameController, GameState, Notification};
use game::sequence::Sequence;
use game::tone::{AudioError, ToneEmitter, ToneOutput};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Open,
    Resume,
    Freq(f32),
    Gain(f32),
}

#[derive(Debug, Default)]
struct Recorder {
    calls: Vec<Call>,
}

impl ToneOutput for Recorder {
    fn open(&mut self) -> Result<(), AudioError> {
        self.calls.push(Call::Open);
        Ok(())
    }

    fn resume(&mut self) {
        self.calls.push(Call::Resume);
    }

    fn set_frequency(&mut self, hz: f32) {
        self.calls.push(Call::Freq(hz));
    }

    fn ramp_gain(&mut self, target: f32) {
        self.calls.push(Call::Gain(target));
    }
}

type Game = GameController<Recorder, StdRng>;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn new_game() -> Game {
    GameController::new(ToneEmitter::new(Recorder::default()), StdRng::seed_from_u64(3))
}

fn start_with(buttons: Vec<ButtonId>) -> Game {
    let mut game = new_game();
    game.start_game_with_sequence(Sequence::from(buttons));
    game
}

fn lit(game: &Game) -> Vec<ButtonId> {
    ButtonId::ALL
        .into_iter()
        .filter(|b| game.visuals().is_highlighted(*b))
        .collect()
}

fn tap(game: &mut Game, button: ButtonId) {
    game.press(button);
    game.release();
}

/// Runs out the current playback (and any pending round change first).
fn play_back(game: &mut Game) {
    game.tick(Duration::from_secs(20));
}

/// Repeats the current round's prefix correctly.
fn echo_round(game: &mut Game) {
    let expected = game.sequence().prefix(game.round()).to_vec();
    for button in expected {
        tap(game, button);
    }
}

fn freq_calls(game: &Game, button: ButtonId) -> usize {
    game.tone()
        .output()
        .calls
        .iter()
        .filter(|c| **c == Call::Freq(button.frequency_hz()))
        .count()
}

#[test]
fn round_one_plays_first_clue_after_lead_in() {
    let mut game = start_with(vec![Green, Red]);
    assert_eq!(game.round(), 1);
    assert!(game.player_input().is_empty());

    game.tick(ms(299));
    assert!(lit(&game).is_empty());

    game.tick(ms(1));
    assert_eq!(lit(&game), vec![Green]);
    assert_eq!(game.tone().sounding(), Some(Green));

    game.tick(ms(599));
    assert_eq!(lit(&game), vec![Green]);
    game.tick(ms(1));
    assert!(lit(&game).is_empty());
    assert!(!game.tone().is_sounding());
}

#[test]
fn later_rounds_space_clues_by_hold_plus_pause() {
    let mut game = start_with(vec![Red, Blue, Yellow]);
    play_back(&mut game);
    echo_round(&mut game);

    // Next round starts 1000 ms after the round was completed.
    game.tick(ms(999));
    assert_eq!(game.round(), 1);
    game.tick(ms(1));
    assert_eq!(game.round(), 2);
    assert!(game.player_input().is_empty());

    game.tick(ms(300));
    assert_eq!(lit(&game), vec![Red]);
    game.tick(ms(600));
    assert!(lit(&game).is_empty());
    game.tick(ms(299));
    assert!(lit(&game).is_empty());
    game.tick(ms(1));
    assert_eq!(lit(&game), vec![Blue]);
    game.tick(ms(600));
    assert!(lit(&game).is_empty());
    assert_eq!(game.pending_events(), 0);
}

#[test]
fn every_clue_and_press_retunes_the_tone() {
    let mut game = start_with(vec![Red, Red]);
    play_back(&mut game);
    echo_round(&mut game);
    play_back(&mut game);

    // Two rounds: Red once, then Red twice, plus the player's own press of Red.
    assert_eq!(freq_calls(&game, Red), 4);
}

#[test]
fn happy_path_wins_and_stops() {
    let mut game = start_with(vec![Red, Blue]);

    play_back(&mut game);
    tap(&mut game, Red);
    assert_eq!(game.state(), GameState::Playing);

    play_back(&mut game);
    assert_eq!(game.round(), 2);
    tap(&mut game, Red);
    assert!(game.take_notification().is_none());
    tap(&mut game, Blue);

    assert_eq!(game.take_notification(), Some(Notification::Won));
    assert_eq!(game.state(), GameState::Stopped);
    assert_eq!(game.control_label(), "Start");
}

#[test]
fn wrong_first_press_loses_immediately() {
    let mut game = start_with(vec![Red, Blue]);
    play_back(&mut game);
    tap(&mut game, Blue);

    assert_eq!(game.take_notification(), Some(Notification::Lost));
    assert_eq!(game.state(), GameState::Stopped);
    assert_eq!(game.pending_events(), 0, "no next round may be scheduled");

    play_back(&mut game);
    assert_eq!(game.round(), 1);
}

#[test]
fn mismatch_mid_round_loses_before_round_completes() {
    let mut game = start_with(vec![Red, Blue, Green, Yellow]);
    for _ in 0..2 {
        play_back(&mut game);
        echo_round(&mut game);
    }
    play_back(&mut game);
    assert_eq!(game.round(), 3);

    tap(&mut game, Red);
    tap(&mut game, Blue);
    assert!(game.is_playing());
    tap(&mut game, Yellow);

    assert_eq!(game.take_notification(), Some(Notification::Lost));
    assert!(!game.is_playing());
}

#[test]
fn only_newest_input_is_validated() {
    let mut game = start_with(vec![Red, Blue]);
    play_back(&mut game);
    tap(&mut game, Red);
    play_back(&mut game);
    tap(&mut game, Red);

    // Partial, correct-so-far input: re-checking changes nothing.
    game.check_input();
    game.check_input();
    assert!(game.is_playing());
    assert_eq!(game.player_input(), &[Red]);
    assert!(game.take_notification().is_none());
}

#[test]
fn presses_after_round_complete_are_ignored_until_next_round() {
    let mut game = start_with(vec![Red, Blue]);
    play_back(&mut game);
    tap(&mut game, Red);
    tap(&mut game, Green);

    assert_eq!(game.player_input(), &[Red]);
    assert!(game.is_playing());
}

#[test]
fn stale_clues_after_stop_are_silent_and_dark() {
    let mut game = start_with(vec![Red, Blue, Green, Yellow, Red, Blue, Green, Yellow]);
    for _ in 0..4 {
        play_back(&mut game);
        echo_round(&mut game);
    }
    game.tick(ms(1000));
    assert_eq!(game.round(), 5);

    // Mid-playback: first clue lit, four more still scheduled.
    game.tick(ms(400));
    assert_eq!(lit(&game), vec![Red]);
    assert!(game.pending_events() > 0);

    game.stop_game();
    assert!(lit(&game).is_empty());
    assert!(!game.tone().is_sounding());
    let calls_at_stop = game.tone().output().calls.len();

    play_back(&mut game);
    assert_eq!(game.tone().output().calls.len(), calls_at_stop);
    assert!(lit(&game).is_empty());
    assert_eq!(game.round(), 5);
    assert_eq!(game.pending_events(), 0);
}

#[test]
fn restart_drops_events_from_previous_game() {
    let mut game = start_with(vec![Yellow]);
    game.stop_game();
    game.start_game_with_sequence(Sequence::from(vec![Red]));
    play_back(&mut game);

    assert_eq!(freq_calls(&game, Yellow), 0);
    assert_eq!(freq_calls(&game, Red), 1);
    assert_eq!(game.round(), 1);
}

#[test]
fn stop_is_idempotent_and_clears_highlight() {
    let mut game = start_with(vec![Red]);
    play_back(&mut game);
    game.press(Red);
    assert_eq!(lit(&game), vec![Red]);

    game.stop_game();
    let epoch = game.epoch();
    assert!(lit(&game).is_empty());
    assert_eq!(game.held(), None);

    game.stop_game();
    assert_eq!(game.state(), GameState::Stopped);
    assert!(game.epoch() > epoch);

    // The release that follows a stop has nothing left to validate.
    game.release();
    assert!(game.take_notification().is_none());
}

#[test]
fn player_press_does_not_cut_off_a_playing_clue() {
    let mut game = start_with(vec![Red, Blue]);
    game.tick(ms(300));
    assert_eq!(game.tone().sounding(), Some(Red));

    game.press(Blue);
    assert_eq!(game.tone().sounding(), Some(Red));
    assert_eq!(lit(&game), vec![Red, Blue]);
}

#[test]
fn audio_opens_lazily_on_first_tone() {
    let mut game = start_with(vec![Red]);
    assert!(game.tone().output().calls.is_empty());
    game.tick(ms(300));
    assert_eq!(game.tone().output().calls.first(), Some(&Call::Open));
}

#[test]
fn generated_games_use_full_length_sequence() {
    let mut game = new_game();
    game.start_game();
    assert_eq!(game.sequence().len(), game::sequence::SEQUENCE_LENGTH);
    assert!(
        game.sequence()
            .as_slice()
            .iter()
            .all(|b| ButtonId::ALL.contains(b))
    );
}
