//! Game state machine.
//!
//! One [`Game`] value owns score, lives, the accumulated wheel rotation and the
//! current [`Phase`]. Timed transitions are deadlines stored inside the phase they
//! belong to and fired by [`Game::tick`], which the shell calls every animation
//! frame. Leaving a phase drops its deadlines, so a countdown can never tick (or
//! time out) after its question was answered.
//!
//! The machine performs no I/O. Sounds, confetti and high-score writes are queued
//! as [`Effect`]s and drained by the shell once per frame.
//!
//! ```text
//! Idle -spin-> Spinning -4.1s-> Highlighting -1s-> AwaitingAnswer
//!   ^                                                 | answer / timeout
//!   +------------- 2s ---------- Resolved <-----------+ (lives left)
//!                                GameOver <-----------+ (no lives left)
//! ```

use crate::audio::Sound;
use crate::catalog::{self, WordPair};
use crate::config::{Burst, GameConfig};
use crate::random::RandomSource;
use crate::spin;

const MS_PER_SECOND: f64 = 1000.0;

// --- Messages / Effects -------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MessageTone {
    Success,
    Failure,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Message {
    pub text: String,
    pub tone: MessageTone,
}

impl Message {
    fn success(text: impl Into<String>) -> Self {
        Self { text: text.into(), tone: MessageTone::Success }
    }
    fn failure(text: impl Into<String>) -> Self {
        Self { text: text.into(), tone: MessageTone::Failure }
    }
}

/// Side effects requested by a transition, executed by the shell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    Sound(Sound),
    Celebrate(Burst),
    SaveHighScore(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Outcome {
    Correct,
    Wrong,
    TimedOut,
}

// --- Phases -------------------------------------------------------------------

/// Explicit game phase. Deadlines are absolute timestamps in milliseconds on the
/// same clock the shell passes to [`Game::tick`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    Idle,
    Spinning {
        ends_at: f64,
        next_tick_at: f64, // next audible tick while the wheel turns
    },
    Highlighting {
        segment: usize,
        ends_at: f64,
    },
    AwaitingAnswer {
        pair: WordPair,
        choices: [&'static str; 2], // left/right order as shown
        time_left: u32,
        next_second_at: f64,
    },
    Resolved {
        pair: WordPair,
        outcome: Outcome,
        ends_at: f64,
    },
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PhaseKind {
    Idle,
    Spinning,
    Highlighting,
    AwaitingAnswer,
    Resolved,
    GameOver,
}

impl PhaseKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PhaseKind::Idle => "idle",
            PhaseKind::Spinning => "spinning",
            PhaseKind::Highlighting => "highlighting",
            PhaseKind::AwaitingAnswer => "awaiting-answer",
            PhaseKind::Resolved => "resolved",
            PhaseKind::GameOver => "game-over",
        }
    }
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::Idle => PhaseKind::Idle,
            Phase::Spinning { .. } => PhaseKind::Spinning,
            Phase::Highlighting { .. } => PhaseKind::Highlighting,
            Phase::AwaitingAnswer { .. } => PhaseKind::AwaitingAnswer,
            Phase::Resolved { .. } => PhaseKind::Resolved,
            Phase::GameOver => PhaseKind::GameOver,
        }
    }
}

// --- Game -----------------------------------------------------------------------

pub struct Game<R: RandomSource> {
    config: GameConfig,
    rng: R,
    phase: Phase,
    epoch: u64, // bumped on every phase transition
    score: u32,
    lives: u8,
    high_score: u32,
    new_record: bool, // the finished game raised the high score
    rotation: f64,    // accumulated degrees, never reset
    selected_segment: Option<usize>,
    message: Option<Message>,
    effects: Vec<Effect>,
}

impl<R: RandomSource> Game<R> {
    pub fn new(config: GameConfig, high_score: u32, rng: R) -> Self {
        let lives = config.max_lives;
        Self {
            config,
            rng,
            phase: Phase::Idle,
            epoch: 0,
            score: 0,
            lives,
            high_score,
            new_record: false,
            rotation: 0.0,
            selected_segment: None,
            message: None,
            effects: Vec::new(),
        }
    }

    // --- Input actions ---

    /// Start a spin. Only accepted from `Idle`; returns whether it was.
    pub fn spin(&mut self, now: f64) -> bool {
        if !matches!(self.phase, Phase::Idle) {
            return false;
        }
        self.message = None;
        self.selected_segment = None;
        self.rotation += spin::spin_magnitude(&mut self.rng, self.config.min_full_turns);
        self.enter(Phase::Spinning {
            ends_at: now + self.config.spin_duration_ms,
            next_tick_at: now + self.config.tick_interval_ms,
        });
        true
    }

    /// Answer the active question. Ignored (returns false) outside `AwaitingAnswer`.
    pub fn answer(&mut self, choice: &str, now: f64) -> bool {
        let pair = match self.phase {
            Phase::AwaitingAnswer { pair, .. } => pair,
            _ => return false,
        };
        if choice == pair.correct {
            self.score = self.score.saturating_add(self.config.points_per_correct);
            self.message = Some(Message::success("Doğru! 🎉"));
            self.effects.push(Effect::Sound(Sound::Correct));
            self.effects.push(Effect::Celebrate(self.config.burst));
            self.enter(Phase::Resolved {
                pair,
                outcome: Outcome::Correct,
                ends_at: now + self.config.result_pause_ms,
            });
        } else {
            self.message = Some(Message::failure(format!("Yanlış! Doğrusu: {}", pair.correct)));
            self.effects.push(Effect::Sound(Sound::Wrong));
            self.lose_life(pair, Outcome::Wrong, now);
        }
        true
    }

    /// Answer by on-screen position (0 = left, 1 = right).
    pub fn answer_slot(&mut self, slot: usize, now: f64) -> bool {
        match self.choices() {
            Some(choices) if slot < choices.len() => self.answer(choices[slot], now),
            _ => false,
        }
    }

    /// Start over from any phase. The high score is kept.
    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = self.config.max_lives;
        self.new_record = false;
        self.clear_round();
        self.enter(Phase::Idle);
    }

    /// Fire whatever deadline of the current phase is due at `now`.
    pub fn tick(&mut self, now: f64) {
        match self.phase {
            Phase::Idle | Phase::GameOver => {}
            Phase::Spinning { ends_at, next_tick_at } => self.tick_spinning(now, ends_at, next_tick_at),
            Phase::Highlighting { segment, ends_at } => {
                if now >= ends_at {
                    self.present_question(segment, now);
                }
            }
            Phase::AwaitingAnswer { .. } => self.tick_countdown(now),
            Phase::Resolved { ends_at, .. } => {
                if now >= ends_at {
                    self.clear_round();
                    self.enter(Phase::Idle);
                }
            }
        }
    }

    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    // --- Transitions ---

    fn tick_spinning(&mut self, now: f64, ends_at: f64, next_tick_at: f64) {
        let interval = self.config.tick_interval_ms.max(1.0);
        let mut next = next_tick_at;
        if now >= next && next < ends_at {
            // one tick per frame; ticks missed during a stalled frame are skipped
            self.effects.push(Effect::Sound(Sound::Tick));
            while next <= now {
                next += interval;
            }
        }
        if now >= ends_at {
            let segment = spin::resolve_segment(self.rotation, self.config.segments);
            self.selected_segment = Some(segment);
            self.enter(Phase::Highlighting {
                segment,
                ends_at: now + self.config.highlight_ms,
            });
        } else if let Phase::Spinning { next_tick_at, .. } = &mut self.phase {
            *next_tick_at = next;
        }
    }

    fn present_question(&mut self, segment: usize, now: f64) {
        let pair = catalog::get(segment);
        let choices = if self.rng.coin() {
            [pair.correct, pair.incorrect]
        } else {
            [pair.incorrect, pair.correct]
        };
        self.enter(Phase::AwaitingAnswer {
            pair,
            choices,
            time_left: self.config.answer_seconds,
            next_second_at: now + MS_PER_SECOND,
        });
    }

    fn tick_countdown(&mut self, now: f64) {
        let Phase::AwaitingAnswer { pair, time_left, next_second_at, .. } = &mut self.phase else {
            return;
        };
        while *time_left > 0 && now >= *next_second_at {
            *time_left -= 1;
            *next_second_at += MS_PER_SECOND;
        }
        if *time_left == 0 {
            let pair = *pair;
            self.message = Some(Message::failure("Süre doldu! ⏰"));
            self.effects.push(Effect::Sound(Sound::Wrong));
            self.lose_life(pair, Outcome::TimedOut, now);
        }
    }

    fn lose_life(&mut self, pair: WordPair, outcome: Outcome, now: f64) {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.finish_game();
        } else {
            self.enter(Phase::Resolved {
                pair,
                outcome,
                ends_at: now + self.config.result_pause_ms,
            });
        }
    }

    fn finish_game(&mut self) {
        self.effects.push(Effect::Sound(Sound::GameOver));
        if self.score > self.high_score {
            self.high_score = self.score;
            self.new_record = true;
            self.effects.push(Effect::SaveHighScore(self.score));
        }
        log::info!("game over: score {} (best {})", self.score, self.high_score);
        self.enter(Phase::GameOver);
    }

    fn clear_round(&mut self) {
        self.message = None;
        self.selected_segment = None;
    }

    fn enter(&mut self, next: Phase) {
        log::debug!(
            "phase {} -> {}",
            self.phase.kind().as_str(),
            next.kind().as_str()
        );
        self.phase = next;
        self.epoch = self.epoch.wrapping_add(1);
    }

    // --- Accessors ---

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
    pub fn phase(&self) -> &Phase {
        &self.phase
    }
    pub fn phase_kind(&self) -> PhaseKind {
        self.phase.kind()
    }
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
    pub fn score(&self) -> u32 {
        self.score
    }
    pub fn lives(&self) -> u8 {
        self.lives
    }
    pub fn high_score(&self) -> u32 {
        self.high_score
    }
    pub fn is_new_record(&self) -> bool {
        self.new_record
    }
    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver)
    }
    pub fn rotation(&self) -> f64 {
        self.rotation
    }
    pub fn selected_segment(&self) -> Option<usize> {
        self.selected_segment
    }
    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    /// Segment to draw with the glow, only while the landing pause is shown.
    pub fn highlighted_segment(&self) -> Option<usize> {
        match self.phase {
            Phase::Highlighting { segment, .. } => Some(segment),
            _ => None,
        }
    }

    pub fn current_pair(&self) -> Option<WordPair> {
        match self.phase {
            Phase::AwaitingAnswer { pair, .. } | Phase::Resolved { pair, .. } => Some(pair),
            _ => None,
        }
    }

    pub fn choices(&self) -> Option<[&'static str; 2]> {
        match self.phase {
            Phase::AwaitingAnswer { choices, .. } => Some(choices),
            _ => None,
        }
    }

    /// Seconds left on the countdown; `None` when no question is active.
    pub fn time_left(&self) -> Option<u32> {
        match self.phase {
            Phase::AwaitingAnswer { time_left, .. } => Some(time_left),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase_kind(),
            score: self.score,
            lives: self.lives,
            high_score: self.high_score,
            new_record: self.new_record,
            rotation: self.rotation,
            selected_segment: self.selected_segment,
            highlighted_segment: self.highlighted_segment(),
            choices: self.choices(),
            time_left: self.time_left(),
            message: self.message.clone(),
        }
    }
}

/// Read-only view of everything the presentation shell displays.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GameSnapshot {
    pub phase: PhaseKind,
    pub score: u32,
    pub lives: u8,
    pub high_score: u32,
    pub new_record: bool,
    pub rotation: f64,
    pub selected_segment: Option<usize>,
    pub highlighted_segment: Option<usize>,
    pub choices: Option<[&'static str; 2]>,
    pub time_left: Option<u32>,
    pub message: Option<Message>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceRandom;

    // spin value 0.5 -> 180° + 5 turns -> pointer at 90° -> segment 3 ("Şoför")
    fn game_with(values: Vec<f64>, high_score: u32) -> Game<SequenceRandom> {
        Game::new(GameConfig::default(), high_score, SequenceRandom::new(values))
    }

    /// Spin and run the clock until the question is shown. Returns the time.
    fn to_question(game: &mut Game<SequenceRandom>, start: f64) -> f64 {
        assert!(game.spin(start));
        let mut t = start;
        while game.phase_kind() != PhaseKind::AwaitingAnswer {
            t += 50.0;
            game.tick(t);
            assert!(t - start < 10_000.0, "question never appeared");
        }
        t
    }

    #[test]
    fn test_spin_only_from_idle() {
        let mut g = game_with(vec![0.5, 0.1], 0);
        assert!(g.spin(0.0));
        assert_eq!(g.phase_kind(), PhaseKind::Spinning);
        assert!(!g.spin(10.0), "second spin while spinning must be ignored");
        assert_eq!(g.rotation(), 180.0 + 1800.0);
    }

    #[test]
    fn test_spin_lands_on_resolved_segment_and_highlights() {
        let mut g = game_with(vec![0.5, 0.1], 0);
        g.spin(0.0);
        g.tick(4099.0);
        assert_eq!(g.phase_kind(), PhaseKind::Spinning);
        g.tick(4100.0);
        assert_eq!(g.phase_kind(), PhaseKind::Highlighting);
        assert_eq!(g.selected_segment(), Some(3));
        assert_eq!(g.highlighted_segment(), Some(3));
        g.tick(5099.0);
        assert_eq!(g.phase_kind(), PhaseKind::Highlighting);
        g.tick(5100.0);
        assert_eq!(g.phase_kind(), PhaseKind::AwaitingAnswer);
        assert_eq!(g.highlighted_segment(), None);
        assert_eq!(g.selected_segment(), Some(3));
        assert_eq!(g.current_pair(), Some(catalog::get(3)));
        assert_eq!(g.time_left(), Some(10));
    }

    #[test]
    fn test_choice_order_follows_coin() {
        let mut g = game_with(vec![0.5, 0.1], 0);
        to_question(&mut g, 0.0);
        let pair = catalog::get(3);
        assert_eq!(g.choices(), Some([pair.correct, pair.incorrect]));

        let mut g = game_with(vec![0.5, 0.9], 0);
        to_question(&mut g, 0.0);
        assert_eq!(g.choices(), Some([pair.incorrect, pair.correct]));
    }

    #[test]
    fn test_ticks_fire_on_cadence_during_spin() {
        let mut g = game_with(vec![0.5, 0.1], 0);
        g.spin(0.0);
        let mut ticks = 0;
        let mut t = 0.0;
        while t < 4100.0 {
            t += 100.0;
            g.tick(t);
            ticks += g
                .drain_effects()
                .iter()
                .filter(|e| **e == Effect::Sound(Sound::Tick))
                .count();
        }
        assert_eq!(ticks, 40);
    }

    #[test]
    fn test_correct_answer_scores_and_celebrates_once() {
        let mut g = game_with(vec![0.5, 0.1], 0);
        let t = to_question(&mut g, 0.0);
        g.drain_effects();
        assert!(g.answer("Şoför", t));
        assert_eq!(g.score(), 10);
        assert_eq!(g.lives(), 3);
        assert_eq!(g.message().map(|m| m.tone), Some(MessageTone::Success));
        let effects = g.drain_effects();
        let bursts = effects.iter().filter(|e| matches!(e, Effect::Celebrate(_))).count();
        assert_eq!(bursts, 1);
        assert!(effects.contains(&Effect::Sound(Sound::Correct)));
        assert!(!g.answer("Şoför", t + 10.0), "double answer must be ignored");
        assert_eq!(g.score(), 10);
    }

    #[test]
    fn test_wrong_answer_reveals_correct_spelling() {
        let mut g = game_with(vec![0.5, 0.1], 0);
        let t = to_question(&mut g, 0.0);
        g.answer("Şöför", t);
        assert_eq!(g.lives(), 2);
        let msg = g.message().expect("message");
        assert_eq!(msg.tone, MessageTone::Failure);
        assert!(msg.text.contains("Şoför"), "message was {}", msg.text);
        assert_eq!(g.phase_kind(), PhaseKind::Resolved);
        g.tick(t + 1999.0);
        assert_eq!(g.phase_kind(), PhaseKind::Resolved);
        g.tick(t + 2000.0);
        assert_eq!(g.phase_kind(), PhaseKind::Idle);
        assert!(g.message().is_none());
        assert_eq!(g.selected_segment(), None);
    }

    #[test]
    fn test_countdown_times_out_after_ten_seconds() {
        let mut g = game_with(vec![0.5, 0.1], 0);
        let t = to_question(&mut g, 0.0);
        g.tick(t + 3000.0);
        assert_eq!(g.time_left(), Some(7));
        g.tick(t + 9999.0);
        assert_eq!(g.time_left(), Some(1));
        g.drain_effects();
        g.tick(t + 10_000.0);
        assert_eq!(g.lives(), 2);
        assert_eq!(g.phase_kind(), PhaseKind::Resolved);
        assert_eq!(g.message().map(|m| m.text.as_str()), Some("Süre doldu! ⏰"));
        assert_eq!(g.drain_effects(), vec![Effect::Sound(Sound::Wrong)]);
    }

    #[test]
    fn test_no_countdown_after_answer() {
        let mut g = game_with(vec![0.5, 0.1], 0);
        let t = to_question(&mut g, 0.0);
        g.answer("Şoför", t + 500.0);
        let epoch = g.epoch();
        g.tick(t + 1500.0);
        assert_eq!(g.time_left(), None);
        assert_eq!(g.lives(), 3);
        assert_eq!(g.epoch(), epoch);
        // jump well past the original timeout: only the resolve -> idle step happens
        g.tick(t + 60_000.0);
        assert_eq!(g.phase_kind(), PhaseKind::Idle);
        assert_eq!(g.lives(), 3);
        assert!(!g.drain_effects().contains(&Effect::Sound(Sound::Wrong)));
    }

    #[test]
    fn test_last_life_ends_game_and_saves_record() {
        let mut g = game_with(vec![0.5, 0.1], 5);
        let mut t = to_question(&mut g, 0.0);
        g.answer("Şoför", t); // +10
        t += 2000.0;
        g.tick(t);
        for _ in 0..3 {
            t = to_question(&mut g, t);
            g.answer("Şöför", t);
            t += 2000.0;
            g.tick(t);
        }
        assert_eq!(g.lives(), 0);
        assert!(g.is_game_over());
        assert_eq!(g.high_score(), 10);
        assert!(g.is_new_record());
        let effects = g.drain_effects();
        let saves: Vec<_> = effects
            .iter()
            .filter(|e| matches!(e, Effect::SaveHighScore(_)))
            .collect();
        assert_eq!(saves, vec![&Effect::SaveHighScore(10)]);
        let game_over_cues = effects
            .iter()
            .filter(|e| **e == Effect::Sound(Sound::GameOver))
            .count();
        assert_eq!(game_over_cues, 1);
        // terminal until reset
        g.tick(t + 100_000.0);
        assert!(g.is_game_over());
        assert!(!g.spin(t));
        assert!(!g.answer("Şoför", t));
    }

    #[test]
    fn test_timeout_with_two_lives_returns_to_idle() {
        let mut g = game_with(vec![0.5, 0.1], 0);
        let mut t = to_question(&mut g, 0.0);
        g.answer("Şöför", t);
        t += 2000.0;
        g.tick(t);
        assert_eq!(g.lives(), 2);
        t = to_question(&mut g, t);
        t += 10_000.0;
        g.tick(t);
        assert_eq!(g.lives(), 1);
        assert!(!g.is_game_over());
        g.tick(t + 2000.0);
        assert_eq!(g.phase_kind(), PhaseKind::Idle);
    }

    #[test]
    fn test_no_record_when_score_not_higher() {
        let mut g = game_with(vec![0.5, 0.1], 50);
        let mut t = 0.0;
        for _ in 0..3 {
            t = to_question(&mut g, t);
            g.answer("Şöför", t);
            t += 2000.0;
            g.tick(t);
        }
        assert!(g.is_game_over());
        assert_eq!(g.high_score(), 50);
        assert!(!g.is_new_record());
        assert!(!g.drain_effects().iter().any(|e| matches!(e, Effect::SaveHighScore(_))));
    }

    #[test]
    fn test_reset_from_game_over_keeps_high_score() {
        let mut g = game_with(vec![0.5, 0.1], 0);
        let mut t = to_question(&mut g, 0.0);
        g.answer("Şoför", t);
        t += 2000.0;
        g.tick(t);
        for _ in 0..3 {
            t = to_question(&mut g, t);
            g.answer("Şöför", t);
            t += 2000.0;
            g.tick(t);
        }
        assert!(g.is_game_over());
        let rotation = g.rotation();
        g.reset();
        assert_eq!(g.phase_kind(), PhaseKind::Idle);
        assert_eq!(g.score(), 0);
        assert_eq!(g.lives(), 3);
        assert_eq!(g.high_score(), 10);
        assert!(g.message().is_none());
        assert_eq!(g.rotation(), rotation, "rotation keeps accumulating across games");
        assert!(g.spin(t));
    }

    #[test]
    fn test_reset_mid_spin_discards_pending_transitions() {
        let mut g = game_with(vec![0.5, 0.1], 0);
        g.spin(0.0);
        g.tick(2000.0);
        g.reset();
        g.drain_effects();
        g.tick(5000.0);
        g.tick(7000.0);
        assert_eq!(g.phase_kind(), PhaseKind::Idle);
        assert_eq!(g.selected_segment(), None);
        assert!(g.drain_effects().is_empty());
    }

    #[test]
    fn test_answer_slot_uses_display_order() {
        let mut g = game_with(vec![0.5, 0.9], 0);
        let t = to_question(&mut g, 0.0);
        // coin 0.9 -> incorrect shown on the left
        assert!(g.answer_slot(1, t));
        assert_eq!(g.score(), 10);
        assert!(!g.answer_slot(0, t));
    }

    #[test]
    fn test_snapshot_reflects_question() {
        let mut g = game_with(vec![0.5, 0.1], 7);
        to_question(&mut g, 0.0);
        let snap = g.snapshot();
        assert_eq!(snap.phase, PhaseKind::AwaitingAnswer);
        assert_eq!(snap.high_score, 7);
        assert_eq!(snap.time_left, Some(10));
        assert_eq!(snap.choices, Some(["Şoför", "Şöför"]));
        assert_eq!(snap.highlighted_segment, None);
    }
}
