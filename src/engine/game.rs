//! The game engine: one state machine owning all mutable game state.
//!
//! Commands arrive from the host UI (clicks and overrides) and from
//! the event loop (timer deliveries); both are plain method calls on
//! `&mut GameEngine`, serialized by construction. Invalid or
//! out-of-phase commands are silent no-ops; out-of-range numeric input
//! is clamped. Nothing here returns an error.
//!
//! ## Resolving
//!
//! Completing a selection pair enters the *resolving* sub-state, which
//! gates clicks and turn expiry until the pair is dealt with. Matches
//! resolve synchronously; mismatches stay revealed for a fixed window
//! (a `MismatchOver` timer request) before flipping back and passing
//! the turn.

use smallvec::SmallVec;

use super::snapshot::Snapshot;
use super::state::{GamePhase, TurnState};
use super::timer::{Generation, TimerKind, TimerRequest, TICK_INTERVAL};
use crate::board::Board;
use crate::core::{clamp_turn_secs, CardId, GameConfig, GameRng, ScoreDelta, Scoreboard, Team};
use crate::history::{GameResult, HistoryLog, InMemoryStore, KeyValueStore};

/// The memory-matching game state machine.
///
/// Owns the board, the turn, the scores, and the history log. Emits
/// `TimerRequest`s instead of sleeping; see [`super::timer`].
pub struct GameEngine {
    config: GameConfig,
    rng: GameRng,
    board: Board,
    phase: GamePhase,
    turn: TurnState,
    /// Pair shown as a mismatch during the reveal window.
    mismatched: SmallVec<[CardId; 2]>,
    /// Mutual-exclusion gate over a completed selection pair.
    resolving: bool,
    reveal_all: bool,
    /// Host-adjustable turn duration; the clock resets to this.
    turn_secs: u32,
    move_count: u32,
    scores: Scoreboard,
    history: HistoryLog,
    generation: Generation,
    /// A `TurnTick` request is outstanding; re-arming is deduplicated
    /// so pause/unpause cycles cannot fork the cadence.
    tick_armed: bool,
    pending: Vec<TimerRequest>,
}

/// Builder for creating a `GameEngine`.
pub struct EngineBuilder {
    config: GameConfig,
    seed: Option<u64>,
    store: Option<Box<dyn KeyValueStore>>,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            config: GameConfig::default(),
            seed: None,
            store: None,
        }
    }
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Distinct symbols per deal.
    pub fn palette_size(mut self, size: u8) -> Self {
        self.config = self.config.with_palette_size(size);
        self
    }

    /// Starting turn duration in seconds, clamped to 5..=60.
    pub fn turn_secs(mut self, secs: u32) -> Self {
        self.config = self.config.with_turn_secs(secs);
        self
    }

    /// Seed the deal RNG for reproducible boards.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Inject the persistence collaborator. Defaults to an
    /// `InMemoryStore` (no history survives the process).
    pub fn store(mut self, store: Box<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Build the engine in Setup, loading stored history.
    pub fn build(self) -> GameEngine {
        let rng = match self.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        let store = self
            .store
            .unwrap_or_else(|| Box::new(InMemoryStore::new()));
        let history = HistoryLog::load(store);
        let turn_secs = self.config.turn_secs;

        GameEngine {
            config: self.config,
            rng,
            board: Board::empty(),
            phase: GamePhase::Setup,
            turn: TurnState::new(Team::A, turn_secs),
            mismatched: SmallVec::new(),
            resolving: false,
            reveal_all: false,
            turn_secs,
            move_count: 0,
            scores: Scoreboard::new(),
            history,
            generation: Generation::default(),
            tick_armed: false,
            pending: Vec::new(),
        }
    }
}

impl GameEngine {
    /// Start building an engine.
    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    // === Queries ===

    /// Current lifecycle stage.
    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Read-only view of the whole game for rendering.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            cards: self.board.cards().clone(),
            turn: self.turn.clone(),
            scores: self.scores,
            move_count: self.move_count,
            mismatched: self.mismatched.clone(),
            reveal_all: self.reveal_all,
            resolving: self.resolving,
            turn_duration_secs: self.turn_secs,
            history: self.history.results().clone(),
        }
    }

    /// Take the timer requests scheduled since the last drain.
    ///
    /// The embedder owes each request a delivery to [`handle_timer`]
    /// after its delay. Late or dropped deliveries are safe; the engine
    /// guards every delivery.
    ///
    /// [`handle_timer`]: GameEngine::handle_timer
    pub fn drain_timers(&mut self) -> Vec<TimerRequest> {
        std::mem::take(&mut self.pending)
    }

    // === Game lifecycle ===

    /// Deal and enter the memorize preview. No-op outside Setup.
    pub fn start_game(&mut self) {
        if self.phase != GamePhase::Setup {
            return;
        }

        self.board = Board::deal(self.config.palette_size, &mut self.rng);
        self.board.reveal_unmatched();
        self.phase = GamePhase::Preview;
        self.schedule(TimerKind::PreviewOver, self.config.preview);
    }

    /// Clear everything back to Setup. Allowed in any phase.
    ///
    /// Bumps the generation: timer deliveries scheduled against the old
    /// game become stale no-ops. Recorded history is untouched.
    pub fn reset_game(&mut self) {
        self.generation = self.generation.next();
        self.pending.clear();
        self.tick_armed = false;
        self.board = Board::empty();
        self.phase = GamePhase::Setup;
        self.turn_secs = self.config.turn_secs;
        self.turn = TurnState::new(Team::A, self.turn_secs);
        self.mismatched.clear();
        self.resolving = false;
        self.reveal_all = false;
        self.scores = Scoreboard::new();
        self.move_count = 0;
    }

    // === Selection ===

    /// Select a card.
    ///
    /// Ignored unless Playing, unpaused, not resolving, not in
    /// reveal-all, fewer than two cards selected, and the card is face
    /// down and unmatched. The second selection triggers pair
    /// evaluation.
    pub fn click_card(&mut self, id: CardId) {
        if self.phase != GamePhase::Playing
            || self.turn.paused
            || self.resolving
            || self.reveal_all
            || self.turn.selected.len() >= 2
        {
            return;
        }

        match self.board.card(id) {
            Some(card) if card.selectable() => {}
            _ => return,
        }

        self.board.set_face_up(id, true);
        self.turn.selected.push(id);

        if self.turn.selected.len() == 2 {
            self.resolve_pair();
        }
    }

    fn resolve_pair(&mut self) {
        self.resolving = true;
        self.move_count += 1;

        let first = self.turn.selected[0];
        let second = self.turn.selected[1];
        let is_match = match (self.board.card(first), self.board.card(second)) {
            (Some(a), Some(b)) => a.symbol == b.symbol,
            _ => false,
        };

        if is_match {
            self.board.mark_matched(first);
            self.board.mark_matched(second);
            self.scores[self.turn.active_team] += 1;
            self.turn.selected.clear();
            self.resolving = false;
            self.turn.seconds_remaining = self.turn_secs;

            if self.board.all_matched() {
                self.finish_game();
            }
        } else {
            self.mismatched = SmallVec::from_slice(&[first, second]);
            self.schedule(TimerKind::MismatchOver, self.config.mismatch_delay);
        }
    }

    // === Timer delivery ===

    /// Deliver an elapsed timer request.
    ///
    /// Stale generations (scheduled before a reset) are dropped; each
    /// kind additionally checks that its purpose still exists.
    pub fn handle_timer(&mut self, kind: TimerKind, generation: Generation) {
        if generation != self.generation {
            return;
        }

        match kind {
            TimerKind::PreviewOver => self.on_preview_over(),
            TimerKind::MismatchOver => self.on_mismatch_over(),
            TimerKind::TurnTick => self.on_tick(),
        }
    }

    fn on_preview_over(&mut self) {
        if self.phase != GamePhase::Preview {
            return;
        }

        self.board.hide_unmatched();
        self.phase = GamePhase::Playing;
        self.turn.seconds_remaining = self.turn_secs;
        self.arm_tick();
    }

    fn on_mismatch_over(&mut self) {
        // The pair may have been finalized early (reveal-all) or the
        // game ended; either way there is nothing left to flip.
        if self.phase != GamePhase::Playing || !self.resolving {
            return;
        }

        for id in std::mem::take(&mut self.mismatched) {
            self.board.set_face_up(id, false);
        }
        self.turn.selected.clear();
        self.resolving = false;
        self.pass_turn();
    }

    fn on_tick(&mut self) {
        self.tick_armed = false;

        if self.phase != GamePhase::Playing {
            return;
        }
        if self.turn.paused || self.reveal_all {
            // Cadence stops here; re-armed when the freeze lifts.
            return;
        }
        if self.resolving {
            // The clock never expires a pair mid-evaluation.
            self.arm_tick();
            return;
        }

        self.turn.seconds_remaining = self.turn.seconds_remaining.saturating_sub(1);
        if self.turn.seconds_remaining == 0 {
            self.expire_turn();
        }
        self.arm_tick();
    }

    /// Time ran out: forfeit a lone selection and pass the turn.
    fn expire_turn(&mut self) {
        if let [lone] = self.turn.selected.as_slice() {
            self.board.set_face_up(*lone, false);
        }
        self.turn.selected.clear();
        self.pass_turn();
    }

    // === Host overrides ===

    /// Show or hide every unmatched card, freezing normal play while
    /// shown. Enabling mid-mismatch finalizes the pending pair first so
    /// nothing stays suspended behind the freeze.
    pub fn toggle_reveal_all(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }

        if self.reveal_all {
            self.reveal_all = false;
            self.board.hide_unmatched();
            self.turn.selected.clear();
            if !self.turn.paused {
                self.arm_tick();
            }
        } else {
            if self.resolving {
                self.finalize_mismatch_early();
            }
            self.reveal_all = true;
            self.board.reveal_unmatched();
        }
    }

    /// End the active team's turn regardless of time left. No-op while
    /// a pair is resolving.
    pub fn force_end_turn(&mut self) {
        if self.phase != GamePhase::Playing || self.resolving {
            return;
        }

        if !self.reveal_all {
            for id in std::mem::take(&mut self.turn.selected) {
                self.board.set_face_up(id, false);
            }
        }
        self.turn.selected.clear();
        self.pass_turn();
    }

    /// Apply a one-point score correction. Turn and selection state are
    /// untouched; deduction saturates at zero.
    pub fn adjust_score(&mut self, team: Team, delta: ScoreDelta) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.scores.adjust(team, delta);
    }

    /// Freeze or resume the turn clock. A flag, not a phase: the
    /// mismatch and preview delays keep running.
    pub fn toggle_pause(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }

        self.turn.paused = !self.turn.paused;
        if !self.turn.paused && !self.reveal_all {
            self.arm_tick();
        }
    }

    /// Set the turn duration, clamped to 5..=60 seconds. Applies to the
    /// configured duration and the running clock at once.
    pub fn set_turn_duration(&mut self, secs: u32) {
        if self.phase != GamePhase::Playing {
            return;
        }

        let secs = clamp_turn_secs(secs);
        self.turn_secs = secs;
        self.turn.seconds_remaining = secs;
    }

    /// Wind the running clock back to the configured duration without
    /// switching teams.
    pub fn reset_turn_timer(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.turn.seconds_remaining = self.turn_secs;
    }

    /// End the game now with the current scores.
    pub fn force_end_game(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.finish_game();
    }

    /// Drop all recorded history, in memory and in the store.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    // === Internals ===

    fn finish_game(&mut self) {
        self.phase = GamePhase::Finished;
        self.history.record(GameResult::from_scores(self.scores));
    }

    /// Hand the turn to the other team with a fresh clock.
    fn pass_turn(&mut self) {
        self.turn.active_team = self.turn.active_team.opponent();
        self.turn.seconds_remaining = self.turn_secs;
    }

    /// Resolve a pending mismatch without waiting out its reveal
    /// window. The scheduled `MismatchOver` delivery then no-ops on the
    /// resolving guard.
    fn finalize_mismatch_early(&mut self) {
        self.mismatched.clear();
        self.turn.selected.clear();
        self.resolving = false;
        self.pass_turn();
    }

    fn schedule(&mut self, kind: TimerKind, delay: std::time::Duration) {
        self.pending.push(TimerRequest {
            kind,
            delay,
            generation: self.generation,
        });
    }

    fn arm_tick(&mut self) {
        if self.tick_armed {
            return;
        }
        self.tick_armed = true;
        self.schedule(TimerKind::TurnTick, TICK_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> GameEngine {
        GameEngine::builder().palette_size(4).seed(42).build()
    }

    /// Drive an engine through Setup -> Preview -> Playing.
    fn playing_engine() -> GameEngine {
        let mut engine = engine();
        engine.start_game();
        deliver_all(&mut engine);
        assert_eq!(engine.phase(), GamePhase::Playing);
        engine
    }

    /// Deliver every outstanding request immediately.
    fn deliver_all(engine: &mut GameEngine) {
        for request in engine.drain_timers() {
            engine.handle_timer(request.kind, request.generation);
        }
    }

    /// Ids of a matching pair and of two mismatched cards.
    fn find_pair(engine: &GameEngine) -> (CardId, CardId) {
        let snapshot = engine.snapshot();
        for a in snapshot.cards.iter() {
            for b in snapshot.cards.iter() {
                if a.id != b.id && a.symbol == b.symbol {
                    return (a.id, b.id);
                }
            }
        }
        unreachable!("every deal contains pairs");
    }

    fn find_mismatch(engine: &GameEngine) -> (CardId, CardId) {
        let snapshot = engine.snapshot();
        for a in snapshot.cards.iter() {
            for b in snapshot.cards.iter() {
                if a.symbol != b.symbol {
                    return (a.id, b.id);
                }
            }
        }
        unreachable!("multi-symbol deals contain mismatches");
    }

    #[test]
    fn test_builder_starts_in_setup() {
        let engine = engine();
        let snapshot = engine.snapshot();

        assert_eq!(snapshot.phase, GamePhase::Setup);
        assert!(snapshot.cards.is_empty());
        assert_eq!(snapshot.turn.active_team, Team::A);
        assert_eq!(snapshot.move_count, 0);
    }

    #[test]
    fn test_start_game_deals_preview() {
        let mut engine = engine();
        engine.start_game();

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.phase, GamePhase::Preview);
        assert_eq!(snapshot.cards.len(), 8);
        assert!(snapshot.cards.iter().all(|card| card.face_up));

        let requests = engine.drain_timers();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].kind, TimerKind::PreviewOver);
    }

    #[test]
    fn test_start_game_outside_setup_ignored() {
        let mut engine = playing_engine();
        let before = engine.snapshot().cards;
        engine.start_game();
        assert_eq!(engine.snapshot().cards, before);
    }

    #[test]
    fn test_preview_over_starts_play() {
        let mut engine = playing_engine();
        let snapshot = engine.snapshot();

        assert!(snapshot.cards.iter().all(|card| !card.face_up));
        assert_eq!(snapshot.turn.seconds_remaining, 20);

        let requests = engine.drain_timers();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].kind, TimerKind::TurnTick);
    }

    #[test]
    fn test_click_flips_and_selects() {
        let mut engine = playing_engine();
        let (first, _) = find_pair(&engine);

        engine.click_card(first);

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.turn.selected.as_slice(), &[first]);
        assert!(snapshot.cards[first.index()].face_up);
    }

    #[test]
    fn test_click_selected_card_ignored() {
        let mut engine = playing_engine();
        let (first, _) = find_pair(&engine);

        engine.click_card(first);
        engine.click_card(first);

        assert_eq!(engine.snapshot().turn.selected.len(), 1);
    }

    #[test]
    fn test_click_unknown_card_ignored() {
        let mut engine = playing_engine();
        engine.click_card(CardId::new(999));
        assert!(engine.snapshot().turn.selected.is_empty());
    }

    #[test]
    fn test_click_while_paused_ignored() {
        let mut engine = playing_engine();
        let (first, _) = find_pair(&engine);

        engine.toggle_pause();
        engine.click_card(first);

        assert!(engine.snapshot().turn.selected.is_empty());
    }

    #[test]
    fn test_matching_pair_scores() {
        let mut engine = playing_engine();
        let (first, second) = find_pair(&engine);

        engine.click_card(first);
        engine.click_card(second);

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.scores.get(Team::A), 1);
        assert!(snapshot.cards[first.index()].matched);
        assert!(snapshot.cards[second.index()].matched);
        assert!(snapshot.turn.selected.is_empty());
        assert!(!snapshot.resolving);
        assert_eq!(snapshot.turn.active_team, Team::A);
        assert_eq!(snapshot.turn.seconds_remaining, 20);
        assert_eq!(snapshot.move_count, 1);
    }

    #[test]
    fn test_mismatch_switches_after_delay() {
        let mut engine = playing_engine();
        engine.drain_timers();
        let (first, second) = find_mismatch(&engine);

        engine.click_card(first);
        engine.click_card(second);

        let snapshot = engine.snapshot();
        assert!(snapshot.resolving);
        assert_eq!(snapshot.mismatched.as_slice(), &[first, second]);
        assert_eq!(snapshot.scores.get(Team::A), 0);
        assert_eq!(snapshot.turn.active_team, Team::A);

        // Clicks are gated while the pair is resolving.
        let (other, _) = find_pair(&engine);
        engine.click_card(other);
        assert_eq!(engine.snapshot().turn.selected.len(), 2);

        let requests = engine.drain_timers();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].kind, TimerKind::MismatchOver);
        engine.handle_timer(requests[0].kind, requests[0].generation);

        let snapshot = engine.snapshot();
        assert!(!snapshot.resolving);
        assert!(snapshot.mismatched.is_empty());
        assert!(snapshot.turn.selected.is_empty());
        assert!(!snapshot.cards[first.index()].face_up);
        assert!(!snapshot.cards[second.index()].face_up);
        assert_eq!(snapshot.turn.active_team, Team::B);
        assert_eq!(snapshot.scores.get(Team::A), 0);
        assert_eq!(snapshot.scores.get(Team::B), 0);
    }

    #[test]
    fn test_tick_decrements() {
        let mut engine = playing_engine();

        let requests = engine.drain_timers();
        engine.handle_timer(requests[0].kind, requests[0].generation);

        assert_eq!(engine.snapshot().turn.seconds_remaining, 19);
        // The cadence re-armed itself.
        assert_eq!(engine.drain_timers().len(), 1);
    }

    #[test]
    fn test_tick_frozen_while_resolving() {
        let mut engine = playing_engine();
        let tick = engine.drain_timers().remove(0);
        let (first, second) = find_mismatch(&engine);

        engine.click_card(first);
        engine.click_card(second);
        engine.handle_timer(tick.kind, tick.generation);

        assert_eq!(engine.snapshot().turn.seconds_remaining, 20);
    }

    #[test]
    fn test_expiry_forfeits_lone_selection() {
        let mut engine = playing_engine();
        engine.set_turn_duration(5);
        let (first, _) = find_pair(&engine);
        engine.click_card(first);

        for _ in 0..5 {
            let requests = engine.drain_timers();
            let tick = requests
                .iter()
                .find(|request| request.kind == TimerKind::TurnTick)
                .copied()
                .expect("tick cadence must stay armed");
            engine.handle_timer(tick.kind, tick.generation);
        }

        let snapshot = engine.snapshot();
        assert!(!snapshot.cards[first.index()].face_up);
        assert!(snapshot.turn.selected.is_empty());
        assert_eq!(snapshot.turn.active_team, Team::B);
        assert_eq!(snapshot.turn.seconds_remaining, 5);
        assert_eq!(snapshot.scores.get(Team::A), 0);
    }

    #[test]
    fn test_stale_timer_after_reset_ignored() {
        let mut engine = playing_engine();
        let (first, second) = find_mismatch(&engine);
        engine.click_card(first);
        engine.click_card(second);

        let stale: Vec<_> = engine.drain_timers();
        engine.reset_game();
        engine.start_game();

        for request in stale {
            engine.handle_timer(request.kind, request.generation);
        }

        // The new game is untouched: still previewing, nothing selected.
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.phase, GamePhase::Preview);
        assert!(snapshot.turn.selected.is_empty());
    }

    #[test]
    fn test_reset_game_returns_to_setup() {
        let mut engine = playing_engine();
        let (first, second) = find_pair(&engine);
        engine.click_card(first);
        engine.click_card(second);
        engine.toggle_pause();

        engine.reset_game();

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.phase, GamePhase::Setup);
        assert!(snapshot.cards.is_empty());
        assert_eq!(snapshot.scores, Scoreboard::new());
        assert_eq!(snapshot.turn.active_team, Team::A);
        assert_eq!(snapshot.turn_duration_secs, 20);
        assert!(!snapshot.turn.paused);
        assert!(!snapshot.reveal_all);
        assert_eq!(snapshot.move_count, 0);
    }
}
