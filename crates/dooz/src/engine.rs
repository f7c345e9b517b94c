//! Turn engine: the entry point a UI drives.

use crate::ai::{AiStrategy, RandomStrategy};
use crate::config::GameConfig;
use crate::error::DoozError;
use crate::phases::Lifecycle;
use crate::session::{GameSession, SessionSnapshot};
use crate::types::{Position, Seat};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, instrument, warn};

/// Runs games: builds sessions, applies moves, undoes them and plays
/// computer seats through an [`AiStrategy`].
///
/// Calls are synchronous and must be serialized by the caller; the engine
/// is the single writer of its session.
#[derive(Debug)]
pub struct TurnEngine {
    session: Option<GameSession>,
    strategy: Box<dyn AiStrategy>,
    rng: StdRng,
}

impl TurnEngine {
    /// Creates an engine with no game, using `strategy` for computer seats.
    #[instrument(skip(strategy), fields(strategy = strategy.name()))]
    pub fn new(strategy: impl AiStrategy + 'static) -> Self {
        Self {
            session: None,
            strategy: Box::new(strategy),
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeds the generator used for first-player dice rolls.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Swaps the strategy used for computer seats.
    #[instrument(skip(self, strategy), fields(strategy = strategy.name()))]
    pub fn set_strategy(&mut self, strategy: Box<dyn AiStrategy>) {
        self.strategy = strategy;
    }

    /// Name of the active strategy.
    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    /// Replaces any current game with a fresh one.
    ///
    /// The configuration is validated, the first-player policy fixes the
    /// seat order, then play starts on an empty board. If a computer holds
    /// the first seat it moves before this returns. On error the previous
    /// game, if any, is kept.
    #[instrument(skip(self, config), fields(size = config.size()))]
    pub fn new_game(&mut self, config: &GameConfig) -> Result<SessionSnapshot, DoozError> {
        let players = config
            .first_player()
            .order(config.players().clone(), &mut self.rng);
        let mut session = GameSession::new(*config.size(), players)?;
        config.validate()?;
        session.start()?;
        info!(
            policy = %config.first_player(),
            first = %session.player(Seat::First).name(),
            "New game"
        );
        Self::run_computer_turns(&mut session, self.strategy.as_mut())?;
        let snapshot = session.snapshot();
        self.session = Some(session);
        Ok(snapshot)
    }

    /// Plays `position` for `seat`, then lets any computer seat respond.
    ///
    /// If the computer's reply fails, every move made by this call is
    /// taken back before the error is returned.
    #[instrument(skip(self))]
    pub fn play_move(&mut self, position: Position, seat: Seat) -> Result<SessionSnapshot, DoozError> {
        let session = self
            .session
            .as_mut()
            .ok_or(DoozError::GameNotInProgress(Lifecycle::Idle))?;
        let mark = session.history().len();
        session.play(position, seat)?;
        if let Err(e) = Self::run_computer_turns(session, self.strategy.as_mut()) {
            warn!(error = %e, strategy = self.strategy.name(), "Computer reply failed, rolling back");
            while session.history().len() > mark {
                session.undo()?;
            }
            return Err(e);
        }
        Ok(session.snapshot())
    }

    /// Takes back the most recent human move.
    ///
    /// Computer replies made after it are taken back with it, so a human
    /// is to move afterwards. A history holding only computer moves has
    /// nothing to undo. When both seats are computers exactly one move is
    /// reverted; call [`play_computer_move`](Self::play_computer_move) to
    /// step the game on.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> Result<SessionSnapshot, DoozError> {
        let session = self.session.as_mut().ok_or(DoozError::NothingToUndo)?;
        let has_human = session.players().iter().any(|p| !p.is_computer());
        let human_moved = session
            .history()
            .iter()
            .any(|m| !session.player(m.seat).is_computer());
        if has_human && !human_moved {
            return Err(DoozError::NothingToUndo);
        }

        session.undo()?;
        let mut count = 1;
        while has_human && session.current_player().is_computer() {
            session.undo()?;
            count += 1;
        }
        debug!(count, "Moves taken back");
        Ok(session.snapshot())
    }

    /// Asks the strategy to play one move for the seat to move, whatever
    /// its kind.
    #[instrument(skip(self))]
    pub fn play_computer_move(&mut self) -> Result<SessionSnapshot, DoozError> {
        let session = self
            .session
            .as_mut()
            .ok_or(DoozError::GameNotInProgress(Lifecycle::Idle))?;
        Self::strategy_move(session, self.strategy.as_mut())?;
        Ok(session.snapshot())
    }

    /// Current state, or `None` before the first game.
    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.session.as_ref().map(GameSession::snapshot)
    }

    /// The current session, if any.
    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// Empty cells while a game is in progress.
    pub fn legal_moves(&self) -> Vec<Position> {
        self.session
            .as_ref()
            .map(GameSession::legal_moves)
            .unwrap_or_default()
    }

    fn strategy_move(
        session: &mut GameSession,
        strategy: &mut dyn AiStrategy,
    ) -> Result<Lifecycle, DoozError> {
        if !session.lifecycle().is_in_progress() {
            return Err(DoozError::GameNotInProgress(session.lifecycle()));
        }
        let position = strategy
            .select_move(session.board())
            .ok_or(DoozError::NoLegalMoves)?;
        debug!(strategy = strategy.name(), %position, seat = %session.to_move(), "Strategy move");
        session.play(position, session.to_move())
    }

    fn run_computer_turns(
        session: &mut GameSession,
        strategy: &mut dyn AiStrategy,
    ) -> Result<(), DoozError> {
        while session.lifecycle().is_in_progress() && session.current_player().is_computer() {
            Self::strategy_move(session, strategy)?;
        }
        Ok(())
    }
}

impl Default for TurnEngine {
    fn default() -> Self {
        Self::new(RandomStrategy::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::FirstEmptyStrategy;
    use crate::config::FirstPlayerPolicy;
    use crate::phases::Outcome;
    use crate::types::Player;

    fn humans(size: usize) -> GameConfig {
        GameConfig::default()
            .with_size(size)
            .with_players([Player::human("A", "X"), Player::human("B", "O")])
    }

    #[test]
    fn test_no_game_before_new_game() {
        let mut engine = TurnEngine::new(FirstEmptyStrategy);
        assert!(engine.snapshot().is_none());
        assert!(engine.legal_moves().is_empty());
        assert_eq!(
            engine.play_move(Position::new(0, 0), Seat::First),
            Err(DoozError::GameNotInProgress(Lifecycle::Idle))
        );
        assert_eq!(engine.undo(), Err(DoozError::NothingToUndo));
    }

    #[test]
    fn test_new_game_rejects_bad_size() {
        let mut engine = TurnEngine::new(FirstEmptyStrategy);
        assert_eq!(
            engine.new_game(&humans(2)),
            Err(DoozError::InvalidSize { size: 2 })
        );
    }

    #[test]
    fn test_computer_replies_immediately() {
        let config = GameConfig::default().with_size(4);
        let mut engine = TurnEngine::new(FirstEmptyStrategy);
        engine.new_game(&config).expect("valid config");

        let snapshot = engine
            .play_move(Position::new(3, 3), Seat::First)
            .expect("legal");
        assert_eq!(snapshot.move_history_len, 2);
        assert_eq!(snapshot.current_player, Seat::First);
        assert_eq!(snapshot.board.owner(Position::new(0, 0)), Ok(Some(Seat::Second)));
    }

    #[test]
    fn test_computer_in_first_seat_opens() {
        let config = GameConfig::default()
            .with_players([Player::computer("Bot", "O"), Player::human("Ana", "X")])
            .with_first_player(FirstPlayerPolicy::AsListed);
        let mut engine = TurnEngine::new(FirstEmptyStrategy);
        let snapshot = engine.new_game(&config).expect("valid config");
        assert_eq!(snapshot.move_history_len, 1);
        assert_eq!(snapshot.current_player, Seat::Second);
    }

    #[test]
    fn test_human_first_policy() {
        let config = GameConfig::default()
            .with_players([Player::computer("Bot", "O"), Player::human("Ana", "X")])
            .with_first_player(FirstPlayerPolicy::HumanFirst);
        let mut engine = TurnEngine::new(FirstEmptyStrategy);
        let snapshot = engine.new_game(&config).expect("valid config");
        assert_eq!(snapshot.move_history_len, 0);
        assert_eq!(snapshot.players[0].name(), "Ana");
    }

    #[test]
    fn test_two_computers_finish_the_game() {
        let config = GameConfig::default()
            .with_size(5)
            .with_players([Player::computer("C1", "X"), Player::computer("C2", "O")]);
        let mut engine = TurnEngine::new(RandomStrategy::seeded(3)).with_rng_seed(3);
        let snapshot = engine.new_game(&config).expect("valid config");
        assert!(matches!(snapshot.lifecycle, Lifecycle::Finished(_)));
        assert!(engine.legal_moves().is_empty());
    }

    #[test]
    fn test_undo_takes_back_computer_reply() {
        let config = GameConfig::default();
        let mut engine = TurnEngine::new(FirstEmptyStrategy);
        let before = engine.new_game(&config).expect("valid config");
        engine
            .play_move(Position::new(2, 2), Seat::First)
            .expect("legal");

        let snapshot = engine.undo().expect("human moved");
        assert_eq!(snapshot, before);

        let snapshot = engine
            .play_move(Position::new(1, 1), Seat::First)
            .expect("human to move");
        assert_eq!(snapshot.move_history_len, 2);
    }

    #[test]
    fn test_undo_keeps_computer_opening() {
        let config = GameConfig::default()
            .with_players([Player::computer("Bot", "O"), Player::human("Ana", "X")]);
        let mut engine = TurnEngine::new(FirstEmptyStrategy);
        let opened = engine.new_game(&config).expect("valid config");
        assert_eq!(engine.undo(), Err(DoozError::NothingToUndo));

        engine
            .play_move(Position::new(2, 2), Seat::Second)
            .expect("legal");
        assert_eq!(engine.undo().expect("human moved"), opened);
    }

    #[test]
    fn test_undo_between_computers_reverts_one_move() {
        let config = GameConfig::default()
            .with_players([Player::computer("C1", "X"), Player::computer("C2", "O")]);
        let mut engine = TurnEngine::new(FirstEmptyStrategy);
        let finished = engine.new_game(&config).expect("valid config");

        let snapshot = engine.undo().expect("history not empty");
        assert_eq!(snapshot.move_history_len, finished.move_history_len - 1);
        assert_eq!(snapshot.lifecycle, Lifecycle::InProgress);

        let snapshot = engine.play_computer_move().expect("computer to move");
        assert_eq!(snapshot, finished);
    }

    #[test]
    fn test_new_game_validates_config() {
        let mut engine = TurnEngine::new(FirstEmptyStrategy);
        let kept = engine.new_game(&humans(3)).expect("valid config");

        let twins = GameConfig::default()
            .with_players([Player::human("A", "X"), Player::human("B", "X")]);
        assert!(matches!(
            engine.new_game(&twins),
            Err(DoozError::InvalidConfig(_))
        ));
        assert_eq!(engine.snapshot(), Some(kept));
    }

    #[test]
    fn test_first_empty_computer_wins_top_row() {
        let config = GameConfig::default()
            .with_players([Player::computer("Bot", "O"), Player::human("Ana", "X")]);
        let mut engine = TurnEngine::new(FirstEmptyStrategy);
        engine.new_game(&config).expect("valid config");
        engine.play_move(Position::new(1, 0), Seat::Second).expect("legal");
        let snapshot = engine
            .play_move(Position::new(2, 0), Seat::Second)
            .expect("legal");
        assert_eq!(
            snapshot.lifecycle,
            Lifecycle::Finished(Outcome::Won(Seat::First))
        );
        assert_eq!(
            snapshot.winning_line,
            vec![Position::new(0, 0), Position::new(0, 1), Position::new(0, 2)]
        );
    }
}
