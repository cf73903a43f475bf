use serde::{Deserialize, Serialize};
use thiserror::Error;
use tripwire_core::*;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("Malformed message: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Player actions a presentation layer sends to a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Start over. A missing size or difficulty keeps the current one.
    NewGame {
        #[serde(default)]
        size: Option<BoardSize>,
        #[serde(default)]
        difficulty: Option<Difficulty>,
    },
    Reveal {
        index: usize,
    },
    ToggleMark {
        index: usize,
    },
    /// The host's countdown ran out.
    Timeout,
    Snapshot,
}

/// Everything needed to draw a board, with content only for revealed cells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub rows: Coord,
    pub columns: Coord,
    pub mines: CellCount,
    pub mines_left: isize,
    pub outcome: GameOutcome,
    pub triggered_mine: Option<usize>,
    pub cells: Vec<CellView>,
}

impl Snapshot {
    pub fn from_board(board: &Board) -> Self {
        let dimensions = board.dimensions();
        Self {
            rows: dimensions.rows,
            columns: dimensions.columns,
            mines: board.mine_count(),
            mines_left: board.mines_left(),
            outcome: board.outcome(),
            triggered_mine: board.triggered_mine(),
            cells: board.cells().collect(),
        }
    }
}

impl From<&Board> for Snapshot {
    fn from(board: &Board) -> Self {
        Self::from_board(board)
    }
}

pub fn decode_command(text: &str) -> Result<Command> {
    Ok(serde_json::from_str(text)?)
}

pub fn encode_snapshot(snapshot: &Snapshot) -> Result<String> {
    Ok(serde_json::to_string(snapshot)?)
}

pub fn apply<S: IndexSampler>(session: &mut Session<S>, command: Command) -> Result<Snapshot> {
    log::debug!("Applying {:?}", command);
    match command {
        Command::NewGame {
            size: None,
            difficulty: None,
        } => session.new_game()?,
        Command::NewGame { size, difficulty } => session.select_preset(size, difficulty)?,
        Command::Reveal { index } => {
            session.reveal(index)?;
        }
        Command::ToggleMark { index } => {
            session.toggle_mark(index)?;
        }
        Command::Timeout => {
            session.force_loss();
        }
        Command::Snapshot => {}
    }
    Ok(Snapshot::from_board(session.board()))
}

/// Decodes one JSON command, applies it, and encodes the resulting snapshot.
pub fn handle<S: IndexSampler>(session: &mut Session<S>, text: &str) -> Result<String> {
    let snapshot = apply(session, decode_command(text)?)?;
    encode_snapshot(&snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSampler(Vec<usize>);

    impl IndexSampler for FixedSampler {
        fn sample_distinct(&mut self, k: usize, _n: usize) -> Vec<usize> {
            self.0.iter().copied().take(k).collect()
        }
    }

    fn session(mines: &[usize]) -> Session<FixedSampler> {
        let config = GameConfig::new(Dimensions::new(3, 3), mines.len() as CellCount).unwrap();
        Session::with_sampler(config, FixedSampler(mines.to_vec())).unwrap()
    }

    #[test]
    fn decodes_tagged_commands() {
        assert_eq!(
            decode_command(r#"{"type":"reveal","index":4}"#).unwrap(),
            Command::Reveal { index: 4 }
        );
        assert_eq!(
            decode_command(r#"{"type":"new_game","size":"Large"}"#).unwrap(),
            Command::NewGame {
                size: Some(BoardSize::Large),
                difficulty: None
            }
        );
        assert_eq!(
            decode_command(r#"{"type":"timeout"}"#).unwrap(),
            Command::Timeout
        );
    }

    #[test]
    fn malformed_command_is_rejected() {
        let result = decode_command(r#"{"type":"explode"}"#);

        assert!(matches!(result, Err(ProtocolError::Json(_))));
    }

    #[test]
    fn snapshot_hides_unrevealed_content() {
        let mut session = session(&[0, 8]);

        let snapshot = apply(&mut session, Command::Reveal { index: 4 }).unwrap();

        assert_eq!((snapshot.rows, snapshot.columns), (3, 3));
        assert_eq!(snapshot.outcome, GameOutcome::InProgress);
        assert_eq!(snapshot.cells[4], CellView::Revealed(CellContent::Empty(2)));
        assert_eq!(snapshot.cells[0], CellView::Hidden);
        assert_eq!(snapshot.triggered_mine, None);
    }

    #[test]
    fn mine_click_reports_triggered_cell() {
        let mut session = session(&[0, 8]);

        let snapshot = apply(&mut session, Command::Reveal { index: 8 }).unwrap();

        assert_eq!(snapshot.outcome, GameOutcome::Lost);
        assert_eq!(snapshot.triggered_mine, Some(8));
        assert_eq!(snapshot.cells[8], CellView::Revealed(CellContent::Exploded));
        assert_eq!(snapshot.cells[0], CellView::Revealed(CellContent::Mine));
    }

    #[test]
    fn timeout_command_loses_the_round() {
        let mut session = session(&[0, 8]);

        let snapshot = apply(&mut session, Command::Timeout).unwrap();

        assert_eq!(snapshot.outcome, GameOutcome::Lost);
        assert_eq!(snapshot.cells[0], CellView::Revealed(CellContent::Exploded));
    }

    #[test]
    fn marks_are_counted_against_mines() {
        let mut session = session(&[0, 8]);

        let snapshot = apply(&mut session, Command::ToggleMark { index: 0 }).unwrap();

        assert_eq!(snapshot.mines, 2);
        assert_eq!(snapshot.mines_left, 1);
        assert_eq!(snapshot.cells[0], CellView::Marked);
    }

    #[test]
    fn preset_new_game_reconfigures() {
        let mut session = Session::with_sampler(GameConfig::default(), RandomSampler::new(3)).unwrap();

        let snapshot = apply(
            &mut session,
            Command::NewGame {
                size: Some(BoardSize::Small),
                difficulty: Some(Difficulty::Easy),
            },
        )
        .unwrap();

        assert_eq!((snapshot.rows, snapshot.columns), (14, 12));
        // ceil(168 * 0.07)
        assert_eq!(snapshot.mines, 12);
        assert_eq!(snapshot.cells.len(), 168);
        assert!(snapshot.cells.iter().all(|&cell| cell == CellView::Hidden));
    }

    #[test]
    fn difficulty_only_new_game_keeps_board_size() {
        let config = GameConfig::preset(BoardSize::Large, Difficulty::Easy);
        let mut session = Session::with_sampler(config, RandomSampler::new(3)).unwrap();

        let reply = handle(&mut session, r#"{"type":"new_game","difficulty":"Hard"}"#).unwrap();
        let snapshot: Snapshot = serde_json::from_str(&reply).unwrap();

        assert_eq!((snapshot.rows, snapshot.columns), (14, 30));
        // ceil(420 * 0.28)
        assert_eq!(snapshot.mines, 118);
    }

    #[test]
    fn size_only_new_game_keeps_difficulty() {
        let config = GameConfig::preset(BoardSize::Large, Difficulty::Easy);
        let mut session = Session::with_sampler(config, RandomSampler::new(3)).unwrap();

        let snapshot = apply(
            &mut session,
            Command::NewGame {
                size: Some(BoardSize::Small),
                difficulty: None,
            },
        )
        .unwrap();

        assert_eq!((snapshot.rows, snapshot.columns), (14, 12));
        // ceil(168 * 0.07)
        assert_eq!(snapshot.mines, 12);

        let snapshot = apply(
            &mut session,
            Command::NewGame {
                size: None,
                difficulty: Some(Difficulty::Medium),
            },
        )
        .unwrap();

        assert_eq!((snapshot.rows, snapshot.columns), (14, 12));
        // ceil(168 * 0.14)
        assert_eq!(snapshot.mines, 24);
    }

    #[test]
    fn out_of_range_index_is_a_game_error() {
        let mut session = session(&[0]);

        let result = handle(&mut session, r#"{"type":"toggle_mark","index":99}"#);

        assert!(matches!(
            result,
            Err(ProtocolError::Game(GameError::IndexOutOfRange { index: 99, len: 9 }))
        ));
    }

    #[test]
    fn handle_speaks_json() {
        let mut session = session(&[0]);

        let reply = handle(&mut session, r#"{"type":"reveal","index":8}"#).unwrap();
        let snapshot: Snapshot = serde_json::from_str(&reply).unwrap();

        assert_eq!(snapshot.outcome, GameOutcome::Won);
        assert!(reply.contains(r#""outcome":"Won""#));
    }
}
