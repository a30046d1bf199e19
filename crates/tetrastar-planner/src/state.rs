use tetrastar_engine::{Board, PieceKind};

/// Search state: the settled board and the pieces still to come.
///
/// Every state owns its queue; successors never share storage with their
/// parent or with each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlannerState {
    pub board: Board,
    /// Upcoming pieces, next piece first.
    pub pending: Vec<PieceKind>,
    /// Pieces placed since the search started.
    pub placed: usize,
}

impl PlannerState {
    #[must_use]
    pub fn new(board: Board, pending: Vec<PieceKind>) -> Self {
        Self {
            board,
            pending,
            placed: 0,
        }
    }

    #[must_use]
    pub fn next_piece(&self) -> Option<PieceKind> {
        self.pending.first().copied()
    }
}
