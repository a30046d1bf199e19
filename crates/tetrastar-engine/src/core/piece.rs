use std::fmt;

use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::board::Board;

pub(crate) const PIECE_SPAWN_X: i8 = 3;
pub(crate) const PIECE_SPAWN_Y: i8 = 0;

/// A Tetris piece (tetromino) with position, rotation, and type.
///
/// Pieces are `Copy` values. Movement and rotation never mutate in place: each
/// operation checks the result against a [`Board`] and returns `None` when the
/// move is blocked by an occupied cell or the board edges.
///
/// # Coordinate System
///
/// - Position is the top-left corner of the piece's 4×4 bounding box
/// - (0, 0) is the top-left cell of the board, Y grows downward
/// - The position may be negative when the box overhangs the left edge
///
/// # Example
///
/// ```
/// use tetrastar_engine::{Board, Piece, PieceKind};
///
/// let board = Board::EMPTY;
/// let piece = Piece::spawn(PieceKind::T);
/// let moved = piece.left(&board).unwrap();
/// let rotated = moved.rotated_clockwise(&board).unwrap();
/// let landed = rotated.dropped(&board);
/// assert!(landed.down(&board).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    position: PiecePosition,
    rotation: PieceRotation,
    kind: PieceKind,
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "kind#rotation@x,y" (e.g., "S#1@4,18")
        write!(
            f,
            "{}#{}@{},{}",
            self.kind.as_char(),
            self.rotation.0,
            self.position.x,
            self.position.y
        )
    }
}

impl Piece {
    /// Creates a piece of the given kind at the canonical spawn position and rotation.
    #[must_use]
    pub const fn spawn(kind: PieceKind) -> Self {
        Self {
            position: PiecePosition::SPAWN_POSITION,
            rotation: PieceRotation(0),
            kind,
        }
    }

    #[must_use]
    pub fn position(self) -> PiecePosition {
        self.position
    }

    #[must_use]
    pub fn rotation(self) -> PieceRotation {
        self.rotation
    }

    #[must_use]
    pub fn kind(self) -> PieceKind {
        self.kind
    }

    /// Returns the absolute board coordinates `(x, y)` of the piece's four squares.
    ///
    /// Coordinates may fall outside the board; use [`Self::fits`] to check.
    pub fn squares(self) -> impl Iterator<Item = (isize, isize)> {
        let x0 = self.position.x();
        let y0 = self.position.y();
        self.kind
            .occupied_offsets(self.rotation)
            .map(move |(dx, dy)| (x0 + dx, y0 + dy))
    }

    /// Checks whether every square is inside the board and on an empty cell.
    #[must_use]
    pub fn fits(self, board: &Board) -> bool {
        self.squares().all(|(x, y)| board.is_free(x, y))
    }

    #[must_use]
    pub fn left(self, board: &Board) -> Option<Self> {
        self.shifted(board, -1, 0)
    }

    #[must_use]
    pub fn right(self, board: &Board) -> Option<Self> {
        self.shifted(board, 1, 0)
    }

    #[must_use]
    pub fn down(self, board: &Board) -> Option<Self> {
        self.shifted(board, 0, 1)
    }

    /// Rotates 90° clockwise around the bounding box.
    ///
    /// No wall kicks are attempted: if the rotated piece does not fit in place,
    /// the rotation is illegal.
    #[must_use]
    pub fn rotated_clockwise(self, board: &Board) -> Option<Self> {
        let rotated = Self {
            rotation: self.rotation.rotated_clockwise(),
            ..self
        };
        rotated.fits(board).then_some(rotated)
    }

    /// Moves the piece down until the next step would collide.
    #[must_use]
    pub fn dropped(self, board: &Board) -> Self {
        let mut dropped = self;
        while let Some(piece) = dropped.down(board) {
            dropped = piece;
        }
        dropped
    }

    fn shifted(self, board: &Board, dx: i8, dy: i8) -> Option<Self> {
        let moved = Self {
            position: self.position.offset(dx, dy),
            ..self
        };
        moved.fits(board).then_some(moved)
    }
}

/// Position of a piece's 4×4 bounding box on the board.
///
/// - X increases rightward (columns)
/// - Y increases downward (rows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PiecePosition {
    x: i8,
    y: i8,
}

impl PiecePosition {
    pub const SPAWN_POSITION: Self = Self::new(PIECE_SPAWN_X, PIECE_SPAWN_Y);

    #[must_use]
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn x(self) -> isize {
        isize::from(self.x)
    }

    #[must_use]
    pub fn y(self) -> isize {
        isize::from(self.y)
    }

    const fn offset(self, dx: i8, dy: i8) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Rotation state of a piece.
///
/// - `0`: 0° (spawn orientation)
/// - `1`: 90° clockwise
/// - `2`: 180°
/// - `3`: 270° clockwise
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceRotation(u8);

impl PieceRotation {
    #[must_use]
    pub fn rotated_clockwise(self) -> Self {
        PieceRotation((self.0 + 1) % 4)
    }

    #[must_use]
    pub fn as_u8(self) -> u8 {
        self.0
    }

    const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece (the 1×4 line).
    I = 0,
    /// O-piece (the 2×2 square).
    O = 1,
    /// S-piece.
    S = 2,
    /// Z-piece.
    Z = 3,
    /// J-piece.
    J = 4,
    /// L-piece.
    L = 5,
    /// T-piece.
    T = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [PieceKind; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
        PieceKind::T,
    ];

    fn mask(self, rotation: PieceRotation) -> PieceMask {
        PIECE_MASKS[self as usize][rotation.as_usize()]
    }

    /// Returns the `(dx, dy)` offsets of the occupied cells within the 4×4 bounding box.
    #[expect(clippy::cast_possible_wrap)]
    pub fn occupied_offsets(self, rotation: PieceRotation) -> impl Iterator<Item = (isize, isize)> {
        let mask = self.mask(rotation);
        (0..4usize).flat_map(move |dy| {
            (0..4usize)
                .filter(move |dx| mask[dy] & (1 << dx) != 0)
                .map(move |dx| (dx as isize, dy as isize))
        })
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// ```
    /// use tetrastar_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::T => 'T',
        }
    }

    /// Parses a piece kind from a single character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            'T' => Some(PieceKind::T),
            _ => None,
        }
    }
}

/// Piece cells within the 4×4 bounding box, one `u16` per row, bit `x` set when occupied.
type PieceMask = [u16; 4];

/// Generates all 4 rotation states of a piece mask by rotating 90° clockwise.
///
/// `size` is the side of the square the piece rotates in (4 for I, 2 for O, 3 otherwise).
const fn mask_rotations(size: usize, mask: PieceMask) -> [PieceMask; 4] {
    let mut rotates = [mask; 4];
    let mut i = 1;
    while i < 4 {
        let mut new_mask = [0; 4];
        let mut y = 0;
        while y < size {
            let mut x = 0;
            while x < size {
                if (rotates[i - 1][size - 1 - x] & (1 << y)) != 0 {
                    new_mask[y] |= 1 << x;
                }
                x += 1;
            }
            y += 1;
        }
        rotates[i] = new_mask;
        i += 1;
    }
    rotates
}

const PIECE_MASKS: [[PieceMask; 4]; PieceKind::LEN] = {
    const fn m(bits: [bool; 4]) -> u16 {
        let mut mask = 0;
        let mut i = 0;
        while i < 4 {
            if bits[i] {
                mask |= 1 << i;
            }
            i += 1;
        }
        mask
    }

    const C: bool = true;
    const E: bool = false;
    const EEEE: u16 = m([E; 4]);

    [
        // I-piece
        mask_rotations(4, [EEEE, m([C, C, C, C]), EEEE, EEEE]),
        // O-piece
        mask_rotations(2, [m([C, C, E, E]), m([C, C, E, E]), EEEE, EEEE]),
        // S-piece
        mask_rotations(3, [m([E, C, C, E]), m([C, C, E, E]), EEEE, EEEE]),
        // Z-piece
        mask_rotations(3, [m([C, C, E, E]), m([E, C, C, E]), EEEE, EEEE]),
        // J-piece
        mask_rotations(3, [m([C, E, E, E]), m([C, C, C, E]), EEEE, EEEE]),
        // L-piece
        mask_rotations(3, [m([E, E, C, E]), m([C, C, C, E]), EEEE, EEEE]),
        // T-piece
        mask_rotations(3, [m([E, C, E, E]), m([C, C, C, E]), EEEE, EEEE]),
    ]
};

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted_squares(piece: Piece) -> Vec<(isize, isize)> {
        let mut squares: Vec<_> = piece.squares().collect();
        squares.sort_unstable();
        squares
    }

    #[test]
    fn test_every_rotation_has_four_squares() {
        for kind in PieceKind::ALL {
            let mut rotation = PieceRotation::default();
            for _ in 0..4 {
                assert_eq!(kind.occupied_offsets(rotation).count(), 4, "{kind:?}");
                rotation = rotation.rotated_clockwise();
            }
            assert_eq!(rotation, PieceRotation::default());
        }
    }

    #[test]
    fn test_spawn_squares() {
        let line = Piece::spawn(PieceKind::I);
        assert_eq!(sorted_squares(line), vec![(3, 1), (4, 1), (5, 1), (6, 1)]);

        let t = Piece::spawn(PieceKind::T);
        assert_eq!(sorted_squares(t), vec![(3, 1), (4, 0), (4, 1), (5, 1)]);
    }

    #[test]
    fn test_rotate_line_clockwise() {
        let board = Board::EMPTY;
        let line = Piece::spawn(PieceKind::I)
            .rotated_clockwise(&board)
            .unwrap();
        assert_eq!(line.rotation().as_u8(), 1);
        assert_eq!(sorted_squares(line), vec![(5, 0), (5, 1), (5, 2), (5, 3)]);
    }

    #[test]
    fn test_square_rotations_are_identical() {
        let board = Board::EMPTY;
        let square = Piece::spawn(PieceKind::O);
        let rotated = square.rotated_clockwise(&board).unwrap();
        assert_eq!(sorted_squares(square), sorted_squares(rotated));
    }

    #[test]
    fn test_slide_to_walls() {
        let board = Board::EMPTY;
        let mut line = Piece::spawn(PieceKind::I);
        while let Some(piece) = line.left(&board) {
            line = piece;
        }
        assert_eq!(sorted_squares(line)[0], (0, 1));

        while let Some(piece) = line.right(&board) {
            line = piece;
        }
        assert_eq!(sorted_squares(line)[3], (9, 1));
    }

    #[test]
    fn test_vertical_line_reaches_both_edges() {
        let board = Board::EMPTY;
        let mut line = Piece::spawn(PieceKind::I)
            .rotated_clockwise(&board)
            .unwrap();
        while let Some(piece) = line.left(&board) {
            line = piece;
        }
        assert!(line.squares().all(|(x, _)| x == 0));
        assert!(line.position().x() < 0);

        while let Some(piece) = line.right(&board) {
            line = piece;
        }
        assert!(line.squares().all(|(x, _)| x == 9));
    }

    #[test]
    fn test_dropped_rests_on_floor() {
        let board = Board::EMPTY;
        let dropped = Piece::spawn(PieceKind::O).dropped(&board);
        assert_eq!(sorted_squares(dropped), vec![(3, 18), (3, 19), (4, 18), (4, 19)]);
        assert!(dropped.down(&board).is_none());
    }

    #[test]
    fn test_dropped_rests_on_stack() {
        let board = Board::from_ascii(
            "
            ...#......
            ...#......
            ",
        );
        let dropped = Piece::spawn(PieceKind::O).dropped(&board);
        assert_eq!(sorted_squares(dropped), vec![(3, 16), (3, 17), (4, 16), (4, 17)]);
    }

    #[test]
    fn test_rotation_blocked_by_stack() {
        // Vertical I at column 5 needs rows 0..=3
        let mut board = Board::EMPTY;
        board.set_cell(5, 3, crate::Cell::Garbage);
        let line = Piece::spawn(PieceKind::I);
        assert!(line.fits(&board));
        assert!(line.rotated_clockwise(&board).is_none());
    }

    #[test]
    fn test_moves_blocked_by_bounds() {
        let board = Board::EMPTY;
        let square = Piece::spawn(PieceKind::O).dropped(&board);
        assert!(square.down(&board).is_none());
        assert!(Piece::spawn(PieceKind::T).down(&board).is_some());
    }

    #[test]
    fn test_piece_display() {
        let piece = Piece::spawn(PieceKind::S);
        assert_eq!(piece.to_string(), "S#0@3,0");
    }

    #[test]
    fn test_piece_kind_char_conversion() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(PieceKind::from_char('X'), None);
        assert_eq!(PieceKind::from_char('i'), None);
    }

    #[test]
    fn test_piece_kind_sampling_covers_all_kinds() {
        use rand::SeedableRng as _;

        let mut rng = rand_pcg::Pcg32::seed_from_u64(7);
        let mut seen = [false; PieceKind::LEN];
        for _ in 0..500 {
            let kind: PieceKind = rng.random();
            seen[kind as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
