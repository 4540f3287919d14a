use std::fmt;
use std::str::FromStr;

use super::ops;
use super::spawn::{SpawnRule, TileSource};
use super::{DEFAULT_SIZE, MAX_SIZE, MIN_SIZE};
use crate::error::GameError;

/// Cell value: 0 for empty, otherwise a power of two >= 2.
pub type Tile = u64;
pub type Score = u64;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All directions in index order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Stable numeric code: Up=0, Down=1, Left=2, Right=3.
    #[inline]
    pub fn index(self) -> u8 {
        match self {
            Move::Up => 0,
            Move::Down => 1,
            Move::Left => 2,
            Move::Right => 3,
        }
    }

    /// Inverse of [`Move::index`]. Codes outside `0..=3` are rejected.
    pub fn from_index(code: u8) -> Result<Move, GameError> {
        Move::ALL
            .get(code as usize)
            .copied()
            .ok_or_else(|| GameError::InvalidDirection(code.to_string()))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        };
        f.write_str(name)
    }
}

/// Accepts direction names in any case, WASD and browser key names.
///
/// ```
/// use game_2048::engine::Move;
/// assert_eq!("ArrowUp".parse::<Move>().unwrap(), Move::Up);
/// assert_eq!("a".parse::<Move>().unwrap(), Move::Left);
/// assert!("sideways".parse::<Move>().is_err());
/// ```
impl FromStr for Move {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "w" | "arrowup" => Ok(Move::Up),
            "down" | "s" | "arrowdown" => Ok(Move::Down),
            "left" | "a" | "arrowleft" => Ok(Move::Left),
            "right" | "d" | "arrowright" => Ok(Move::Right),
            _ => Err(GameError::InvalidDirection(s.to_string())),
        }
    }
}

/// Result of applying one move to a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    pub board: Board,
    /// Sum of the values of every tile created by a merge during the move.
    pub score_delta: Score,
    /// True iff the collapse changed at least one cell.
    pub moved: bool,
}

/// Square N×N board stored row-major.
///
/// Boards are values: every move returns a new board and leaves the input
/// untouched, so "did anything move" is a plain equality check.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<Tile>,
}

impl Default for Board {
    fn default() -> Self {
        Board { size: DEFAULT_SIZE, cells: vec![0; DEFAULT_SIZE * DEFAULT_SIZE] }
    }
}

impl Board {
    /// An empty `size`×`size` board.
    pub fn new(size: usize) -> Result<Self, GameError> {
        check_size(size)?;
        Ok(Board { size, cells: vec![0; size * size] })
    }

    /// Build a board from rows, validating shape and tile values.
    ///
    /// Tiles above [`Board::max_tile`] are rejected: no game can reach them
    /// and merging them could overflow.
    ///
    /// ```
    /// use game_2048::engine::Board;
    /// let b = Board::from_rows(vec![vec![2, 0], vec![0, 4]]).unwrap();
    /// assert_eq!(b.count_empty(), 2);
    /// assert!(Board::from_rows(vec![vec![2, 3], vec![0, 0]]).is_err());
    /// ```
    pub fn from_rows(rows: Vec<Vec<Tile>>) -> Result<Self, GameError> {
        let size = rows.len();
        check_size(size)?;
        let max_tile = Board::max_tile(size);
        let mut cells = Vec::with_capacity(size * size);
        for (r, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(GameError::MalformedBoard(format!(
                    "row {r} has {} cells, expected {size}",
                    row.len()
                )));
            }
            for (c, &tile) in row.iter().enumerate() {
                if tile != 0 && (tile < 2 || !tile.is_power_of_two()) {
                    return Err(GameError::MalformedBoard(format!(
                        "cell ({r}, {c}) holds {tile}, which is not 0 or a power of two >= 2"
                    )));
                }
                if tile > max_tile {
                    return Err(GameError::MalformedBoard(format!(
                        "cell ({r}, {c}) holds {tile}, above the largest reachable tile {max_tile}"
                    )));
                }
            }
            cells.extend(row);
        }
        Ok(Board { size, cells })
    }

    /// Largest tile reachable on a `size`×`size` board: 2^(size*size + 1).
    #[inline]
    pub fn max_tile(size: usize) -> Tile {
        1 << (size * size + 1)
    }

    /// Side length N.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Tile] {
        &self.cells
    }

    /// Copy out the grid as rows.
    pub fn rows(&self) -> Vec<Vec<Tile>> {
        self.cells.chunks(self.size).map(<[Tile]>::to_vec).collect()
    }

    /// Value at `(row, col)`, or `None` when out of bounds.
    #[inline]
    pub fn tile_value(&self, row: usize, col: usize) -> Option<Tile> {
        if row < self.size && col < self.size {
            Some(self.cells[row * self.size + col])
        } else {
            None
        }
    }

    /// Slide/merge tiles in `dir` without spawning anything.
    ///
    /// Returns the collapsed board and the score gained from merges.
    ///
    /// ```
    /// use game_2048::engine::{Board, Move};
    /// let b = Board::from_rows(vec![vec![2, 2], vec![0, 4]]).unwrap();
    /// let (next, gained) = b.shift(Move::Left);
    /// assert_eq!(next.rows(), vec![vec![4, 0], vec![4, 0]]);
    /// assert_eq!(gained, 4);
    /// ```
    #[inline]
    pub fn shift(&self, dir: Move) -> (Board, Score) {
        ops::shift(self, dir)
    }

    /// Place a tile drawn by `rule` into a uniformly chosen empty cell.
    ///
    /// A full board comes back unchanged.
    pub fn with_spawned_tile<S: TileSource + ?Sized>(&self, rule: SpawnRule, source: &mut S) -> Board {
        let empty = self.count_empty();
        if empty == 0 {
            return self.clone();
        }
        let nth = source.index(empty);
        let tile = rule.tile(source);
        let mut next = self.clone();
        if let Some(cell) = next.cells.iter_mut().filter(|c| **c == 0).nth(nth) {
            *cell = tile;
        }
        next
    }

    /// Insert a random 2 (90%) or 4 (10%) tile into a random empty slot.
    ///
    /// Deterministic example using a seeded RNG:
    /// ```
    /// use game_2048::engine::Board;
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let b = Board::default().with_random_tile(&mut rng).with_random_tile(&mut rng);
    /// assert_eq!(b.count_empty(), 14);
    /// ```
    #[inline]
    pub fn with_random_tile<S: TileSource + ?Sized>(&self, source: &mut S) -> Board {
        self.with_spawned_tile(SpawnRule::default(), source)
    }

    /// Perform a move, then spawn one tile if the move changed the board.
    pub fn make_move_with<S: TileSource + ?Sized>(&self, dir: Move, rule: SpawnRule, source: &mut S) -> MoveResult {
        let (collapsed, score_delta) = self.shift(dir);
        if collapsed != *self {
            MoveResult { board: collapsed.with_spawned_tile(rule, source), score_delta, moved: true }
        } else {
            MoveResult { board: self.clone(), score_delta: 0, moved: false }
        }
    }

    /// [`Board::make_move_with`] using the default 90/10 spawn rule.
    ///
    /// ```
    /// use game_2048::engine::{Board, Move};
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let mut rng = StdRng::seed_from_u64(1);
    /// let b = Board::from_rows(vec![vec![0, 2], vec![0, 0]]).unwrap();
    /// let res = b.make_move(Move::Left, &mut rng);
    /// assert!(res.moved);
    /// assert_eq!(res.board.count_empty(), 2);
    /// ```
    #[inline]
    pub fn make_move<S: TileSource + ?Sized>(&self, dir: Move, source: &mut S) -> MoveResult {
        self.make_move_with(dir, SpawnRule::default(), source)
    }

    /// True iff no move can change the board.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        ops::is_terminal(self)
    }

    /// Directions that would change the board, in [`Move::ALL`] order.
    pub fn legal_moves(&self) -> Vec<Move> {
        Move::ALL.into_iter().filter(|&dir| self.shift(dir).0 != *self).collect()
    }

    /// Return the highest tile value present on the board (0 when empty).
    #[inline]
    pub fn highest_tile(&self) -> Tile {
        ops::highest_tile(self)
    }

    /// Count the number of empty cells on the board.
    #[inline]
    pub fn count_empty(&self) -> usize {
        ops::count_empty(self)
    }

    /// Sum of all tile values.
    #[inline]
    pub fn tile_sum(&self) -> u64 {
        self.cells.iter().sum()
    }

    /// Iterate over the non-empty tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.cells.iter().copied().filter(|&t| t != 0)
    }

    pub(crate) fn from_cells_unchecked(size: usize, cells: Vec<Tile>) -> Board {
        debug_assert_eq!(cells.len(), size * size);
        Board { size, cells }
    }
}

fn check_size(size: usize) -> Result<(), GameError> {
    if (MIN_SIZE..=MAX_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(GameError::MalformedBoard(format!(
            "size {size} outside supported range {MIN_SIZE}..={MAX_SIZE}"
        )))
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board").field("size", &self.size).field("rows", &self.rows()).finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(self.size * 8 - 1);
        writeln!(f)?;
        for (r, row) in self.cells.chunks(self.size).enumerate() {
            if r > 0 {
                writeln!(f, "{rule}")?;
            }
            let line: Vec<String> = row.iter().map(|&v| format_val(v)).collect();
            writeln!(f, "{}", line.join("|"))?;
        }
        Ok(())
    }
}

/// Center a tile value in a 7-character cell; empty cells render blank.
fn format_val(val: Tile) -> String {
    if val == 0 {
        return String::from("       ");
    }
    let mut x = val.to_string();
    while x.len() < 7 {
        match x.len() {
            6 => x = format!(" {}", x),
            _ => x = format!(" {} ", x),
        }
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::spawn::testing::Scripted;

    #[test]
    fn it_parses_directions() {
        assert_eq!("up".parse::<Move>().unwrap(), Move::Up);
        assert_eq!(" DOWN ".parse::<Move>().unwrap(), Move::Down);
        assert_eq!("ArrowLeft".parse::<Move>().unwrap(), Move::Left);
        assert_eq!("W".parse::<Move>().unwrap(), Move::Up);
        assert_eq!("a".parse::<Move>().unwrap(), Move::Left);
        assert_eq!("s".parse::<Move>().unwrap(), Move::Down);
        assert_eq!("d".parse::<Move>().unwrap(), Move::Right);
        assert!("u".parse::<Move>().is_err());
        assert!("r".parse::<Move>().is_err());
        assert!(matches!("north".parse::<Move>(), Err(GameError::InvalidDirection(s)) if s == "north"));
        assert!("".parse::<Move>().is_err());
    }

    #[test]
    fn index_codes_round_trip() {
        for dir in Move::ALL {
            assert_eq!(Move::from_index(dir.index()).unwrap(), dir);
        }
        assert!(matches!(Move::from_index(4), Err(GameError::InvalidDirection(_))));
    }

    #[test]
    fn from_rows_rejects_bad_shapes() {
        assert!(Board::from_rows(vec![]).is_err());
        assert!(Board::from_rows(vec![vec![2]]).is_err());
        assert!(Board::from_rows(vec![vec![2, 0, 0], vec![0, 0, 0]]).is_err());
        assert!(Board::from_rows(vec![vec![2, 0], vec![0, 0, 0]]).is_err());
        assert!(Board::from_rows(vec![vec![0; 8]; 8]).is_err());
    }

    #[test]
    fn from_rows_rejects_bad_tiles() {
        assert!(Board::from_rows(vec![vec![1, 0], vec![0, 0]]).is_err());
        assert!(Board::from_rows(vec![vec![6, 0], vec![0, 0]]).is_err());
        assert!(Board::from_rows(vec![vec![2, 4], vec![32, 0]]).is_ok());
    }

    #[test]
    fn from_rows_rejects_unreachable_tiles() {
        assert_eq!(Board::max_tile(2), 32);
        assert_eq!(Board::max_tile(4), 1 << 17);
        assert!(matches!(
            Board::from_rows(vec![vec![64, 0], vec![0, 0]]),
            Err(GameError::MalformedBoard(_))
        ));
        assert!(matches!(
            Board::from_rows(vec![vec![1 << 63, 1 << 63], vec![0, 0]]),
            Err(GameError::MalformedBoard(_))
        ));
        let mut rows = vec![vec![0; 4]; 4];
        rows[0][0] = 1 << 18;
        assert!(Board::from_rows(rows).is_err());
    }

    #[test]
    fn largest_tiles_merge_without_overflow() {
        let top = Board::max_tile(7);
        let mut rows = vec![vec![0; 7]; 7];
        rows[0][0] = top;
        rows[0][1] = top;
        let b = Board::from_rows(rows).unwrap();
        let (next, gained) = b.shift(Move::Left);
        assert_eq!(next.tile_value(0, 0), Some(top * 2));
        assert_eq!(gained, top * 2);
        assert_eq!(next.tile_sum(), b.tile_sum());
    }

    #[test]
    fn it_count_empty() {
        let b = Board::from_rows(vec![vec![2, 2, 2, 2], vec![0; 4], vec![2, 2, 2, 2], vec![0; 4]]).unwrap();
        assert_eq!(b.count_empty(), 8);
        assert_eq!(Board::default().count_empty(), 16);
    }

    #[test]
    fn it_get_tile_value() {
        let b = Board::from_rows(vec![vec![0, 2], vec![4, 8]]).unwrap();
        assert_eq!(b.tile_value(0, 0), Some(0));
        assert_eq!(b.tile_value(1, 1), Some(8));
        assert_eq!(b.tile_value(2, 0), None);
        assert_eq!(b.highest_tile(), 8);
    }

    #[test]
    fn spawn_fills_the_chosen_empty_cell() {
        let b = Board::from_rows(vec![vec![2, 0], vec![0, 0]]).unwrap();
        // Second empty cell in row-major order is (1, 0); 0.95 draws a 4.
        let mut src = Scripted::new(&[0.95], &[1]);
        let next = b.with_random_tile(&mut src);
        assert_eq!(next.rows(), vec![vec![2, 0], vec![4, 0]]);
        assert!(src.exhausted());
    }

    #[test]
    fn spawn_on_full_board_is_a_no_op() {
        let b = Board::from_rows(vec![vec![2, 4], vec![8, 16]]).unwrap();
        let mut src = Scripted::default();
        assert_eq!(b.with_random_tile(&mut src), b);
    }

    #[test]
    fn make_move_without_change_spawns_nothing() {
        let b = Board::from_rows(vec![vec![2, 4], vec![0, 0]]).unwrap();
        let mut src = Scripted::default();
        let res = b.make_move(Move::Left, &mut src);
        assert!(!res.moved);
        assert_eq!(res.score_delta, 0);
        assert_eq!(res.board, b);
    }

    #[test]
    fn make_move_spawns_exactly_one_tile() {
        let b = Board::from_rows(vec![vec![2, 2], vec![0, 0]]).unwrap();
        let mut src = Scripted::new(&[0.1], &[0]);
        let res = b.make_move(Move::Left, &mut src);
        assert!(res.moved);
        assert_eq!(res.score_delta, 4);
        assert_eq!(res.board.rows(), vec![vec![4, 2], vec![0, 0]]);
    }

    #[test]
    fn legal_moves_follow_board_shape() {
        let b = Board::from_rows(vec![vec![2, 0], vec![0, 0]]).unwrap();
        assert_eq!(b.legal_moves(), vec![Move::Down, Move::Right]);
        let stuck = Board::from_rows(vec![vec![2, 4], vec![4, 2]]).unwrap();
        assert!(stuck.legal_moves().is_empty());
    }

    #[test]
    fn display_renders_every_row() {
        let b = Board::from_rows(vec![vec![2, 0, 0, 0], vec![0; 4], vec![0; 4], vec![0, 0, 0, 2048]]).unwrap();
        let text = b.to_string();
        assert!(text.contains("   2   |       "));
        assert!(text.contains("  2048"));
        assert_eq!(text.lines().filter(|l| l.contains('|')).count(), 4);
    }
}
