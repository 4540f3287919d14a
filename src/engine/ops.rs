use super::state::{Board, Move, Score, Tile};

/// Slide/merge tiles in the given direction. No randomness.
///
/// Every direction is rewritten as a left collapse on rows: reorient, run
/// [`collapse_row`] on each row, then undo the reorientation.
pub fn shift(board: &Board, direction: Move) -> (Board, Score) {
    let oriented = reorient(board.rows(), direction);
    let mut score = 0;
    let collapsed: Vec<Vec<Tile>> = oriented
        .iter()
        .map(|row| {
            let (out, gained) = collapse_row(row);
            score += gained;
            out
        })
        .collect();
    let restored = restore(collapsed, direction);
    let cells = restored.into_iter().flatten().collect();
    (Board::from_cells_unchecked(board.size(), cells), score)
}

/// Collapse one row toward index 0.
///
/// Zeros are dropped, then a single left-to-right pass merges each adjacent
/// equal pair into one tile of double value. A merged tile is never merged
/// again in the same pass, so `[2, 2, 2, 2]` becomes `[4, 4, 0, 0]`.
/// Returns the padded row and the sum of the merged tile values.
pub fn collapse_row(row: &[Tile]) -> (Vec<Tile>, Score) {
    let packed: Vec<Tile> = row.iter().copied().filter(|&t| t != 0).collect();
    let mut out = Vec::with_capacity(row.len());
    let mut score = 0;
    let mut i = 0;
    while i < packed.len() {
        if i + 1 < packed.len() && packed[i] == packed[i + 1] {
            let merged = packed[i] * 2;
            out.push(merged);
            score += merged;
            i += 2;
        } else {
            out.push(packed[i]);
            i += 1;
        }
    }
    out.resize(row.len(), 0);
    (out, score)
}

// left: as-is; right: mirror; up: transpose; down: transpose then mirror.
fn reorient(rows: Vec<Vec<Tile>>, direction: Move) -> Vec<Vec<Tile>> {
    match direction {
        Move::Left => rows,
        Move::Right => mirror(rows),
        Move::Up => transpose(&rows),
        Move::Down => mirror(transpose(&rows)),
    }
}

fn restore(rows: Vec<Vec<Tile>>, direction: Move) -> Vec<Vec<Tile>> {
    match direction {
        Move::Left => rows,
        Move::Right => mirror(rows),
        Move::Up => transpose(&rows),
        Move::Down => transpose(&mirror(rows)),
    }
}

fn transpose(rows: &[Vec<Tile>]) -> Vec<Vec<Tile>> {
    let n = rows.len();
    (0..n).map(|c| rows.iter().map(|row| row[c]).collect()).collect()
}

fn mirror(mut rows: Vec<Vec<Tile>>) -> Vec<Vec<Tile>> {
    for row in rows.iter_mut() {
        row.reverse();
    }
    rows
}

/// True iff the board is full and no two orthogonal neighbours are equal.
///
/// Only right and bottom neighbours are checked; equality is symmetric.
pub fn is_terminal(board: &Board) -> bool {
    if count_empty(board) > 0 {
        return false;
    }
    let n = board.size();
    let cells = board.cells();
    for r in 0..n {
        for c in 0..n {
            let current = cells[r * n + c];
            if c + 1 < n && cells[r * n + c + 1] == current {
                return false;
            }
            if r + 1 < n && cells[(r + 1) * n + c] == current {
                return false;
            }
        }
    }
    true
}

/// Count the number of empty cells.
pub fn count_empty(board: &Board) -> usize {
    board.cells().iter().filter(|&&t| t == 0).count()
}

/// Highest tile value on the board, 0 for an empty board.
pub fn highest_tile(board: &Board) -> Tile {
    board.cells().iter().copied().max().unwrap_or(0)
}
