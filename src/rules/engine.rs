//! Pour rules.
//!
//! A pour moves the contiguous same-colored run at the top of the source onto
//! the destination, bounded by the destination's free space:
//!
//! - never into the same tube
//! - never from an empty tube
//! - never into a full tube
//! - into an empty tube, or onto a matching top color
//!
//! These functions are pure over a [`Board`]; the session layers history,
//! selection and timing on top.

use crate::core::{Board, Move, MoveError};

/// Check a pour and return how many units it would move.
///
/// The amount is `min(top_run_len(from), capacity - len(to))`, always >= 1
/// for a legal pour.
pub fn check_pour(board: &Board, from: usize, to: usize) -> Result<usize, MoveError> {
    let source = board.checked_tube(from)?;
    let dest = board.checked_tube(to)?;

    if from == to {
        return Err(MoveError::SameTube(from));
    }
    if source.is_empty() {
        return Err(MoveError::EmptySource(from));
    }
    if dest.is_full(board.capacity()) {
        return Err(MoveError::DestinationFull(to));
    }
    if let Some(top) = dest.top() {
        if source.top() != Some(top) {
            return Err(MoveError::ColorMismatch { from, to });
        }
    }

    Ok(source.top_run_len().min(dest.space(board.capacity())))
}

/// True when pouring `from` into `to` is legal.
#[must_use]
pub fn can_pour(board: &Board, from: usize, to: usize) -> bool {
    check_pour(board, from, to).is_ok()
}

/// Perform a pour and return the number of units moved.
///
/// The board is untouched on error.
pub fn apply_pour(board: &mut Board, from: usize, to: usize) -> Result<usize, MoveError> {
    let amount = check_pour(board, from, to)?;
    board.transfer(from, to, amount);
    Ok(amount)
}

/// Move a recorded pour's units back to its source.
///
/// Only valid for the most recent move of a history that produced `board`;
/// nothing has touched the top of `mv.to` since, so its top `mv.amount` units
/// are exactly the ones that were poured.
pub fn revert_pour(board: &mut Board, mv: &Move) {
    debug_assert!(
        board
            .tube(mv.to)
            .is_some_and(|t| t.top_run_len() >= mv.amount),
        "reverted move must sit on top of its destination"
    );
    board.transfer(mv.to, mv.from, mv.amount);
}

/// All legal `(from, to)` pairs, scanning `from` then `to` in index order.
pub fn legal_pours(board: &Board) -> impl Iterator<Item = (usize, usize)> + '_ {
    let n = board.len();
    (0..n)
        .flat_map(move |from| (0..n).map(move |to| (from, to)))
        .filter(move |&(from, to)| can_pour(board, from, to))
}

/// The first legal pour in row-major scan order.
#[must_use]
pub fn first_legal_pour(board: &Board) -> Option<(usize, usize)> {
    legal_pours(board).next()
}
