use crate::chess::{Board, Color, Piece, Rank, Role, Square};

/// Whether `piece` may move from `whence` to `whither` on the `board`.
///
/// This only considers how each [`Role`] moves and whether its path is clear.
/// It neither knows whose turn it is nor whether the mover's own king is left in check.
pub fn is_legal(piece: Piece, whence: Square, whither: Square, board: &Board) -> bool {
    if matches!(board[whither], Some(p) if p.color() == piece.color()) {
        return false;
    }

    match piece.role() {
        Role::Pawn => pawn(piece.color(), whence, whither, board),
        Role::Knight => knight(whence, whither),
        Role::Bishop => bishop(whence, whither, board),
        Role::Rook => rook(whence, whither, board),
        Role::Queen => rook(whence, whither, board) || bishop(whence, whither, board),
        Role::King => king(whence, whither),
    }
}

/// The signed distance in rows and columns between two squares.
fn delta(whence: Square, whither: Square) -> (i8, i8) {
    (whither.rank() - whence.rank(), whither.file() - whence.file())
}

fn pawn(color: Color, whence: Square, whither: Square, board: &Board) -> bool {
    let (direction, start) = match color {
        Color::White => (1, Rank::Second),
        Color::Black => (-1, Rank::Seventh),
    };

    match delta(whence, whither) {
        (r, 0) if r == direction => board[whither].is_none(),
        (r, 0) if r == 2 * direction && whence.rank() == start => {
            let skipped = whence.offset(direction, 0);
            skipped.map_or(false, |sq| board[sq].is_none()) && board[whither].is_none()
        }
        (r, c) if r == direction && c.abs() == 1 => {
            matches!(board[whither], Some(p) if p.color() != color)
        }
        _ => false,
    }
}

fn knight(whence: Square, whither: Square) -> bool {
    let (r, c) = delta(whence, whither);
    matches!((r.abs(), c.abs()), (2, 1) | (1, 2))
}

fn king(whence: Square, whither: Square) -> bool {
    let (r, c) = delta(whence, whither);
    r.abs() <= 1 && c.abs() <= 1
}

fn bishop(whence: Square, whither: Square, board: &Board) -> bool {
    let (r, c) = delta(whence, whither);
    r.abs() == c.abs() && r != 0 && is_clear(whence, whither, board)
}

fn rook(whence: Square, whither: Square, board: &Board) -> bool {
    let (r, c) = delta(whence, whither);
    (r == 0 || c == 0) && is_clear(whence, whither, board)
}

/// Whether every square strictly between `whence` and `whither` is empty.
///
/// Assumes both squares share a row, a column or a diagonal.
fn is_clear(whence: Square, whither: Square, board: &Board) -> bool {
    let (r, c) = delta(whence, whither);
    let (dr, dc) = (r.signum(), c.signum());

    (1..r.abs().max(c.abs()))
        .filter_map(|i| whence.offset(i * dr, i * dc))
        .all(|sq| board[sq].is_none())
}
