use crate::chess::{Board, Color, Role, Square};
use crate::rules::is_legal;
use tracing::instrument;

/// The [`Square`] occupied by the king of a given [`Color`], if any.
pub fn find_king(side: Color, board: &Board) -> Option<Square> {
    Square::iter().find(|&sq| {
        matches!(board[sq], Some(p) if p.role() == Role::King && p.color() == side)
    })
}

/// Whether the king of a given [`Color`] standing on `king` is attacked by any opposing piece.
pub fn is_in_check(king: Square, side: Color, board: &Board) -> bool {
    Square::iter().any(|sq| match board[sq] {
        Some(p) if p.color() != side => is_legal(p, sq, king, board),
        _ => false,
    })
}

/// Whether the side of a given [`Color`] is checkmated.
///
/// Every move of every piece of that side is tried on a hypothetical board,
/// the position is only a checkmate if none of them resolves the check.
/// A missing king is never checkmated.
#[instrument(level = "debug", skip(board), ret)]
pub fn is_checkmate(side: Color, board: &Board) -> bool {
    let king = match find_king(side, board) {
        Some(king) if is_in_check(king, side, board) => king,
        _ => return false,
    };

    let mut candidates = Square::iter()
        .filter_map(|whence| board[whence].map(|p| (whence, p)))
        .filter(|(_, p)| p.color() == side)
        .flat_map(|(whence, p)| Square::iter().map(move |whither| (p, whence, whither)))
        .filter(|&(p, whence, whither)| is_legal(p, whence, whither, board));

    !candidates.any(|(p, whence, whither)| {
        let next = board.hypothetical(whence, whither);
        let king = if p.role() == Role::King { whither } else { king };
        !is_in_check(king, side, &next)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[proptest]
    fn kings_are_found_on_the_starting_position(c: Color) {
        let expected = match c {
            Color::White => sq("e1"),
            Color::Black => sq("e8"),
        };

        assert_eq!(find_king(c, &Board::default()), Some(expected));
    }

    #[proptest]
    fn missing_king_is_neither_found_nor_checkmated(c: Color) {
        let mut board = Board::default();
        board.remove(find_king(c, &board).unwrap());
        assert_eq!(find_king(c, &board), None);
        assert!(!is_checkmate(c, &board));
    }

    #[proptest]
    fn no_king_is_in_check_on_the_starting_position(c: Color) {
        let board = Board::default();
        let king = find_king(c, &board).unwrap();
        assert!(!is_in_check(king, c, &board));
        assert!(!is_checkmate(c, &board));
    }

    #[test]
    fn rook_on_open_file_gives_check() {
        let mut board = Board::empty();
        board.place(Role::King, Color::White, sq("e1"));
        board.place(Role::Rook, Color::Black, sq("e8"));
        assert!(is_in_check(sq("e1"), Color::White, &board));
    }

    #[proptest]
    fn any_piece_on_the_file_blocks_the_check(
        #[strategy(1usize..7)] row: usize,
        r: Role,
        c: Color,
    ) {
        let mut board = Board::empty();
        board.place(Role::King, Color::White, sq("e1"));
        board.place(Role::Rook, Color::Black, sq("e8"));
        board.place(r, c, Square::from_coords(row, 4).unwrap());

        let blocked = !is_in_check(sq("e1"), Color::White, &board);
        let attacker = board[Square::from_coords(row, 4).unwrap()]
            .filter(|p| p.color() == Color::Black)
            .map_or(false, |p| is_legal(p, p.square(), sq("e1"), &board));

        assert!(blocked || attacker);
    }

    #[test]
    fn own_pieces_do_not_give_check() {
        let mut board = Board::empty();
        board.place(Role::King, Color::White, sq("e1"));
        board.place(Role::Rook, Color::White, sq("e8"));
        assert!(!is_in_check(sq("e1"), Color::White, &board));
    }

    #[test]
    fn back_rank_mate_is_checkmate() {
        let mut board = Board::empty();
        board.place(Role::King, Color::Black, sq("g8"));
        board.place(Role::Pawn, Color::Black, sq("f7"));
        board.place(Role::Pawn, Color::Black, sq("g7"));
        board.place(Role::Pawn, Color::Black, sq("h7"));
        board.place(Role::Rook, Color::White, sq("a8"));
        board.place(Role::King, Color::White, sq("g1"));

        assert!(is_checkmate(Color::Black, &board));
        assert!(!is_checkmate(Color::White, &board));
    }

    #[test]
    fn check_that_can_be_blocked_is_not_checkmate() {
        let mut board = Board::empty();
        board.place(Role::King, Color::Black, sq("g8"));
        board.place(Role::Pawn, Color::Black, sq("f7"));
        board.place(Role::Pawn, Color::Black, sq("g7"));
        board.place(Role::Pawn, Color::Black, sq("h7"));
        board.place(Role::Bishop, Color::Black, sq("e7"));
        board.place(Role::Rook, Color::White, sq("a8"));
        board.place(Role::King, Color::White, sq("g1"));

        assert!(is_in_check(sq("g8"), Color::Black, &board));
        assert!(!is_checkmate(Color::Black, &board));
    }

    #[test]
    fn check_that_can_be_escaped_by_the_king_is_not_checkmate() {
        let mut board = Board::empty();
        board.place(Role::King, Color::Black, sq("g8"));
        board.place(Role::Pawn, Color::Black, sq("f7"));
        board.place(Role::Pawn, Color::Black, sq("g7"));
        board.place(Role::Rook, Color::White, sq("a8"));
        board.place(Role::King, Color::White, sq("g1"));

        assert!(is_in_check(sq("g8"), Color::Black, &board));
        assert!(!is_checkmate(Color::Black, &board));
    }

    #[test]
    fn checking_piece_that_can_be_captured_is_not_checkmate() {
        let mut board = Board::empty();
        board.place(Role::King, Color::Black, sq("g8"));
        board.place(Role::Pawn, Color::Black, sq("f7"));
        board.place(Role::Pawn, Color::Black, sq("g7"));
        board.place(Role::Pawn, Color::Black, sq("h7"));
        board.place(Role::Rook, Color::Black, sq("a1"));
        board.place(Role::Rook, Color::White, sq("a8"));
        board.place(Role::King, Color::White, sq("g1"));

        assert!(is_in_check(sq("g8"), Color::Black, &board));
        assert!(!is_checkmate(Color::Black, &board));
    }
}
