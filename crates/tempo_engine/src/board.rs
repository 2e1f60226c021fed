//! Position collaborator backed by the `shakmaty` rules crate
//!
//! [`ShakmatyBoard`] adapts a [`shakmaty::Chess`] position to the engine's
//! [`Position`] trait. It keeps a stack of snapshots: `make_move` pushes the
//! successor position, `unmake_move` pops it. Each snapshot caches its
//! Zobrist hash, which also drives repetition detection, and generates its
//! legal move list at most once: move generation, checkmate and stalemate
//! all read the same list.
//!
//! # Coordinate System
//!
//! shakmaty and the engine both index squares A1 = 0 .. H8 = 63, so squares
//! convert by a plain cast. Castling is the one place where encodings differ:
//! shakmaty describes castling as "king takes own rook", the engine uses the
//! king's destination square. The adapter translates in both directions.

use std::cell::OnceCell;

use shakmaty::fen::Fen;
use shakmaty::zobrist::Zobrist64;
use shakmaty::{
    CastlingMode, Chess, Color, EnPassantMode, Move as ChessMove, MoveList,
    Position as ShakmatyPosition, Role, Square as ChessSquare,
};

use crate::error::{EngineError, EngineResult};
use crate::position::Position;
use crate::types::{file_of, make_square, rank_of, Move, PieceKind, Side, Square};

/// Halfmove clock value at which the fifty-move rule draws the game
const FIFTY_MOVE_PLIES: u32 = 100;

#[derive(Clone, Debug)]
struct Snapshot {
    chess: Chess,
    hash: u64,
    /// Reached by a null move; repetitions are not tracked across it
    null: bool,
    legal: OnceCell<MoveList>,
}

impl Snapshot {
    fn new(chess: Chess, null: bool) -> Self {
        let hash = chess.zobrist_hash::<Zobrist64>(EnPassantMode::Legal).0;
        Snapshot {
            chess,
            hash,
            null,
            legal: OnceCell::new(),
        }
    }

    fn legal(&self) -> &MoveList {
        self.legal.get_or_init(|| self.chess.legal_moves())
    }

    fn has_no_moves(&self) -> bool {
        self.legal().is_empty()
    }
}

/// Chess position with make/unmake history, backed by shakmaty
#[derive(Clone, Debug)]
pub struct ShakmatyBoard {
    history: Vec<Snapshot>,
}

impl Default for ShakmatyBoard {
    fn default() -> Self {
        Self::from_chess(Chess::default())
    }
}

impl ShakmatyBoard {
    /// Standard starting position
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_chess(chess: Chess) -> Self {
        ShakmatyBoard {
            history: vec![Snapshot::new(chess, false)],
        }
    }

    /// Parse a position from FEN (standard castling rules)
    pub fn from_fen(fen: &str) -> EngineResult<Self> {
        let parsed: Fen = fen.parse().map_err(|err| EngineError::InvalidFen {
            fen: fen.to_string(),
            reason: format!("{err}"),
        })?;
        let chess: Chess =
            parsed
                .into_position(CastlingMode::Standard)
                .map_err(|err| EngineError::InvalidFen {
                    fen: fen.to_string(),
                    reason: format!("{err}"),
                })?;
        Ok(Self::from_chess(chess))
    }

    /// Current shakmaty position
    pub fn chess(&self) -> &Chess {
        &self.current().chess
    }

    /// Play a move given in coordinate notation (`e2e4`, `e7e8q`, `e1g1`)
    pub fn play_coordinate(&mut self, text: &str) -> EngineResult<Move> {
        let mv = self
            .legal_moves()
            .into_iter()
            .find(|mv| mv.matches_coordinate(text))
            .ok_or_else(|| EngineError::IllegalMove {
                mv: text.to_string(),
            })?;
        self.make_move(mv);
        Ok(mv)
    }

    /// Number of snapshots below the current one (game moves plus search moves)
    pub fn history_len(&self) -> usize {
        self.history.len() - 1
    }

    fn current(&self) -> &Snapshot {
        // history is never empty: constructors push the root and unmake never pops it
        &self.history[self.history.len() - 1]
    }

    fn is_repetition(&self) -> bool {
        let current = self.current();
        let reversible = current.chess.halfmoves() as usize;
        self.history
            .iter()
            .rev()
            .skip(1)
            .take(reversible)
            .take_while(|snapshot| !snapshot.null)
            .any(|snapshot| snapshot.hash == current.hash)
    }

    fn to_chess_move(&self, mv: Move) -> ChessMove {
        let from = chess_square(mv.from());
        let to = chess_square(mv.to());

        if mv.is_castle() {
            let rook_file = if file_of(mv.to()) > file_of(mv.from()) { 7 } else { 0 };
            let rook = chess_square(make_square(rook_file, rank_of(mv.from())));
            return ChessMove::Castle { king: from, rook };
        }

        if mv.piece() == PieceKind::Pawn
            && mv.is_capture()
            && self.chess().board().piece_at(to).is_none()
        {
            return ChessMove::EnPassant { from, to };
        }

        ChessMove::Normal {
            role: role_of(mv.piece()),
            from,
            capture: mv.capture().map(role_of),
            to,
            promotion: mv.promotion().map(role_of),
        }
    }

    fn convert_moves<'a>(moves: impl Iterator<Item = &'a ChessMove>) -> Vec<Move> {
        moves.filter_map(engine_move).collect()
    }
}

impl Position for ShakmatyBoard {
    fn legal_moves(&self) -> Vec<Move> {
        Self::convert_moves(self.current().legal().iter())
    }

    fn capture_moves(&self) -> Vec<Move> {
        Self::convert_moves(self.chess().capture_moves().iter())
    }

    fn make_move(&mut self, mv: Move) {
        let chess_move = self.to_chess_move(mv);
        let mut next = self.chess().clone();
        next.play_unchecked(chess_move);
        self.history.push(Snapshot::new(next, false));
    }

    fn unmake_move(&mut self, _mv: Move) {
        debug_assert!(self.history.len() > 1, "unmake_move without make_move");
        if self.history.len() > 1 {
            self.history.pop();
        }
    }

    fn try_null_move(&mut self) -> bool {
        if self.chess().is_check() {
            return false;
        }
        match self.chess().clone().swap_turn() {
            Ok(swapped) => {
                self.history.push(Snapshot::new(swapped, true));
                true
            }
            Err(_) => false,
        }
    }

    fn undo_null_move(&mut self) {
        debug_assert!(self.current().null, "undo_null_move without null move");
        if self.history.len() > 1 && self.current().null {
            self.history.pop();
        }
    }

    fn is_in_check(&self) -> bool {
        self.chess().is_check()
    }

    fn is_checkmate(&self) -> bool {
        self.chess().is_check() && self.current().has_no_moves()
    }

    fn is_draw(&self) -> bool {
        let chess = self.chess();
        chess.is_insufficient_material()
            || chess.halfmoves() >= FIFTY_MOVE_PLIES
            || self.is_repetition()
            || (!chess.is_check() && self.current().has_no_moves())
    }

    fn hash(&self) -> u64 {
        self.current().hash
    }

    fn is_square_attacked_by_opponent(&self, square: Square) -> bool {
        let chess = self.chess();
        let board = chess.board();
        let attackers = board.attacks_to(chess_square(square), !chess.turn(), board.occupied());
        attackers.0 != 0
    }

    fn attacks_from(&self, square: Square) -> u64 {
        self.chess().board().attacks_from(chess_square(square)).0
    }

    fn pieces(&self, side: Side, kind: PieceKind) -> u64 {
        let board = self.chess().board();
        (board.by_color(color_of(side)) & board.by_role(role_of(kind))).0
    }

    fn occupied(&self) -> u64 {
        self.chess().board().occupied().0
    }

    fn king_square(&self, side: Side) -> Option<Square> {
        self.chess()
            .board()
            .king_of(color_of(side))
            .map(engine_square)
    }

    fn ply_count(&self) -> u32 {
        let chess = self.chess();
        (chess.fullmoves().get() - 1) * 2 + u32::from(chess.turn() == Color::Black)
    }

    fn side_to_move(&self) -> Side {
        match self.chess().turn() {
            Color::White => Side::White,
            Color::Black => Side::Black,
        }
    }
}

fn engine_move(mv: &ChessMove) -> Option<Move> {
    match *mv {
        ChessMove::Normal {
            role,
            from,
            capture,
            to,
            promotion,
        } => {
            let mut out = Move::new(kind_of(role), engine_square(from), engine_square(to));
            if let Some(captured) = capture {
                out = out.with_capture(kind_of(captured));
            }
            if let Some(promoted) = promotion {
                out = out.with_promotion(kind_of(promoted));
            }
            Some(out)
        }
        ChessMove::EnPassant { from, to } => Some(
            Move::new(PieceKind::Pawn, engine_square(from), engine_square(to))
                .with_capture(PieceKind::Pawn),
        ),
        ChessMove::Castle { king, rook } => {
            let king = engine_square(king);
            let rook = engine_square(rook);
            let file = if file_of(rook) > file_of(king) { 6 } else { 2 };
            Some(Move::castling(king, make_square(file, rank_of(king))))
        }
        ChessMove::Put { .. } => None,
    }
}

#[inline]
fn engine_square(square: ChessSquare) -> Square {
    square as u8
}

#[inline]
fn chess_square(square: Square) -> ChessSquare {
    ChessSquare::new(u32::from(square))
}

fn kind_of(role: Role) -> PieceKind {
    match role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    }
}

fn role_of(kind: PieceKind) -> Role {
    match kind {
        PieceKind::Pawn => Role::Pawn,
        PieceKind::Knight => Role::Knight,
        PieceKind::Bishop => Role::Bishop,
        PieceKind::Rook => Role::Rook,
        PieceKind::Queen => Role::Queen,
        PieceKind::King => Role::King,
    }
}

fn color_of(side: Side) -> Color {
    match side {
        Side::White => Color::White,
        Side::Black => Color::Black,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::parse_square;

    #[test]
    fn test_start_position_has_twenty_moves() {
        let board = ShakmatyBoard::new();
        assert_eq!(board.legal_moves().len(), 20);
        assert!(board.capture_moves().is_empty());
        assert_eq!(board.ply_count(), 0);
        assert_eq!(board.side_to_move(), Side::White);
        assert_eq!(board.piece_count(), 32);
    }

    #[test]
    fn test_make_unmake_restores_hash() {
        let mut board = ShakmatyBoard::new();
        let before = board.hash();
        let mv = board.play_coordinate("e2e4").unwrap();
        assert_ne!(board.hash(), before);
        assert_eq!(board.ply_count(), 1);
        board.unmake_move(mv);
        assert_eq!(board.hash(), before);
        assert_eq!(board.history_len(), 0);
    }

    #[test]
    fn test_castling_uses_king_destination() {
        let mut board =
            ShakmatyBoard::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let castles: Vec<Move> = board
            .legal_moves()
            .into_iter()
            .filter(|mv| mv.is_castle())
            .collect();
        assert_eq!(castles.len(), 2);
        assert!(castles.iter().any(|mv| mv.coordinate() == "e1g1"));
        assert!(castles.iter().any(|mv| mv.coordinate() == "e1c1"));

        board.play_coordinate("e1g1").unwrap();
        assert_eq!(board.king_square(Side::White), parse_square("g1"));
        let rooks = board.pieces(Side::White, PieceKind::Rook);
        assert_ne!(rooks & (1 << parse_square("f1").unwrap()), 0);
    }

    #[test]
    fn test_en_passant_round_trip() {
        let mut board =
            ShakmatyBoard::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
        let ep = board
            .capture_moves()
            .into_iter()
            .find(|mv| mv.coordinate() == "e5d6")
            .expect("en passant capture generated");
        assert_eq!(ep.capture(), Some(PieceKind::Pawn));
        board.make_move(ep);
        assert_eq!(board.pieces(Side::Black, PieceKind::Pawn), 0);
    }

    #[test]
    fn test_null_move_refused_in_check() {
        let mut board = ShakmatyBoard::from_fen("4k3/8/8/8/8/8/8/4K2r w - - 0 1").unwrap();
        assert!(board.is_in_check());
        assert!(!board.try_null_move());

        let mut quiet = ShakmatyBoard::new();
        let hash = quiet.hash();
        assert!(quiet.try_null_move());
        assert_eq!(quiet.side_to_move(), Side::Black);
        quiet.undo_null_move();
        assert_eq!(quiet.hash(), hash);
    }

    #[test]
    fn test_repetition_is_draw() {
        let mut board = ShakmatyBoard::new();
        for mv in ["g1f3", "g8f6", "f3g1", "f6g8"] {
            board.play_coordinate(mv).unwrap();
        }
        assert!(board.is_draw());
    }

    #[test]
    fn test_attack_queries() {
        let board = ShakmatyBoard::new();
        // e3 is covered by white pawns, not by black
        assert!(!board.is_square_attacked_by_opponent(parse_square("e3").unwrap()));
        // g1 knight attacks f3, h3, e2
        let knight = board.attacks_from(parse_square("g1").unwrap());
        assert_eq!(knight.count_ones(), 3);
    }

    #[test]
    fn test_mate_and_stalemate_from_cached_moves() {
        let mated = ShakmatyBoard::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
        assert!(mated.is_checkmate());
        assert!(!mated.is_draw());
        assert!(mated.legal_moves().is_empty());

        let stalemate = ShakmatyBoard::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(!stalemate.is_checkmate());
        assert!(stalemate.is_draw());

        let mut board = ShakmatyBoard::new();
        assert!(!board.is_checkmate());
        let mv = board.play_coordinate("e2e4").unwrap();
        assert_eq!(board.legal_moves().len(), 20);
        board.unmake_move(mv);
        assert_eq!(board.legal_moves().len(), 20);
        assert!(!board.is_draw());
    }

    #[test]
    fn test_invalid_fen_reports_error() {
        let err = ShakmatyBoard::from_fen("not a fen").unwrap_err();
        assert!(matches!(err, EngineError::InvalidFen { .. }));
    }
}
