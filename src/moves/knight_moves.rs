//! Knight geometry.

/// (d_row, d_column) of every knight jump.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// A knight moves |d_row| + |d_column| == 3 with neither delta zero.
#[inline]
pub const fn knight_move_is_legal(d_row: i8, d_column: i8) -> bool {
    let (r, c) = (d_row.unsigned_abs(), d_column.unsigned_abs());
    r + c == 3 && r != 0 && c != 0
}
