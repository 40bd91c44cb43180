//! Falling glyph streams.

use rand::Rng;

/// Row positions of every drop in one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropColumn {
    pub rows: Vec<u32>,
}

impl DropColumn {
    /// A column of `drops` drops at random rows in `[0, max_rows)`.
    pub fn random<R: Rng + ?Sized>(drops: usize, max_rows: u32, rng: &mut R) -> Self {
        Self {
            rows: (0..drops).map(|_| random_row(max_rows, rng)).collect(),
        }
    }
}

/// Initialize drop columns for the given grid.
pub fn init_columns<R: Rng + ?Sized>(
    columns: usize,
    drops_per_column: usize,
    max_rows: u32,
    rng: &mut R,
) -> Vec<DropColumn> {
    (0..columns)
        .map(|_| DropColumn::random(drops_per_column, max_rows, rng))
        .collect()
}

fn random_row<R: Rng + ?Sized>(max_rows: u32, rng: &mut R) -> u32 {
    if max_rows == 0 {
        0
    } else {
        rng.gen_range(0..max_rows)
    }
}

/// Move a drop down one row.
///
/// A drop that has fallen past the bottom edge only restarts at the top when
/// a `reset_probability` roll succeeds, so streams of different lengths stay
/// in flight instead of looping in sync.
pub fn advance<R: Rng + ?Sized>(
    row: &mut u32,
    cell_size: u32,
    surface_height: u32,
    reset_probability: f64,
    rng: &mut R,
) {
    let below_bottom = u64::from(*row) * u64::from(cell_size) > u64::from(surface_height);
    if below_bottom && rng.gen_bool(reset_probability) {
        *row = 0;
    } else {
        *row = row.saturating_add(1);
    }
}
