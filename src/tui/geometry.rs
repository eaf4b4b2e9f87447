//! Terminal geometry tracking with a fixed fallback.

use tracing::warn;

/// Fallback size used when the terminal cannot be queried or reports a
/// degenerate height.
const FALLBACK: (u16, u16) = (80, 24);

/// Rows consumed by the summary block, header and chrome; the rest is
/// available for cache rows.
const FIXED_OVERHEAD: u16 = 8;

/// Minimum believable row count from a size query.
const MIN_ROWS: u16 = 10;

/// Current screen size in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub cols: u16,
    pub rows: u16,
}

impl Geometry {
    /// Queries the current terminal size, falling back to 80x24 on failure
    /// or a degenerate result.
    pub fn probe() -> Self {
        match crossterm::terminal::size() {
            Ok((cols, rows)) if rows > MIN_ROWS => Self { cols, rows },
            Ok((cols, rows)) => {
                warn!("degenerate terminal size {}x{}, using fallback", cols, rows);
                Self::fallback()
            }
            Err(e) => {
                warn!("terminal size query failed ({}), using fallback", e);
                Self::fallback()
            }
        }
    }

    /// Applies a reported resize, with the same degenerate-size fallback as
    /// [`Geometry::probe`].
    pub fn update(&mut self, cols: u16, rows: u16) {
        *self = if rows > MIN_ROWS {
            Self { cols, rows }
        } else {
            warn!("degenerate resize to {}x{}, using fallback", cols, rows);
            Self::fallback()
        };
    }

    /// Number of cache rows that fit below the summary and header.
    pub fn available_rows(&self) -> usize {
        self.rows.saturating_sub(FIXED_OVERHEAD) as usize
    }

    pub fn fallback() -> Self {
        Self {
            cols: FALLBACK.0,
            rows: FALLBACK.1,
        }
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::fallback()
    }
}
