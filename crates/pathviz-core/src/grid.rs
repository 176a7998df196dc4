//! The obstacle grid a search runs over.
//!
//! A [`Grid`] is a rectangle of open or blocked cells stored row-major in a
//! flat buffer. It is mutable while it is being built (terrain generation,
//! editing between runs) and handed to a search by value, so a running
//! search always sees a fixed snapshot.

use std::fmt;

use crate::geom::{Point, Range};

/// A 2D obstacle mask with `columns × rows` cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    blocked: Vec<bool>,
    bounds: Range,
}

impl Grid {
    /// Create a grid with every cell open. Negative sizes are clamped to 0.
    pub fn new(columns: i32, rows: i32) -> Self {
        let bounds = Range::with_size(columns.max(0), rows.max(0));
        Self {
            blocked: vec![false; bounds.len()],
            bounds,
        }
    }

    /// Build a grid from a row-major mask where `mask[y][x]` is `true` for a
    /// blocked cell.
    ///
    /// Every row must have the same non-zero length and there must be at
    /// least one row.
    pub fn from_mask<R: AsRef<[bool]>>(mask: &[R]) -> Result<Self, GridError> {
        let rows = mask.len();
        let columns = mask.first().map_or(0, |r| r.as_ref().len());
        if rows == 0 || columns == 0 {
            return Err(GridError::Empty);
        }
        let mut blocked = Vec::with_capacity(rows * columns);
        for (y, row) in mask.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != columns {
                return Err(GridError::RaggedRow {
                    row: y,
                    expected: columns,
                    found: row.len(),
                });
            }
            blocked.extend_from_slice(row);
        }
        Ok(Self {
            blocked,
            bounds: Range::with_size(columns as i32, rows as i32),
        })
    }

    /// Parse a textual map: `#` is blocked, `.` is open, one line per row.
    ///
    /// Leading and trailing blank lines are ignored, as is indentation.
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let mut mask = Vec::new();
        for (y, line) in text.lines().map(str::trim).filter(|l| !l.is_empty()).enumerate() {
            let mut row = Vec::with_capacity(line.len());
            for (x, ch) in line.chars().enumerate() {
                match ch {
                    '#' => row.push(true),
                    '.' => row.push(false),
                    _ => {
                        return Err(GridError::InvalidChar {
                            ch,
                            pos: Point::new(x as i32, y as i32),
                        });
                    }
                }
            }
            mask.push(row);
        }
        Self::from_mask(&mask)
    }

    /// Number of columns (width).
    #[inline]
    pub fn columns(&self) -> i32 {
        self.bounds.width()
    }

    /// Number of rows (height).
    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.height()
    }

    /// The bounding range, anchored at the origin.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.blocked.len()
    }

    /// Whether the grid has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocked.is_empty()
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Whether `p` cannot be entered. Out-of-bounds points count as blocked.
    #[inline]
    pub fn blocked(&self, p: Point) -> bool {
        match self.bounds.index_of(p) {
            Some(i) => self.blocked[i],
            None => true,
        }
    }

    /// Mark `p` as blocked or open. Does nothing if out of bounds.
    pub fn set_blocked(&mut self, p: Point, blocked: bool) {
        if let Some(i) = self.bounds.index_of(p) {
            self.blocked[i] = blocked;
        }
    }

    /// Flip the state of `p`. Does nothing if out of bounds.
    pub fn toggle(&mut self, p: Point) {
        if let Some(i) = self.bounds.index_of(p) {
            self.blocked[i] = !self.blocked[i];
        }
    }

    /// Number of open cells.
    pub fn open_count(&self) -> usize {
        self.blocked.iter().filter(|&&b| !b).count()
    }

    /// Append the open orthogonal neighbours of `p` to `buf`, in the order
    /// left, right, up, down. The caller clears `buf` before calling.
    pub fn neighbors_into(&self, p: Point, buf: &mut Vec<Point>) {
        for n in p.neighbors_4() {
            if !self.blocked(n) {
                buf.push(n);
            }
        }
    }

    /// Open orthogonal neighbours of `p`, in the order left, right, up, down.
    pub fn neighbors(&self, p: Point) -> Vec<Point> {
        let mut buf = Vec::with_capacity(4);
        self.neighbors_into(p, &mut buf);
        buf
    }

    /// Iterate over `(Point, blocked)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, bool)> + '_ {
        self.bounds.iter().zip(self.blocked.iter().copied())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.rows() {
            for x in 0..self.columns() {
                let ch = if self.blocked(Point::new(x, y)) { '#' } else { '.' };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Errors that can occur when building a [`Grid`] from a mask or text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The mask has no rows or no columns.
    Empty,
    /// A row's length differs from the first row's.
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A character other than `#` or `.` was found.
    InvalidChar { ch: char, pos: Point },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "grid: mask has no cells"),
            Self::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "grid: row {row} has {found} cells, expected {expected}"
            ),
            Self::InvalidChar { ch, pos } => {
                write!(f, "grid: invalid character \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for GridError {}
