//! Screen geometry: margins, cell metrics, scrolling and hit-testing.
//!
//! Coordinates are terminal cells. Each buffer character is assumed to
//! occupy one cell.

use sudo_edit_core::Position;

/// Minimum width of the line number gutter, including its trailing space.
pub const MIN_GUTTER_WIDTH: u16 = 4;

/// Maps buffer positions to screen cells and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Columns taken by the gutter before the text starts.
    pub left_margin: u16,
    /// Rows above the first text row.
    pub top_margin: u16,
    /// Width of one character in cells.
    pub cell_width: u16,
    /// Height of one line in cells.
    pub cell_height: u16,
    /// First buffer row shown on screen.
    pub scroll_row: usize,
    /// Number of text rows that fit on screen.
    pub visible_rows: u16,
    /// Number of columns that fit on screen, gutter included.
    pub width: u16,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(MIN_GUTTER_WIDTH, 0)
    }
}

impl Layout {
    pub fn new(left_margin: u16, top_margin: u16) -> Self {
        Self {
            left_margin,
            top_margin,
            cell_width: 1,
            cell_height: 1,
            scroll_row: 0,
            visible_rows: 24,
            width: 80,
        }
    }

    /// Gutter width for a document with `line_count` lines: the widest line
    /// number plus one space.
    pub fn gutter_width(line_count: usize) -> u16 {
        let digits = line_count.max(1).to_string().len() as u16;
        (digits + 1).max(MIN_GUTTER_WIDTH)
    }

    /// Adapts the left margin to the document's line count.
    /// Returns true if the margin changed.
    pub fn fit_gutter(&mut self, line_count: usize) -> bool {
        let width = Self::gutter_width(line_count);
        let changed = width != self.left_margin;
        self.left_margin = width;
        changed
    }

    /// Updates the viewport size. `height` is the total height; the text
    /// area is what remains after `reserved_rows` and the top margin.
    pub fn resize(&mut self, width: u16, height: u16, reserved_rows: u16) {
        self.width = width;
        let text_height = height.saturating_sub(self.top_margin + reserved_rows);
        self.visible_rows = (text_height / self.cell_height.max(1)).max(1);
    }

    /// Converts a screen cell into an unclamped buffer position.
    ///
    /// Clicks in the gutter or above the text produce negative coordinates,
    /// which the buffer clamps.
    pub fn hit_test(&self, x: u16, y: u16) -> (i64, i64) {
        let dx = i64::from(x) - i64::from(self.left_margin);
        let dy = i64::from(y) - i64::from(self.top_margin);
        let row = dy.div_euclid(i64::from(self.cell_height.max(1)))
            + i64::try_from(self.scroll_row).unwrap_or(i64::MAX);
        let col = dx.div_euclid(i64::from(self.cell_width.max(1)));
        (row, col)
    }

    /// Returns the screen row of a buffer row, if it is scrolled into view.
    pub fn screen_row(&self, row: usize) -> Option<u16> {
        let offset = row.checked_sub(self.scroll_row)?;
        if offset >= usize::from(self.visible_rows) {
            return None;
        }
        let y = offset * usize::from(self.cell_height) + usize::from(self.top_margin);
        u16::try_from(y).ok()
    }

    /// Screen cell of the cursor, if visible. Columns past the right edge
    /// are pinned to the last column.
    pub fn cursor_origin(&self, pos: Position) -> Option<(u16, u16)> {
        let y = self.screen_row(pos.row)?;
        let x = pos.col * usize::from(self.cell_width) + usize::from(self.left_margin);
        let max_x = usize::from(self.width.saturating_sub(1));
        Some((x.min(max_x) as u16, y))
    }

    /// Scrolls so that `row` is visible. Returns true if the view moved.
    pub fn scroll_to(&mut self, row: usize) -> bool {
        let visible = usize::from(self.visible_rows.max(1));
        let previous = self.scroll_row;
        if row < self.scroll_row {
            self.scroll_row = row;
        } else if row >= self.scroll_row + visible {
            self.scroll_row = row + 1 - visible;
        }
        self.scroll_row != previous
    }
}
