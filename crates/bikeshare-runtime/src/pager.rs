//! Cursor over the filtered trips for page-at-a-time raw display.

use bikeshare_core::models::TripRecord;

/// Hands out consecutive, non-overlapping pages of `page_size` rows.
///
/// The only state is the cursor; the rows themselves are borrowed.
#[derive(Debug)]
pub struct RowPager<'a> {
    rows: &'a [TripRecord],
    cursor: usize,
    page_size: usize,
}

impl<'a> RowPager<'a> {
    /// A `page_size` of zero is treated as one.
    pub fn new(rows: &'a [TripRecord], page_size: usize) -> Self {
        Self {
            rows,
            cursor: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Rows not yet handed out.
    pub fn remaining(&self) -> usize {
        self.rows.len() - self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}

impl<'a> Iterator for RowPager<'a> {
    type Item = &'a [TripRecord];

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_exhausted() {
            return None;
        }
        let end = (self.cursor + self.page_size).min(self.rows.len());
        let page = &self.rows[self.cursor..end];
        self.cursor = end;
        Some(page)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
