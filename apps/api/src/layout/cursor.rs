//! Vertical cursor threaded through one layout pass.

/// Current page and baseline offset. Created per pass and dropped with it.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutCursor {
    page_index: u32,
    y: f32,
    top_margin: f32,
    usable_height: f32,
}

impl LayoutCursor {
    pub fn new(start_y: f32, top_margin: f32, usable_height: f32) -> Self {
        LayoutCursor {
            page_index: 0,
            y: start_y,
            top_margin,
            usable_height,
        }
    }

    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn page_count(&self) -> u32 {
        self.page_index + 1
    }

    pub fn usable_height(&self) -> f32 {
        self.usable_height
    }

    pub fn advance(&mut self, dy: f32) {
        self.y += dy;
    }

    /// Close the current page and move to the top margin of the next one.
    pub fn break_page(&mut self) {
        self.page_index += 1;
        self.y = self.top_margin;
    }

    /// The page-break rule, applied before placing a unit whose last line sits
    /// `extent` below the cursor.
    ///
    /// Breaks when the cursor is already past the usable height, or when the
    /// unit would cross it and something is already placed above the cursor on
    /// this page. A unit taller than a whole page is therefore moved at most
    /// once. Returns whether a break happened.
    pub fn ensure_room(&mut self, extent: f32) -> bool {
        let past_bound = self.y > self.usable_height;
        let would_cross = self.y + extent > self.usable_height && self.y > self.top_margin;
        if past_bound || would_cross {
            self.break_page();
            return true;
        }
        false
    }
}
