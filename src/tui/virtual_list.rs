//! Windowed rendering for long lists
//!
//! Only rows intersecting the viewport, plus an overscan margin on each side,
//! are built. Offsets and sizes are in terminal lines so a row may span more
//! than one line.

use std::ops::Range;

/// Rows rendered above and below the viewport unless configured otherwise
pub const DEFAULT_OVERSCAN: usize = 10;

/// The slice of a list that should be rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VirtualWindow {
    /// First index to render (inclusive)
    pub start: usize,
    /// Last index to render (exclusive)
    pub end: usize,
    /// Height of the whole list in lines
    pub total_size: usize,
}

impl VirtualWindow {
    /// Window for `len` rows scrolled to `scroll_offset` lines
    pub fn compute(
        len: usize,
        scroll_offset: usize,
        viewport: usize,
        row_height: usize,
        overscan: usize,
    ) -> Self {
        let row_height = row_height.max(1);
        let total_size = len * row_height;

        if len == 0 || viewport == 0 {
            return Self {
                start: 0,
                end: 0,
                total_size,
            };
        }

        let first_visible = (scroll_offset / row_height).min(len - 1);
        let last_visible = (scroll_offset + viewport).div_ceil(row_height).min(len);

        Self {
            start: first_visible.saturating_sub(overscan),
            end: (last_visible + overscan).min(len),
            total_size,
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }
}

/// Scroll state for one virtualised list
#[derive(Debug, Clone)]
pub struct VirtualList {
    len: usize,
    viewport: usize,
    row_height: usize,
    overscan: usize,
    scroll_offset: usize,
}

impl VirtualList {
    pub fn new(row_height: usize, overscan: usize) -> Self {
        Self {
            len: 0,
            viewport: 0,
            row_height: row_height.max(1),
            overscan,
            scroll_offset: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn viewport(&self) -> usize {
        self.viewport
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn total_size(&self) -> usize {
        self.len * self.row_height
    }

    /// Largest offset that still fills the viewport
    pub fn max_offset(&self) -> usize {
        self.total_size().saturating_sub(self.viewport)
    }

    /// Rows that fit in the viewport
    pub fn visible_rows(&self) -> usize {
        (self.viewport / self.row_height).max(1)
    }

    /// First row at least partly on screen
    pub fn first_visible(&self) -> usize {
        self.scroll_offset / self.row_height
    }

    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.clamp();
    }

    pub fn set_viewport(&mut self, viewport: usize) {
        self.viewport = viewport;
        self.clamp();
    }

    pub fn scroll_to(&mut self, offset: usize) {
        self.scroll_offset = offset;
        self.clamp();
    }

    pub fn reset(&mut self) {
        self.len = 0;
        self.scroll_offset = 0;
    }

    /// Scroll the minimum amount needed to show `index` in full
    pub fn ensure_visible(&mut self, index: usize) {
        let top = index * self.row_height;
        let bottom = top + self.row_height;
        if top < self.scroll_offset {
            self.scroll_offset = top;
        } else if bottom > self.scroll_offset + self.viewport {
            self.scroll_offset = bottom.saturating_sub(self.viewport);
        }
        self.clamp();
    }

    pub fn window(&self) -> VirtualWindow {
        VirtualWindow::compute(
            self.len,
            self.scroll_offset,
            self.viewport,
            self.row_height,
            self.overscan,
        )
    }

    fn clamp(&mut self) {
        self.scroll_offset = self.scroll_offset.min(self.max_offset());
    }
}

impl Default for VirtualList {
    fn default() -> Self {
        Self::new(1, DEFAULT_OVERSCAN)
    }
}
