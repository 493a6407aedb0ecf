//! Layout primitives for screen-space UI.
//!
//! Everything is in physical pixels with the origin at the top-left corner. All arithmetic
//! saturates, so degenerate layouts (tiny windows, oversized insets) collapse to empty rects
//! instead of panicking.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn from_size(w: u32, h: u32) -> Self {
        Self { x: 0, y: 0, w, h }
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Inner content area after removing `insets` from each edge.
    pub fn inset(&self, insets: Insets) -> Self {
        Self {
            x: self.x.saturating_add(insets.left),
            y: self.y.saturating_add(insets.top),
            w: self
                .w
                .saturating_sub(insets.left.saturating_add(insets.right)),
            h: self
                .h
                .saturating_sub(insets.top.saturating_add(insets.bottom)),
        }
    }

    /// Places a `w`x`h` child inside this rect according to `anchor`, clamping the child to fit.
    pub fn place(&self, w: u32, h: u32, anchor: Anchor) -> Self {
        let w = w.min(self.w);
        let h = h.min(self.h);
        let free_x = self.w - w;
        let free_y = self.h - h;

        let (fx, fy) = anchor.factors();
        Self {
            x: self.x + free_x * fx / 2,
            y: self.y + free_y * fy / 2,
            w,
            h,
        }
    }

    /// Top `h` pixels of this rect, and the remainder below it.
    pub fn split_top(&self, h: u32) -> (Self, Self) {
        let h = h.min(self.h);
        (
            Self::new(self.x, self.y, self.w, h),
            Self::new(self.x, self.y + h, self.w, self.h - h),
        )
    }

    /// Splits this rect into a `cols` x `rows` grid of equally sized cells separated by `gap`.
    ///
    /// Cells are returned row-major. Leftover pixels from integer division stay at the
    /// right/bottom edge.
    pub fn grid(&self, cols: u32, rows: u32, gap: u32) -> Vec<Self> {
        if cols == 0 || rows == 0 {
            return Vec::new();
        }
        let cell_w = self.w.saturating_sub(gap.saturating_mul(cols - 1)) / cols;
        let cell_h = self.h.saturating_sub(gap.saturating_mul(rows - 1)) / rows;

        let mut cells = Vec::with_capacity((cols * rows) as usize);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(Self::new(
                    self.x + col * (cell_w + gap),
                    self.y + row * (cell_h + gap),
                    cell_w,
                    cell_h,
                ));
            }
        }
        cells
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Insets {
    pub const ZERO: Insets = Insets::all(0);

    pub const fn all(v: u32) -> Self {
        Self {
            left: v,
            top: v,
            right: v,
            bottom: v,
        }
    }

    pub const fn symmetric(horizontal: u32, vertical: u32) -> Self {
        Self {
            left: horizontal,
            top: vertical,
            right: horizontal,
            bottom: vertical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopCenter,
    Center,
    BottomCenter,
    BottomRight,
}

impl Anchor {
    // Position of the child within the free space, in halves (0 = start, 1 = middle, 2 = end).
    fn factors(self) -> (u32, u32) {
        match self {
            Anchor::TopLeft => (0, 0),
            Anchor::TopCenter => (1, 0),
            Anchor::Center => (1, 1),
            Anchor::BottomCenter => (1, 2),
            Anchor::BottomRight => (2, 2),
        }
    }
}
