//! Grid layout for sectioned character charts
//!
//! Provides:
//! - Row-major cell placement inside each section
//! - Vertical offsets, with a spacer row between sections
//! - Navigation helpers (up/down/left/right/home/end) crossing sections
//! - Scroll offset to keep the selection visible

use crate::partition::Section;

/// Blank rows between two sections
pub const SECTION_GAP: u16 = 1;

/// Shape of one section, detached from the entries it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionShape {
    pub offset: usize,
    pub len: usize,
    pub columns: usize,
}

impl SectionShape {
    fn rows(&self) -> usize {
        self.len.div_ceil(self.columns)
    }

    fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Number of cells on `row`
    fn row_len(&self, row: usize) -> usize {
        self.len
            .saturating_sub(row * self.columns)
            .min(self.columns)
    }
}

/// Where an entry sits on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPosition {
    pub section: usize,
    pub row: usize,
    pub col: usize,
}

/// Grid of sections, each with its own column count
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionGrid {
    shapes: Vec<SectionShape>,
}

impl SectionGrid {
    pub fn new<A>(sections: &[Section<'_, A>]) -> Self {
        let shapes = sections
            .iter()
            .map(|s| SectionShape {
                offset: s.offset,
                len: s.len(),
                columns: (s.columns as usize).max(1),
            })
            .collect();
        Self { shapes }
    }

    pub fn shapes(&self) -> &[SectionShape] {
        &self.shapes
    }

    /// Total number of entries across sections
    pub fn total(&self) -> usize {
        self.shapes.iter().map(|s| s.len).sum()
    }

    /// Locate an entry by dataset index
    pub fn position(&self, index: usize) -> Option<CellPosition> {
        self.shapes
            .iter()
            .enumerate()
            .find(|(_, s)| index >= s.offset && index < s.end())
            .map(|(section, s)| {
                let local = index - s.offset;
                CellPosition {
                    section,
                    row: local / s.columns,
                    col: local % s.columns,
                }
            })
    }

    /// Dataset index of a cell, if the cell exists
    pub fn index_at(&self, pos: CellPosition) -> Option<usize> {
        let shape = self.shapes.get(pos.section)?;
        if pos.col >= shape.columns {
            return None;
        }
        let local = pos.row * shape.columns + pos.col;
        (local < shape.len).then_some(shape.offset + local)
    }

    /// Top line of each section, given the height of one card row
    fn section_top(&self, section: usize, card_height: u16) -> usize {
        let card_height = card_height as usize;
        let mut y = 0;
        for shape in self.shapes.iter().take(section) {
            if shape.len > 0 {
                y += shape.rows() * card_height + SECTION_GAP as usize;
            }
        }
        y
    }

    /// Top line of the card holding `index`
    pub fn card_top(&self, index: usize, card_height: u16) -> Option<usize> {
        let pos = self.position(index)?;
        Some(self.section_top(pos.section, card_height) + pos.row * card_height as usize)
    }

    /// Total height in lines of the whole grid
    pub fn content_height(&self, card_height: u16) -> usize {
        let last_filled = self.shapes.iter().rposition(|s| s.len > 0);
        match last_filled {
            Some(last) => {
                self.section_top(last, card_height) + self.shapes[last].rows() * card_height as usize
            }
            None => 0,
        }
    }

    /// Adjust `scroll` so the card at `selected` fits in `viewport` lines
    ///
    /// Never scrolls past the point where the grid's last line sits at the
    /// bottom of the viewport.
    pub fn scroll_to(&self, selected: usize, scroll: usize, card_height: u16, viewport: u16) -> usize {
        let Some(top) = self.card_top(selected, card_height) else {
            return 0;
        };
        let bottom = top + card_height as usize;
        let viewport = viewport as usize;

        let scroll = if top < scroll {
            top
        } else if bottom > scroll + viewport {
            bottom.saturating_sub(viewport)
        } else {
            scroll
        };
        scroll.min(self.content_height(card_height).saturating_sub(viewport))
    }

    /// Calculate new selection after moving left
    pub fn move_left(&self, current: usize) -> usize {
        current.saturating_sub(1)
    }

    /// Calculate new selection after moving right
    pub fn move_right(&self, current: usize) -> usize {
        if current + 1 < self.total() {
            current + 1
        } else {
            current
        }
    }

    /// Calculate new selection after moving up one row
    ///
    /// From the top row of a section, moves to the last row of the previous
    /// non-empty section, keeping the column when that row is long enough.
    pub fn move_up(&self, current: usize) -> usize {
        let Some(pos) = self.position(current) else {
            return current;
        };

        if pos.row > 0 {
            return self
                .index_at(CellPosition { row: pos.row - 1, ..pos })
                .unwrap_or(current);
        }

        self.shapes[..pos.section]
            .iter()
            .enumerate()
            .rev()
            .find(|(_, s)| s.len > 0)
            .and_then(|(section, prev)| {
                let row = prev.rows() - 1;
                let col = pos.col.min(prev.row_len(row) - 1);
                self.index_at(CellPosition { section, row, col })
            })
            .unwrap_or(current)
    }

    /// Calculate new selection after moving down one row
    ///
    /// A shorter next row clamps to its last cell. From the bottom row of a
    /// section, moves to the first row of the next non-empty section.
    pub fn move_down(&self, current: usize) -> usize {
        let Some(pos) = self.position(current) else {
            return current;
        };
        let shape = &self.shapes[pos.section];

        if pos.row + 1 < shape.rows() {
            return (current + shape.columns).min(shape.end() - 1);
        }

        self.shapes[pos.section + 1..]
            .iter()
            .find(|s| s.len > 0)
            .map(|next| next.offset + pos.col.min(next.row_len(0) - 1))
            .unwrap_or(current)
    }

    /// Move to first entry
    pub fn move_home(&self) -> usize {
        0
    }

    /// Move to last entry
    pub fn move_end(&self) -> usize {
        self.total().saturating_sub(1)
    }
}

/// Navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl SectionGrid {
    pub fn step(&self, current: usize, direction: Direction) -> usize {
        match direction {
            Direction::Up => self.move_up(current),
            Direction::Down => self.move_down(current),
            Direction::Left => self.move_left(current),
            Direction::Right => self.move_right(current),
        }
    }
}
