/// How much of the match set is on screen: `page * page_size` books.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    page: usize,
    page_size: usize,
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Moves to the next page if `total` still has books past the window.
    /// Returns whether the page changed.
    pub fn advance(&mut self, total: usize) -> bool {
        if self.remaining(total) == 0 {
            return false;
        }
        self.page += 1;
        true
    }

    pub fn remaining(&self, total: usize) -> usize {
        total.saturating_sub(self.capacity())
    }

    pub fn window_end(&self, total: usize) -> usize {
        total.min(self.capacity())
    }

    fn capacity(&self) -> usize {
        self.page.saturating_mul(self.page_size)
    }
}
