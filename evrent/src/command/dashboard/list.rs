/// A cursor over rows rendered in a fixed-height area.
#[derive(Debug)]
pub(super) struct List<T> {
    items: Vec<T>,
    offset: usize,
    selected: usize,
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            offset: 0,
            selected: 0,
        }
    }
}

impl<T> List<T> {
    pub(super) fn items(&self) -> &[T] {
        &self.items
    }

    pub(super) fn offset(&self) -> usize {
        self.offset
    }

    pub(super) fn selected_index(&self) -> usize {
        self.selected
    }

    pub(super) fn selected(&self) -> Option<&T> {
        self.items.get(self.selected)
    }

    /// Replaces the rows and keeps the cursor inside the new bounds.
    pub(super) fn set_data(&mut self, data: Vec<T>) {
        self.selected = self.selected.min(data.len().saturating_sub(1));
        self.offset = self.offset.min(self.selected);
        self.items = data;
    }

    pub(super) fn reset(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }

    pub(super) fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub(super) fn move_down(&mut self) {
        self.selected = (self.selected + 1).min(self.items.len().saturating_sub(1));
    }

    /// Scrolls so the selected row is inside a window of `height` rows.
    pub(super) fn follow(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + height {
            self.offset = self.selected + 1 - height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(n: usize) -> List<usize> {
        let mut list = List::default();
        list.set_data((0..n).collect());
        list
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut list = list(3);
        list.move_up();
        assert_eq!(list.selected(), Some(&0));
        for _ in 0..5 {
            list.move_down();
        }
        assert_eq!(list.selected(), Some(&2));

        list.set_data(vec![7]);
        assert_eq!(list.selected(), Some(&7));

        list.set_data(Vec::new());
        assert_eq!(list.selected(), None);
    }

    #[test]
    fn follow_scrolls_both_ways() {
        let mut list = list(10);
        for _ in 0..6 {
            list.move_down();
        }
        list.follow(4);
        assert_eq!(list.offset(), 3);

        for _ in 0..5 {
            list.move_up();
        }
        list.follow(4);
        assert_eq!(list.offset(), 1);
    }
}
