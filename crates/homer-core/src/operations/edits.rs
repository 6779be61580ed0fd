//! Positional edits applied to a loaded [`ConfigDocument`].
//!
//! Categories and items have no identity besides their index.  Each edit
//! returns `true` when the document changed and `false` when the position
//! did not resolve (or a move would leave the list), in which case the
//! document is untouched and the caller skips the write.

use tracing::debug;

use super::inputs::{CategoryInput, Direction, GlobalSettingsInput, ItemUpdateInput, NewItemInput};
use crate::domain::document::{ConfigDocument, ServiceCategory, ServiceItem};

impl ConfigDocument {
    pub fn category(&self, index: usize) -> Option<&ServiceCategory> {
        self.services.get(index)
    }

    pub fn item(&self, category: usize, item: usize) -> Option<&ServiceItem> {
        self.services.get(category)?.items.get(item)
    }

    /// Overwrites title, subtitle, columns, and theme.
    pub fn apply_global_settings(&mut self, input: GlobalSettingsInput) -> bool {
        self.title = input.title;
        self.subtitle = input.subtitle;
        self.columns = input.columns;
        self.theme = input.theme;
        true
    }

    /// Appends a new empty category at the end.
    pub fn push_category(&mut self, input: CategoryInput) -> bool {
        self.services.push(input.into_category());
        true
    }

    /// Removes the category at `index`, shifting later categories down by one.
    pub fn remove_category(&mut self, index: usize) -> bool {
        if index >= self.services.len() {
            debug!(index, "remove_category: index out of range");
            return false;
        }
        self.services.remove(index);
        true
    }

    /// Swaps the category at `index` with its neighbour.
    pub fn move_category(&mut self, index: usize, direction: Direction) -> bool {
        swap_with_neighbour(&mut self.services, index, direction)
    }

    /// Renames a category and replaces its icon.  Items are kept.
    pub fn update_category(&mut self, index: usize, input: CategoryInput) -> bool {
        match self.services.get_mut(index) {
            Some(category) => {
                category.name = input.name;
                category.icon = input.icon;
                true
            }
            None => false,
        }
    }

    /// Appends an item to the category at `category`.
    pub fn push_item(&mut self, category: usize, input: NewItemInput) -> bool {
        match self.services.get_mut(category) {
            Some(target) => {
                target.items.push(input.into_item());
                true
            }
            None => false,
        }
    }

    pub fn remove_item(&mut self, category: usize, item: usize) -> bool {
        let Some(items) = self.items_mut(category) else {
            return false;
        };
        if item >= items.len() {
            return false;
        }
        items.remove(item);
        true
    }

    pub fn move_item(&mut self, category: usize, item: usize, direction: Direction) -> bool {
        self.items_mut(category)
            .is_some_and(|items| swap_with_neighbour(items, item, direction))
    }

    pub fn update_item(&mut self, category: usize, item: usize, input: ItemUpdateInput) -> bool {
        match self.items_mut(category).and_then(|items| items.get_mut(item)) {
            Some(target) => {
                input.apply_to(target);
                true
            }
            None => false,
        }
    }

    fn items_mut(&mut self, category: usize) -> Option<&mut Vec<ServiceItem>> {
        self.services.get_mut(category).map(|c| &mut c.items)
    }
}

/// Swaps `list[index]` with the element before (`Up`) or after (`Down`) it.
///
/// Moving the first element up or the last element down is a no-op.
fn swap_with_neighbour<T>(list: &mut [T], index: usize, direction: Direction) -> bool {
    if index >= list.len() {
        return false;
    }
    let neighbour = match direction {
        Direction::Up => index.checked_sub(1),
        Direction::Down => Some(index + 1).filter(|&n| n < list.len()),
    };
    match neighbour {
        Some(n) => {
            list.swap(index, n);
            true
        }
        None => false,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
