//! Row editor: one in-memory title edit at a time.

use crate::product::{Product, ProductId};

/// Keys the editor reacts to while an edit is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Confirm,
    Cancel,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The product's title now holds the staged text.
    Applied { id: ProductId, previous: String },
    /// The edited product is no longer in the list; the edit was dropped.
    ProductMissing { id: ProductId },
    /// `id` is not the row being edited. Nothing changed.
    NotEditing { id: ProductId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Committed(CommitOutcome),
    Cancelled { id: ProductId },
}

/// Edit State. The staging buffer only means something while `editing` is set.
#[derive(Debug, Clone, Default)]
pub struct EditState {
    editing: Option<ProductId>,
    staged: String,
    focus_requested: bool,
}

impl EditState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_id(&self) -> Option<ProductId> {
        self.editing
    }

    pub fn is_active(&self) -> bool {
        self.editing.is_some()
    }

    pub fn is_editing(&self, id: ProductId) -> bool {
        self.editing == Some(id)
    }

    /// The staged title, if an edit is active.
    pub fn staged(&self) -> Option<&str> {
        self.editing.map(|_| self.staged.as_str())
    }

    /// Start editing `id`, replacing whatever edit was in progress.
    pub fn begin_edit(&mut self, id: ProductId, current_title: impl Into<String>) {
        if let Some(previous) = self.editing.filter(|prev| *prev != id) {
            tracing::debug!(%previous, next = %id, "discarding unsaved edit");
        }
        self.editing = Some(id);
        self.staged = current_title.into();
        self.focus_requested = true;
    }

    /// Overwrite the staging buffer. Ignored when no edit is active.
    pub fn update_staged(&mut self, text: impl Into<String>) -> bool {
        if self.editing.is_none() {
            return false;
        }
        self.staged = text.into();
        true
    }

    /// Write the staged text into the title of `id` and end the edit.
    pub fn commit_edit(&mut self, products: &mut [Product], id: ProductId) -> CommitOutcome {
        if self.editing != Some(id) {
            return CommitOutcome::NotEditing { id };
        }
        let staged = std::mem::take(&mut self.staged);
        self.clear();
        match products.iter_mut().find(|p| p.id == id) {
            Some(product) => {
                let previous = std::mem::replace(&mut product.title, staged);
                tracing::info!(%id, title = %product.title, "product title updated");
                CommitOutcome::Applied { id, previous }
            }
            None => {
                tracing::warn!(%id, "edited product no longer listed");
                CommitOutcome::ProductMissing { id }
            }
        }
    }

    /// Drop the edit without touching any product.
    pub fn cancel_edit(&mut self) -> Option<ProductId> {
        let cancelled = self.editing;
        self.clear();
        cancelled
    }

    /// Discard the edit if its product has disappeared from `products`.
    pub fn reconcile(&mut self, products: &[Product]) -> bool {
        match self.editing {
            Some(id) if !products.iter().any(|p| p.id == id) => {
                tracing::debug!(%id, "edit discarded, product gone");
                self.clear();
                true
            }
            _ => false,
        }
    }

    /// Confirmation commits the active edit, cancellation discards it, and
    /// every other key is left to the input field.
    pub fn handle_key(&mut self, key: EditKey, products: &mut [Product]) -> Option<EditOutcome> {
        let id = self.editing?;
        match key {
            EditKey::Confirm => Some(EditOutcome::Committed(self.commit_edit(products, id))),
            EditKey::Cancel => {
                self.cancel_edit();
                Some(EditOutcome::Cancelled { id })
            }
            EditKey::Other => None,
        }
    }

    /// Returns true once after each `begin_edit`; the view focuses the input
    /// and selects its whole text when it sees it.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    fn clear(&mut self) {
        self.editing = None;
        self.staged.clear();
        self.focus_requested = false;
    }
}
