//! List-and-edit controller shared by the collection admin pages.

use crate::db::Repository;
use crate::errors::AppError;
use crate::models::{ContentKind, Entry};

/// The single record being added or edited, if any.
#[derive(Debug, Clone, PartialEq)]
pub enum EditBuffer<K> {
    Idle,
    Adding(K),
    Editing { id: String, draft: K },
}

impl<K> EditBuffer<K> {
    pub fn is_idle(&self) -> bool {
        matches!(self, EditBuffer::Idle)
    }
}

/// Line-by-line editing of list-valued fields (skills, features, certifications).
pub trait ListField {
    /// Append a blank line.
    fn push_item(&mut self);
    /// Replace the line at `index`; false if out of range.
    fn set_item(&mut self, index: usize, value: impl Into<String>) -> bool;
    /// Remove the line at `index`.
    fn remove_item(&mut self, index: usize) -> Option<String>;
}

impl ListField for Vec<String> {
    fn push_item(&mut self) {
        self.push(String::new());
    }

    fn set_item(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    fn remove_item(&mut self, index: usize) -> Option<String> {
        (index < self.len()).then(|| self.remove(index))
    }
}

/// Admin page for one content kind.
///
/// Holds the loaded list and at most one edit buffer. Edits only reach the store on
/// [`AdminPage::save`]; a failed save leaves the buffer intact for another attempt.
pub struct AdminPage<K: ContentKind> {
    repo: Repository,
    entries: Vec<Entry<K>>,
    buffer: EditBuffer<K>,
}

impl<K: ContentKind> AdminPage<K> {
    /// Open the page and load the list. A failed load is logged and leaves the list empty.
    pub async fn open(repo: Repository) -> Self {
        let mut page = Self {
            repo,
            entries: Vec::new(),
            buffer: EditBuffer::Idle,
        };
        if let Err(e) = page.reload().await {
            tracing::error!("Error loading {} list: {}", K::LABEL, e);
        }
        page
    }

    /// Re-fetch the full list.
    pub async fn reload(&mut self) -> Result<(), AppError> {
        self.entries = self.repo.list::<K>().await?;
        Ok(())
    }

    pub fn entries(&self) -> &[Entry<K>] {
        &self.entries
    }

    pub fn buffer(&self) -> &EditBuffer<K> {
        &self.buffer
    }

    /// Start a new record, placed after the current list.
    pub fn start_add(&mut self) {
        let mut draft = K::default();
        draft.set_sort_order(u32::try_from(self.entries.len()).unwrap_or(u32::MAX));
        self.buffer = EditBuffer::Adding(draft);
    }

    /// Start editing a loaded record. Replaces any draft in progress.
    pub fn start_edit(&mut self, id: &str) -> Result<(), AppError> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| AppError::NotFound(format!("{} {} not found", K::LABEL, id)))?;

        self.buffer = EditBuffer::Editing {
            id: entry.id.clone(),
            draft: entry.fields.clone(),
        };
        Ok(())
    }

    /// Drop the draft.
    pub fn cancel(&mut self) {
        self.buffer = EditBuffer::Idle;
    }

    pub fn draft_mut(&mut self) -> Option<&mut K> {
        match &mut self.buffer {
            EditBuffer::Idle => None,
            EditBuffer::Adding(draft) | EditBuffer::Editing { draft, .. } => Some(draft),
        }
    }

    /// Commit the draft, then reload the list and clear the buffer.
    ///
    /// Returns the saved record's identifier, or `None` when nothing was being edited.
    pub async fn save(&mut self) -> Result<Option<String>, AppError> {
        let result = match &self.buffer {
            EditBuffer::Idle => return Ok(None),
            EditBuffer::Adding(draft) => self.repo.create(draft).await,
            EditBuffer::Editing { id, draft } => {
                self.repo.update::<K>(id, &draft.to_patch()).await
            }
        };

        match result {
            Ok(entry) => {
                self.buffer = EditBuffer::Idle;
                if let Err(e) = self.reload().await {
                    tracing::error!("Error reloading {} list: {}", K::LABEL, e);
                }
                Ok(Some(entry.id))
            }
            Err(e) => {
                tracing::error!("Error saving {}: {}", K::LABEL, e);
                Err(e)
            }
        }
    }

    /// Delete a record once `confirm` accepts the prompt. Returns whether it was deleted.
    pub async fn delete(
        &mut self,
        id: &str,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<bool, AppError> {
        let prompt = format!(
            "Are you sure you want to delete this {}?",
            K::LABEL.to_lowercase()
        );
        if !confirm(&prompt) {
            return Ok(false);
        }

        if let Err(e) = self.repo.delete::<K>(id).await {
            tracing::error!("Error deleting {}: {}", K::LABEL, e);
            return Err(e);
        }

        if matches!(&self.buffer, EditBuffer::Editing { id: editing, .. } if editing == id) {
            self.buffer = EditBuffer::Idle;
        }
        if let Err(e) = self.reload().await {
            tracing::error!("Error reloading {} list: {}", K::LABEL, e);
        }
        Ok(true)
    }
}
