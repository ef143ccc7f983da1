//! Local list state kept in sync with the remote todo resource.
//!
//! # Design
//! `TodoListController` owns the only local copy of the collection plus the
//! transient drafts. Every mutation goes to the server first and the local
//! record is then replaced wholesale by whatever the server returns, so there
//! is never an optimistic change to roll back. A failed call is logged and
//! leaves local state as it was.
//!
//! Operations take `&mut self`, which keeps them sequential. Nothing stops a
//! front end from issuing the same intent twice in a row; each one becomes
//! its own request.

use std::collections::HashMap;
use std::time::Duration;

use crate::client::TodoClient;
use crate::config::ClientConfig;
use crate::gate;
use crate::transport::Transport;
use crate::types::{NewTodo, TodoId, TodoItem, TodoPatch};

/// Coarse display state of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
}

/// Per-item UI mode. Purely local, never sent to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemMode {
    Viewing,
    Editing,
}

/// What an operation did to local state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The server accepted the change (or the local-only change was made).
    Applied,
    /// Preconditions failed; no request was sent.
    Ignored,
    /// The request failed; local state is unchanged.
    Failed,
}

/// Fields staged for the next create.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTodoDraft {
    pub title: String,
    pub description: String,
    pub completed: bool,
}

impl NewTodoDraft {
    /// Payload for the draft, or `None` when the title is blank.
    pub fn to_new_todo(&self) -> Option<NewTodo> {
        if self.title.trim().is_empty() {
            return None;
        }
        Some(NewTodo {
            title: self.title.clone(),
            description: Some(self.description.clone()).filter(|d| !d.is_empty()),
            completed: self.completed,
        })
    }
}

/// Fields staged while an item is in edit mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditDraft {
    pub title: String,
    pub description: String,
}

impl EditDraft {
    pub fn from_item(item: &TodoItem) -> Self {
        Self {
            title: item.title.clone(),
            description: item.description.clone().unwrap_or_default(),
        }
    }
}

/// A request from the view layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SetDraftTitle(String),
    SetDraftDescription(String),
    SetDraftCompleted(bool),
    Submit,
    Toggle(TodoId),
    Delete(TodoId),
    BeginEdit(TodoId),
    EditTitle(TodoId, String),
    EditDescription(TodoId, String),
    SaveEdit(TodoId),
    CancelEdit(TodoId),
    Reload,
}

#[derive(Debug)]
pub struct TodoListController<T> {
    client: TodoClient,
    transport: T,
    min_loading: Duration,
    phase: Phase,
    items: Vec<TodoItem>,
    draft: NewTodoDraft,
    edits: HashMap<TodoId, EditDraft>,
}

impl<T: Transport> TodoListController<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self {
            client,
            transport,
            min_loading: gate::DEFAULT_MIN_LOADING,
            phase: Phase::Loading,
            items: Vec::new(),
            draft: NewTodoDraft::default(),
            edits: HashMap::new(),
        }
    }

    pub fn from_config(config: &ClientConfig, transport: T) -> Self {
        Self::new(TodoClient::new(&config.base_url), transport).with_min_loading(config.min_loading)
    }

    pub fn with_min_loading(mut self, min_loading: Duration) -> Self {
        self.min_loading = min_loading;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn item(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|t| t.id == id)
    }

    pub fn draft(&self) -> &NewTodoDraft {
        &self.draft
    }

    pub fn edit_draft(&self, id: TodoId) -> Option<&EditDraft> {
        self.edits.get(&id)
    }

    pub fn mode(&self, id: TodoId) -> ItemMode {
        if self.edits.contains_key(&id) {
            ItemMode::Editing
        } else {
            ItemMode::Viewing
        }
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Replaces the collection with the server's list. The phase stays
    /// `Loading` for at least the configured minimum.
    pub async fn load(&mut self) -> Outcome {
        self.phase = Phase::Loading;
        let result = gate::at_least(self.min_loading, self.client.list_all(&self.transport)).await;
        self.phase = Phase::Ready;

        match result {
            Ok(items) => {
                tracing::debug!(count = items.len(), "loaded todos");
                self.items = items;
                let items = &self.items;
                self.edits.retain(|id, _| items.iter().any(|t| t.id == *id));
                Outcome::Applied
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch todos");
                Outcome::Failed
            }
        }
    }

    pub fn set_draft_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_draft_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    pub fn set_draft_completed(&mut self, completed: bool) {
        self.draft.completed = completed;
    }

    /// Submits the draft. A blank title sends nothing.
    pub async fn create(&mut self) -> Outcome {
        let Some(input) = self.draft.to_new_todo() else {
            return Outcome::Ignored;
        };

        match self.client.create(&self.transport, &input).await {
            Ok(created) => {
                tracing::debug!(id = created.id, "created todo");
                self.items.push(created);
                self.draft = NewTodoDraft::default();
                Outcome::Applied
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to create todo");
                Outcome::Failed
            }
        }
    }

    pub async fn toggle(&mut self, id: TodoId) -> Outcome {
        let Some(current) = self.item(id).map(|t| t.completed) else {
            return Outcome::Ignored;
        };

        let patch = TodoPatch::completed(!current);
        match self.client.update(&self.transport, id, &patch).await {
            Ok(updated) => {
                self.replace(id, updated);
                Outcome::Applied
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "failed to toggle todo");
                Outcome::Failed
            }
        }
    }

    pub fn begin_edit(&mut self, id: TodoId) -> Outcome {
        let Some(draft) = self.item(id).map(EditDraft::from_item) else {
            return Outcome::Ignored;
        };
        self.edits.insert(id, draft);
        Outcome::Applied
    }

    pub fn set_edit_title(&mut self, id: TodoId, title: impl Into<String>) -> Outcome {
        match self.edits.get_mut(&id) {
            Some(draft) => {
                draft.title = title.into();
                Outcome::Applied
            }
            None => Outcome::Ignored,
        }
    }

    pub fn set_edit_description(&mut self, id: TodoId, description: impl Into<String>) -> Outcome {
        match self.edits.get_mut(&id) {
            Some(draft) => {
                draft.description = description.into();
                Outcome::Applied
            }
            None => Outcome::Ignored,
        }
    }

    pub fn cancel_edit(&mut self, id: TodoId) -> Outcome {
        match self.edits.remove(&id) {
            Some(_) => Outcome::Applied,
            None => Outcome::Ignored,
        }
    }

    /// Commits the edit draft. The item leaves edit mode whether or not the
    /// server accepts the change.
    pub async fn save_edit(&mut self, id: TodoId) -> Outcome {
        let Some(draft) = self.edits.remove(&id) else {
            return Outcome::Ignored;
        };

        let patch = TodoPatch::text(draft.title, draft.description);
        match self.client.update(&self.transport, id, &patch).await {
            Ok(updated) => {
                self.replace(id, updated);
                Outcome::Applied
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "failed to save todo");
                Outcome::Failed
            }
        }
    }

    pub async fn delete(&mut self, id: TodoId) -> Outcome {
        match self.client.delete(&self.transport, id).await {
            Ok(_) => {
                self.items.retain(|t| t.id != id);
                self.edits.remove(&id);
                Outcome::Applied
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "failed to delete todo");
                Outcome::Failed
            }
        }
    }

    pub async fn dispatch(&mut self, intent: Intent) -> Outcome {
        match intent {
            Intent::SetDraftTitle(title) => {
                self.set_draft_title(title);
                Outcome::Applied
            }
            Intent::SetDraftDescription(description) => {
                self.set_draft_description(description);
                Outcome::Applied
            }
            Intent::SetDraftCompleted(completed) => {
                self.set_draft_completed(completed);
                Outcome::Applied
            }
            Intent::Submit => self.create().await,
            Intent::Toggle(id) => self.toggle(id).await,
            Intent::Delete(id) => self.delete(id).await,
            Intent::BeginEdit(id) => self.begin_edit(id),
            Intent::EditTitle(id, title) => self.set_edit_title(id, title),
            Intent::EditDescription(id, description) => self.set_edit_description(id, description),
            Intent::SaveEdit(id) => self.save_edit(id).await,
            Intent::CancelEdit(id) => self.cancel_edit(id),
            Intent::Reload => self.load().await,
        }
    }

    // Last write wins: the server's record replaces the local one outright.
    fn replace(&mut self, id: TodoId, updated: TodoItem) {
        if let Some(slot) = self.items.iter_mut().find(|t| t.id == id) {
            *slot = updated;
        }
    }
}
