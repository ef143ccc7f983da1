//! Plain-text rendering of controller state.
//!
//! The renderer only reads; every user action goes back through
//! `TodoListController::dispatch` as an `Intent`.

use crate::controller::{ItemMode, Phase, TodoListController};
use crate::transport::Transport;
use crate::types::TodoItem;

pub const LOADING_BANNER: &str = "Loading todos...";
pub const EMPTY_MESSAGE: &str = "No tasks yet. Add a new task to get started!";

pub fn render<T: Transport>(controller: &TodoListController<T>) -> String {
    if controller.phase() == Phase::Loading {
        return format!("{LOADING_BANNER}\n");
    }

    let mut out = String::new();
    let draft = controller.draft();
    if !draft.title.is_empty() || !draft.description.is_empty() || draft.completed {
        let state = if draft.completed { "done" } else { "open" };
        out.push_str(&format!("new: {} [{state}]", draft.title));
        if !draft.description.is_empty() {
            out.push_str(&format!(" - {}", draft.description));
        }
        out.push('\n');
    }

    let items = controller.items();
    if items.is_empty() {
        out.push_str(EMPTY_MESSAGE);
        out.push('\n');
        return out;
    }

    for (index, item) in items.iter().enumerate() {
        out.push_str(&render_item(index + 1, item, controller));
    }
    out
}

fn render_item<T: Transport>(serial: usize, item: &TodoItem, controller: &TodoListController<T>) -> String {
    match (controller.mode(item.id), controller.edit_draft(item.id)) {
        (ItemMode::Editing, Some(draft)) => {
            format!("#{serial} (editing) {}\n    {}\n", draft.title, draft.description)
        }
        _ => {
            let mark = if item.completed { "x" } else { " " };
            let mut block = format!("#{serial} [{mark}] {}\n", item.title);
            if let Some(description) = item.description.as_deref().filter(|d| !d.is_empty()) {
                block.push_str(&format!("    {description}\n"));
            }
            block
        }
    }
}
