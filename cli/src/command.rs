//! Line commands typed at the prompt, turned into controller intents.

use anyhow::{anyhow, bail, Context, Result};
use todo_core::{Intent, TodoId, TodoItem};

pub const HELP: &str = "\
commands:
  add <title>          stage a title for the next task
  desc <text>          stage a description for the next task
  done | open          stage the completed flag for the next task
  submit               create the staged task
  toggle <n>           flip task #n between done and open
  edit <n>             start editing task #n
  title <n> <text>     change the title while editing
  note <n> <text>      change the description while editing
  save <n> | cancel <n>
  rm <n>               delete task #n
  reload | list | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Intent(Intent),
    List,
    Help,
    Quit,
}

/// Parses one input line. Task numbers are the 1-based positions shown by
/// the list view and resolve against `items`.
pub fn parse(line: &str, items: &[TodoItem]) -> Result<Command> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "add" if rest.is_empty() => bail!("`add` needs a title (use `submit` to create the staged task)"),
        "add" => Command::Intent(Intent::SetDraftTitle(rest.to_string())),
        "desc" => Command::Intent(Intent::SetDraftDescription(rest.to_string())),
        "done" => Command::Intent(Intent::SetDraftCompleted(true)),
        "open" => Command::Intent(Intent::SetDraftCompleted(false)),
        "submit" => Command::Intent(Intent::Submit),
        "toggle" => Command::Intent(Intent::Toggle(resolve(rest, items)?)),
        "edit" => Command::Intent(Intent::BeginEdit(resolve(rest, items)?)),
        "save" => Command::Intent(Intent::SaveEdit(resolve(rest, items)?)),
        "cancel" => Command::Intent(Intent::CancelEdit(resolve(rest, items)?)),
        "rm" => Command::Intent(Intent::Delete(resolve(rest, items)?)),
        "title" => {
            let (n, text) = split_serial(rest)?;
            Command::Intent(Intent::EditTitle(resolve(n, items)?, text.to_string()))
        }
        "note" => {
            let (n, text) = split_serial(rest)?;
            Command::Intent(Intent::EditDescription(resolve(n, items)?, text.to_string()))
        }
        "reload" => Command::Intent(Intent::Reload),
        "list" | "" => Command::List,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command `{other}` (try `help`)"),
    };
    Ok(command)
}

fn split_serial(rest: &str) -> Result<(&str, &str)> {
    match rest.split_once(char::is_whitespace) {
        Some((n, text)) => Ok((n, text.trim())),
        None => Ok((rest, "")),
    }
}

fn resolve(serial: &str, items: &[TodoItem]) -> Result<TodoId> {
    let n: usize = serial
        .parse()
        .with_context(|| format!("expected a task number, got `{serial}`"))?;
    n.checked_sub(1)
        .and_then(|index| items.get(index))
        .map(|item| item.id)
        .ok_or_else(|| anyhow!("no task #{n}"))
}
