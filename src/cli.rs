//! 対話シェルのコマンド
//!
//! 1行を1コマンドとして解釈し、編集セッションに適用する。

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::error::{InputError, Result};
use crate::history::{Action, HistorySnapshot};
use crate::session::EditSession;

/// 一覧表示でのプレビュー幅（表示幅）
pub const PREVIEW_WIDTH: usize = 40;

/// コマンドの種類
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 本文末尾への追記
    Type(String),
    /// 本文の置き換え
    Set(String),
    /// 末尾から指定文字数を削除
    Erase(usize),
    Undo,
    Redo,
    JumpPast(usize),
    JumpFuture(usize),
    Mark,
    Clear,
    Show,
    Text,
    Replay,
    Help,
    Quit,
}

impl Command {
    /// 1行を解析する
    pub fn parse(line: &str) -> Result<Command> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (name, rest) = match line.trim_start().split_once(' ') {
            Some((name, rest)) => (name, rest),
            None => (line.trim(), ""),
        };

        let command = match name {
            "type" => Command::Type(required_text(name, rest)?),
            "set" => Command::Set(rest.to_string()),
            "erase" => Command::Erase(parse_count(name, rest)?),
            "undo" => Command::Undo,
            "redo" => Command::Redo,
            "jump" => parse_jump(rest)?,
            "mark" => Command::Mark,
            "clear" => Command::Clear,
            "show" | "history" => Command::Show,
            "text" => Command::Text,
            "replay" => Command::Replay,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => {
                return Err(InputError::CommandNotFound {
                    command: other.to_string(),
                }
                .into())
            }
        };
        Ok(command)
    }
}

fn required_text(command: &str, rest: &str) -> Result<String> {
    if rest.is_empty() {
        return Err(InputError::MissingArgument {
            command: command.to_string(),
        }
        .into());
    }
    Ok(rest.to_string())
}

fn parse_count(command: &str, rest: &str) -> Result<usize> {
    let raw = rest.trim();
    if raw.is_empty() {
        return Err(InputError::MissingArgument {
            command: command.to_string(),
        }
        .into());
    }
    raw.parse::<usize>().map_err(|_| {
        InputError::InvalidArgument {
            arg: raw.to_string(),
        }
        .into()
    })
}

fn parse_jump(rest: &str) -> Result<Command> {
    let mut parts = rest.split_whitespace();
    let target = parts.next().unwrap_or_default();
    let index = parse_count("jump", parts.next().unwrap_or_default())?;
    match target {
        "past" => Ok(Command::JumpPast(index)),
        "future" => Ok(Command::JumpFuture(index)),
        "" => Err(InputError::MissingArgument {
            command: "jump".to_string(),
        }
        .into()),
        other => Err(InputError::InvalidArgument {
            arg: other.to_string(),
        }
        .into()),
    }
}

/// コマンド実行の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// 結果メッセージ
    pub message: Option<String>,
    /// シェルを終了するか
    pub should_quit: bool,
}

impl CommandResult {
    pub fn success() -> Self {
        Self {
            message: None,
            should_quit: false,
        }
    }

    pub fn success_with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            should_quit: false,
        }
    }

    pub fn quit() -> Self {
        Self {
            message: None,
            should_quit: true,
        }
    }
}

/// コマンドをセッションに適用する
///
/// リプレイはフレーム間で待つ必要があるため呼び出し側で扱う。
pub fn execute(session: &mut EditSession, command: Command, reset_text: &str) -> CommandResult {
    match command {
        Command::Type(text) => {
            let mut new_text = session.text().to_string();
            new_text.push_str(&text);
            session.input(new_text);
            CommandResult::success()
        }
        Command::Set(text) => {
            session.replace_text(text);
            CommandResult::success()
        }
        Command::Erase(count) => {
            let keep = session.text().chars().count().saturating_sub(count);
            let new_text: String = session.text().chars().take(keep).collect();
            session.input(new_text);
            CommandResult::success()
        }
        Command::Undo => moved(session.undo(), "Nothing to undo."),
        Command::Redo => moved(session.redo(), "Nothing to redo."),
        Command::JumpPast(index) => moved(session.jump_to_past(index), "Already there."),
        Command::JumpFuture(index) => moved(session.jump_to_future(index), "Nothing to redo."),
        Command::Mark => match session.toggle_bookmark() {
            Some(true) => CommandResult::success_with_message("Bookmarked."),
            Some(false) => CommandResult::success_with_message("Bookmark removed."),
            None => CommandResult::success_with_message("Nothing to bookmark."),
        },
        Command::Clear => {
            session.clear(reset_text);
            CommandResult::success_with_message("History cleared.")
        }
        Command::Show => {
            let lines = render_history(&session.history().snapshot(), PREVIEW_WIDTH);
            CommandResult::success_with_message(lines.join("\n"))
        }
        Command::Text => CommandResult::success_with_message(session.text()),
        Command::Replay => CommandResult::success(),
        Command::Help => CommandResult::success_with_message(HELP),
        Command::Quit => CommandResult::quit(),
    }
}

fn moved(changed: bool, unchanged_message: &str) -> CommandResult {
    if changed {
        CommandResult::success()
    } else {
        CommandResult::success_with_message(unchanged_message)
    }
}

/// 履歴一覧を表示用の行に整形する
pub fn render_history(snapshot: &HistorySnapshot, width: usize) -> Vec<String> {
    let mut lines = Vec::with_capacity(snapshot.past.len() + snapshot.future.len() + 2);
    lines.push(format!("past ({}):", snapshot.past.len()));
    for (index, action) in snapshot.past.iter().enumerate().rev() {
        lines.push(render_entry("  ", index, action, width));
    }
    lines.push(format!("future ({}):", snapshot.future.len()));
    for (index, action) in snapshot.future.iter().enumerate().rev() {
        lines.push(render_entry("  ", index, action, width));
    }
    lines
}

fn render_entry(indent: &str, index: usize, action: &Action, width: usize) -> String {
    format!(
        "{}[{}] {} {:<8} {} | {}",
        indent,
        index,
        action.timestamp,
        action.kind.as_str(),
        action.description,
        preview(&action.current_text, width)
    )
}

/// 改行を可視化し、表示幅に収まるよう切り詰める
pub fn preview(text: &str, width: usize) -> String {
    let flattened = text.replace('\n', "⏎");
    if flattened.width() <= width {
        return flattened;
    }

    let budget = width.saturating_sub(1);
    let mut used = 0;
    let mut result = String::new();
    for ch in flattened.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        result.push(ch);
    }
    result.push('…');
    result
}

pub const HELP: &str = "\
commands:
  type <text>         append text to the buffer
  set <text>          replace the buffer content
  erase <n>           delete the last n characters
  undo | redo         step through history
  jump past <i>       undo down to past entry i (0 = oldest)
  jump future <i>     redo i + 1 entries
  mark                toggle the bookmark on the latest entry
  clear               drop all history
  show                list history entries
  text                print the buffer
  replay              play back the past entries
  quit                leave the shell";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HistoryConfig;
    use crate::error::ZypherError;
    use crate::history::HistoryManager;
    use crate::storage::MemoryStore;

    fn session() -> EditSession {
        let history = HistoryManager::new(Box::new(MemoryStore::new()));
        EditSession::new("", history, &HistoryConfig::default())
    }

    #[test]
    fn parses_commands() {
        assert_eq!(
            Command::parse("type hello world").unwrap(),
            Command::Type("hello world".to_string())
        );
        assert_eq!(Command::parse("set").unwrap(), Command::Set(String::new()));
        assert_eq!(Command::parse("erase 3").unwrap(), Command::Erase(3));
        assert_eq!(Command::parse("undo\n").unwrap(), Command::Undo);
        assert_eq!(Command::parse("jump past 2").unwrap(), Command::JumpPast(2));
        assert_eq!(
            Command::parse("jump future 0").unwrap(),
            Command::JumpFuture(0)
        );
        assert_eq!(Command::parse("history").unwrap(), Command::Show);
        assert_eq!(Command::parse("exit").unwrap(), Command::Quit);
    }

    #[test]
    fn type_keeps_leading_spaces() {
        assert_eq!(
            Command::parse("type  world").unwrap(),
            Command::Type(" world".to_string())
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            Command::parse("rewind").unwrap_err(),
            ZypherError::Input(InputError::CommandNotFound {
                command: "rewind".to_string()
            })
        );
        assert!(matches!(
            Command::parse("type"),
            Err(ZypherError::Input(InputError::MissingArgument { .. }))
        ));
        assert!(matches!(
            Command::parse("erase -1"),
            Err(ZypherError::Input(InputError::InvalidArgument { .. }))
        ));
        assert!(matches!(
            Command::parse("jump sideways 1"),
            Err(ZypherError::Input(InputError::InvalidArgument { .. }))
        ));
        assert!(matches!(
            Command::parse("jump"),
            Err(ZypherError::Input(InputError::MissingArgument { .. }))
        ));
    }

    #[test]
    fn execute_edits_and_navigates() {
        let mut session = session();

        execute(&mut session, Command::Type("Hello".to_string()), "");
        execute(&mut session, Command::Erase(2), "");
        assert_eq!(session.text(), "Hel");

        execute(&mut session, Command::Undo, "");
        assert_eq!(session.text(), "Hello");

        let result = execute(&mut session, Command::Redo, "");
        assert_eq!(result, CommandResult::success());
        let result = execute(&mut session, Command::Redo, "");
        assert_eq!(result.message.as_deref(), Some("Nothing to redo."));
    }

    #[test]
    fn execute_mark_and_clear() {
        let mut session = session();

        let result = execute(&mut session, Command::Mark, "");
        assert_eq!(result.message.as_deref(), Some("Nothing to bookmark."));

        execute(&mut session, Command::Set("draft".to_string()), "");
        let result = execute(&mut session, Command::Mark, "");
        assert_eq!(result.message.as_deref(), Some("Bookmarked."));

        execute(&mut session, Command::Clear, "template");
        assert_eq!(session.text(), "template");
        assert!(!session.history().can_undo());
    }

    #[test]
    fn each_set_is_its_own_entry() {
        let mut session = session();

        execute(&mut session, Command::Set("abc".to_string()), "");
        execute(&mut session, Command::Set("xyz".to_string()), "");
        execute(&mut session, Command::Set("pqr".to_string()), "");

        let snapshot = session.history().snapshot();
        assert_eq!(
            snapshot
                .past
                .iter()
                .map(|action| (action.previous_text.as_str(), action.current_text.as_str()))
                .collect::<Vec<_>>(),
            vec![("", "abc"), ("abc", "xyz"), ("xyz", "pqr")]
        );
        assert_eq!(session.text(), "pqr");

        execute(&mut session, Command::Undo, "");
        assert_eq!(session.text(), "xyz");
    }

    #[test]
    fn quit_stops_the_shell() {
        let mut session = session();
        assert!(execute(&mut session, Command::Quit, "").should_quit);
    }

    #[test]
    fn render_lists_newest_first() {
        let mut session = session();
        execute(&mut session, Command::Set("one".to_string()), "");
        session.undo();
        session.redo();
        execute(&mut session, Command::Set("one two three".to_string()), "");
        session.undo();

        let lines = render_history(&session.history().snapshot(), PREVIEW_WIDTH);
        assert_eq!(lines[0], "past (1):");
        assert!(lines[1].contains("[0]"));
        assert!(lines[1].contains("Added 3 chars"));
        assert_eq!(lines[2], "future (1):");
        assert!(lines[3].contains("Pasted"));
    }

    #[test]
    fn preview_truncates_by_display_width() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("line\nbreak", 20), "line⏎break");
        assert_eq!(preview("abcdefghij", 5), "abcd…");
        // 全角文字は幅2
        assert_eq!(preview("日本語テキスト", 6), "日本…");
    }
}
