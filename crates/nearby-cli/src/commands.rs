//! Interactive session commands.

use nearby_core::PlaceId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Select(PlaceId),
    /// Re-issue the last query for the same origin.
    Retry,
    /// Acquire a position again and search.
    Refresh,
    List,
    Help,
    Quit,
}

pub(crate) const HELP: &str = "commands: select <id> | retry | refresh | list | help | quit";

impl Command {
    /// Parses one input line. Blank lines yield `Ok(None)`.
    pub(crate) fn parse(line: &str) -> Result<Option<Self>, String> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let command = match verb.to_ascii_lowercase().as_str() {
            "select" | "s" => {
                let id = words
                    .next()
                    .ok_or_else(|| "usage: select <id>".to_owned())?;
                Self::Select(PlaceId::from(id))
            }
            "retry" => Self::Retry,
            "refresh" | "r" => Self::Refresh,
            "list" | "ls" => Self::List,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(format!("unknown command '{other}'; {HELP}")),
        };
        Ok(Some(command))
    }
}
