use std::cell::RefCell;
use std::io::Write;

use kal_ipc::{Command, Reply};
use serde_json::{Value, json};

use super::{BridgeError, HostBridge, RawEvent};

/// A bridge with no host behind it: every command is written to `out` as
/// one JSON line and acknowledged with an empty reply. It never produces
/// events.
#[derive(Debug)]
pub struct JournalBridge<W: Write> {
    out: RefCell<W>,
}

impl<W: Write> JournalBridge<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write> HostBridge for JournalBridge<W> {
    fn invoke(&self, command: &Command) -> Result<Reply, BridgeError> {
        let mut out = self.out.borrow_mut();
        serde_json::to_writer(&mut *out, &command_record(command))
            .map_err(|err| BridgeError::Protocol(err.to_string()))?;
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(Reply::Empty)
    }

    fn try_next_event(&self) -> Option<RawEvent> {
        None
    }
}

/// JSON shape used when journalling a command.
pub(crate) fn command_record(command: &Command) -> Value {
    let name = command.name().as_str();
    match command {
        Command::Search(query) => json!({ "command": name, "query": query }),
        Command::Execute { target, modifier } => json!({
            "command": name,
            "target": target.to_string(),
            "modifier": modifier,
        }),
        Command::ShowItemInDir(index) => json!({ "command": name, "index": index }),
        Command::ClearResults | Command::RefreshIndex | Command::HideMainWindow => {
            json!({ "command": name })
        }
    }
}

#[cfg(test)]
mod tests {
    use kal_ipc::ExecuteTarget;
    use serde_json::Value;

    use super::*;

    #[test]
    fn writes_one_line_per_command() {
        let bridge = JournalBridge::new(Vec::new());
        bridge.invoke(&Command::Search("fire".into())).unwrap();
        bridge
            .invoke(&Command::Execute {
                target: ExecuteTarget::action("open", "app:firefox"),
                modifier: true,
            })
            .unwrap();

        let out = String::from_utf8(bridge.into_inner()).unwrap();
        let lines: Vec<Value> = out
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["query"], "fire");
        assert_eq!(lines[1]["target"], "open#app:firefox");
        assert_eq!(lines[1]["modifier"], true);
    }
}
