//! Resolved ways of running an external tool.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// How to run a tool: a command plus arguments that go before the
/// caller's own arguments.
///
/// Either a bare command (`peerflix`, `/usr/bin/vlc`) with an empty prefix,
/// or an interpreter with the tool's entry script as the first argument
/// (`node /usr/lib/node_modules/peerflix/app.js`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invocation {
    pub command: String,
    pub args_prefix: Vec<String>,
}

impl Invocation {
    /// A command run directly.
    pub fn direct(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args_prefix: Vec::new(),
        }
    }

    /// An interpreter running a script.
    pub fn interpreted(interpreter: impl Into<String>, script: &Path) -> Self {
        Self {
            command: interpreter.into(),
            args_prefix: vec![script.to_string_lossy().into_owned()],
        }
    }

    /// Full argument vector (prefix followed by `args`), excluding the command.
    pub fn argv<S: AsRef<str>>(&self, args: &[S]) -> Vec<String> {
        self.args_prefix
            .iter()
            .cloned()
            .chain(args.iter().map(|a| a.as_ref().to_string()))
            .collect()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command)?;
        for arg in &self.args_prefix {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Acknowledgement that the OS accepted a spawn request.
///
/// Says nothing about whether the tool later ran correctly; the service
/// stops tracking the process once this exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnAck {
    /// OS process id, when the platform reports one.
    pub pid: Option<u32>,
    /// Command that was started.
    pub command: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn direct_invocation_passes_args_through() {
        let inv = Invocation::direct("peerflix");
        assert_eq!(inv.argv(&["magnet:?xt=1", "--vlc"]), vec!["magnet:?xt=1", "--vlc"]);
        assert_eq!(inv.to_string(), "peerflix");
    }

    #[test]
    fn interpreted_invocation_prepends_script() {
        let script = PathBuf::from("/usr/lib/node_modules/peerflix/app.js");
        let inv = Invocation::interpreted("node", &script);
        assert_eq!(
            inv.argv(&["magnet:?xt=1"]),
            vec!["/usr/lib/node_modules/peerflix/app.js", "magnet:?xt=1"]
        );
        assert_eq!(inv.to_string(), "node /usr/lib/node_modules/peerflix/app.js");
    }
}
