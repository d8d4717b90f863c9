//! Script execution — fire-and-forget process launches.
//!
//! Launched processes are detached: we spawn and never wait, so a long-running
//! script keeps its own window while the deck stays responsive.

use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};

/// Outcome of a launch request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Launched {
    /// A process was spawned for the script.
    Spawned,
    /// The extension is not one we launch — request silently ignored.
    Ignored,
}

/// Launch `path` with the OS shell appropriate to its extension.
///
/// `.bat` opens a fresh command-interpreter window; `.ps1` opens a PowerShell
/// host with an unrestricted execution policy and `-NoExit` so output stays
/// visible after the script finishes.  Anything else is ignored.
pub fn run_script(path: &Path) -> Result<Launched> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let mut cmd = match ext.as_deref() {
        Some("bat") => {
            let mut c = Command::new("cmd.exe");
            c.arg("/C").arg("start").arg("").arg(path);
            c
        }
        Some("ps1") => {
            let mut c = Command::new("cmd.exe");
            c.arg("/C")
                .arg("start")
                .arg("powershell.exe")
                .arg("-NoExit")
                .arg("-ExecutionPolicy")
                .arg("Unrestricted")
                .arg("-File")
                .arg(path);
            c
        }
        _ => return Ok(Launched::Ignored),
    };

    spawn_detached(&mut cmd).with_context(|| format!("launching {}", path.display()))?;
    tracing::info!("Execute Script: {}", path.display());
    Ok(Launched::Spawned)
}

/// Open `path` in the configured external editor (single path argument).
pub fn open_in_editor(editor: &str, path: &Path) -> Result<()> {
    let mut cmd = Command::new(editor);
    cmd.arg(path);
    spawn_detached(&mut cmd)
        .with_context(|| format!("opening {} in '{editor}'", path.display()))?;
    tracing::info!("Open in editor: {}", path.display());
    Ok(())
}

/// Spawn without inheriting our stdio — the alternate screen must never be
/// polluted by a child's output.
fn spawn_detached(cmd: &mut Command) -> std::io::Result<()> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn unsupported_extensions_are_ignored() {
        assert_eq!(
            run_script(&PathBuf::from("notes.txt")).unwrap(),
            Launched::Ignored
        );
        assert_eq!(
            run_script(&PathBuf::from("no_extension")).unwrap(),
            Launched::Ignored
        );
    }
}
