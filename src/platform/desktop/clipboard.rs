//! Desktop clipboard providers — external tools with an `arboard` fallback.
//!
//! External tools are tried first because they keep the content alive
//! after the process exits; `arboard` hands ownership back when its
//! handle drops on X11. Each provider is synchronous
//! (`std::process::Command`).

use std::io::Write;
use std::process::{Command, Stdio};

use crate::platform::PlatformError;

/// Reads and writes the system clipboard.
///
/// Implementations report failure; the desktop backend decides whether
/// to try the next provider or fall back to a default.
pub trait ClipboardProvider: Send + Sync {
    /// Short name used in log fields.
    fn name(&self) -> &str;

    /// Set the clipboard content to the given bytes.
    fn write(&self, content: &[u8]) -> Result<(), PlatformError>;

    /// Read the current clipboard content.
    fn read(&self) -> Result<Vec<u8>, PlatformError>;
}

/// A program plus its arguments.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Clipboard access through a copy/paste command pair, e.g. `xclip`.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    name: String,
    copy: Invocation,
    paste: Invocation,
}

impl CommandClipboard {
    pub fn new(name: &str, copy: Invocation, paste: Invocation) -> Self {
        Self {
            name: name.to_string(),
            copy,
            paste,
        }
    }

    /// Wayland: `wl-copy` / `wl-paste`.
    pub fn wayland() -> Self {
        Self::new(
            "wl-clipboard",
            Invocation::new("wl-copy", &[]),
            Invocation::new("wl-paste", &["--no-newline"]),
        )
    }

    /// X11: `xclip -selection clipboard`.
    pub fn xclip() -> Self {
        Self::new(
            "xclip",
            Invocation::new("xclip", &["-selection", "clipboard"]),
            Invocation::new("xclip", &["-selection", "clipboard", "-o"]),
        )
    }

    /// X11 alternative: `xsel --clipboard`.
    pub fn xsel() -> Self {
        Self::new(
            "xsel",
            Invocation::new("xsel", &["--clipboard", "--input"]),
            Invocation::new("xsel", &["--clipboard", "--output"]),
        )
    }

    /// macOS: `pbcopy` / `pbpaste`.
    pub fn pasteboard() -> Self {
        Self::new(
            "pasteboard",
            Invocation::new("pbcopy", &[]),
            Invocation::new("pbpaste", &[]),
        )
    }
}

impl ClipboardProvider for CommandClipboard {
    fn name(&self) -> &str {
        &self.name
    }

    fn write(&self, content: &[u8]) -> Result<(), PlatformError> {
        let program = &self.copy.program;
        let mut child = Command::new(program)
            .args(&self.copy.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| PlatformError::Clipboard(format!("failed to spawn {program}: {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(content) {
                drop(stdin);
                // Reap the child; it may still be running with a full pipe.
                let _ = child.kill();
                let _ = child.wait();
                return Err(PlatformError::Clipboard(format!("failed to write to {program}: {e}")));
            }
            // Drop stdin to close the pipe so the tool can finish.
        }

        let status = child
            .wait()
            .map_err(|e| PlatformError::Clipboard(format!("failed to wait for {program}: {e}")))?;

        if status.success() {
            Ok(())
        } else {
            Err(PlatformError::Clipboard(format!(
                "{program} exited with status {status}"
            )))
        }
    }

    fn read(&self) -> Result<Vec<u8>, PlatformError> {
        let program = &self.paste.program;
        let output = Command::new(program)
            .args(&self.paste.args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| PlatformError::Clipboard(format!("failed to spawn {program}: {e}")))?;

        if output.status.success() {
            Ok(output.stdout)
        } else {
            Err(PlatformError::Clipboard(format!(
                "{program} exited with status {}",
                output.status
            )))
        }
    }
}

/// Clipboard access through the `arboard` crate.
///
/// A fresh handle is opened per call; no clipboard connection is held
/// between operations.
#[derive(Debug, Default)]
pub struct ArboardClipboard;

impl ClipboardProvider for ArboardClipboard {
    fn name(&self) -> &str {
        "arboard"
    }

    fn write(&self, content: &[u8]) -> Result<(), PlatformError> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| PlatformError::Unavailable(format!("arboard: {e}")))?;
        clipboard
            .set_text(String::from_utf8_lossy(content).into_owned())
            .map_err(|e| PlatformError::Clipboard(format!("arboard set_text: {e}")))
    }

    fn read(&self) -> Result<Vec<u8>, PlatformError> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| PlatformError::Unavailable(format!("arboard: {e}")))?;
        match clipboard.get_text() {
            Ok(text) => Ok(text.into_bytes()),
            // Empty or non-text clipboard.
            Err(arboard::Error::ContentNotAvailable) => Ok(Vec::new()),
            Err(e) => Err(PlatformError::Clipboard(format!("arboard get_text: {e}"))),
        }
    }
}

/// Provider chain for the current OS, most persistent first.
pub fn default_providers() -> Vec<Box<dyn ClipboardProvider>> {
    let mut providers: Vec<Box<dyn ClipboardProvider>> = Vec::new();

    if cfg!(target_os = "macos") {
        providers.push(Box::new(CommandClipboard::pasteboard()));
    } else if cfg!(unix) {
        if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            providers.push(Box::new(CommandClipboard::wayland()));
        }
        providers.push(Box::new(CommandClipboard::xclip()));
        providers.push(Box::new(CommandClipboard::xsel()));
    }

    providers.push(Box::new(ArboardClipboard));
    providers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_program_fails_to_spawn() {
        let provider = CommandClipboard::new(
            "missing",
            Invocation::new("psa-no-such-clipboard-tool", &[]),
            Invocation::new("psa-no-such-clipboard-tool", &[]),
        );
        let err = provider.write(b"data").unwrap_err();
        assert!(err.to_string().contains("failed to spawn"));
        assert!(provider.read().is_err());
    }

    #[cfg(unix)]
    #[test]
    fn command_pair_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip");
        let path = path.to_str().unwrap();

        let provider = CommandClipboard::new(
            "file",
            Invocation::new("sh", &["-c", &format!("cat > '{path}'")]),
            Invocation::new("cat", &[path]),
        );

        provider.write(b"copied text").unwrap();
        assert_eq!(provider.read().unwrap(), b"copied text");
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_error() {
        let provider = CommandClipboard::new(
            "false",
            Invocation::new("false", &[]),
            Invocation::new("false", &[]),
        );
        let err = provider.read().unwrap_err();
        assert!(err.to_string().contains("exited with status"));
    }

    #[cfg(unix)]
    #[test]
    fn write_to_closed_stdin_fails_without_hanging() {
        // Closes its stdin, then would outlive the test unless killed.
        let provider = CommandClipboard::new(
            "closed",
            Invocation::new("sh", &["-c", "exec 0<&-; sleep 30"]),
            Invocation::new("true", &[]),
        );
        let payload = vec![b'x'; 4 * 1024 * 1024];

        let started = std::time::Instant::now();
        let err = provider.write(&payload).unwrap_err();
        assert!(err.to_string().contains("failed to write to sh"));
        assert!(started.elapsed() < std::time::Duration::from_secs(20));
    }

    #[test]
    fn default_chain_ends_with_arboard() {
        let providers = default_providers();
        assert_eq!(providers.last().map(|p| p.name()), Some("arboard"));
    }
}
