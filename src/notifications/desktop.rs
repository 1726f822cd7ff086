use super::Notifier;
use anyhow::{Context, Result};
use std::process::{Command, Stdio};

const DEFAULT_PROGRAM: &str = "notify-send";

/// Desktop notifications through `notify-send`.
pub struct DesktopNotifier {
    program: String,
}

impl DesktopNotifier {
    pub fn new() -> Self {
        Self::with_program(DEFAULT_PROGRAM)
    }

    /// Use a different notification command taking `<title> <message>`.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for DesktopNotifier {
    fn name(&self) -> &str {
        &self.program
    }

    fn notify(&self, title: &str, message: &str) -> Result<()> {
        let status = Command::new(&self.program)
            .arg(title)
            .arg(message)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .with_context(|| format!("Failed to run {}", self.program))?;

        if !status.success() {
            anyhow::bail!("{} exited with {}", self.program, status);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_error() {
        let notifier = DesktopNotifier::with_program("nonexistent_notifier_12345");
        assert!(notifier.notify("title", "body").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_program() {
        let notifier = DesktopNotifier::with_program("true");
        assert!(notifier.notify("title", "body").is_ok());
    }
}
