//! One-shot sudo password capture.
//!
//! The password is read once per run, optionally checked with
//! `sudo -k -S whoami`, and then handed to the reconciler by reference. It is
//! kept in plaintext for the lifetime of the process.

use std::fmt;

use crate::error::CredentialError;
use crate::tmux::process::run_process;

/// Prompt shown when a session file requests sudo.
pub const SUDO_PROMPT: &str = "Enter SUDO password: ";

/// A captured sudo password.
#[derive(Clone, PartialEq, Eq)]
pub struct SudoCredential {
    password: String,
}

impl SudoCredential {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for SudoCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SudoCredential")
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Source of the masked password.
pub trait PasswordPrompt {
    fn read_password(&self, prompt: &str) -> std::io::Result<String>;
}

/// Reads from the controlling terminal without echo.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompt;

impl PasswordPrompt for TerminalPrompt {
    fn read_password(&self, prompt: &str) -> std::io::Result<String> {
        rpassword::prompt_password(prompt)
    }
}

/// Check `password` by running `<program> -k -S whoami` with it on stdin.
pub async fn verify_password(program: &str, password: &str) -> Result<(), CredentialError> {
    let args = ["-k", "-S", "whoami"].map(String::from);
    let input = format!("{password}\n");
    let output = run_process(program, &args, Some(input.as_bytes()))
        .await
        .map_err(CredentialError::Verify)?;
    if output.exit_code != 0 {
        let details = output.stderr.trim();
        return Err(CredentialError::Rejected(if details.is_empty() {
            format!("{program} exited with {}", output.exit_code)
        } else {
            details.to_string()
        }));
    }
    tracing::debug!(user = %output.stdout.trim(), "sudo password accepted");
    Ok(())
}

/// Per-run holder that captures the credential at most once.
pub struct CredentialCache<P> {
    prompt: P,
    /// Program used for verification; `None` skips the check.
    verifier: Option<String>,
    credential: Option<SudoCredential>,
}

impl<P: PasswordPrompt> CredentialCache<P> {
    pub fn new(prompt: P, verifier: Option<String>) -> Self {
        Self {
            prompt,
            verifier,
            credential: None,
        }
    }

    /// Return the credential, prompting on first use.
    ///
    /// A failed prompt or rejected password is returned as-is; there is no
    /// retry loop.
    pub async fn ensure(&mut self) -> Result<&SudoCredential, CredentialError> {
        let credential = match self.credential.take() {
            Some(credential) => credential,
            None => self.capture().await?,
        };
        Ok(&*self.credential.insert(credential))
    }

    async fn capture(&self) -> Result<SudoCredential, CredentialError> {
        let password = self
            .prompt
            .read_password(SUDO_PROMPT)
            .map_err(CredentialError::Prompt)?;
        if let Some(program) = &self.verifier {
            verify_password(program, &password).await?;
        }
        tracing::info!("sudo password captured");
        Ok(SudoCredential::new(password))
    }

    pub fn get(&self) -> Option<&SudoCredential> {
        self.credential.as_ref()
    }
}
