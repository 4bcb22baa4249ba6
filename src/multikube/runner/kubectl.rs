use super::{CommandRunner, InvokeError};
use std::process::Command;

/// Production runner that shells out to kubectl.
pub struct KubectlRunner {
    program: String,
}

impl KubectlRunner {
    pub fn new() -> Self {
        Self {
            program: "kubectl".to_string(),
        }
    }

    /// Runner targeting a different program. Used by tests to point at a
    /// stand-in binary.
    pub fn with_program(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }
}

impl Default for KubectlRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for KubectlRunner {
    fn invoke(&self, args: &[String]) -> Result<Vec<u8>, InvokeError> {
        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|e| InvokeError(format!("failed to run {}: {}", self.program, e)))?;

        // stdout first, then stderr, so warnings trail the payload.
        let mut combined = output.stdout;
        combined.extend_from_slice(&output.stderr);

        if output.status.success() {
            Ok(combined)
        } else {
            Err(InvokeError(strip_noise(&String::from_utf8_lossy(
                &combined,
            ))))
        }
    }
}

/// kubectl prefixes its diagnostics with "error: "/"Error: "; the result
/// header already names the context, so the prefixes are dropped.
fn strip_noise(text: &str) -> String {
    text.replace("error: ", "").replace("Error: ", "")
}
