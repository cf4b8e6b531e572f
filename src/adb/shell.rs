use super::error::{AdbError, AdbResult};
use super::types::DeviceControl;
use std::time::Duration;
use tokio::process::Command;

/// Upper bound for `adb exec-out screencap`; a capture stuck longer than this
/// means the device dropped off the bus.
pub const CAPTURE_TIMEOUT: Duration = Duration::from_secs(15);
/// Upper bound for `adb shell input` commands.
pub const INPUT_TIMEOUT: Duration = Duration::from_secs(10);

/// Run one adb invocation, bounded by `timeout`, and return its stdout.
pub(crate) async fn run_adb(args: &[&str], timeout: Duration) -> AdbResult<Vec<u8>> {
    run_command("adb", args, timeout).await
}

/// Bounded subprocess runner. When the timeout drops the in-flight future the
/// child is killed with it; a timed-out invocation never lingers behind the
/// next poll.
async fn run_command(program: &str, args: &[&str], timeout: Duration) -> AdbResult<Vec<u8>> {
    let command = args.join(" ");
    log::debug!("running: {program} {command}");

    let output = tokio::time::timeout(
        timeout,
        Command::new(program).args(args).kill_on_drop(true).output(),
    )
    .await
    .map_err(|_| AdbError::Timeout {
        command: command.clone(),
        duration: timeout,
    })??;

    if !output.status.success() {
        return Err(AdbError::CommandFailed {
            command,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(output.stdout)
}

/// ADB backend that shells out to the `adb` binary.
pub struct AdbShell {
    capture_timeout: Duration,
    input_timeout: Duration,
}

impl AdbShell {
    pub fn new() -> Self {
        Self {
            capture_timeout: CAPTURE_TIMEOUT,
            input_timeout: INPUT_TIMEOUT,
        }
    }
}

impl Default for AdbShell {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceControl for AdbShell {
    async fn capture_frame(&self) -> AdbResult<Vec<u8>> {
        run_adb(&["exec-out", "screencap", "-p"], self.capture_timeout).await
    }

    async fn tap(&self, x: u32, y: u32) -> AdbResult<()> {
        let (x, y) = (x.to_string(), y.to_string());
        run_adb(&["shell", "input", "tap", &x, &y], self.input_timeout).await?;
        Ok(())
    }

    async fn keyevent(&self, code: u32) -> AdbResult<()> {
        let code = code.to_string();
        run_adb(&["shell", "input", "keyevent", &code], self.input_timeout).await?;
        Ok(())
    }
}
