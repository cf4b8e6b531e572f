// Startup diagnostics for the adb toolchain and the connected phone.
// The bot refuses to start (unless told to skip) when any stage fails,
// so a misconfigured setup is reported before the first capture attempt.
use super::error::AdbResult;
use super::shell::run_adb;
use super::types::Device;
use std::time::Duration;

const VERSION_TIMEOUT: Duration = Duration::from_secs(5);
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);
/// Poll interval while waiting for a device to show up.
const RETRY_INTERVAL: Duration = Duration::from_secs(2);

/// Whether the `adb` binary is present and answers `adb version`.
pub async fn is_adb_installed() -> bool {
    run_adb(&["version"], VERSION_TIMEOUT).await.is_ok()
}

/// Parse `adb devices` output. Only entries in the `device` state count;
/// `unauthorized`, `offline` and malformed lines are ignored.
pub fn parse_devices(output: &str) -> Vec<Device> {
    output
        .lines()
        .skip(1)
        .filter_map(|line| {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() >= 2 && parts[1] == "device" {
                Some(Device {
                    name: parts[0].to_string(),
                })
            } else {
                None
            }
        })
        .collect()
}

pub async fn connected_devices() -> AdbResult<Vec<Device>> {
    let stdout = run_adb(&["devices"], PROBE_TIMEOUT).await?;
    Ok(parse_devices(&String::from_utf8_lossy(&stdout)))
}

/// Round-trip probe: a device that lists as `device` can still be unreachable
/// while it boots, so echo through the shell and expect the text back.
pub async fn check_connectivity() -> bool {
    match run_adb(&["shell", "echo", "test"], PROBE_TIMEOUT).await {
        Ok(stdout) => String::from_utf8_lossy(&stdout).contains("test"),
        Err(_) => false,
    }
}

/// Compose the `(ready, message)` summary from the three probe results.
pub fn summarize_status(installed: bool, devices: &[Device], reachable: bool) -> (bool, String) {
    if !installed {
        return (
            false,
            "ADB is not installed or not found in PATH. Please install Android SDK platform tools."
                .to_string(),
        );
    }
    if devices.is_empty() {
        return (
            false,
            "No Android devices connected. Please connect your phone via USB and enable USB debugging."
                .to_string(),
        );
    }
    if !reachable {
        return (
            false,
            "ADB is installed and devices are connected, but unable to communicate with the device."
                .to_string(),
        );
    }
    let names: Vec<&str> = devices.iter().map(|d| d.name.as_str()).collect();
    (
        true,
        format!(
            "ADB is ready. {} device(s) connected: {}",
            devices.len(),
            names.join(", ")
        ),
    )
}

/// Run all probes in order and summarize. Taps always go to the first device,
/// so more than one connected phone is worth a warning.
pub async fn check_adb_status() -> (bool, String) {
    if !is_adb_installed().await {
        return summarize_status(false, &[], false);
    }
    let devices = connected_devices().await.unwrap_or_default();
    if devices.is_empty() {
        return summarize_status(true, &devices, false);
    }
    if devices.len() > 1 {
        let names: Vec<&str> = devices.iter().map(|d| d.name.as_str()).collect();
        log::warn!(
            "Multiple devices connected: {}. Using the first one.",
            names.join(", ")
        );
    }
    let reachable = check_connectivity().await;
    summarize_status(true, &devices, reachable)
}

/// Poll [`check_adb_status`] until it reports ready or `timeout` elapses.
pub async fn wait_for_device(timeout: Duration) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        let (ready, message) = check_adb_status().await;
        if ready {
            log::info!("{message}");
            return true;
        }
        if tokio::time::Instant::now() + RETRY_INTERVAL > deadline {
            return false;
        }
        log::debug!("Device not ready yet: {message}");
        tokio::time::sleep(RETRY_INTERVAL).await;
    }
}
