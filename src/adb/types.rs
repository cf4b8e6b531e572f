// Core ADB types and traits
use super::error::AdbResult;

/// Android keycode sent to power the screen down when the bot exits on its own.
pub const KEYCODE_POWER: u32 = 26;

// Trait defining the device capabilities the bot drives. The production
// implementation shells out to the adb binary; tests substitute a scripted fake.
#[allow(async_fn_in_trait)]
pub trait DeviceControl: Send + Sync {
    // Raw PNG bytes of the current screen
    async fn capture_frame(&self) -> AdbResult<Vec<u8>>;

    async fn tap(&self, x: u32, y: u32) -> AdbResult<()>;
    async fn keyevent(&self, code: u32) -> AdbResult<()>;

    // Default high-level screen-off via the power keycode
    async fn screen_off(&self) -> AdbResult<()> {
        self.keyevent(KEYCODE_POWER).await
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Device {
    pub name: String,
}
