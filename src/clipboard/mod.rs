//! Copying assistant responses to the system clipboard.

use anyhow::{Context, Result, bail};
use arboard::Clipboard;

/// Responses larger than this are refused (1MB).
const MAX_COPY_BYTES: usize = 1024 * 1024;

/// Seam over the system clipboard so copying can be tested headless.
trait ClipboardSink {
    fn write(&mut self, text: &str) -> Result<()>;
}

impl<T: ClipboardSink + ?Sized> ClipboardSink for &mut T {
    fn write(&mut self, text: &str) -> Result<()> {
        (**self).write(text)
    }
}

struct SystemClipboard(Clipboard);

impl ClipboardSink for SystemClipboard {
    fn write(&mut self, text: &str) -> Result<()> {
        self.0.set_text(text).context("Failed to set clipboard contents")
    }
}

fn check_copyable(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        bail!("Nothing to copy");
    }
    if text.len() > MAX_COPY_BYTES {
        bail!("Response too large to copy ({} bytes, max {})", text.len(), MAX_COPY_BYTES);
    }
    Ok(())
}

/// Validate, then open the sink and write. Invalid text never opens the sink.
fn copy_with<S, F>(text: &str, open: F) -> Result<()>
where
    S: ClipboardSink,
    F: FnOnce() -> Result<S>,
{
    check_copyable(text)?;
    open()?.write(text)
}

/// Put `text` on the system clipboard.
///
/// # Errors
/// Fails for blank or oversized text (checked before the clipboard is opened), and
/// when no clipboard is available, e.g. on a headless Linux box without X11/Wayland.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    copy_with(text, || {
        Clipboard::new().map(SystemClipboard).context("Failed to initialize clipboard")
    })
}
