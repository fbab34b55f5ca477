use arboard::Clipboard;

use crate::config::OutputFormat;
use crate::error::{AppError, AppResult};

/// Copies a rendered analysis export to the system clipboard.
///
/// Errors name the export format, so a failed `--copy` says which rendering
/// did not make it. The clipboard is opened only after the payload is known
/// to be non-blank.
pub struct ClipboardOutput;

trait ClipboardSink {
    fn put(&mut self, text: String) -> Result<(), String>;
}

impl ClipboardSink for Clipboard {
    fn put(&mut self, text: String) -> Result<(), String> {
        self.set_text(text).map_err(|error| error.to_string())
    }
}

impl ClipboardOutput {
    pub fn copy_export(rendered: &str, format: OutputFormat) -> AppResult<()> {
        let payload = export_payload(rendered, format)?;
        let mut clipboard = Clipboard::new().map_err(|error| {
            AppError::Clipboard(format!(
                "clipboard unavailable for {} export: {error}",
                format.label()
            ))
        })?;
        Self::deliver(&mut clipboard, payload, format)
    }

    fn deliver<S: ClipboardSink>(
        sink: &mut S,
        payload: String,
        format: OutputFormat,
    ) -> AppResult<()> {
        tracing::debug!(
            format = format.label(),
            bytes = payload.len(),
            "copying export to clipboard"
        );
        sink.put(payload).map_err(|error| {
            AppError::Clipboard(format!(
                "clipboard write failed for {} export: {error}",
                format.label()
            ))
        })
    }
}

/// Trailing whitespace from the renderers is dropped so pasted exports end
/// on their last line.
fn export_payload(rendered: &str, format: OutputFormat) -> AppResult<String> {
    let payload = rendered.trim_end();
    if payload.trim_start().is_empty() {
        return Err(AppError::Clipboard(format!(
            "{} export is empty, nothing to copy",
            format.label()
        )));
    }
    Ok(payload.to_owned())
}
