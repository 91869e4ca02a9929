//! Full-screen capture using the `xcap` crate.
//!
//! This is the infrastructure layer — it talks to the OS.

use super::{encode_png, CaptureError, Frame, ScreenSource};
use image::DynamicImage;
use xcap::Monitor;

/// Captures the primary monitor's screen as a `DynamicImage`.
///
/// Falls back to the first enumerated monitor when none reports as primary.
pub fn capture_primary_monitor() -> Result<DynamicImage, CaptureError> {
    let monitors = Monitor::all().map_err(|e| CaptureError::MonitorEnumeration(e.to_string()))?;

    let mut fallback = None;
    let mut primary = None;
    for monitor in monitors {
        if monitor.is_primary().unwrap_or(false) {
            primary = Some(monitor);
            break;
        }
        if fallback.is_none() {
            fallback = Some(monitor);
        }
    }

    let monitor = primary.or(fallback).ok_or(CaptureError::NoMonitor)?;

    let image = monitor
        .capture_image()
        .map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;

    Ok(DynamicImage::ImageRgba8(image))
}

/// [`ScreenSource`] backed by the primary monitor.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrimaryMonitor;

impl ScreenSource for PrimaryMonitor {
    fn capture(&self) -> Result<Frame, CaptureError> {
        let start = std::time::Instant::now();

        let image = capture_primary_monitor()?;
        let (width, height) = (image.width(), image.height());
        let capture_ms = start.elapsed().as_millis();

        let png = encode_png(&image)?;

        log::info!(
            "[CAPTURE] Grabbed {}x{} in {}ms, encoded {} bytes in {}ms",
            width,
            height,
            capture_ms,
            png.len(),
            start.elapsed().as_millis() - capture_ms
        );

        Ok(Frame { png, width, height })
    }
}
