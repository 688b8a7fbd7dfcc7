// Screenshot functionality
//
// Converts a frame buffer through the system palette and saves it as PNG.

use crate::display::{FrameBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur during screenshot operations
#[derive(Debug)]
pub enum ScreenshotError {
    /// I/O error
    Io(io::Error),

    /// PNG encoding error
    PngEncoding(png::EncodingError),
}

impl std::fmt::Display for ScreenshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScreenshotError::Io(e) => write!(f, "I/O error: {}", e),
            ScreenshotError::PngEncoding(e) => write!(f, "PNG encoding error: {}", e),
        }
    }
}

impl std::error::Error for ScreenshotError {}

impl From<io::Error> for ScreenshotError {
    fn from(e: io::Error) -> Self {
        ScreenshotError::Io(e)
    }
}

impl From<png::EncodingError> for ScreenshotError {
    fn from(e: png::EncodingError) -> Self {
        ScreenshotError::PngEncoding(e)
    }
}

/// Save `frame` into `directory` under a timestamped name
///
/// # Returns
///
/// Path of the written PNG
pub fn save_screenshot(frame: &FrameBuffer, directory: &Path) -> Result<PathBuf, ScreenshotError> {
    fs::create_dir_all(directory)?;

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S%.3f");
    let file_path = directory.join(format!("frame_{}.png", timestamp));

    write_png(frame, &file_path)?;
    Ok(file_path)
}

/// Encode `frame` as an RGB PNG at `path`
pub fn write_png(frame: &FrameBuffer, path: &Path) -> Result<(), ScreenshotError> {
    let file = fs::File::create(path)?;
    let w = io::BufWriter::new(file);

    let mut encoder = png::Encoder::new(w, SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(&frame.to_rgb())?;

    Ok(())
}
