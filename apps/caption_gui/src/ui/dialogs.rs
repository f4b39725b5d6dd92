//! Native file picker and modal notices.

use std::path::PathBuf;

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};

use crate::controller::BlockingNotifier;

pub const APP_TITLE: &str = "Image Caption Assistant";

/// Extensions offered by the picker; nothing else is checked before upload.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

pub fn pick_image() -> Option<PathBuf> {
    FileDialog::new()
        .set_title("Choose an image")
        .add_filter("Images", IMAGE_EXTENSIONS)
        .pick_file()
}

pub struct DialogNotifier;

impl BlockingNotifier for DialogNotifier {
    fn notify(&self, message: &str) {
        let _ = MessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title(APP_TITLE)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}
