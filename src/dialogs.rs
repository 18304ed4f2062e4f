use eframe::egui::{self, color_picker, Color32};
use image::Rgb;
use rfd::FileDialog;
use std::path::PathBuf;

use crate::{models::DialogOutcome, utils::with_default_extension};

const LOGO_EXTENSIONS: [&str; 9] = [
    "png", "jpg", "jpeg", "bmp", "gif", "webp", "ico", "tif", "tiff",
];

pub fn pick_logo() -> DialogOutcome<PathBuf> {
    FileDialog::new()
        .set_title("Insert Image")
        .add_filter("Images", &LOGO_EXTENSIONS)
        .pick_file()
        .into()
}

pub fn pick_save_path() -> DialogOutcome<PathBuf> {
    FileDialog::new()
        .set_title("Save QR Code")
        .add_filter("PNG file", &["png"])
        .add_filter("JPG file", &["jpg", "jpeg"])
        .set_file_name("qrcode.png")
        .save_file()
        .map(with_default_extension)
        .into()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTarget {
    Foreground,
    Background,
}

impl ColorTarget {
    fn title(&self) -> &'static str {
        match self {
            ColorTarget::Foreground => "QR Code Color",
            ColorTarget::Background => "Background Color",
        }
    }
}

/// In-window modal color picker. The draft color is only committed when the
/// user presses OK.
pub struct ColorDialog {
    pub target: ColorTarget,
    draft: Color32,
}

impl ColorDialog {
    pub fn new(target: ColorTarget, current: Rgb<u8>) -> Self {
        Self {
            target,
            draft: rgb_to_color32(current),
        }
    }

    /// Draws the dialog. Returns `Some` once the user confirms or dismisses it.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<DialogOutcome<Rgb<u8>>> {
        let mut open = true;
        let mut outcome = None;

        egui::Window::new(self.target.title())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                color_picker::color_picker_color32(ui, &mut self.draft, color_picker::Alpha::Opaque);
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() {
                        outcome = Some(DialogOutcome::Selected(color32_to_rgb(self.draft)));
                    }
                    if ui.button("Cancel").clicked() {
                        outcome = Some(DialogOutcome::Cancelled);
                    }
                });
            });

        let dismissed = !open || ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if outcome.is_none() && dismissed {
            outcome = Some(DialogOutcome::Cancelled);
        }
        outcome
    }
}

pub fn rgb_to_color32(color: Rgb<u8>) -> Color32 {
    Color32::from_rgb(color[0], color[1], color[2])
}

pub fn color32_to_rgb(color: Color32) -> Rgb<u8> {
    Rgb([color.r(), color.g(), color.b()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_conversion_round_trip() {
        let rgb = Rgb([12, 200, 99]);
        assert_eq!(color32_to_rgb(rgb_to_color32(rgb)), rgb);
    }

    #[test]
    fn test_dialog_starts_from_current_color() {
        let dialog = ColorDialog::new(ColorTarget::Background, Rgb([1, 2, 3]));
        assert_eq!(dialog.draft, Color32::from_rgb(1, 2, 3));
        assert_eq!(dialog.target, ColorTarget::Background);
    }
}
