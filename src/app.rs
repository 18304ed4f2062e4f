use eframe::egui;
use tracing::{debug, warn};

use crate::{
    controller::FormController,
    dialogs::{pick_logo, pick_save_path, rgb_to_color32, ColorDialog, ColorTarget},
    error::Error,
    models::{DialogOutcome, ErrorCorrection, LOGO_SIZE_RANGE, PREVIEW_SIZE},
    utils::{fit_within, to_color_image},
};

pub struct QrGeneratorApp {
    pub controller: FormController,
    pub status: String,
    pub error: Option<String>,
    preview: Option<egui::TextureHandle>,
    preview_generation: u64,
    color_dialog: Option<ColorDialog>,
}

impl QrGeneratorApp {
    pub fn new() -> Self {
        Self {
            controller: FormController::new(),
            status: "Ready".to_string(),
            error: None,
            preview: None,
            preview_generation: 0,
            color_dialog: None,
        }
    }

    fn report(&mut self, action: &str, err: Error) {
        warn!(action, error = %err, "action failed");
        self.error = Some(format!("{action} failed: {err}"));
    }

    pub fn open_color_dialog(&mut self, target: ColorTarget) {
        let config = &self.controller.config;
        let current = match target {
            ColorTarget::Foreground => config.foreground_or_default(),
            ColorTarget::Background => config.background_or_default(),
        };
        self.color_dialog = Some(ColorDialog::new(target, current));
    }

    pub fn choose_logo_image(&mut self) {
        if self.controller.apply_logo(pick_logo()) {
            self.error = None;
        }
    }

    pub fn generate(&mut self) {
        match self.controller.generate() {
            Ok(image) => {
                self.status = format!("Generated {}x{} QR code", image.width(), image.height());
                self.error = None;
            }
            Err(e) => self.report("Generate", e),
        }
    }

    pub fn save_preview(&mut self) {
        if self.controller.generated().is_none() {
            debug!("nothing to save yet");
            return;
        }

        let path = match pick_save_path() {
            DialogOutcome::Selected(path) => path,
            DialogOutcome::Cancelled => {
                debug!("save dialog cancelled");
                return;
            }
        };

        match self.controller.save_to(&path) {
            Ok(_) => {
                self.status = format!("Saved to {}", path.display());
                self.error = None;
            }
            Err(e) => self.report("Save", e),
        }
    }

    fn refresh_preview(&mut self, ctx: &egui::Context) {
        if self.preview_generation == self.controller.generation() {
            return;
        }
        let Some(image) = self.controller.generated() else {
            return;
        };

        let color_image = to_color_image(image);
        match &mut self.preview {
            Some(texture) => texture.set(color_image, egui::TextureOptions::LINEAR),
            None => {
                self.preview = Some(ctx.load_texture(
                    "qr_preview",
                    color_image,
                    egui::TextureOptions::LINEAR,
                ))
            }
        }
        self.preview_generation = self.controller.generation();
    }

    fn color_row(&mut self, ui: &mut egui::Ui, label: &str, target: ColorTarget) {
        ui.label(label);
        ui.horizontal(|ui| {
            if ui.button("🎨 Choose Color").clicked() {
                self.open_color_dialog(target);
            }

            let slot = match target {
                ColorTarget::Foreground => &mut self.controller.config.foreground,
                ColorTarget::Background => &mut self.controller.config.background,
            };
            match *slot {
                Some(color) => {
                    let (rect, _) =
                        ui.allocate_exact_size(egui::vec2(18.0, 18.0), egui::Sense::hover());
                    ui.painter().rect_filled(rect, 2.0, rgb_to_color32(color));
                    if ui.small_button("Reset").clicked() {
                        *slot = None;
                    }
                }
                None => {
                    ui.weak("default");
                }
            }
        });
        ui.end_row();
    }

    fn form(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("qr_form")
            .num_columns(2)
            .spacing([10.0, 8.0])
            .show(ui, |ui| {
                ui.label("Enter URL:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.controller.config.text)
                        .hint_text("https://...")
                        .desired_width(300.0),
                );
                ui.end_row();

                self.color_row(ui, "Select QR Code Color:", ColorTarget::Foreground);
                self.color_row(ui, "Select Background Color:", ColorTarget::Background);

                ui.label("Logo:");
                ui.horizontal(|ui| {
                    if ui.button("🖼 Insert Image").clicked() {
                        self.choose_logo_image();
                    }
                    let logo_name = self
                        .controller
                        .config
                        .logo_path
                        .as_deref()
                        .and_then(|p| p.file_name())
                        .map(|name| name.to_string_lossy().into_owned());
                    match logo_name {
                        Some(name) => {
                            ui.label(name);
                            if ui.small_button("Clear").clicked() {
                                self.controller.config.logo_path = None;
                            }
                        }
                        None => {
                            ui.weak("None");
                        }
                    }
                });
                ui.end_row();

                ui.label("Select Image Size (% of QR):");
                ui.add(egui::Slider::new(
                    &mut self.controller.config.logo_size_percent,
                    LOGO_SIZE_RANGE,
                ));
                ui.end_row();

                ui.label("Error Correction Level:");
                let level = &mut self.controller.config.error_correction;
                egui::ComboBox::from_id_source("error_correction_combo")
                    .selected_text(level.as_str())
                    .show_ui(ui, |ui| {
                        for option in ErrorCorrection::ALL {
                            ui.selectable_value(level, option, option.as_str());
                        }
                    });
                ui.end_row();
            });
    }

    fn preview_canvas(&self, ui: &mut egui::Ui) {
        let canvas = egui::vec2(PREVIEW_SIZE, PREVIEW_SIZE);
        let (rect, _) = ui.allocate_exact_size(canvas, egui::Sense::hover());
        ui.painter()
            .rect_filled(rect, 0.0, ui.visuals().extreme_bg_color);

        match &self.preview {
            Some(texture) => {
                let size = fit_within(texture.size_vec2(), canvas);
                let image_rect = egui::Rect::from_center_size(rect.center(), size);
                ui.painter().image(
                    texture.id(),
                    image_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
            None => {
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "No preview",
                    egui::FontId::proportional(14.0),
                    ui.visuals().weak_text_color(),
                );
            }
        }
    }
}

impl Default for QrGeneratorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl eframe::App for QrGeneratorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(dialog) = &mut self.color_dialog {
            if let Some(outcome) = dialog.show(ctx) {
                match dialog.target {
                    ColorTarget::Foreground => self.controller.apply_foreground(outcome),
                    ColorTarget::Background => self.controller.apply_background(outcome),
                };
                self.color_dialog = None;
            }
        }

        self.refresh_preview(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame {
                inner_margin: egui::Margin::symmetric(20.0, 20.0),
                fill: ctx.style().visuals.panel_fill,
                ..Default::default()
            })
            .show(ctx, |ui| {
                // Modal: the form is inert while the color picker is up.
                ui.set_enabled(self.color_dialog.is_none());

                self.form(ui);

                ui.separator();

                ui.horizontal(|ui| {
                    if ui.button("▶ Generate QR Code").clicked() {
                        self.generate();
                    }
                    let save_enabled = self.controller.generated().is_some();
                    if ui
                        .add_enabled(save_enabled, egui::Button::new("💾 Save QR Code"))
                        .clicked()
                    {
                        self.save_preview();
                    }
                });

                ui.add_space(10.0);
                ui.label("QR Code Preview:");
                self.preview_canvas(ui);

                ui.add_space(10.0);
                match &self.error {
                    Some(err) => {
                        ui.colored_label(egui::Color32::RED, err);
                    }
                    None => {
                        ui.label(&self.status);
                    }
                }
            });

        if self.preview_generation != self.controller.generation() {
            ctx.request_repaint();
        }
    }
}
