use image::{Rgb, RgbaImage};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::{
    encoding::generate,
    error::Result,
    models::{DialogOutcome, GenerationConfig},
    utils::save_image,
};

/// Owns the form's configuration and the last generated image.
///
/// Every action is all-or-nothing: a failing `generate` or `save_to` leaves
/// both fields exactly as they were.
#[derive(Default)]
pub struct FormController {
    pub config: GenerationConfig,
    generated: Option<RgbaImage>,
    generation: u64,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generated(&self) -> Option<&RgbaImage> {
        self.generated.as_ref()
    }

    /// Bumped on every successful generation so views can tell when to
    /// refresh.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn apply_foreground(&mut self, outcome: DialogOutcome<Rgb<u8>>) -> bool {
        log_cancel(&outcome, "foreground color");
        outcome.apply_to(&mut self.config.foreground)
    }

    pub fn apply_background(&mut self, outcome: DialogOutcome<Rgb<u8>>) -> bool {
        log_cancel(&outcome, "background color");
        outcome.apply_to(&mut self.config.background)
    }

    pub fn apply_logo(&mut self, outcome: DialogOutcome<PathBuf>) -> bool {
        log_cancel(&outcome, "logo image");
        outcome.apply_to(&mut self.config.logo_path)
    }

    pub fn generate(&mut self) -> Result<&RgbaImage> {
        let image = generate(&self.config)?;
        self.generation += 1;
        Ok(&*self.generated.insert(image))
    }

    /// Writes the current image to `path`. Returns `Ok(false)` without
    /// touching the filesystem when nothing has been generated yet.
    pub fn save_to(&self, path: &Path) -> Result<bool> {
        match &self.generated {
            Some(image) => save_image(image, path).map(|_| true),
            None => {
                debug!("save requested before any generation");
                Ok(false)
            }
        }
    }
}

fn log_cancel<T>(outcome: &DialogOutcome<T>, what: &str) {
    if matches!(outcome, DialogOutcome::Cancelled) {
        debug!("{what} dialog cancelled");
    }
}
