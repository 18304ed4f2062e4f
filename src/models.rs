use image::Rgb;
use std::{ops::RangeInclusive, path::PathBuf};

/// Pixels per QR module in the rendered image.
pub const MODULE_SIZE: u32 = 10;
/// Quiet zone width, in modules, on each side of the symbol.
pub const BORDER: u32 = 4;
/// Side length of the square preview canvas.
pub const PREVIEW_SIZE: f32 = 250.0;

pub const LOGO_SIZE_RANGE: RangeInclusive<u8> = 5..=20;
pub const DEFAULT_LOGO_SIZE: u8 = 10;

pub const DEFAULT_FOREGROUND: Rgb<u8> = Rgb([0, 0, 0]);
pub const DEFAULT_BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorCorrection {
    L,
    M,
    Q,
    #[default]
    H,
}

impl ErrorCorrection {
    pub const ALL: [ErrorCorrection; 4] = [
        ErrorCorrection::L,
        ErrorCorrection::M,
        ErrorCorrection::Q,
        ErrorCorrection::H,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCorrection::L => "L",
            ErrorCorrection::M => "M",
            ErrorCorrection::Q => "Q",
            ErrorCorrection::H => "H",
        }
    }

    pub fn ec_level(&self) -> qrcode::EcLevel {
        match self {
            ErrorCorrection::L => qrcode::EcLevel::L,
            ErrorCorrection::M => qrcode::EcLevel::M,
            ErrorCorrection::Q => qrcode::EcLevel::Q,
            ErrorCorrection::H => qrcode::EcLevel::H,
        }
    }
}

impl std::fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the generator reads for one run. `None` colors fall back to
/// black on white.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub text: String,
    pub foreground: Option<Rgb<u8>>,
    pub background: Option<Rgb<u8>>,
    pub logo_path: Option<PathBuf>,
    pub logo_size_percent: u8,
    pub error_correction: ErrorCorrection,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            foreground: None,
            background: None,
            logo_path: None,
            logo_size_percent: DEFAULT_LOGO_SIZE,
            error_correction: ErrorCorrection::default(),
        }
    }
}

impl GenerationConfig {
    pub fn with_logo_size(mut self, percent: u8) -> Self {
        self.logo_size_percent =
            percent.clamp(*LOGO_SIZE_RANGE.start(), *LOGO_SIZE_RANGE.end());
        self
    }

    pub fn foreground_or_default(&self) -> Rgb<u8> {
        self.foreground.unwrap_or(DEFAULT_FOREGROUND)
    }

    pub fn background_or_default(&self) -> Rgb<u8> {
        self.background.unwrap_or(DEFAULT_BACKGROUND)
    }
}

/// Result of a modal picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome<T> {
    Selected(T),
    Cancelled,
}

impl<T> DialogOutcome<T> {
    /// Stores a selected value into `slot`; a cancellation leaves it alone.
    /// Returns whether `slot` was written.
    pub fn apply_to(self, slot: &mut Option<T>) -> bool {
        match self {
            DialogOutcome::Selected(value) => {
                *slot = Some(value);
                true
            }
            DialogOutcome::Cancelled => false,
        }
    }
}

impl<T> From<Option<T>> for DialogOutcome<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => DialogOutcome::Selected(v),
            None => DialogOutcome::Cancelled,
        }
    }
}
