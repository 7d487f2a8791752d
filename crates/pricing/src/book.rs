//! Price book: the operator-maintained rate tables the engine computes from.
//!
//! Rates are plain `f64` per-unit figures (per square foot, per linear foot);
//! computed amounts become [`Money`] the moment they are rounded to cents.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use printdesk_core::Money;

/// How a stretched canvas is wrapped. Gallery variants consume extra material
/// (the printed image folds around the stretcher bars).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapStyle {
    ThickGallery,
    ThinGallery,
    BasicStretch,
}

impl WrapStyle {
    /// Gallery wraps add padding to both dimensions before the area
    /// calculation; a basic stretch does not.
    pub fn is_gallery(&self) -> bool {
        matches!(self, WrapStyle::ThickGallery | WrapStyle::ThinGallery)
    }
}

/// Media classification carried on every print type.
///
/// This is the typed replacement for classifying media by searching the
/// display name for substrings: frame, bracer, upcharge and stretch rules all
/// key off this enum, never off the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Media {
    /// Stretched canvas: frame wood, bracers, oversize upcharge and a
    /// stretching fee all apply.
    Canvas(WrapStyle),
    /// Canvas sold rolled; printed only, no hardware.
    UnstretchedCanvas,
    /// Paper stock (photorag, enhanced matte, watercolor and friends).
    Paper,
}

impl Media {
    pub fn is_stretched_canvas(&self) -> bool {
        matches!(self, Media::Canvas(_))
    }

    pub fn wrap_style(&self) -> Option<WrapStyle> {
        match self {
            Media::Canvas(style) => Some(*style),
            _ => None,
        }
    }
}

/// One print type's pricing: display name, media class, and the five-tier
/// per-square-foot price ladder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSheet {
    pub name: String,
    pub media: Media,
    /// Per-sqft prices for quantity tiers 1-4 / 5-19 / 20-49 / 50-99 / 100+.
    pub ladder: [f64; 5],
}

/// Stretching-fee band keyed on `height + width` inches, inclusive on both
/// ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StretchBand {
    pub min_sum: f64,
    pub max_sum: f64,
    pub fee: Money,
}

/// Capture (artwork photography) prices by original-size tier.
///
/// Shipped from the operator's rate sheet; the zero default means "unpriced"
/// until configured.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CaptureRates {
    /// Original max dimension under 48".
    pub small: Money,
    /// 48" to under 72".
    pub medium: Money,
    /// 72" and up.
    pub large: Money,
}

/// The full rate book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBook {
    pub sheets: Vec<PriceSheet>,
    /// Frame wood, per linear foot, keyed by print-type name.
    pub frame_rates: HashMap<String, f64>,
    /// Fallback when a stretched-canvas type has no dedicated frame rate.
    pub default_frame_rate: f64,
    /// Stretch fees for gallery wraps (thick or thin).
    pub gallery_stretch_bands: Vec<StretchBand>,
    /// Stretch fees for a basic stretch.
    pub basic_stretch_bands: Vec<StretchBand>,
    /// Bracer wood, per foot of the shorter side.
    pub bracer_rate: f64,
    /// Flat oversize upcharge once either dimension reaches 72".
    pub upcharge_72: Money,
    pub capture: CaptureRates,
}

impl PriceBook {
    pub fn frame_rate_for(&self, print_type: &str) -> f64 {
        self.frame_rates
            .get(print_type)
            .copied()
            .unwrap_or(self.default_frame_rate)
    }

    /// Stretch-fee schedule for a media class; paper and unstretched canvas
    /// have none.
    pub fn stretch_bands_for(&self, media: Media) -> &[StretchBand] {
        match media.wrap_style() {
            Some(style) if style.is_gallery() => &self.gallery_stretch_bands,
            Some(WrapStyle::BasicStretch) => &self.basic_stretch_bands,
            _ => &[],
        }
    }

    pub fn stretch_fee(&self, media: Media, height: f64, width: f64) -> Money {
        let sum = height + width;
        self.stretch_bands_for(media)
            .iter()
            .find(|band| band.min_sum <= sum && sum <= band.max_sum)
            .map(|band| band.fee)
            .unwrap_or(Money::zero())
    }
}
