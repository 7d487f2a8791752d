//! Add-on services: flat or simply-tiered fees priced independently of the
//! quantity-tier ladder. Each charge becomes its own line item.

use serde::{Deserialize, Serialize};

use printdesk_core::{DomainError, DomainResult, Money};

use crate::book::CaptureRates;

/// Typed add-on classification.
///
/// The kind travels on the line item from creation; nothing downstream ever
/// re-derives it from the label (the labels still carry their traditional
/// emoji markers, which the sync layer strips before anything reaches the
/// accounting API).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOnKind {
    Capture,
    SpecialtyCapture,
    ColorMatch,
    MonitorMatch,
    ComplexWrap,
    AdditionalRounds,
    Flashdrive,
    ComputerTime,
}

/// Original artwork dimensions, required by the capture and match services.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OriginalDims {
    pub height: f64,
    pub width: f64,
}

impl OriginalDims {
    fn max_dim(&self) -> f64 {
        self.height.max(self.width)
    }
}

/// Flat rates for the add-on services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddonRates {
    pub capture: CaptureRates,
    pub specialty_capture: Money,
    /// Color match by original max dimension: under 48", under 72", 72"+.
    pub color_match_small: Money,
    pub color_match_medium: Money,
    pub color_match_large: Money,
    pub monitor_match: Money,
    pub complex_wrap: Money,
    /// Per additional color-match round.
    pub additional_round: Money,
    /// Per flashdrive.
    pub flashdrive: Money,
    /// Per hour; billed in quarter-hour increments, rounded up.
    pub computer_time_hourly: Money,
}

impl Default for AddonRates {
    fn default() -> Self {
        Self {
            // Capture tiers come off the operator's rate sheet.
            capture: CaptureRates::default(),
            specialty_capture: Money::from_dollars(30.0),
            color_match_small: Money::from_dollars(80.0),
            color_match_medium: Money::from_dollars(95.0),
            color_match_large: Money::from_dollars(120.0),
            monitor_match: Money::from_dollars(50.0),
            complex_wrap: Money::from_dollars(15.0),
            additional_round: Money::from_dollars(30.0),
            flashdrive: Money::from_dollars(10.0),
            computer_time_hourly: Money::from_dollars(100.0),
        }
    }
}

/// Which add-ons the user ticked for the current piece.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AddOnSelection {
    pub capture: bool,
    pub specialty_capture: bool,
    pub color_match: bool,
    pub monitor_match: bool,
    pub complex_wrap: bool,
    pub additional_rounds: u32,
    pub flashdrives: u32,
    pub computer_time_hours: f64,
}

impl AddOnSelection {
    pub fn any_selected(&self) -> bool {
        self.capture
            || self.specialty_capture
            || self.color_match
            || self.monitor_match
            || self.complex_wrap
            || self.additional_rounds > 0
            || self.flashdrives > 0
            || self.computer_time_hours > 0.0
    }
}

/// Capture and the match services cannot be priced without the original
/// artwork size.
fn require_dims(original: Option<OriginalDims>) -> DomainResult<OriginalDims> {
    original.ok_or_else(|| {
        DomainError::validation(
            "original height and width are required for capture and match services",
        )
    })
}

/// One priced add-on, ready to become a line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddOnCharge {
    pub kind: AddOnKind,
    pub label: String,
    pub quantity: f64,
    pub unit_price: Money,
    /// Opaque display tag.
    pub color: &'static str,
}

/// Price every selected add-on.
///
/// Missing original dimensions are a validation error, raised before anything
/// is charged so a partial set of add-on lines never reaches the draft.
pub fn compute_addon_charges(
    rates: &AddonRates,
    selection: &AddOnSelection,
    original: Option<OriginalDims>,
) -> DomainResult<Vec<AddOnCharge>> {
    if selection.specialty_capture || selection.monitor_match {
        require_dims(original)?;
    }

    let mut charges = Vec::new();

    if selection.capture {
        let dims = require_dims(original)?;
        let (label, price) = if dims.max_dim() < 48.0 {
            ("📸 Small Capture", rates.capture.small)
        } else if dims.max_dim() < 72.0 {
            ("📸 Medium Capture", rates.capture.medium)
        } else {
            ("📸 Large Capture", rates.capture.large)
        };
        charges.push(AddOnCharge {
            kind: AddOnKind::Capture,
            label: label.to_string(),
            quantity: 1.0,
            unit_price: price,
            color: "#FFD700",
        });
    }

    if selection.specialty_capture {
        charges.push(AddOnCharge {
            kind: AddOnKind::SpecialtyCapture,
            label: "✨ Specialty Capture".to_string(),
            quantity: 1.0,
            unit_price: rates.specialty_capture,
            color: "#FFD700",
        });
    }

    if selection.color_match {
        let dims = require_dims(original)?;
        let (label, price) = if dims.max_dim() < 48.0 {
            ("🎨 Basic Color Match", rates.color_match_small)
        } else if dims.max_dim() < 72.0 {
            ("🎨 Basic Color Match – 48\"+", rates.color_match_medium)
        } else {
            ("🎨 Basic Color Match – 72\"+", rates.color_match_large)
        };
        charges.push(AddOnCharge {
            kind: AddOnKind::ColorMatch,
            label: label.to_string(),
            quantity: 1.0,
            unit_price: price,
            color: "#FF69B4",
        });
    }

    if selection.monitor_match {
        charges.push(AddOnCharge {
            kind: AddOnKind::MonitorMatch,
            label: "🖥️ Monitor Match".to_string(),
            quantity: 1.0,
            unit_price: rates.monitor_match,
            color: "#ADD8E6",
        });
    }

    if selection.complex_wrap {
        charges.push(AddOnCharge {
            kind: AddOnKind::ComplexWrap,
            label: "🐩 Complex Image Wrap".to_string(),
            quantity: 1.0,
            unit_price: rates.complex_wrap,
            color: "#FFB6C1",
        });
    }

    if selection.additional_rounds > 0 {
        charges.push(AddOnCharge {
            kind: AddOnKind::AdditionalRounds,
            label: "💻 Additional Color Match Rounds".to_string(),
            quantity: selection.additional_rounds as f64,
            unit_price: rates.additional_round,
            color: "#FF69B4",
        });
    }

    if selection.flashdrives > 0 {
        charges.push(AddOnCharge {
            kind: AddOnKind::Flashdrive,
            label: "💿 Flashdrive".to_string(),
            quantity: selection.flashdrives as f64,
            unit_price: rates.flashdrive,
            color: "#D3D3D3",
        });
    }

    if selection.computer_time_hours > 0.0 {
        charges.push(AddOnCharge {
            kind: AddOnKind::ComputerTime,
            label: "🕖 Computer Time".to_string(),
            quantity: round_up_to_quarter_hour(selection.computer_time_hours),
            unit_price: rates.computer_time_hourly,
            color: "#B0C4DE",
        });
    }

    Ok(charges)
}

/// Computer time bills in quarter-hour increments, always rounded up.
fn round_up_to_quarter_hour(hours: f64) -> f64 {
    (hours * 4.0).ceil() / 4.0
}
