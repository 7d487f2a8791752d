//! Per-print-type cost breakdowns.

use serde::{Deserialize, Serialize};

use printdesk_core::{DomainError, DomainResult, Money};

use crate::book::{Media, PriceBook};
use crate::tier::select_tier;

/// Gallery wraps fold 3" of printed canvas around each stretcher-bar edge.
const GALLERY_PAD_IN: f64 = 3.0;
/// Shortest long side that needs a bracer bar.
const BRACER_MIN_IN: f64 = 40.0;
/// Long side at which a second bracer is added.
const BRACER_DOUBLE_IN: f64 = 60.0;
/// Long side at which the flat oversize upcharge applies.
const UPCHARGE_MIN_IN: f64 = 72.0;

/// Display colors cycled across result blocks, one per print type.
pub const PALETTE: [&str; 7] = [
    "#ccff00", "#00ccff", "#ff00cc", "#ffcc00", "#cc00ff", "#00ffcc", "#ff0000",
];

/// A quoted print run: nominal size in inches and the number of prints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrintJob {
    pub height: f64,
    pub width: f64,
    pub quantity: u32,
}

/// Itemized cost of one print type for a job. All amounts are per print
/// except the discount fields, which cover the whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub print_type: String,
    pub media: Media,
    /// Formatted `"h x w"` label.
    pub size: String,
    pub quantity: u32,
    pub canvas_cost: Money,
    pub pro_canvas_cost: Money,
    pub frame_cost: Money,
    pub stretch_fee: Money,
    pub bracer_cost: Money,
    pub upcharge: Money,
    /// `canvas_cost` plus every hardware component.
    pub total_cost: Money,
    /// Same, substituting the professional canvas cost.
    pub pro_total_cost: Money,
    /// `quantity x area x volume step`; signed — negative on a normal
    /// (decreasing) ladder, positive when the ladder steps up.
    pub volume_discount_amt: Money,
    /// `quantity x area x (regular - pro)`; signed the same way.
    pub pro_discount_amt: Money,
    /// Opaque display tag cycled from [`PALETTE`].
    pub color: String,
}

impl CostBreakdown {
    /// Breakdowns with nothing priced are filtered out of results.
    pub fn is_all_zero(&self) -> bool {
        self.canvas_cost.is_zero()
            && self.pro_canvas_cost.is_zero()
            && self.frame_cost.is_zero()
            && self.stretch_fee.is_zero()
            && self.bracer_cost.is_zero()
            && self.upcharge.is_zero()
    }
}

/// Compute one breakdown per configured print type, dropping all-zero ones.
pub fn compute_breakdowns(book: &PriceBook, job: &PrintJob) -> DomainResult<Vec<CostBreakdown>> {
    if job.quantity == 0 {
        return Err(DomainError::validation("number of prints must be positive"));
    }
    if job.height <= 0.0 || job.width <= 0.0 {
        return Err(DomainError::validation("print height and width must be positive"));
    }

    let breakdowns = book
        .sheets
        .iter()
        .enumerate()
        .map(|(i, sheet)| {
            let mut b = compute_one(book, &sheet.name, sheet.media, &sheet.ladder, job);
            b.color = PALETTE[i % PALETTE.len()].to_string();
            b
        })
        .filter(|b| !b.is_all_zero())
        .collect();

    Ok(breakdowns)
}

fn compute_one(
    book: &PriceBook,
    name: &str,
    media: Media,
    ladder: &[f64; 5],
    job: &PrintJob,
) -> CostBreakdown {
    let tier = select_tier(ladder, job.quantity);

    let pad = match media.wrap_style() {
        Some(style) if style.is_gallery() => GALLERY_PAD_IN,
        _ => 0.0,
    };
    let area_sqft = ((job.height + pad) * (job.width + pad)) / 144.0;
    // Perimeter always uses the unpadded print dimensions.
    let perimeter_ft = (2.0 * job.height + 2.0 * job.width) / 12.0;

    let long_side = job.height.max(job.width);
    let short_side = job.height.min(job.width);

    let (frame_cost, bracer_cost, upcharge) = if media.is_stretched_canvas() {
        let frame = Money::from_dollars(perimeter_ft * book.frame_rate_for(name));
        let bracer = if long_side >= BRACER_MIN_IN {
            let one = (short_side / 12.0) * book.bracer_rate;
            let dollars = if long_side >= BRACER_DOUBLE_IN { one * 2.0 } else { one };
            Money::from_dollars(dollars)
        } else {
            Money::zero()
        };
        let upcharge = if long_side >= UPCHARGE_MIN_IN {
            book.upcharge_72
        } else {
            Money::zero()
        };
        (frame, bracer, upcharge)
    } else {
        (Money::zero(), Money::zero(), Money::zero())
    };

    let stretch_fee = book.stretch_fee(media, job.height, job.width);

    let canvas_cost = Money::from_dollars(area_sqft * tier.regular_per_sqft);
    let pro_canvas_cost = Money::from_dollars(area_sqft * tier.pro_per_sqft);
    let hardware = frame_cost + stretch_fee + bracer_cost + upcharge;

    let qty = job.quantity as f64;
    CostBreakdown {
        print_type: name.to_string(),
        media,
        size: format!("{} x {}", job.height, job.width),
        quantity: job.quantity,
        canvas_cost,
        pro_canvas_cost,
        frame_cost,
        stretch_fee,
        bracer_cost,
        upcharge,
        total_cost: canvas_cost + hardware,
        pro_total_cost: pro_canvas_cost + hardware,
        volume_discount_amt: Money::from_dollars(qty * area_sqft * tier.volume_step_per_sqft),
        pro_discount_amt: Money::from_dollars(qty * area_sqft * tier.pro_discount_per_sqft()),
        color: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::book::{CaptureRates, PriceSheet, StretchBand, WrapStyle};

    fn thick_gallery_book() -> PriceBook {
        PriceBook {
            sheets: vec![PriceSheet {
                name: "Canvas with Thick Gallery Wrap".to_string(),
                media: Media::Canvas(WrapStyle::ThickGallery),
                ladder: [24.15, 22.05, 21.00, 19.95, 18.90],
            }],
            frame_rates: HashMap::from([(
                "Canvas with Thick Gallery Wrap".to_string(),
                2.4,
            )]),
            default_frame_rate: 2.0,
            gallery_stretch_bands: vec![StretchBand {
                min_sum: 0.0,
                max_sum: 100.0,
                fee: Money::from_dollars(35.0),
            }],
            basic_stretch_bands: Vec::new(),
            bracer_rate: 1.8,
            upcharge_72: Money::from_dollars(60.0),
            capture: CaptureRates::default(),
        }
    }

    fn job(height: f64, width: f64, quantity: u32) -> PrintJob {
        PrintJob { height, width, quantity }
    }

    #[test]
    fn thick_gallery_24x36_qty_10_reference_numbers() {
        let book = thick_gallery_book();
        let all = compute_breakdowns(&book, &job(24.0, 36.0, 10)).unwrap();
        assert_eq!(all.len(), 1);
        let b = &all[0];

        // Tier 2: regular 22.05, pro 21.00; padded area (27 * 39) / 144.
        assert_eq!(b.canvas_cost, Money::from_cents(16124)); // 7.3125 * 22.05
        assert_eq!(b.pro_canvas_cost, Money::from_cents(15356)); // 7.3125 * 21.00

        // Volume step 22.05 - 24.15 = -2.10: a signed saving magnitude of
        // 10 * 7.3125 * 2.10 = 153.5625.
        assert_eq!(b.volume_discount_amt, Money::from_cents(-15356));
        // Pro discount 10 * 7.3125 * 1.05 = 76.78125.
        assert_eq!(b.pro_discount_amt, Money::from_cents(7678));

        // Perimeter (48 + 72) / 12 = 10 ft at 2.4/ft.
        assert_eq!(b.frame_cost, Money::from_dollars(24.0));
        assert_eq!(b.stretch_fee, Money::from_dollars(35.0));
        assert_eq!(b.bracer_cost, Money::zero());
        assert_eq!(b.upcharge, Money::zero());
        assert_eq!(b.total_cost, b.canvas_cost + Money::from_dollars(59.0));
        assert_eq!(b.pro_total_cost, b.pro_canvas_cost + Money::from_dollars(59.0));
    }

    #[test]
    fn bracer_thresholds() {
        let book = thick_gallery_book();

        let none = &compute_breakdowns(&book, &job(39.999, 20.0, 1)).unwrap()[0];
        assert_eq!(none.bracer_cost, Money::zero());

        // (20 / 12) * 1.8 = 3.00 at the 40" threshold.
        let single = &compute_breakdowns(&book, &job(40.0, 20.0, 1)).unwrap()[0];
        assert_eq!(single.bracer_cost, Money::from_dollars(3.0));

        // Doubled once the long side reaches 60".
        let double = &compute_breakdowns(&book, &job(60.0, 20.0, 1)).unwrap()[0];
        assert_eq!(double.bracer_cost, Money::from_dollars(6.0));
    }

    #[test]
    fn upcharge_threshold() {
        let book = thick_gallery_book();

        let under = &compute_breakdowns(&book, &job(71.999, 20.0, 1)).unwrap()[0];
        assert_eq!(under.upcharge, Money::zero());

        let over = &compute_breakdowns(&book, &job(72.0, 20.0, 1)).unwrap()[0];
        assert_eq!(over.upcharge, Money::from_dollars(60.0));
    }

    #[test]
    fn paper_gets_no_hardware_and_no_pad() {
        let mut book = thick_gallery_book();
        book.sheets = vec![PriceSheet {
            name: "Photorag".to_string(),
            media: Media::Paper,
            ladder: [10.0, 9.0, 8.0, 7.0, 6.0],
        }];

        let b = &compute_breakdowns(&book, &job(24.0, 36.0, 1)).unwrap()[0];
        // Unpadded area: 24 * 36 / 144 = 6 sqft at 10.00.
        assert_eq!(b.canvas_cost, Money::from_dollars(60.0));
        assert_eq!(b.frame_cost, Money::zero());
        assert_eq!(b.stretch_fee, Money::zero());
        assert_eq!(b.bracer_cost, Money::zero());
        assert_eq!(b.upcharge, Money::zero());
    }

    #[test]
    fn basic_stretch_uses_unpadded_area_and_basic_schedule() {
        let mut book = thick_gallery_book();
        book.sheets = vec![PriceSheet {
            name: "Canvas with Basic Stretch".to_string(),
            media: Media::Canvas(WrapStyle::BasicStretch),
            ladder: [12.0, 11.0, 10.0, 9.0, 8.0],
        }];
        book.basic_stretch_bands = vec![StretchBand {
            min_sum: 0.0,
            max_sum: 100.0,
            fee: Money::from_dollars(20.0),
        }];

        let b = &compute_breakdowns(&book, &job(24.0, 36.0, 1)).unwrap()[0];
        assert_eq!(b.canvas_cost, Money::from_dollars(72.0)); // 6 sqft, no pad
        assert_eq!(b.stretch_fee, Money::from_dollars(20.0));
        // No dedicated frame rate configured: default 2.0/ft over 10 ft.
        assert_eq!(b.frame_cost, Money::from_dollars(20.0));
    }

    #[test]
    fn zero_quantity_is_rejected_before_any_work() {
        let book = thick_gallery_book();
        let err = compute_breakdowns(&book, &job(24.0, 36.0, 0)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn colors_cycle_through_the_palette() {
        let mut book = thick_gallery_book();
        let sheet = book.sheets[0].clone();
        book.sheets = (0..9)
            .map(|i| {
                let mut s = sheet.clone();
                s.name = format!("Type {i}");
                s
            })
            .collect();

        let all = compute_breakdowns(&book, &job(24.0, 36.0, 1)).unwrap();
        assert_eq!(all[0].color, PALETTE[0]);
        assert_eq!(all[7].color, PALETTE[0]);
        assert_eq!(all[8].color, PALETTE[1]);
    }
}
