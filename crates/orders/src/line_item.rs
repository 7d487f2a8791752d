//! Line items: one priced row of a quote or invoice.

use serde::{Deserialize, Serialize};

use printdesk_core::{CustomItemId, LineItemId, Money};
use printdesk_pricing::{AddOnCharge, AddOnKind, CostBreakdown};

/// Where a line item came from.
///
/// Carried from creation so nothing downstream has to classify lines by
/// inspecting their labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum LineSource {
    /// A priced print run from the cost engine.
    Standard,
    /// A flat add-on service.
    AddOn { add_on: AddOnKind },
    /// Materialized from a per-title custom item; deleting either side
    /// removes the other.
    Custom { custom_id: CustomItemId },
}

/// One row of the draft or invoice.
///
/// `Option<Money>` on the price fields distinguishes "this price mode is not
/// offered for this line" (add-ons have no professional price) from a price
/// of zero. The discount fields hold non-negative magnitudes; signs are
/// applied where the totals are assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: LineItemId,
    pub print_type: String,
    /// Formatted `"h x w"`, empty for lines without a print size.
    pub size: String,
    /// Fractional quantities are real (computer time bills in quarter hours).
    pub quantity: f64,
    pub unit_price_regular: Option<Money>,
    pub unit_price_pro: Option<Money>,
    pub canvas_cost: Option<Money>,
    pub pro_canvas_cost: Option<Money>,
    pub frame_cost: Money,
    pub stretch_fee: Money,
    pub bracer_cost: Money,
    pub upcharge: Money,
    pub volume_discount: Money,
    pub pro_discount: Money,
    /// Opaque display tag.
    pub color: String,
    pub linked_title: String,
    pub source: LineSource,
}

impl LineItem {
    /// Build a line from a cost-engine breakdown.
    pub fn from_breakdown(b: &CostBreakdown, title: impl Into<String>) -> Self {
        Self {
            id: LineItemId::new(),
            print_type: b.print_type.clone(),
            size: b.size.clone(),
            quantity: b.quantity as f64,
            unit_price_regular: Some(b.total_cost),
            unit_price_pro: Some(b.pro_total_cost),
            canvas_cost: Some(b.canvas_cost),
            pro_canvas_cost: Some(b.pro_canvas_cost),
            frame_cost: b.frame_cost,
            stretch_fee: b.stretch_fee,
            bracer_cost: b.bracer_cost,
            upcharge: b.upcharge,
            volume_discount: b.volume_discount_amt.abs(),
            pro_discount: b.pro_discount_amt.abs(),
            color: b.color.clone(),
            linked_title: title.into(),
            source: LineSource::Standard,
        }
    }

    /// Build a line from a priced add-on. Add-ons have no size, no hardware
    /// components and no professional price.
    pub fn from_addon(charge: &AddOnCharge, title: impl Into<String>) -> Self {
        Self {
            id: LineItemId::new(),
            print_type: charge.label.clone(),
            size: String::new(),
            quantity: charge.quantity,
            unit_price_regular: Some(charge.unit_price),
            unit_price_pro: None,
            canvas_cost: None,
            pro_canvas_cost: None,
            frame_cost: Money::zero(),
            stretch_fee: Money::zero(),
            bracer_cost: Money::zero(),
            upcharge: Money::zero(),
            volume_discount: Money::zero(),
            pro_discount: Money::zero(),
            color: charge.color.to_string(),
            linked_title: title.into(),
            source: LineSource::AddOn { add_on: charge.kind },
        }
    }

    /// The unit price in effect for the given pricing mode. Lines without a
    /// professional price keep their regular price in professional mode.
    pub fn unit_price(&self, use_pro: bool) -> Money {
        let price = if use_pro {
            self.unit_price_pro.or(self.unit_price_regular)
        } else {
            self.unit_price_regular
        };
        price.unwrap_or(Money::zero())
    }

    /// `round2(unit x qty)` for the given pricing mode.
    pub fn extended_price(&self, use_pro: bool) -> Money {
        self.unit_price(use_pro).mul_qty(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addon_line(unit: Money, qty: f64) -> LineItem {
        LineItem::from_addon(
            &AddOnCharge {
                kind: AddOnKind::Flashdrive,
                label: "💿 Flashdrive".to_string(),
                quantity: qty,
                unit_price: unit,
                color: "#D3D3D3",
            },
            "Spring Meadow",
        )
    }

    #[test]
    fn addon_lines_fall_back_to_regular_price_in_pro_mode() {
        let line = addon_line(Money::from_dollars(10.0), 2.0);
        assert_eq!(line.unit_price_pro, None);
        assert_eq!(line.unit_price(true), Money::from_dollars(10.0));
        assert_eq!(line.extended_price(true), Money::from_dollars(20.0));
    }

    #[test]
    fn extended_price_rounds_fractional_quantities_to_cents() {
        let line = addon_line(Money::from_dollars(100.0), 1.25);
        assert_eq!(line.extended_price(false), Money::from_dollars(125.0));
    }
}
