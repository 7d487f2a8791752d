//! The discount/fee/tax pipeline.
//!
//! The step order is load-bearing: the PDF/DOCX exporters and the accounting
//! sync all reproduce `summary_lines` verbatim, so the sequence here defines
//! the document everywhere.

use serde::{Deserialize, Serialize};

use printdesk_core::Money;
use printdesk_orders::{LineItem, Session};

/// Card processing fee applied to the discounted subtotal.
pub const CARD_FEE_RATE: f64 = 0.03;
/// Sales tax applied to the discounted subtotal plus the card fee.
pub const TAX_RATE: f64 = 0.07;

/// Operator discount and fee choices for one invoice.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DiscountInputs {
    pub flat_discount: Money,
    /// Percent, e.g. `10.0` for 10%. Always taken against the full
    /// undiscounted subtotal.
    pub percent_discount: f64,
    pub apply_card_fee: bool,
    pub apply_tax: bool,
    /// Whole-invoice professional pricing; lines without a professional price
    /// keep their regular price.
    pub use_pro: bool,
}

/// One row of the fixed summary block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryLine {
    pub label: String,
    /// Signed: discount rows are negative.
    pub amount: Money,
}

/// Everything derived from the invoice set for one aggregation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceSummary {
    pub artist: String,
    /// Invoice lines grouped by title, in first-seen title order.
    pub items_by_title: Vec<(String, Vec<LineItem>)>,
    pub subtotal: Money,
    pub volume_savings: Money,
    pub pro_savings: Money,
    pub flat_discount: Money,
    pub percent_discount: f64,
    pub percent_discount_amt: Money,
    pub discounted_subtotal: Money,
    pub card_fee: Money,
    pub tax: Money,
    pub final_total: Money,
    /// The nine rows, always all present; zero-amount discount rows are kept
    /// and filtered by consumers.
    pub summary_lines: Vec<SummaryLine>,
}

/// Aggregate the invoice set. Pure: reads the session, mutates nothing.
///
/// Fixed order: subtotal, built-in savings, percent discount (off the full
/// subtotal), clamp at zero, card fee, tax on subtotal-plus-fee, total.
/// Integer-cents arithmetic with rounding at each step keeps every
/// intermediate exactly representable at two decimal places.
pub fn compute_summary(session: &Session, inputs: &DiscountInputs) -> InvoiceSummary {
    let items = session.invoice_items();

    let subtotal: Money = items.iter().map(|line| line.extended_price(inputs.use_pro)).sum();

    let volume_savings = items.iter().map(|l| l.volume_discount).sum::<Money>().abs();
    let pro_savings = items.iter().map(|l| l.pro_discount).sum::<Money>().abs();

    let percent_discount_amt = subtotal.mul_rate(inputs.percent_discount / 100.0);
    let all_discounts =
        volume_savings + pro_savings + inputs.flat_discount + percent_discount_amt;
    let discounted_subtotal = subtotal.saturating_sub_to_zero(all_discounts);

    let card_fee = if inputs.apply_card_fee {
        discounted_subtotal.mul_rate(CARD_FEE_RATE)
    } else {
        Money::zero()
    };
    // The card fee is itself taxable.
    let taxable_base = discounted_subtotal + card_fee;
    let tax = if inputs.apply_tax { taxable_base.mul_rate(TAX_RATE) } else { Money::zero() };
    let final_total = discounted_subtotal + card_fee + tax;

    let summary_lines = vec![
        SummaryLine { label: "Subtotal".to_string(), amount: subtotal },
        SummaryLine { label: "Volume Discount".to_string(), amount: -volume_savings },
        SummaryLine { label: "Professional Discount".to_string(), amount: -pro_savings },
        SummaryLine { label: "Flat Discount".to_string(), amount: -inputs.flat_discount },
        SummaryLine {
            label: format!("Custom Discount ({:.2}%)", inputs.percent_discount),
            amount: -percent_discount_amt,
        },
        SummaryLine { label: "Discounted Subtotal".to_string(), amount: discounted_subtotal },
        SummaryLine { label: "Card Fee (3%)".to_string(), amount: card_fee },
        SummaryLine {
            label: format!("Sales Tax ({}%)", (TAX_RATE * 100.0) as u32),
            amount: tax,
        },
        SummaryLine { label: "Total Due".to_string(), amount: final_total },
    ];

    InvoiceSummary {
        artist: session.artist.clone(),
        items_by_title: group_by_title(items),
        subtotal,
        volume_savings,
        pro_savings,
        flat_discount: inputs.flat_discount,
        percent_discount: inputs.percent_discount,
        percent_discount_amt,
        discounted_subtotal,
        card_fee,
        tax,
        final_total,
        summary_lines,
    }
}

fn group_by_title(items: &[LineItem]) -> Vec<(String, Vec<LineItem>)> {
    let mut groups: Vec<(String, Vec<LineItem>)> = Vec::new();
    for item in items {
        let title =
            if item.linked_title.is_empty() { "Untitled" } else { item.linked_title.as_str() };
        match groups.iter_mut().find(|(t, _)| t == title) {
            Some((_, lines)) => lines.push(item.clone()),
            None => groups.push((title.to_string(), vec![item.clone()])),
        }
    }
    groups
}
