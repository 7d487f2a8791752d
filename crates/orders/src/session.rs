//! The quoting session: draft and invoice sets, titles, custom items.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use printdesk_core::{CustomItemId, DomainError, DomainResult, LineItemId, Money};

use crate::custom::{CustomItem, CustomItemDraft};
use crate::line_item::{LineItem, LineSource};

/// One quoting session.
///
/// A line item lives in exactly one of `draft` and `invoice` at a time;
/// sending a title moves its items. `title_order` is the draft registry:
/// first-seen order, one entry per live draft title. Collapse state is pure
/// display state and never affects pricing or aggregation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub artist: String,
    pub current_title: String,
    draft: Vec<LineItem>,
    invoice: Vec<LineItem>,
    title_order: Vec<String>,
    collapsed: HashSet<String>,
    custom_items: HashMap<String, Vec<CustomItem>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft_items(&self) -> &[LineItem] {
        &self.draft
    }

    pub fn invoice_items(&self) -> &[LineItem] {
        &self.invoice
    }

    pub fn title_order(&self) -> &[String] {
        &self.title_order
    }

    pub fn is_collapsed(&self, title: &str) -> bool {
        self.collapsed.contains(title)
    }

    pub fn custom_items_for(&self, title: &str) -> &[CustomItem] {
        self.custom_items.get(title).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Append a line to the draft, registering its title at the end of the
    /// title order on first sight.
    pub fn add_to_draft(&mut self, item: LineItem) {
        if !self.title_order.iter().any(|t| t == &item.linked_title) {
            self.title_order.push(item.linked_title.clone());
        }
        self.draft.push(item);
    }

    /// Validate and store a custom item under `title`, and materialize it as
    /// a draft line carrying the custom item's id.
    pub fn add_custom_item(
        &mut self,
        title: &str,
        draft: CustomItemDraft,
    ) -> DomainResult<CustomItemId> {
        if title.trim().is_empty() {
            return Err(DomainError::validation(
                "select or enter a title before adding a custom item",
            ));
        }
        let item = draft.validate()?;
        let id = item.id;

        let line = LineItem {
            id: LineItemId::new(),
            print_type: item.name.clone(),
            size: item.description.clone(),
            quantity: item.quantity,
            unit_price_regular: Some(item.unit_price),
            unit_price_pro: Some(item.unit_price),
            canvas_cost: None,
            pro_canvas_cost: None,
            frame_cost: Money::zero(),
            stretch_fee: Money::zero(),
            bracer_cost: Money::zero(),
            upcharge: Money::zero(),
            volume_discount: Money::zero(),
            pro_discount: Money::zero(),
            color: "#E9967A".to_string(),
            linked_title: title.to_string(),
            source: LineSource::Custom { custom_id: id },
        };

        self.custom_items.entry(title.to_string()).or_default().push(item);
        self.add_to_draft(line);
        Ok(id)
    }

    /// Remove a custom item by id, along with the line it was materialized
    /// into.
    pub fn remove_custom_item(&mut self, title: &str, id: CustomItemId) -> DomainResult<()> {
        let items = self
            .custom_items
            .get_mut(title)
            .ok_or(DomainError::NotFound)?;
        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            return Err(DomainError::NotFound);
        }

        let linked = LineSource::Custom { custom_id: id };
        self.draft.retain(|line| line.source != linked);
        self.invoice.retain(|line| line.source != linked);
        Ok(())
    }

    /// Remove a line by stable id from whichever set holds it. Custom-sourced
    /// lines also drop their backing custom item.
    pub fn remove_line_item(&mut self, id: LineItemId) -> DomainResult<()> {
        let removed = remove_by_id(&mut self.draft, id)
            .or_else(|| remove_by_id(&mut self.invoice, id))
            .ok_or(DomainError::NotFound)?;

        if let LineSource::Custom { custom_id } = removed.source
            && let Some(items) = self.custom_items.get_mut(&removed.linked_title)
        {
            items.retain(|item| item.id != custom_id);
        }
        Ok(())
    }

    /// Rename a title everywhere it appears: both line-item sets, the custom
    /// item store, collapse state, and its position in the title order.
    ///
    /// A rename onto a different existing title is a conflict and changes
    /// nothing.
    pub fn rename_title(&mut self, old: &str, new: &str) -> DomainResult<()> {
        let new = new.trim();
        if new.is_empty() {
            return Err(DomainError::validation("title cannot be empty"));
        }
        if new == old {
            return Ok(());
        }
        let position = self
            .title_order
            .iter()
            .position(|t| t == old)
            .ok_or(DomainError::NotFound)?;
        if self.title_order.iter().any(|t| t == new) {
            return Err(DomainError::conflict(format!("a title named '{new}' already exists")));
        }

        self.title_order[position] = new.to_string();
        for line in self.draft.iter_mut().chain(self.invoice.iter_mut()) {
            if line.linked_title == old {
                line.linked_title = new.to_string();
            }
        }
        if let Some(items) = self.custom_items.remove(old) {
            self.custom_items.insert(new.to_string(), items);
        }
        if self.collapsed.remove(old) {
            self.collapsed.insert(new.to_string());
        }
        if self.current_title == old {
            self.current_title = new.to_string();
        }
        Ok(())
    }

    /// Drop a whole draft title: its lines, its custom items, its registry
    /// entry and its collapse state.
    pub fn remove_title_block(&mut self, title: &str) {
        self.draft.retain(|line| line.linked_title != title);
        self.custom_items.remove(title);
        self.title_order.retain(|t| t != title);
        self.collapsed.remove(title);
    }

    /// Drop every invoice line under a title. The draft side is untouched.
    pub fn remove_title_from_invoice(&mut self, title: &str) {
        self.invoice.retain(|line| line.linked_title != title);
    }

    /// Move every draft line under `title` to the invoice, preserving order
    /// and every field. The title leaves the draft registry.
    pub fn send_title_to_invoice(&mut self, title: &str) -> DomainResult<()> {
        if !self.title_order.iter().any(|t| t == title) {
            return Err(DomainError::NotFound);
        }
        let mut kept = Vec::with_capacity(self.draft.len());
        for line in self.draft.drain(..) {
            if line.linked_title == title {
                self.invoice.push(line);
            } else {
                kept.push(line);
            }
        }
        self.draft = kept;
        self.title_order.retain(|t| t != title);
        self.collapsed.remove(title);
        Ok(())
    }

    /// Move the whole draft to the invoice in display order.
    pub fn send_all_to_invoice(&mut self) {
        self.invoice.append(&mut self.draft);
        self.title_order.clear();
        self.collapsed.clear();
    }

    /// Display-state only; nothing downstream reads it.
    pub fn toggle_collapsed(&mut self, title: &str) {
        if !self.collapsed.remove(title) {
            self.collapsed.insert(title.to_string());
        }
    }

    pub fn clear_draft(&mut self) {
        self.draft.clear();
        self.title_order.clear();
        self.collapsed.clear();
        self.custom_items.clear();
    }

    pub fn clear_invoice(&mut self) {
        self.invoice.clear();
    }
}

fn remove_by_id(lines: &mut Vec<LineItem>, id: LineItemId) -> Option<LineItem> {
    let position = lines.iter().position(|line| line.id == id)?;
    Some(lines.remove(position))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(title: &str, print_type: &str) -> LineItem {
        LineItem {
            id: LineItemId::new(),
            print_type: print_type.to_string(),
            size: "24 x 36".to_string(),
            quantity: 1.0,
            unit_price_regular: Some(Money::from_dollars(100.0)),
            unit_price_pro: Some(Money::from_dollars(90.0)),
            canvas_cost: Some(Money::from_dollars(80.0)),
            pro_canvas_cost: Some(Money::from_dollars(72.0)),
            frame_cost: Money::from_dollars(20.0),
            stretch_fee: Money::zero(),
            bracer_cost: Money::zero(),
            upcharge: Money::zero(),
            volume_discount: Money::zero(),
            pro_discount: Money::from_dollars(10.0),
            color: "#ccff00".to_string(),
            linked_title: title.to_string(),
            source: LineSource::Standard,
        }
    }

    fn custom_draft(name: &str) -> CustomItemDraft {
        CustomItemDraft {
            name: name.to_string(),
            description: "hand finishing".to_string(),
            quantity: 1.0,
            unit_price: Money::from_dollars(45.0),
        }
    }

    #[test]
    fn titles_register_once_in_first_seen_order() {
        let mut session = Session::new();
        session.add_to_draft(line("Dusk", "Canvas with Thick Gallery Wrap"));
        session.add_to_draft(line("Dawn", "Photorag"));
        session.add_to_draft(line("Dusk", "Photorag"));

        assert_eq!(session.title_order(), ["Dusk", "Dawn"]);
        assert_eq!(session.draft_items().len(), 3);
    }

    #[test]
    fn custom_item_materializes_into_the_draft() {
        let mut session = Session::new();
        let id = session.add_custom_item("Dusk", custom_draft("Crating")).unwrap();

        assert_eq!(session.custom_items_for("Dusk").len(), 1);
        let line = &session.draft_items()[0];
        assert_eq!(line.print_type, "Crating");
        assert_eq!(line.size, "hand finishing");
        assert_eq!(line.source, LineSource::Custom { custom_id: id });
        // Custom items price identically in both modes.
        assert_eq!(line.unit_price(true), line.unit_price(false));
        assert_eq!(session.title_order(), ["Dusk"]);
    }

    #[test]
    fn custom_item_needs_a_title() {
        let mut session = Session::new();
        let err = session.add_custom_item("  ", custom_draft("Crating")).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(session.draft_items().is_empty());
    }

    #[test]
    fn deleting_the_custom_item_removes_its_line() {
        let mut session = Session::new();
        let id = session.add_custom_item("Dusk", custom_draft("Crating")).unwrap();

        session.remove_custom_item("Dusk", id).unwrap();
        assert!(session.draft_items().is_empty());
        assert!(session.custom_items_for("Dusk").is_empty());
    }

    #[test]
    fn deleting_the_line_removes_its_custom_item() {
        let mut session = Session::new();
        session.add_custom_item("Dusk", custom_draft("Crating")).unwrap();
        let line_id = session.draft_items()[0].id;

        session.remove_line_item(line_id).unwrap();
        assert!(session.draft_items().is_empty());
        assert!(session.custom_items_for("Dusk").is_empty());
    }

    #[test]
    fn remove_line_item_reaches_the_invoice_too() {
        let mut session = Session::new();
        session.add_to_draft(line("Dusk", "Photorag"));
        session.send_title_to_invoice("Dusk").unwrap();
        let id = session.invoice_items()[0].id;

        session.remove_line_item(id).unwrap();
        assert!(session.invoice_items().is_empty());

        let missing = session.remove_line_item(id).unwrap_err();
        assert!(matches!(missing, DomainError::NotFound));
    }

    #[test]
    fn rename_cascades_across_both_sets_and_custom_items() {
        let mut session = Session::new();
        session.add_to_draft(line("Dusk", "Photorag"));
        session.add_custom_item("Dusk", custom_draft("Crating")).unwrap();
        session.add_to_draft(line("Dawn", "Photorag"));
        session.send_title_to_invoice("Dawn").unwrap();
        session.add_to_draft(line("Dawn", "Photorag"));
        session.toggle_collapsed("Dusk");
        session.current_title = "Dusk".to_string();

        session.rename_title("Dusk", "Twilight").unwrap();

        assert_eq!(session.title_order(), ["Twilight", "Dawn"]);
        assert!(session.draft_items().iter().all(|l| l.linked_title != "Dusk"));
        assert_eq!(session.custom_items_for("Twilight").len(), 1);
        assert!(session.is_collapsed("Twilight"));
        assert_eq!(session.current_title, "Twilight");
    }

    #[test]
    fn rename_onto_an_existing_title_changes_nothing() {
        let mut session = Session::new();
        session.add_to_draft(line("Dusk", "Photorag"));
        session.add_to_draft(line("Dawn", "Photorag"));
        let before = session.clone();

        let err = session.rename_title("Dusk", "Dawn").unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(session, before);
    }

    #[test]
    fn rename_to_itself_is_a_no_op() {
        let mut session = Session::new();
        session.add_to_draft(line("Dusk", "Photorag"));
        session.rename_title("Dusk", "Dusk").unwrap();
        assert_eq!(session.title_order(), ["Dusk"]);
    }

    #[test]
    fn rename_preserves_registry_position() {
        let mut session = Session::new();
        session.add_to_draft(line("A", "Photorag"));
        session.add_to_draft(line("B", "Photorag"));
        session.add_to_draft(line("C", "Photorag"));

        session.rename_title("B", "Middle").unwrap();
        assert_eq!(session.title_order(), ["A", "Middle", "C"]);
    }

    #[test]
    fn send_title_moves_items_preserving_order() {
        let mut session = Session::new();
        session.add_to_draft(line("Dusk", "First"));
        session.add_to_draft(line("Dawn", "Other"));
        session.add_to_draft(line("Dusk", "Second"));

        session.send_title_to_invoice("Dusk").unwrap();

        let sent: Vec<_> = session.invoice_items().iter().map(|l| l.print_type.as_str()).collect();
        assert_eq!(sent, ["First", "Second"]);
        assert_eq!(session.draft_items().len(), 1);
        assert_eq!(session.title_order(), ["Dawn"]);

        let missing = session.send_title_to_invoice("Dusk").unwrap_err();
        assert!(matches!(missing, DomainError::NotFound));
    }

    #[test]
    fn send_all_empties_the_draft_and_its_registry() {
        let mut session = Session::new();
        session.add_to_draft(line("Dusk", "Photorag"));
        session.add_to_draft(line("Dawn", "Photorag"));

        session.send_all_to_invoice();
        assert!(session.draft_items().is_empty());
        assert!(session.title_order().is_empty());
        assert_eq!(session.invoice_items().len(), 2);
    }

    #[test]
    fn remove_title_block_clears_lines_customs_and_registry() {
        let mut session = Session::new();
        session.add_to_draft(line("Dusk", "Photorag"));
        session.add_custom_item("Dusk", custom_draft("Crating")).unwrap();
        session.add_to_draft(line("Dawn", "Photorag"));

        session.remove_title_block("Dusk");
        assert_eq!(session.draft_items().len(), 1);
        assert!(session.custom_items_for("Dusk").is_empty());
        assert_eq!(session.title_order(), ["Dawn"]);
    }

    #[test]
    fn remove_title_from_invoice_leaves_the_draft_alone() {
        let mut session = Session::new();
        session.add_to_draft(line("Dusk", "Photorag"));
        session.send_title_to_invoice("Dusk").unwrap();
        session.add_to_draft(line("Dusk", "Photorag"));

        session.remove_title_from_invoice("Dusk");
        assert!(session.invoice_items().is_empty());
        assert_eq!(session.draft_items().len(), 1);
    }

    #[test]
    fn collapse_is_a_toggle() {
        let mut session = Session::new();
        session.toggle_collapsed("Dusk");
        assert!(session.is_collapsed("Dusk"));
        session.toggle_collapsed("Dusk");
        assert!(!session.is_collapsed("Dusk"));
    }
}
