//! Wire types for the QBO v3 API.
//!
//! Field names follow the provider's PascalCase JSON; the nested `value` /
//! `name` reference objects are lowercase on the wire and stay lowercase
//! here.

use serde::{Deserialize, Serialize};

/// `{"value": "..."}` reference, used for customers, items and tax codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ref {
    pub value: String,
}

impl Ref {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomerCreate {
    pub given_name: String,
    pub family_name: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct IncomeAccountRef {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemCreate {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub item_type: String,
    #[serde(rename = "IncomeAccountRef")]
    pub income_account_ref: IncomeAccountRef,
}

impl ItemCreate {
    /// Every line resolves to a `Service` item under the sales income
    /// account.
    pub fn service(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            item_type: "Service".to_string(),
            income_account_ref: IncomeAccountRef {
                name: "Sales of Product Income".to_string(),
                value: "79".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SalesItemLineDetail {
    #[serde(rename = "ItemRef")]
    pub item_ref: Ref,
    #[serde(rename = "Qty")]
    pub qty: f64,
    #[serde(rename = "UnitPrice")]
    pub unit_price: f64,
    #[serde(rename = "TaxCodeRef")]
    pub tax_code_ref: Ref,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceLine {
    #[serde(rename = "DetailType")]
    pub detail_type: String,
    #[serde(rename = "Amount")]
    pub amount: f64,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "SalesItemLineDetail")]
    pub detail: SalesItemLineDetail,
}

impl InvoiceLine {
    pub fn sales_item(
        item_ref: Ref,
        description: impl Into<String>,
        qty: f64,
        unit_price: f64,
        tax_code_ref: Ref,
    ) -> Self {
        Self {
            detail_type: "SalesItemLineDetail".to_string(),
            amount: round2(unit_price * qty),
            description: description.into(),
            detail: SalesItemLineDetail { item_ref, qty, unit_price, tax_code_ref },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TxnTaxDetail {
    #[serde(rename = "TxnTaxCodeRef")]
    pub txn_tax_code_ref: Ref,
    #[serde(rename = "TotalTax")]
    pub total_tax: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoicePayload {
    #[serde(rename = "CustomerRef")]
    pub customer_ref: Ref,
    #[serde(rename = "Line")]
    pub line: Vec<InvoiceLine>,
    #[serde(rename = "TxnTaxDetail", skip_serializing_if = "Option::is_none")]
    pub txn_tax_detail: Option<TxnTaxDetail>,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

// Response side.

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// The provider sometimes omits this; the old refresh token stays valid.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EntityRecord {
    #[serde(rename = "Id")]
    pub id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct QueryBody {
    #[serde(rename = "Customer", default)]
    pub customers: Vec<EntityRecord>,
    #[serde(rename = "Item", default)]
    pub items: Vec<EntityRecord>,
}

#[derive(Debug, Deserialize)]
pub struct QueryEnvelope {
    #[serde(rename = "QueryResponse", default)]
    pub query_response: QueryBody,
}

#[derive(Debug, Deserialize)]
pub struct CustomerEnvelope {
    #[serde(rename = "Customer")]
    pub customer: EntityRecord,
}

#[derive(Debug, Deserialize)]
pub struct ItemEnvelope {
    #[serde(rename = "Item")]
    pub item: EntityRecord,
}

#[derive(Debug, Deserialize)]
pub struct InvoiceEnvelope {
    #[serde(rename = "Invoice")]
    pub invoice: EntityRecord,
}
