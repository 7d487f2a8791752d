//! The submission flow: token refresh, entity resolution, invoice post.

use printdesk_billing::{DiscountInputs, InvoiceSummary};
use printdesk_orders::{LineItem, LineSource};

use crate::config::{EnvStore, QboConfig};
use crate::error::{QboErrorReport, SyncError, SyncResult};
use crate::payload::{
    CustomerCreate, CustomerEnvelope, InvoiceEnvelope, InvoiceLine, InvoicePayload, ItemCreate,
    ItemEnvelope, QueryEnvelope, Ref, TokenResponse, TxnTaxDetail,
};
use crate::sanitize::{escape_query, strip_emoji};
use crate::transport::{Entity, QboTransport};

/// What a successful submission hands back.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReceipt {
    pub customer_id: String,
    pub invoice_id: Option<String>,
}

/// Drives one submission against a transport, persisting refreshed tokens to
/// the env store.
pub struct QboClient<T: QboTransport> {
    transport: T,
    store: EnvStore,
}

impl<T: QboTransport> QboClient<T> {
    pub fn new(transport: T, store: EnvStore) -> Self {
        Self { transport, store }
    }

    /// Run the whole flow. Any failing step aborts; nothing is retried, and
    /// a re-invocation starts over at the token refresh.
    pub async fn submit_invoice(
        &self,
        summary: &InvoiceSummary,
        inputs: &DiscountInputs,
    ) -> SyncResult<SubmissionReceipt> {
        if summary.items_by_title.is_empty() {
            return Err(SyncError::validation("there are no invoice items to send"));
        }

        let config = QboConfig::load(&self.store)?;
        let access_token = self.refresh_tokens(&config).await?;

        let customer_id = self.resolve_customer(&access_token, &summary.artist).await?;

        let tax_code = if inputs.apply_tax { "TAX" } else { "NON" };
        let mut lines = Vec::new();

        for (title, items) in &summary.items_by_title {
            for item in items {
                lines.push(self.build_item_line(&access_token, title, item, tax_code).await?);
            }
        }

        for (name, description, amount) in [
            ("Volume Discount", "Volume Discount".to_string(), summary.volume_savings),
            ("Professional Discount", "Professional Discount".to_string(), summary.pro_savings),
            ("Flat Discount", "Flat Discount".to_string(), summary.flat_discount),
            (
                "Custom % Discount",
                format!("Custom Discount ({:.2}%)", summary.percent_discount),
                summary.percent_discount_amt,
            ),
        ] {
            if amount.is_positive() {
                let item_ref = self.resolve_item(&access_token, name).await?;
                lines.push(InvoiceLine::sales_item(
                    item_ref,
                    description,
                    1.0,
                    -amount.as_dollars(),
                    Ref::new(tax_code),
                ));
            }
        }

        if summary.card_fee.is_positive() {
            let item_ref = self.resolve_item(&access_token, "Card Fee").await?;
            lines.push(InvoiceLine::sales_item(
                item_ref,
                "Card Fee (3%)",
                1.0,
                summary.card_fee.as_dollars(),
                Ref::new(tax_code),
            ));
        }

        let payload = InvoicePayload {
            customer_ref: Ref::new(customer_id.clone()),
            line: lines,
            txn_tax_detail: inputs.apply_tax.then(|| TxnTaxDetail {
                txn_tax_code_ref: Ref::new("TAX"),
                total_tax: summary.tax.as_dollars(),
            }),
        };

        let response = self
            .transport
            .create("invoice_create", &access_token, Entity::Invoice, to_json(&payload)?)
            .await?;
        if !response.is_success() {
            return Err(SyncError::api("invoice_create", &response));
        }

        let invoice_id = response
            .json::<InvoiceEnvelope>()
            .map(|envelope| envelope.invoice.id)
            .ok();
        Ok(SubmissionReceipt { customer_id, invoice_id })
    }

    /// Refresh the OAuth pair and persist it. The provider may omit the
    /// refresh token from the response; the old one stays valid and is kept.
    async fn refresh_tokens(&self, config: &QboConfig) -> SyncResult<String> {
        let response = self
            .transport
            .refresh_token(&config.client_id, &config.client_secret, &config.refresh_token)
            .await?;
        if !response.is_success() {
            return Err(SyncError::api("token_refresh", &response));
        }

        let tokens: TokenResponse = response.json()?;
        let refresh_token = tokens
            .refresh_token
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| config.refresh_token.clone());
        self.store.update(&[
            ("ACCESS_TOKEN", &tokens.access_token),
            ("REFRESH_TOKEN", &refresh_token),
        ])?;
        Ok(tokens.access_token)
    }

    /// Look the customer up by sanitized display name; create on miss. A
    /// failed lookup is logged but creation is still attempted — only a
    /// failed creation aborts.
    async fn resolve_customer(&self, access_token: &str, artist: &str) -> SyncResult<String> {
        let display_name = strip_emoji(artist);
        let display_name = display_name.trim();
        if display_name.is_empty() {
            return Err(SyncError::validation("artist name is required before sending"));
        }

        let query = format!(
            "SELECT * FROM Customer WHERE DisplayName = '{}'",
            escape_query(display_name)
        );
        let response = self.transport.query("customer_lookup", access_token, &query).await?;
        if response.is_success() {
            let envelope: QueryEnvelope = response.json()?;
            if let Some(customer) = envelope.query_response.customers.first() {
                return Ok(customer.id.clone());
            }
        } else {
            QboErrorReport::from_response("customer_lookup", &response)
                .with_extra(display_name)
                .log();
        }

        let (given_name, family_name) = split_name(display_name);
        let payload = CustomerCreate {
            given_name,
            family_name,
            display_name: display_name.to_string(),
        };
        let response = self
            .transport
            .create("customer_create", access_token, Entity::Customer, to_json(&payload)?)
            .await?;
        if !response.is_success() {
            return Err(SyncError::api("customer_create", &response));
        }
        Ok(response.json::<CustomerEnvelope>()?.customer.id)
    }

    /// Lookup-or-create for a service item, same abort rule as the customer.
    async fn resolve_item(&self, access_token: &str, name: &str) -> SyncResult<Ref> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SyncError::validation("invalid item name, cannot create invoice line"));
        }

        let query = format!("SELECT * FROM Item WHERE Name = '{}'", escape_query(name));
        let response = self.transport.query("item_lookup", access_token, &query).await?;
        if response.is_success() {
            let envelope: QueryEnvelope = response.json()?;
            if let Some(item) = envelope.query_response.items.first() {
                return Ok(Ref::new(item.id.clone()));
            }
        } else {
            QboErrorReport::from_response("item_lookup", &response).with_extra(name).log();
        }

        let response = self
            .transport
            .create(
                "item_create",
                access_token,
                Entity::Item,
                to_json(&ItemCreate::service(name))?,
            )
            .await?;
        if !response.is_success() {
            return Err(SyncError::api("item_create", &response));
        }
        Ok(Ref::new(response.json::<ItemEnvelope>()?.item.id))
    }

    async fn build_item_line(
        &self,
        access_token: &str,
        title: &str,
        item: &LineItem,
        tax_code: &str,
    ) -> SyncResult<InvoiceLine> {
        let name = strip_emoji(&item.print_type);
        let name = name.trim();
        let item_ref = self.resolve_item(access_token, name).await?;

        // Print runs carry their size and title; service and custom lines
        // just the title.
        let description = match item.source {
            LineSource::Standard => format!("{} inches\n   {}", item.size, title),
            _ => title.to_string(),
        };

        Ok(InvoiceLine::sales_item(
            item_ref,
            description,
            item.quantity,
            item.unit_price(false).as_dollars(),
            Ref::new(tax_code),
        ))
    }
}

fn split_name(display_name: &str) -> (String, String) {
    match display_name.split_once(' ') {
        Some((first, rest)) => (first.to_string(), rest.trim().to_string()),
        None => (display_name.to_string(), String::new()),
    }
}

fn to_json<S: serde::Serialize>(payload: &S) -> SyncResult<serde_json::Value> {
    serde_json::to_value(payload).map_err(|e| SyncError::Parse(e.to_string()))
}
