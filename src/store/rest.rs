use anyhow::{bail, Context, Result};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use super::{Flag, Store, Table};
use crate::models::{FinanceItem, Goal, Month, NewFinanceItem, SavingsPlan};

/// An equality filter in PostgREST syntax (`column=eq.value`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Filter {
    column: &'static str,
    value: String,
}

impl Filter {
    pub(crate) fn eq(column: &'static str, value: impl ToString) -> Self {
        Self {
            column,
            value: value.to_string(),
        }
    }

    fn to_query(&self) -> (&'static str, String) {
        (self.column, format!("eq.{}", self.value))
    }
}

/// Client for a PostgREST endpoint such as a Supabase project.
///
/// An empty URL or key is accepted here; requests then fail when sent.
pub(crate) struct RestStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    pub(crate) fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    fn endpoint(&self, table: Table) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), table.name())
    }

    fn filter_query(filters: &[Filter]) -> Vec<(&'static str, String)> {
        filters.iter().map(Filter::to_query).collect()
    }

    pub(crate) fn select<T: DeserializeOwned>(
        &self,
        table: Table,
        filters: &[Filter],
    ) -> Result<Vec<T>> {
        tracing::debug!(%table, ?filters, "select");
        let request = self
            .client
            .get(self.endpoint(table))
            .query(&[("select", "*")])
            .query(&Self::filter_query(filters));
        let response = self.send(request, "select", table)?;
        response
            .json::<Vec<T>>()
            .with_context(|| format!("Failed to decode rows from {table}"))
    }

    pub(crate) fn update<P: Serialize>(
        &self,
        table: Table,
        filters: &[Filter],
        patch: &P,
    ) -> Result<()> {
        tracing::debug!(%table, ?filters, "update");
        let request = self
            .client
            .patch(self.endpoint(table))
            .query(&Self::filter_query(filters))
            .header("Prefer", "return=minimal")
            .json(patch);
        self.send(request, "update", table)?;
        Ok(())
    }

    pub(crate) fn insert<R: Serialize>(&self, table: Table, rows: &[R]) -> Result<()> {
        tracing::debug!(%table, rows = rows.len(), "insert");
        let request = self
            .client
            .post(self.endpoint(table))
            .header("Prefer", "return=minimal")
            .json(rows);
        self.send(request, "insert", table)?;
        Ok(())
    }

    fn send(&self, request: RequestBuilder, op: &str, table: Table) -> Result<Response> {
        let response = request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .with_context(|| format!("{op} on {table} failed"))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            bail!("{op} on {table} returned {status}: {body}");
        }
        Ok(response)
    }
}

impl Store for RestStore {
    fn location(&self) -> String {
        if self.base_url.is_empty() {
            "remote store (not configured)".into()
        } else {
            self.base_url.clone()
        }
    }

    fn goals(&self) -> Result<Vec<Goal>> {
        self.select(Table::Goals, &[])
    }

    fn finance_items(&self, month: Month) -> Result<Vec<FinanceItem>> {
        self.select(Table::Finance, &[Filter::eq("month", month.number())])
    }

    fn savings_plans(&self) -> Result<Vec<SavingsPlan>> {
        self.select(Table::Savings, &[])
    }

    fn set_flag(&self, flag: Flag, id: i64, value: bool) -> Result<()> {
        let mut patch = serde_json::Map::new();
        patch.insert(flag.column().to_string(), json!(value));
        self.update(flag.table(), &[Filter::eq("id", id)], &patch)
    }

    fn insert_finance_item(&self, item: &NewFinanceItem) -> Result<()> {
        self.insert(Table::Finance, std::slice::from_ref(item))
    }
}
