use futures::future::join_all;

use crate::{
    catalog::{Catalog, CatalogType},
    Error, Result,
};

pub mod playlist_validator;
pub mod user_validator;

/// Synchronous field predicate paired with the message returned when it fails.
#[derive(Clone, Copy)]
pub struct Rule {
    pub description: &'static str,
    predicate: fn(&str) -> bool,
}

impl Rule {
    pub const fn new(description: &'static str, predicate: fn(&str) -> bool) -> Self {
        Self {
            description,
            predicate,
        }
    }

    pub fn is_valid(&self, value: &str) -> bool {
        (self.predicate)(value)
    }

    pub fn check(&self, value: &str) -> Result<()> {
        ensure(self.is_valid(value), self.description)
    }

    /// Checks only when the field was sent and is not blank.
    pub fn check_opt(&self, value: Option<&str>) -> Result<()> {
        match value {
            Some(value) if !value.is_empty() => self.check(value),
            _ => Ok(()),
        }
    }
}

/// Every element must pass `item`. An empty list passes.
#[derive(Clone, Copy)]
pub struct ListRule {
    pub description: &'static str,
    item: &'static Rule,
}

impl ListRule {
    pub const fn new(description: &'static str, item: &'static Rule) -> Self {
        Self { description, item }
    }

    pub fn is_valid<S: AsRef<str>>(&self, values: &[S]) -> bool {
        values.iter().all(|value| self.item.is_valid(value.as_ref()))
    }

    pub fn check<S: AsRef<str>>(&self, values: &[S]) -> Result<()> {
        ensure(self.is_valid(values), self.description)
    }
}

/// Existence probe against the external catalog.
#[derive(Clone, Copy)]
pub struct CatalogRule {
    pub description: &'static str,
    kind: CatalogType,
}

impl CatalogRule {
    pub const fn new(description: &'static str, kind: CatalogType) -> Self {
        Self { description, kind }
    }

    pub async fn is_valid(&self, catalog: &dyn Catalog, value: &str) -> bool {
        catalog.validate_id(value, self.kind).await
    }

    pub async fn check(&self, catalog: &dyn Catalog, value: &str) -> Result<()> {
        ensure(self.is_valid(catalog, value).await, self.description)
    }
}

#[derive(Clone, Copy)]
pub struct CatalogListRule {
    pub description: &'static str,
    item: &'static CatalogRule,
}

impl CatalogListRule {
    pub const fn new(description: &'static str, item: &'static CatalogRule) -> Self {
        Self { description, item }
    }

    /// Probes all elements concurrently. An empty list passes without a catalog call.
    pub async fn is_valid<S: AsRef<str>>(&self, catalog: &dyn Catalog, values: &[S]) -> bool {
        let probes = values
            .iter()
            .map(|value| self.item.is_valid(catalog, value.as_ref()));

        join_all(probes).await.into_iter().all(|found| found)
    }

    pub async fn check<S: AsRef<str>>(&self, catalog: &dyn Catalog, values: &[S]) -> Result<()> {
        ensure(self.is_valid(catalog, values).await, self.description)
    }
}

fn ensure(valid: bool, message: &'static str) -> Result<()> {
    if valid {
        Ok(())
    } else {
        Err(Error::Validation { message })
    }
}

/// A missing or empty field fails with `message`.
pub fn required(value: Option<String>, message: &'static str) -> Result<String> {
    value
        .filter(|value| !value.is_empty())
        .ok_or(Error::Validation { message })
}

/// Splits a comma separated query value, dropping empty entries.
pub fn split_csv(raw: Option<&str>) -> Vec<String> {
    raw.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}
