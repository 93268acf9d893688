//! Invoice Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, merge_patch, parse_id};
use crate::db::models::{Invoice, InvoiceUpdate};

pub const TABLE: &str = "invoice";

#[derive(Clone)]
pub struct InvoiceRepository {
    base: BaseRepository,
}

impl InvoiceRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all invoices, oldest first
    pub async fn find_all(&self) -> RepoResult<Vec<Invoice>> {
        let invoices: Vec<Invoice> = self
            .base
            .db()
            .query("SELECT * FROM invoice ORDER BY created_at")
            .await?
            .take(0)?;
        Ok(invoices)
    }

    /// Find invoice by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Invoice>> {
        let rid = parse_id(TABLE, id)?;
        let invoice: Option<Invoice> = self.base.db().select(rid).await?;
        Ok(invoice)
    }

    /// Create a new invoice
    pub async fn create(&self, invoice: Invoice) -> RepoResult<Invoice> {
        let created: Option<Invoice> = self.base.db().create(TABLE).content(invoice).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create invoice".to_string()))
    }

    /// Merge present fields into the invoice record
    pub async fn update(&self, id: &str, data: InvoiceUpdate) -> RepoResult<Invoice> {
        let rid = parse_id(TABLE, id)?;
        let existing: Option<Invoice> = self.base.db().select(rid.clone()).await?;
        if existing.is_none() {
            return Err(RepoError::NotFound(format!("Invoice {id} not found")));
        }

        let patch = merge_patch(&data)?;
        let updated: Option<Invoice> = self.base.db().update(rid).merge(patch).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Invoice {id} not found")))
    }
}
