//! redb-based allowlist storage
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `authorized_emails` | email | `()` | 授权管理员集合 |
//!
//! 打开时播种一条受保护的默认邮箱；[`AllowlistStore::remove`] 拒绝
//! 移除它，交互路径永远留有至少一个管理员。

use std::path::Path;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use thiserror::Error;

use crate::utils::validation::validate_email;

/// 授权邮箱集合: key = email, value = empty (existence check)
const ADMINS_TABLE: TableDefinition<&str, ()> = TableDefinition::new("authorized_emails");

/// Allowlist errors
#[derive(Debug, Error)]
pub enum AllowlistError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Already authorized: {0}")]
    Duplicate(String),

    #[error("Not authorized: {0}")]
    NotFound(String),

    #[error("The default admin cannot be removed")]
    ProtectedEntry,
}

pub type AllowlistResult<T> = Result<T, AllowlistError>;

/// Admin-email allowlist backed by redb
pub struct AllowlistStore {
    db: Database,
    protected: String,
}

impl AllowlistStore {
    /// Open or create the store; seeds the protected default entry.
    pub fn open(path: impl AsRef<Path>, protected: &str) -> AllowlistResult<Self> {
        let db = Database::create(path)?;

        let write_txn = db.begin_write()?;
        {
            let mut table = write_txn.open_table(ADMINS_TABLE)?;
            table.insert(protected, ())?;
        }
        write_txn.commit()?;

        Ok(Self {
            db,
            protected: protected.to_string(),
        })
    }

    /// 受保护的默认邮箱
    pub fn protected(&self) -> &str {
        &self.protected
    }

    /// Is this email authorized?
    pub fn contains(&self, email: &str) -> AllowlistResult<bool> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ADMINS_TABLE)?;
        Ok(table.get(email.trim())?.is_some())
    }

    /// All authorized emails, in key order
    pub fn list(&self) -> AllowlistResult<Vec<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ADMINS_TABLE)?;

        let mut emails = Vec::new();
        for entry in table.iter()? {
            let (email, _) = entry?;
            emails.push(email.value().to_string());
        }
        Ok(emails)
    }

    /// Authorize a new email
    pub fn add(&self, email: &str) -> AllowlistResult<()> {
        let email = email.trim();
        if !validate_email(email) {
            return Err(AllowlistError::InvalidEmail(email.to_string()));
        }
        if self.contains(email)? {
            return Err(AllowlistError::Duplicate(email.to_string()));
        }

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(ADMINS_TABLE)?;
            table.insert(email, ())?;
        }
        write_txn.commit()?;

        tracing::info!(email, "Admin access granted");
        Ok(())
    }

    /// Revoke an email. The protected default entry is refused.
    pub fn remove(&self, email: &str) -> AllowlistResult<()> {
        let email = email.trim();
        if email == self.protected {
            return Err(AllowlistError::ProtectedEntry);
        }

        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut table = write_txn.open_table(ADMINS_TABLE)?;
            table.remove(email)?.is_some()
        };
        write_txn.commit()?;

        if !removed {
            return Err(AllowlistError::NotFound(email.to_string()));
        }

        tracing::info!(email, "Admin access revoked");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROTECTED: &str = "matteo.koenji@gmail.com";

    fn open_store() -> (AllowlistStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = AllowlistStore::open(dir.path().join("admins.redb"), PROTECTED).unwrap();
        (store, dir)
    }

    #[test]
    fn seeds_the_protected_entry() {
        let (store, _dir) = open_store();
        assert!(store.contains(PROTECTED).unwrap());
        assert_eq!(store.list().unwrap(), vec![PROTECTED.to_string()]);
    }

    #[test]
    fn add_and_remove_roundtrip() {
        let (store, _dir) = open_store();
        store.add("staff@koenji.it").unwrap();
        assert!(store.contains("staff@koenji.it").unwrap());

        store.remove("staff@koenji.it").unwrap();
        assert!(!store.contains("staff@koenji.it").unwrap());
    }

    #[test]
    fn protected_entry_survives_removal_attempts() {
        let (store, _dir) = open_store();
        assert!(matches!(
            store.remove(PROTECTED),
            Err(AllowlistError::ProtectedEntry)
        ));
        assert!(store.contains(PROTECTED).unwrap());
    }

    #[test]
    fn rejects_duplicates_and_malformed_emails() {
        let (store, _dir) = open_store();
        store.add("staff@koenji.it").unwrap();
        assert!(matches!(
            store.add("staff@koenji.it"),
            Err(AllowlistError::Duplicate(_))
        ));
        assert!(matches!(
            store.add("not-an-email"),
            Err(AllowlistError::InvalidEmail(_))
        ));
    }

    #[test]
    fn removing_unknown_email_reports_not_found() {
        let (store, _dir) = open_store();
        assert!(matches!(
            store.remove("ghost@koenji.it"),
            Err(AllowlistError::NotFound(_))
        ));
    }

    #[test]
    fn entries_persist_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("admins.redb");
        {
            let store = AllowlistStore::open(&path, PROTECTED).unwrap();
            store.add("staff@koenji.it").unwrap();
        }
        let store = AllowlistStore::open(&path, PROTECTED).unwrap();
        assert!(store.contains("staff@koenji.it").unwrap());
    }
}
