use std::path::PathBuf;

use tokio::sync::Mutex;

pub mod account;
pub mod document;

pub use account::{TransactionRecord, UserAccount};
pub use document::BankDocument;

use crate::error::{AppError, Result};

/// Keyed record store over the single account document. The document is
/// loaded once at startup; every mutation runs and persists under one
/// lock, so overlapping requests cannot lose each other's updates.
pub struct AccountStore {
    path: PathBuf,
    document: Mutex<BankDocument>,
}

impl AccountStore {
    /// Load an existing document. Runs the legacy migration if needed
    /// and persists the upgraded document immediately, so the upgrade
    /// happens exactly once.
    pub fn open(path: PathBuf) -> Result<Self> {
        let (document, migrated) = BankDocument::load(&path)?;
        if migrated {
            tracing::info!(
                accounts = document.accounts.len(),
                "migrated legacy account document to schema v{}",
                document::SCHEMA_VERSION
            );
            document.save(&path)?;
        }

        Ok(Self {
            path,
            document: Mutex::new(document),
        })
    }

    /// Like `open`, but starts a fresh document when none exists yet.
    /// A present-but-unreadable document still fails.
    pub fn open_or_create(path: PathBuf) -> Result<Self> {
        if path.exists() {
            return Self::open(path);
        }

        let document = BankDocument::empty();
        document.save(&path)?;
        tracing::info!(path = %path.display(), "created empty account document");

        Ok(Self {
            path,
            document: Mutex::new(document),
        })
    }

    /// Create the account record for a new user with the opening
    /// balance. Rejects an existing username without touching it.
    pub async fn create_account(&self, username: &str) -> Result<UserAccount> {
        let mut document = self.document.lock().await;
        if document.accounts.contains_key(username) {
            return Err(AppError::UserExists);
        }

        let account = UserAccount::new(username);
        document.accounts.insert(username.to_string(), account.clone());
        self.persist(&document).await?;
        Ok(account)
    }

    /// Profile lookup. Records lacking the full field set were upgraded
    /// when the document was loaded, so this is a plain read.
    pub async fn ensure_profile(&self, username: &str) -> Result<UserAccount> {
        let document = self.document.lock().await;
        document
            .accounts
            .get(username)
            .cloned()
            .ok_or(AppError::AccountNotFound)
    }

    /// Locked read-modify-write. The closure runs against a copy; only
    /// when it succeeds is the copy stored and the document persisted,
    /// so a rejected operation leaves the record untouched.
    pub async fn with_account_mut<T, F>(&self, username: &str, f: F) -> Result<T>
    where
        F: FnOnce(&mut UserAccount) -> Result<T>,
    {
        let mut document = self.document.lock().await;
        let mut account = document
            .accounts
            .get(username)
            .cloned()
            .ok_or(AppError::AccountNotFound)?;

        let out = f(&mut account)?;
        document.accounts.insert(username.to_string(), account);
        self.persist(&document).await?;
        Ok(out)
    }

    /// Rewrite the document on a blocking thread so file I/O never
    /// stalls the runtime. Callers hold the lock across the await,
    /// which keeps writes ordered with mutations.
    async fn persist(&self, document: &BankDocument) -> Result<()> {
        let document = document.clone();
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || document.save(&path))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
