use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::auth::Credential;

pub const COOKIE_FILE: &str = "cookie";
pub const SESSION_FILE: &str = "session";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Credential slot '{slot}' I/O error: {source}")]
    Io {
        slot: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("Credential slot '{0}' is poisoned")]
    Poisoned(&'static str),
}

/// Which slot a credential lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Cookie,
    Session,
}

/// One persistence backend able to hold a single credential.
pub trait CredentialSlot: Send + Sync {
    fn name(&self) -> &'static str;
    fn load(&self) -> Result<Option<Credential>, StoreError>;
    fn save(&self, credential: &Credential) -> Result<(), StoreError>;
    /// Must succeed when the slot is already empty
    fn remove(&self) -> Result<(), StoreError>;
}

/// Slot that lives as long as the process does.
pub struct MemorySlot {
    name: &'static str,
    value: Mutex<Option<Credential>>,
}

impl MemorySlot {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            value: Mutex::new(None),
        }
    }
}

impl CredentialSlot for MemorySlot {
    fn name(&self) -> &'static str {
        self.name
    }

    fn load(&self) -> Result<Option<Credential>, StoreError> {
        let guard = self.value.lock().map_err(|_| StoreError::Poisoned(self.name))?;
        Ok(guard.clone())
    }

    fn save(&self, credential: &Credential) -> Result<(), StoreError> {
        let mut guard = self.value.lock().map_err(|_| StoreError::Poisoned(self.name))?;
        *guard = Some(credential.clone());
        Ok(())
    }

    fn remove(&self) -> Result<(), StoreError> {
        let mut guard = self.value.lock().map_err(|_| StoreError::Poisoned(self.name))?;
        *guard = None;
        Ok(())
    }
}

/// Slot persisted as a single file holding the raw token.
pub struct FileSlot {
    name: &'static str,
    path: PathBuf,
}

impl FileSlot {
    pub fn new(name: &'static str, path: impl Into<PathBuf>) -> Self {
        Self {
            name,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            slot: self.name,
            source,
        }
    }
}

impl CredentialSlot for FileSlot {
    fn name(&self) -> &'static str {
        self.name
    }

    fn load(&self) -> Result<Option<Credential>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).map_err(|e| self.io(e))?;
        let credential = Credential::new(content);
        Ok((!credential.is_empty()).then_some(credential))
    }

    fn save(&self, credential: &Credential) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io(e))?;
        }
        fs::write(&self.path, credential.as_str()).map_err(|e| self.io(e))
    }

    fn remove(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io(e)),
        }
    }
}

/// The single place the console keeps its bearer credential.
///
/// Reads check the cookie slot first and fall back to the session slot.
/// Writes go to the session slot unless a scope is named explicitly.
pub struct CredentialStore {
    cookie: Box<dyn CredentialSlot>,
    session: Box<dyn CredentialSlot>,
}

impl CredentialStore {
    pub fn new(cookie: Box<dyn CredentialSlot>, session: Box<dyn CredentialSlot>) -> Self {
        Self { cookie, session }
    }

    pub fn in_memory() -> Self {
        Self::new(
            Box::new(MemorySlot::new("cookie")),
            Box::new(MemorySlot::new("session")),
        )
    }

    /// Both slots as files inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(
            Box::new(FileSlot::new("cookie", dir.join(COOKIE_FILE))),
            Box::new(FileSlot::new("session", dir.join(SESSION_FILE))),
        )
    }

    pub fn get(&self) -> Option<Credential> {
        self.peek(Scope::Cookie).or_else(|| self.peek(Scope::Session))
    }

    pub fn set(&self, credential: &Credential) -> Result<(), StoreError> {
        self.set_in(Scope::Session, credential)
    }

    pub fn set_in(&self, scope: Scope, credential: &Credential) -> Result<(), StoreError> {
        let slot = self.slot(scope);
        tracing::debug!("storing credential in {} slot", slot.name());
        slot.save(credential)
    }

    /// Read a single slot without falling back
    pub fn peek(&self, scope: Scope) -> Option<Credential> {
        let slot = self.slot(scope);
        match slot.load() {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("failed to read credential: {}", e);
                None
            }
        }
    }

    /// Remove the credential from both slots. Both removals are always
    /// attempted; the first failure is reported.
    pub fn clear(&self) -> Result<(), StoreError> {
        let cookie = self.cookie.remove();
        let session = self.session.remove();
        tracing::debug!("cleared stored credentials");
        cookie.and(session)
    }

    fn slot(&self, scope: Scope) -> &dyn CredentialSlot {
        match scope {
            Scope::Cookie => self.cookie.as_ref(),
            Scope::Session => self.session.as_ref(),
        }
    }
}
