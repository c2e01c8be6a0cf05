use url::Url;

use crate::auth::{Credential, CredentialValidator};
use crate::session::store::{CredentialStore, StoreError};

pub const TOKEN_PARAM: &str = "token";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bootstrap {
    /// Entry URL with the `token` parameter removed
    pub url: Url,
    /// A credential was found on the URL and stored
    pub stored: bool,
}

/// Consume a `?token=` entry parameter.
///
/// The parameter is always stripped; the credential is kept (session scope)
/// only when it decodes. Other query parameters are preserved in order.
pub fn consume_entry_token(
    entry: &Url,
    store: &CredentialStore,
    validator: &CredentialValidator,
) -> Result<Bootstrap, StoreError> {
    let mut token = None;
    let mut kept = Vec::new();
    for (key, value) in entry.query_pairs() {
        if key == TOKEN_PARAM {
            token.get_or_insert_with(|| value.into_owned());
        } else {
            kept.push((key.into_owned(), value.into_owned()));
        }
    }

    let mut url = entry.clone();
    if token.is_some() {
        if kept.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(kept.iter());
        }
    }

    let stored = match token.map(Credential::new) {
        Some(credential) => match validator.decode(&credential) {
            Ok(_) => {
                store.set(&credential)?;
                tracing::info!("credential bootstrapped from entry URL");
                true
            }
            Err(e) => {
                tracing::warn!("ignoring entry token: {}", e);
                false
            }
        },
        None => false,
    };

    Ok(Bootstrap { url, stored })
}
