use secrecy::SecretString;

use super::storage::SessionStorage;

/// Query parameter the marketing site appends to the login URL.
pub const QUERY_PARAM: &str = "token";
/// Storage slot the marketing site may leave a token in instead.
pub const STORAGE_KEY: &str = "userPanelToken";

pub fn token_from_query(query: &str) -> Option<SecretString> {
    let query = query.strip_prefix('?').unwrap_or(query);
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == QUERY_PARAM)
        .map(|(_, value)| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .map(SecretString::from)
}

/// Reads the handoff slot and empties it; a token is offered once.
pub fn take_storage_token(storage: &dyn SessionStorage) -> Option<SecretString> {
    let token = storage.get(STORAGE_KEY)?;
    storage.remove(STORAGE_KEY);
    let token = token.trim().to_owned();
    if token.is_empty() {
        None
    } else {
        Some(SecretString::from(token))
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;
    use crate::session::storage::MemoryStorage;

    #[test]
    fn reads_token_from_query() {
        let token = token_from_query("?ref=site&token=abc%2E123").unwrap();
        assert_eq!(token.expose_secret(), "abc.123");
        assert!(token_from_query("token=").is_none());
        assert!(token_from_query("?other=1").is_none());
        assert!(token_from_query("").is_none());
    }

    #[test]
    fn storage_slot_is_consumed_once() {
        let storage = MemoryStorage::default();
        storage.set(STORAGE_KEY, "T");

        let token = take_storage_token(&storage).unwrap();
        assert_eq!(token.expose_secret(), "T");
        assert!(storage.is_empty());
        assert!(take_storage_token(&storage).is_none());
    }
}
