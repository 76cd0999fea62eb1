//! 認証トークンのゲート
//!
//! 表示側のガードのみ。サーバー側の認可ではない。

use crate::error::{AdminError, Result};
use heritage_common::storage::TOKEN_KEY;
use heritage_common::KvStore;
use tracing::info;

/// 保存済みトークンを返す。無ければログイン要求
pub fn require_token(store: &dyn KvStore) -> Result<String> {
    match store.get(TOKEN_KEY) {
        Some(token) if !token.trim().is_empty() => Ok(token),
        _ => Err(AdminError::LoginRequired),
    }
}

pub fn login(store: &dyn KvStore, token: &str) -> Result<()> {
    let token = token.trim();
    if token.is_empty() {
        return Err(AdminError::Config("トークンが空です".into()));
    }
    store.set(TOKEN_KEY, token)?;
    info!("token saved");
    Ok(())
}

pub fn logout(store: &dyn KvStore) -> Result<()> {
    store.remove(TOKEN_KEY)?;
    info!("token removed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use heritage_common::MemoryStore;

    #[test]
    fn test_missing_token_requires_login() {
        let store = MemoryStore::new();
        assert!(matches!(require_token(&store), Err(AdminError::LoginRequired)));
    }

    #[test]
    fn test_blank_token_requires_login() {
        let store = MemoryStore::new();
        store.set(TOKEN_KEY, "  ").unwrap();
        assert!(matches!(require_token(&store), Err(AdminError::LoginRequired)));
    }

    #[test]
    fn test_login_logout() {
        let store = MemoryStore::new();
        login(&store, " abc ").unwrap();
        assert_eq!(require_token(&store).unwrap(), "abc");
        logout(&store).unwrap();
        assert!(require_token(&store).is_err());
    }

    #[test]
    fn test_login_rejects_empty() {
        let store = MemoryStore::new();
        assert!(login(&store, "").is_err());
    }
}
