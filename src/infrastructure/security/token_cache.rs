// src/infrastructure/security/token_cache.rs
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// Minimal identity projection kept per positive verification. The raw
/// token never ends up in here or in the key for the bearer namespace.
#[derive(Debug, Clone)]
pub struct CachedCredential {
    pub user_id: Option<String>,
    pub session_id: Option<String>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    credential: CachedCredential,
    deadline: Instant,
}

enum Lookup {
    Miss,
    Expired,
    Hit(CachedCredential),
}

#[derive(Debug, Clone)]
pub struct CacheStats {
    pub items: usize,
    pub jwt_ttl: Duration,
    pub share_ttl: Duration,
}

/// Positive-result cache shared by every in-flight request.
///
/// One store, two namespaces: bearer entries are keyed by a hash of the
/// token and additionally honor the credential's own expiry on read; share
/// entries are keyed by `(token, session_id)` and live purely on their TTL.
/// There is no size bound; expiry is the only eviction.
pub struct TokenCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    jwt_ttl: Duration,
    share_ttl: Duration,
}

impl TokenCache {
    pub fn new(jwt_ttl: Duration, share_ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            jwt_ttl,
            share_ttl,
        }
    }

    pub fn get_bearer(&self, token: &str) -> Option<CachedCredential> {
        let key = bearer_key(token);
        match self.lookup(&key) {
            Lookup::Miss => None,
            Lookup::Expired => self.remove(&key),
            // An entry that outlived its embedded expiry counts as a miss.
            Lookup::Hit(credential) if credential.expires_at <= Utc::now() => self.remove(&key),
            Lookup::Hit(credential) => Some(credential),
        }
    }

    pub fn set_bearer(&self, token: &str, credential: CachedCredential) {
        self.insert(bearer_key(token), credential, self.jwt_ttl);
    }

    pub fn invalidate_bearer(&self, token: &str) {
        self.remove(&bearer_key(token));
    }

    pub fn get_share(&self, token: &str, session_id: &str) -> Option<CachedCredential> {
        let key = share_key(token, session_id);
        match self.lookup(&key) {
            Lookup::Miss => None,
            Lookup::Expired => self.remove(&key),
            Lookup::Hit(credential) => Some(credential),
        }
    }

    pub fn set_share(&self, token: &str, session_id: &str, credential: CachedCredential) {
        self.insert(share_key(token, session_id), credential, self.share_ttl);
    }

    pub fn invalidate_share(&self, token: &str, session_id: &str) {
        self.remove(&share_key(token, session_id));
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            items: self.entries.read().unwrap().len(),
            jwt_ttl: self.jwt_ttl,
            share_ttl: self.share_ttl,
        }
    }

    pub fn clear(&self) {
        self.entries.write().unwrap().clear();
    }

    /// Drop every entry whose TTL deadline has passed.
    pub fn remove_expired(&self) {
        let now = Instant::now();
        self.entries
            .write()
            .unwrap()
            .retain(|_, entry| entry.deadline > now);
    }

    /// Periodic expiry sweep; the interval is independent of either TTL.
    pub fn spawn_sweeper(self: &Arc<Self>, interval: Duration) -> tokio::task::JoinHandle<()> {
        let cache = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                cache.remove_expired();
            }
        })
    }

    fn lookup(&self, key: &str) -> Lookup {
        let guard = self.entries.read().unwrap();
        match guard.get(key) {
            None => Lookup::Miss,
            Some(entry) if entry.deadline <= Instant::now() => Lookup::Expired,
            Some(entry) => Lookup::Hit(entry.credential.clone()),
        }
    }

    fn insert(&self, key: String, credential: CachedCredential, ttl: Duration) {
        let entry = CacheEntry {
            credential,
            deadline: Instant::now() + ttl,
        };
        self.entries.write().unwrap().insert(key, entry);
    }

    fn remove(&self, key: &str) -> Option<CachedCredential> {
        self.entries.write().unwrap().remove(key);
        None
    }
}

fn bearer_key(token: &str) -> String {
    format!("jwt:{}", hex::encode(Sha256::digest(token.as_bytes())))
}

fn share_key(token: &str, session_id: &str) -> String {
    format!("share:{token}:{session_id}")
}
