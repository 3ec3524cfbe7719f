use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::infra::kv::KeyValueStore;

/// Durable value under a single key.
///
/// Mutations land in memory synchronously and are written out in the
/// background. Every write carries the whole snapshot, tagged with a sequence
/// number; a write that finishes after a newer one is dropped so the stored
/// value never moves backwards. Write failures are logged and the in-memory
/// value stays authoritative for the rest of the session.
pub struct PersistentStore<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    key: String,
    kv: Arc<dyn KeyValueStore>,
    default: T,
    state: RwLock<T>,
    changes: watch::Sender<T>,
    runtime: Handle,
    next_seq: AtomicU64,
    written_seq: tokio::sync::Mutex<u64>,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

enum Write {
    Set(String),
    Remove,
}

impl<T> Clone for PersistentStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> PersistentStore<T>
where
    T: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    /// Reads `key` once. Absent, unreadable and malformed values all resolve
    /// to `default`.
    pub async fn load(kv: Arc<dyn KeyValueStore>, key: impl Into<String>, default: T) -> Self {
        let key = key.into();
        let value = match kv.get_item(&key).await {
            Ok(Some(raw)) => match serde_json::from_str::<T>(&raw) {
                Ok(value) => {
                    debug!(key = %key, "restored stored value");
                    value
                }
                Err(err) => {
                    warn!(error = %err, key = %key, "discarding malformed stored value");
                    default.clone()
                }
            },
            Ok(None) => {
                debug!(key = %key, "no stored value, using default");
                default.clone()
            }
            Err(err) => {
                warn!(error = ?err, key = %key, "failed to read stored value");
                default.clone()
            }
        };

        let (changes, _) = watch::channel(value.clone());
        Self {
            inner: Arc::new(Inner {
                key,
                kv,
                default,
                state: RwLock::new(value),
                changes,
                runtime: Handle::current(),
                next_seq: AtomicU64::new(0),
                written_seq: tokio::sync::Mutex::new(0),
                pending: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn key(&self) -> &str {
        &self.inner.key
    }

    pub fn get(&self) -> T {
        self.read(T::clone)
    }

    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = self
            .inner
            .state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&guard)
    }

    /// Receives every snapshot after it lands in memory.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.inner.changes.subscribe()
    }

    /// Applies `f` to the in-memory value, then persists the result in the
    /// background.
    pub fn mutate<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let (result, seq, write) = {
            let mut guard = self
                .inner
                .state
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let result = f(&mut guard);
            let payload = serde_json::to_string(&*guard);
            let seq = self.inner.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
            self.inner.changes.send_replace((*guard).clone());
            (result, seq, payload)
        };

        match write {
            Ok(payload) => self.spawn_write(seq, Write::Set(payload)),
            Err(err) => {
                warn!(error = %err, key = %self.inner.key, "failed to encode store value");
            }
        }
        result
    }

    /// Restores the default in memory and drops the stored value.
    pub fn reset(&self) {
        let seq = {
            let mut guard = self
                .inner
                .state
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            *guard = self.inner.default.clone();
            let seq = self.inner.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
            self.inner.changes.send_replace((*guard).clone());
            seq
        };
        self.spawn_write(seq, Write::Remove);
    }

    /// Waits for every write issued so far.
    pub async fn flush(&self) {
        let handles = {
            let mut pending = self
                .inner
                .pending
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            std::mem::take(&mut *pending)
        };
        for result in futures::future::join_all(handles).await {
            if let Err(err) = result {
                warn!(error = %err, key = %self.inner.key, "store write task failed");
            }
        }
    }

    fn spawn_write(&self, seq: u64, write: Write) {
        let inner = Arc::clone(&self.inner);
        let handle = self.inner.runtime.spawn(async move {
            let mut written = inner.written_seq.lock().await;
            if *written > seq {
                debug!(key = %inner.key, seq, "skipping superseded write");
                return;
            }
            let outcome = match write {
                Write::Set(payload) => inner.kv.set_item(&inner.key, payload).await,
                Write::Remove => inner.kv.remove_item(&inner.key).await,
            };
            match outcome {
                Ok(()) => {
                    *written = seq;
                    debug!(key = %inner.key, seq, "persisted store value");
                }
                Err(err) => {
                    warn!(error = ?err, key = %inner.key, "failed to persist store value");
                }
            }
        });

        let mut pending = self
            .inner
            .pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        pending.retain(|handle| !handle.is_finished());
        pending.push(handle);
    }
}
