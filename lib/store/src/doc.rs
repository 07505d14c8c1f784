use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use careerdost_kv::KVStore;

use crate::error::StoreError;

/// A JSON document persisted in a named collection.
///
/// The collection name doubles as the key namespace; the id must be stable
/// for the lifetime of the document.
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    /// Collection (key namespace) this document type lives in.
    const COLLECTION: &'static str;

    /// Primary key of this document.
    fn id(&self) -> &str;

    /// Full KV key for a document id.
    fn key(id: &str) -> String {
        format!("{}:{}", Self::COLLECTION, id)
    }
}

/// Typed CRUD operations for one document collection.
pub struct Collection<T> {
    kv: Arc<dyn KVStore>,
    _marker: PhantomData<T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            kv: Arc::clone(&self.kv),
            _marker: PhantomData,
        }
    }
}

impl<T: Document> Collection<T> {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self {
            kv,
            _marker: PhantomData,
        }
    }

    /// Insert a new document. Fails with Conflict if the id is taken.
    pub fn insert(&self, doc: &T) -> Result<(), StoreError> {
        let key = T::key(doc.id());
        if self.kv.get(&key)?.is_some() {
            return Err(StoreError::Conflict(format!(
                "{}/{}",
                T::COLLECTION,
                doc.id()
            )));
        }
        let bytes = serde_json::to_vec(doc).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.kv.set(&key, &bytes)?;
        Ok(())
    }

    /// Get a document by id. Returns None if it does not exist.
    pub fn get(&self, id: &str) -> Result<Option<T>, StoreError> {
        match self.kv.get(&T::key(id))? {
            Some(bytes) => {
                let doc = serde_json::from_slice(&bytes)
                    .map_err(|e| StoreError::Serialization(e.to_string()))?;
                Ok(Some(doc))
            }
            None => Ok(None),
        }
    }

    /// Get a document by id, or a NotFound error.
    pub fn require(&self, id: &str) -> Result<T, StoreError> {
        self.get(id)?
            .ok_or_else(|| StoreError::NotFound(format!("{}/{}", T::COLLECTION, id)))
    }

    /// Replace an existing document wholesale. Fails with NotFound if the
    /// id does not exist — the streak and progress flows rely on replace
    /// being a single-key write (all fields land together or not at all).
    pub fn replace(&self, doc: &T) -> Result<(), StoreError> {
        let key = T::key(doc.id());
        if self.kv.get(&key)?.is_none() {
            return Err(StoreError::NotFound(format!(
                "{}/{}",
                T::COLLECTION,
                doc.id()
            )));
        }
        let bytes = serde_json::to_vec(doc).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.kv.set(&key, &bytes)?;
        Ok(())
    }

    /// Delete a document by id. Returns false if it did not exist.
    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let key = T::key(id);
        if self.kv.get(&key)?.is_none() {
            return Ok(false);
        }
        self.kv.delete(&key)?;
        Ok(true)
    }

    /// List every document in the collection, in key order.
    pub fn list(&self) -> Result<Vec<T>, StoreError> {
        let prefix = format!("{}:", T::COLLECTION);
        let mut docs = Vec::new();
        for (key, bytes) in self.kv.scan(&prefix)? {
            let doc = serde_json::from_slice(&bytes).map_err(|e| {
                StoreError::Serialization(format!("{}: {}", key, e))
            })?;
            docs.push(doc);
        }
        Ok(docs)
    }

    /// List documents matching a predicate.
    ///
    /// A full scan — fine for the per-user collection sizes this app sees.
    /// At scale we'd add an index keyspace.
    pub fn find<F>(&self, pred: F) -> Result<Vec<T>, StoreError>
    where
        F: Fn(&T) -> bool,
    {
        Ok(self.list()?.into_iter().filter(|d| pred(d)).collect())
    }
}
