//! Persistence seam.
//!
//! `KeyValueStore` is the host's blob medium. `RecordStore` is the record-level
//! interface the logbook talks to: upsert by id, load everything, delete by id.
//! `JsonRecordStore` bridges the two by keeping the whole list as one JSON
//! array under a single key, newest first.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{RecordError, Result};

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

/// In-process store; what the browser bindings and tests run on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_owned(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

impl<K: KeyValueStore + ?Sized> KeyValueStore for &mut K {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) {
        (**self).set(key, value);
    }

    fn remove(&mut self, key: &str) {
        (**self).remove(key);
    }
}

/// Anything with a stable string id.
pub trait Record: Serialize + DeserializeOwned {
    fn id(&self) -> &str;
}

pub trait RecordStore<R: Record> {
    /// Insert, or replace the record with the same id in place.
    fn save(&mut self, record: R) -> Result<()>;
    fn load_all(&self) -> Result<Vec<R>>;
    /// `NotFound` when no record has `id`.
    fn delete(&mut self, id: &str) -> Result<()>;
}

/// All records as one JSON array under `key`.
#[derive(Clone, Debug)]
pub struct JsonRecordStore<K> {
    kv: K,
    key: String,
}

impl<K: KeyValueStore> JsonRecordStore<K> {
    pub fn new(kv: K, key: impl Into<String>) -> Self {
        Self { kv, key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn inner(&self) -> &K {
        &self.kv
    }

    pub fn into_inner(self) -> K {
        self.kv
    }

    /// The stored blob exactly as persisted.
    pub fn raw(&self) -> Option<String> {
        self.kv.get(&self.key)
    }

    /// Replace the stored blob after checking it decodes as a list of `R`.
    pub fn replace_raw<R: Record>(&mut self, json: &str) -> Result<usize> {
        let records: Vec<R> = serde_json::from_str(json)?;
        self.write(&records)?;
        Ok(records.len())
    }

    fn read<R: Record>(&self) -> Result<Vec<R>> {
        match self.kv.get(&self.key) {
            None => Ok(Vec::new()),
            Some(blob) if blob.trim().is_empty() => Ok(Vec::new()),
            Some(blob) => Ok(serde_json::from_str(&blob)?),
        }
    }

    fn write<R: Record>(&mut self, records: &[R]) -> Result<()> {
        let blob = serde_json::to_string(records)?;
        tracing::debug!(key = %self.key, count = records.len(), "persisting records");
        self.kv.set(&self.key, blob);
        Ok(())
    }
}

impl<K: KeyValueStore, R: Record> RecordStore<R> for JsonRecordStore<K> {
    fn save(&mut self, record: R) -> Result<()> {
        let mut records: Vec<R> = self.read()?;
        match records.iter().position(|r| r.id() == record.id()) {
            Some(i) => records[i] = record,
            None => records.insert(0, record),
        }
        self.write(&records)
    }

    fn load_all(&self) -> Result<Vec<R>> {
        self.read()
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        let mut records: Vec<R> = self.read()?;
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Err(RecordError::NotFound(id.to_owned()));
        }
        self.write(&records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: String,
        text: String,
    }

    impl Record for Note {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn note(id: &str, text: &str) -> Note {
        Note { id: id.into(), text: text.into() }
    }

    #[test]
    fn empty_store_loads_nothing() {
        let store = JsonRecordStore::new(MemoryStore::new(), "notes");
        let all: Vec<Note> = store.load_all().unwrap();
        assert!(all.is_empty());
        assert!(store.raw().is_none());
    }

    #[test]
    fn save_prepends_and_upserts_in_place() {
        let mut store = JsonRecordStore::new(MemoryStore::new(), "notes");
        store.save(note("a", "first")).unwrap();
        store.save(note("b", "second")).unwrap();
        store.save(note("a", "edited")).unwrap();

        let all: Vec<Note> = store.load_all().unwrap();
        assert_eq!(all, vec![note("b", "second"), note("a", "edited")]);
    }

    #[test]
    fn delete_missing_is_not_found() {
        let mut store = JsonRecordStore::new(MemoryStore::new(), "notes");
        store.save(note("a", "x")).unwrap();
        assert!(matches!(
            RecordStore::<Note>::delete(&mut store, "zzz"),
            Err(RecordError::NotFound(id)) if id == "zzz"
        ));
        RecordStore::<Note>::delete(&mut store, "a").unwrap();
        assert_eq!(store.raw().as_deref(), Some("[]"));
    }

    #[test]
    fn corrupt_blob_is_a_serialization_error() {
        let mut kv = MemoryStore::new();
        kv.set("notes", "{not json".into());
        let store = JsonRecordStore::new(kv, "notes");
        let res: Result<Vec<Note>> = store.load_all();
        assert!(matches!(res, Err(RecordError::Serialization(_))));
    }

    #[test]
    fn replace_raw_rejects_bad_json_and_keeps_old_blob() {
        let mut store = JsonRecordStore::new(MemoryStore::new(), "notes");
        store.save(note("a", "keep")).unwrap();
        assert!(store.replace_raw::<Note>("[{\"id\": 1}]").is_err());
        let all: Vec<Note> = store.load_all().unwrap();
        assert_eq!(all, vec![note("a", "keep")]);
    }

    #[test]
    fn borrowed_store_writes_through() {
        let mut kv = MemoryStore::new();
        {
            let mut store = JsonRecordStore::new(&mut kv, "notes");
            store.save(note("a", "x")).unwrap();
        }
        assert_eq!(kv.len(), 1);
    }
}
