use crate::document::{DocId, DocRecord};
use crate::index::InvertedIndex;
use anyhow::{Context, Result};
use sled::Db;
use std::path::Path;

const DOCS_TREE: &str = "documents";
const INDEX_TREE: &str = "index";

/// sled-backed index store. Holds the serialized inverted index and the
/// document records, keyed by big-endian internal id. A directory-backed
/// store survives the process; the temporary mode backs in-memory engines
/// and tests.
pub struct Storage {
    db: Db,
}

impl Storage {
    /// Open or create a storage database
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = sled::open(path).context("Failed to open index store")?;
        Ok(Self { db })
    }

    /// Create an in-memory database (for tests and embedded use)
    pub fn in_memory() -> Result<Self> {
        let config = sled::Config::new().temporary(true);
        let db = config.open().context("Failed to create in-memory store")?;
        Ok(Self { db })
    }

    /// Whether this store already holds a built index. This is the cold-start
    /// gate: an existence check only, never content validation.
    pub fn has_index(&self) -> Result<bool> {
        let tree = self.db.open_tree(INDEX_TREE)?;
        Ok(tree.contains_key(b"main_index")?)
    }

    // ========== Document Operations ==========

    /// Save a document record
    pub fn save_document(&self, doc: &DocRecord) -> Result<()> {
        let tree = self.db.open_tree(DOCS_TREE)?;
        let serialized = bincode::serialize(doc)?;
        tree.insert(doc.id.to_be_bytes(), serialized)?;
        Ok(())
    }

    /// Get a document record by internal id
    pub fn get_document(&self, id: DocId) -> Result<Option<DocRecord>> {
        let tree = self.db.open_tree(DOCS_TREE)?;
        if let Some(data) = tree.get(id.to_be_bytes())? {
            let doc: DocRecord = bincode::deserialize(&data)?;
            Ok(Some(doc))
        } else {
            Ok(None)
        }
    }

    /// Count total documents
    pub fn count_documents(&self) -> Result<usize> {
        let tree = self.db.open_tree(DOCS_TREE)?;
        Ok(tree.len())
    }

    // ========== Index Operations ==========

    /// Save the inverted index
    pub fn save_index(&self, index: &InvertedIndex) -> Result<()> {
        let tree = self.db.open_tree(INDEX_TREE)?;
        let serialized = bincode::serialize(index)?;
        tree.insert(b"main_index", serialized)?;
        tree.flush()?;
        Ok(())
    }

    /// Load the inverted index
    pub fn load_index(&self) -> Result<Option<InvertedIndex>> {
        let tree = self.db.open_tree(INDEX_TREE)?;
        if let Some(data) = tree.get(b"main_index")? {
            let index: InvertedIndex = bincode::deserialize(&data)?;
            Ok(Some(index))
        } else {
            Ok(None)
        }
    }

    /// Flush all changes to disk
    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }
}
