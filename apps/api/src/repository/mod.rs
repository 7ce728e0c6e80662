//! Persistence gateway: generic document operations against one collection.
//!
//! Handlers and the ingestion pipeline only ever see `dyn Repository`; the
//! MongoDB-backed implementation is built once at startup and injected through
//! `AppState`. No schema validation happens here.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, Bson, Document};
use mongodb::options::{FindOptions, UpdateOptions};
use mongodb::Collection;
use thiserror::Error;

pub mod query;

pub use query::{Field, Filter, Sort, Update};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),

    #[error("document encoding failed: {0}")]
    Encode(#[from] bson::ser::Error),

    #[error("document decoding failed: {0}")]
    Decode(#[from] bson::de::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

#[async_trait]
pub trait Repository: Send + Sync {
    /// Returns the identifier the store assigned (or kept).
    async fn insert_one(&self, document: Document) -> Result<Bson, StoreError>;

    /// Returns the number of documents inserted.
    async fn insert_many(&self, documents: Vec<Document>) -> Result<usize, StoreError>;

    async fn find(&self, filter: Filter, sort: Option<Sort>) -> Result<Vec<Document>, StoreError>;

    async fn find_one(&self, filter: Filter) -> Result<Option<Document>, StoreError>;

    async fn update_one(
        &self,
        filter: Filter,
        update: Update,
        upsert: bool,
    ) -> Result<UpdateOutcome, StoreError>;

    /// Returns the number of documents removed.
    async fn delete_many(&self, filter: Filter) -> Result<u64, StoreError>;
}

/// `Repository` over a MongoDB collection of raw documents.
#[derive(Clone)]
pub struct MongoRepository {
    collection: Collection<Document>,
}

impl MongoRepository {
    pub fn new(collection: Collection<Document>) -> Self {
        Self { collection }
    }
}

#[async_trait]
impl Repository for MongoRepository {
    async fn insert_one(&self, document: Document) -> Result<Bson, StoreError> {
        let result = self.collection.insert_one(document, None).await?;
        Ok(result.inserted_id)
    }

    async fn insert_many(&self, documents: Vec<Document>) -> Result<usize, StoreError> {
        if documents.is_empty() {
            return Ok(0);
        }
        let result = self.collection.insert_many(documents, None).await?;
        Ok(result.inserted_ids.len())
    }

    async fn find(&self, filter: Filter, sort: Option<Sort>) -> Result<Vec<Document>, StoreError> {
        let options = FindOptions::builder()
            .sort(sort.map(Sort::into_document))
            .build();
        let cursor = self.collection.find(filter.into_document(), options).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_one(&self, filter: Filter) -> Result<Option<Document>, StoreError> {
        Ok(self.collection.find_one(filter.into_document(), None).await?)
    }

    async fn update_one(
        &self,
        filter: Filter,
        update: Update,
        upsert: bool,
    ) -> Result<UpdateOutcome, StoreError> {
        let options = UpdateOptions::builder().upsert(upsert).build();
        let result = self
            .collection
            .update_one(filter.into_document(), update.into_document(), options)
            .await?;
        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete_many(&self, filter: Filter) -> Result<u64, StoreError> {
        let result = self.collection.delete_many(filter.into_document(), None).await?;
        Ok(result.deleted_count)
    }
}
