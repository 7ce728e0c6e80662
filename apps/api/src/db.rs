use std::sync::Arc;

use anyhow::Result;
use mongodb::bson::doc;
use mongodb::{Client, Database};
use tracing::info;

use crate::repository::{MongoRepository, Repository};

pub const USER_DATA: &str = "UserData";
pub const PROMPTS: &str = "AIPrompts";
pub const PAIN_POINTS: &str = "PainPoints";
pub const CASE_STUDIES: &str = "CaseStudy";

/// Connects to MongoDB and pings the target database before returning it.
pub async fn connect(uri: &str, database: &str) -> Result<Database> {
    info!("Connecting to MongoDB...");

    let client = Client::with_uri_str(uri).await?;
    let db = client.database(database);
    db.run_command(doc! { "ping": 1 }, None).await?;

    info!("Connected to MongoDB database '{database}'");
    Ok(db)
}

pub fn repository(db: &Database, collection: &str) -> Arc<dyn Repository> {
    Arc::new(MongoRepository::new(db.collection(collection)))
}
