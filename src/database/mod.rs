use mongodb::{Client, Collection, Database};
use std::error::Error;

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Connection pool otimizado
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        // Extract database name from URI or use default
        let db_name = uri
            .split('/')
            .last()
            .and_then(|s| s.split('?').next())
            .unwrap_or("BabHijra");

        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };

        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates the indexes the directory queries and inbox lookups rely on.
    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        use mongodb::bson::doc;
        use mongodb::IndexModel;

        log::info!("🔧 Creating database indexes...");

        let index_specs: Vec<(&str, mongodb::bson::Document)> = vec![
            // users: directory ordering + role-filtered listing + point lookups
            ("users", doc! { "uid": 1 }),
            ("users", doc! { "created_at": -1 }),
            ("users", doc! { "role": 1, "created_at": -1 }),
            ("users", doc! { "email": 1 }),
            // profiles: directory ordering + pushed-down status/verified filters
            ("profiles", doc! { "uid": 1 }),
            ("profiles", doc! { "created_at": -1 }),
            ("profiles", doc! { "is_active": 1, "created_at": -1 }),
            ("profiles", doc! { "verified": 1, "created_at": -1 }),
            // likes: pair lookups in both directions
            ("likes", doc! { "user_id": 1, "profile_id": 1 }),
            ("likes", doc! { "profile_id": 1 }),
            // conversations + messages
            ("conversations", doc! { "participants": 1 }),
            ("conversations", doc! { "conversation_id": 1 }),
            ("messages", doc! { "conversation_id": 1, "timestamp": -1 }),
            // activity log
            ("user_activity", doc! { "uid": 1, "timestamp": -1 }),
        ];

        for (collection_name, keys) in index_specs {
            let collection = self
                .database()
                .collection::<mongodb::bson::Document>(collection_name);
            let index = IndexModel::builder().keys(keys.clone()).build();

            match collection.create_index(index).await {
                Ok(_) => log::info!("   ✅ Index created: {}({})", collection_name, keys),
                Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
            }
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongodb_connection() {
        dotenv::dotenv().ok();

        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/BabHijra".to_string());
        let db = MongoDB::new(&uri).await;
        assert!(db.is_ok());
    }
}
