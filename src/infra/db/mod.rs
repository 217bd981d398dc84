//! MongoDB connection and initialization.

use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, IndexModel};

use crate::config::{Config, COLLECTION_ORDERS, COLLECTION_PRODUCTS, COLLECTION_USERS};
use crate::domain::{Order, Product, User};

/// Database wrapper for connection management
#[derive(Clone)]
pub struct Database {
    database: mongodb::Database,
}

impl Database {
    /// Connect and verify the server is reachable.
    ///
    /// # Panics
    /// Panics if the database cannot be reached.
    pub async fn connect(config: &Config) -> Self {
        let database = match Self::try_connect(config).await {
            Ok(database) => database,
            Err(e) => {
                tracing::error!("Failed to connect to MongoDB: {}", e);
                panic!("Failed to connect to MongoDB: {}", e);
            }
        };

        tracing::info!(database = %config.mongo_database, "MongoDB connected");
        database
    }

    /// Connect returning an error instead of panicking (for CLI commands).
    pub async fn try_connect(config: &Config) -> Result<Self, mongodb::error::Error> {
        let client = Client::with_uri_str(&config.mongo_uri).await?;
        let database = Self::from_client(client, &config.mongo_database);

        // Client construction is lazy; ping so failures surface here
        database.ping().await?;
        Ok(database)
    }

    /// Wrap an existing client without touching the network.
    pub fn from_client(client: Client, name: &str) -> Self {
        Self {
            database: client.database(name),
        }
    }

    /// User accounts collection.
    pub fn users(&self) -> Collection<User> {
        self.database.collection(COLLECTION_USERS)
    }

    /// Catalog products collection.
    pub fn products(&self) -> Collection<Product> {
        self.database.collection(COLLECTION_PRODUCTS)
    }

    /// Orders collection.
    pub fn orders(&self) -> Collection<Order> {
        self.database.collection(COLLECTION_ORDERS)
    }

    /// Check database connectivity.
    pub async fn ping(&self) -> Result<(), mongodb::error::Error> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    /// Create the indexes the application relies on.
    ///
    /// The unique email index backs duplicate-account detection; reset token
    /// lookups get their own index since they bypass `_id`.
    pub async fn ensure_indexes(&self) -> Result<(), mongodb::error::Error> {
        let unique_email = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.users().create_index(unique_email).await?;

        let reset_digest = IndexModel::builder()
            .keys(doc! { "reset_password_token": 1 })
            .options(IndexOptions::builder().sparse(true).build())
            .build();
        self.users().create_index(reset_digest).await?;

        tracing::info!("Database indexes ensured");
        Ok(())
    }
}

/// True when the error is a unique index violation (MongoDB code 11000).
pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    match &*err.kind {
        ErrorKind::Write(WriteFailure::WriteError(write_err)) => write_err.code == 11000,
        ErrorKind::Command(command_err) => command_err.code == 11000,
        _ => false,
    }
}
