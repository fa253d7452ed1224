use crate::config::MongoSettings;
use mongodb::bson::doc;
use mongodb::error::{Error, ErrorKind};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use std::time::Duration;

const DEFAULT_DATABASE: &str = "users_db";

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    /// Builds the client from the connection string.
    ///
    /// The driver connects lazily, so this only fails on a malformed URL,
    /// invalid options, or a failed SRV/TXT lookup for `mongodb+srv://` URLs
    /// (see [`is_resolution_error`]). Use [`MongoDB::ping`] to check the
    /// server is reachable.
    pub async fn new(settings: &MongoSettings) -> mongodb::error::Result<Self> {
        let mut client_options = ClientOptions::parse(&settings.url).await?;

        client_options.max_pool_size = Some(settings.max_pool_size);
        client_options.min_pool_size = Some(settings.min_pool_size);
        client_options.max_idle_time = Some(Duration::from_secs(300));

        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let db_name = settings
            .database
            .clone()
            .or_else(|| client_options.default_database.clone())
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        let client = Client::with_options(client_options)?;
        let db = client.database(&db_name);

        log::info!("📊 Using database: {}", db_name);

        Ok(Self { db })
    }

    pub async fn ping(&self) -> mongodb::error::Result<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }
}

/// DNS failures while resolving a `mongodb+srv://` host. These are
/// connectivity problems, not bad configuration.
pub fn is_resolution_error(err: &Error) -> bool {
    matches!(*err.kind, ErrorKind::DnsResolve { .. })
}
