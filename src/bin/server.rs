use forum_app::{init, AppState, Database, Result, Server};

use tracing::Level;

#[tokio::main]
async fn main() -> Result<()> {
    let config = init(Level::INFO);

    let db = Database::open(&config.database_path)?;
    let server = Server::new(AppState::new(db, &config));

    Ok(server.run(&config.address).await?)
}
