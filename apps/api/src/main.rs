use axum_helpers::server::{create_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Colored error reports before any fallible operation
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    // Connect to MongoDB and Redis concurrently, with startup retries
    let mongo_future = async {
        database::mongodb::connect_from_config_with_retry(&config.mongo, None)
            .await
            .map_err(|e| eyre::eyre!("MongoDB connection failed: {}", e))
    };
    let redis_future = async {
        database::redis::connect_from_config_with_retry(config.redis.clone(), None)
            .await
            .map_err(|e| eyre::eyre!("Redis connection failed: {}", e))
    };
    let (mongo, redis) = tokio::try_join!(mongo_future, redis_future)?;

    let db = mongo.database(config.mongo.database());

    // Indexes back the ownership-scoped reads and the uniqueness guarantees
    domain_events::MongoEventRepository::new(&db)
        .create_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create event indexes: {}", e))?;
    domain_drinks::MongoDrinkRepository::new(&db)
        .create_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create drink indexes: {}", e))?;
    domain_users::MongoUserRepository::new(&db)
        .create_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create user indexes: {}", e))?;

    let sessions = axum_helpers::SessionAuth::redis(redis.clone(), &config.session);

    let state = AppState {
        config,
        db,
        redis,
        sessions,
    };

    info!("Connections established, wiring routes");

    let apis = api::routes(&state);
    let router = create_router::<openapi::ApiDoc>(apis).await?;
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()));

    create_app(app, &state.config.server).await?;

    Ok(())
}
