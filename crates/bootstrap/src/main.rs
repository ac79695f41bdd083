use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nippo_core::models::NewEmployee;
use nippo_core::{EmployeeRules, ReportRules};
use nippo_db::{EmployeeRepo, ReportRepo};

mod config;

use config::BootstrapConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nippo_bootstrap=info,nippo_core=info,nippo_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = BootstrapConfig::from_env().context("Failed to load configuration")?;
    tracing::info!(max_connections = config.max_connections, "Loaded bootstrap configuration");

    // --- Database ---
    let pool = nippo_db::create_pool(&config.database_url, config.max_connections)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connection pool created");

    nippo_db::health_check(&pool)
        .await
        .context("Database health check failed")?;
    tracing::info!("Database health check passed");

    nippo_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    // --- Rules ---
    let employee_repo = Arc::new(EmployeeRepo::new(pool.clone()));
    let reports = ReportRules::new(Arc::new(ReportRepo::new(pool.clone())), employee_repo.clone());
    let employees = EmployeeRules::new(employee_repo, reports);

    // --- Administrator seed ---
    let seed = &config.admin;
    if employees.find_by_code(&seed.code).await?.is_some() {
        tracing::info!(code = %seed.code, "Administrator already present, skipping seed");
        return Ok(());
    }

    let admin = employees
        .create(&NewEmployee {
            code: seed.code.clone(),
            name: seed.name.clone(),
            role: seed.role,
            password: seed.password.clone(),
        })
        .await
        .with_context(|| format!("Failed to create administrator '{}'", seed.code))?;
    tracing::info!(code = %admin.code, "Administrator account created");

    Ok(())
}
