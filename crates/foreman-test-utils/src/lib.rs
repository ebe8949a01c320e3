//! Shared Postgres harness for foreman integration tests.
//!
//! Every test binary shares one PostgreSQL server and each test gets a
//! throwaway, migrated database inside it. Set `FOREMAN_TEST_PG_URL` to a
//! server root URL (no database path) to reuse an external server, e.g. one
//! started by a CI setup script; otherwise a testcontainers instance is
//! started on first use and lives for the duration of the binary.

use sqlx::{Executor, PgPool};
use testcontainers::ContainerAsync;
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;
use uuid::Uuid;

use foreman_db::config::DbConfig;
use foreman_db::pool;

struct SharedPg {
    base_url: String,
    /// Keeps the container running. `None` when an external server is used.
    _container: Option<ContainerAsync<Postgres>>,
}

static SHARED_PG: OnceCell<SharedPg> = OnceCell::const_new();

async fn start_shared_pg() -> SharedPg {
    if let Ok(url) = std::env::var("FOREMAN_TEST_PG_URL") {
        return SharedPg {
            base_url: url,
            _container: None,
        };
    }

    let container = Postgres::default()
        .start()
        .await
        .expect("failed to start PostgreSQL container");
    let host = container.get_host().await.expect("failed to get host");
    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("failed to get mapped port");

    SharedPg {
        base_url: format!("postgresql://postgres:postgres@{host}:{port}"),
        _container: Some(container),
    }
}

/// Server root URL of the shared PostgreSQL, without a database path.
pub async fn pg_url() -> &'static str {
    &SHARED_PG.get_or_init(start_shared_pg).await.base_url
}

/// Pool into the server's `postgres` database, for CREATE/DROP DATABASE.
async fn admin_pool(config: &DbConfig) -> PgPool {
    pool::create_pool(&DbConfig::new(config.maintenance_url()))
        .await
        .expect("failed to connect to maintenance database")
}

/// Create a fresh database with migrations applied.
///
/// Returns the pool and the generated database name; hand the name to
/// [`drop_test_db`] when the test finishes.
pub async fn create_test_db() -> (PgPool, String) {
    let db_name = format!("foreman_test_{}", Uuid::new_v4().simple());
    let config = DbConfig::new(format!("{}/{db_name}", pg_url().await));

    let admin = admin_pool(&config).await;
    admin
        .execute(format!("CREATE DATABASE {db_name}").as_str())
        .await
        .unwrap_or_else(|e| panic!("failed to create {db_name}: {e}"));
    admin.close().await;

    let pool = pool::create_pool(&config)
        .await
        .unwrap_or_else(|e| panic!("failed to connect to {db_name}: {e}"));
    pool::run_migrations(&pool)
        .await
        .expect("migrations should succeed");

    (pool, db_name)
}

/// Drop a database created by [`create_test_db`]. Safe to call twice.
pub async fn drop_test_db(db_name: &str) {
    let config = DbConfig::new(format!("{}/{db_name}", pg_url().await));
    let admin = admin_pool(&config).await;

    // Lingering test connections block DROP DATABASE; kick them first.
    let _ = admin
        .execute(
            format!(
                "SELECT pg_terminate_backend(pid) FROM pg_stat_activity \
                 WHERE datname = '{db_name}' AND pid <> pg_backend_pid()"
            )
            .as_str(),
        )
        .await;
    let _ = admin
        .execute(format!("DROP DATABASE IF EXISTS {db_name}").as_str())
        .await;
    admin.close().await;
}
