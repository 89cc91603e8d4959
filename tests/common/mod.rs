use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use groomer_api::auth::{encode_token, Claims};

/// Shared secret between the spawned server and the tokens the tests mint.
pub const TEST_JWT_SECRET: &str = "groomer-api-integration-tests";

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests
        // Assumes debug profile; adjust if you run tests with --release
        let mut cmd = Command::new("target/debug/groomer-api");
        cmd.env("GROOMER_API_PORT", port.to_string())
            .env("JWT_SECRET", TEST_JWT_SECRET)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Inherit environment so the server sees DATABASE_URL from .env
        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self {
            port,
            base_url,
            child,
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                // Ready on any health answer, even a degraded one
                if resp.status() == StatusCode::OK
                    || resp.status() == StatusCode::SERVICE_UNAVAILABLE
                {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// The integration suite needs a live database; tests early-return when the
/// URL is absent so the suite stays runnable everywhere.
pub fn database_url() -> Option<String> {
    std::env::var("DATABASE_URL").ok()
}

/// Connect directly to the database and make sure the two tables (and the
/// externally-owned profiles table they reference) exist. Migrations proper
/// are a collaborator concern; this is test fixture setup only.
pub async fn test_pool() -> Result<PgPool> {
    let url = database_url().context("DATABASE_URL not set")?;
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .context("failed to connect to test database")?;
    ensure_schema(&pool).await?;
    Ok(pool)
}

async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS profiles (
            id TEXT PRIMARY KEY,
            email TEXT,
            name TEXT,
            "avatarUrl" TEXT,
            type INTEGER NOT NULL DEFAULT 1,
            address TEXT,
            city TEXT,
            state TEXT,
            zip TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS locations (
            id TEXT PRIMARY KEY,
            "groomerId" TEXT NOT NULL,
            "businessName" TEXT,
            address TEXT,
            city TEXT,
            state TEXT,
            zip TEXT,
            email TEXT,
            "phoneNumber" TEXT,
            lat DOUBLE PRECISION,
            lng DOUBLE PRECISION
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS pets (
            id SERIAL PRIMARY KEY,
            "ownerId" TEXT NOT NULL REFERENCES profiles (id)
                ON UPDATE CASCADE ON DELETE CASCADE,
            name TEXT NOT NULL,
            shots BOOLEAN NOT NULL DEFAULT FALSE,
            type TEXT,
            img TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Insert a profile row for a test owner if it is not already present.
pub async fn ensure_profile(pool: &PgPool, id: &str) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO profiles (id, email, name)
        VALUES ($1, $2, 'Test User')
        ON CONFLICT (id) DO NOTHING
        "#,
    )
    .bind(id)
    .bind(format!("{}@maildrop.cc", id))
    .execute(pool)
    .await?;
    Ok(())
}

/// Mint an Authorization header value for the given profile id, signed with
/// the same secret the spawned server verifies against.
pub fn bearer_for(profile_id: &str) -> String {
    let token =
        encode_token(&Claims::new(profile_id), TEST_JWT_SECRET).expect("failed to mint test token");
    format!("Bearer {}", token)
}

/// A unique id for per-test isolation; profile ids are opaque strings.
pub fn unique_id(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4().simple())
}
