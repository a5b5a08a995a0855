use anyhow::{Context, Result};
use async_trait::async_trait;
use gcloud_gax::grpc::{Code, Status};
use gcloud_googleapis::spanner::admin::database::v1::{
    CreateDatabaseRequest, GetDatabaseDdlRequest, GetDatabaseRequest, UpdateDatabaseDdlRequest,
};
use gcloud_googleapis::spanner::admin::instance::v1::{
    CreateInstanceRequest, GetInstanceRequest, Instance,
};
use gcloud_spanner::admin::client::Client as AdminClient;
use gcloud_spanner::admin::AdminClientConfig;
use gcloud_spanner::client::{Client, ClientConfig, Error as SpannerError};
use gcloud_spanner::mutation::insert;
use gcloud_spanner::row::Row;
use gcloud_spanner::statement::Statement;
use std::future::Future;
use std::sync::Arc;

use super::LocationStore;
use crate::config::SpannerConfig;
use crate::models::{Location, NewLocation};

const TABLE: &str = "locations";
const COLUMNS: [&str; 5] = ["id", "name", "latitude", "longitude", "description"];

const CREATE_TABLE_DDL: &str = r#"
CREATE TABLE locations (
    id INT64 NOT NULL,
    name STRING(MAX) NOT NULL,
    latitude FLOAT64 NOT NULL,
    longitude FLOAT64 NOT NULL,
    description STRING(MAX),
) PRIMARY KEY (id)
"#;

const CREATE_NAME_INDEX_DDL: &str = "CREATE INDEX locations_by_name ON locations (name)";

/// Location table backed by Cloud Spanner
///
/// Cheap to clone; all clones share one session pool.
#[derive(Clone)]
pub struct SpannerStore {
    inner: Arc<Client>,
}

impl SpannerStore {
    /// Create a new Spanner-backed store from configuration
    ///
    /// The gcloud-spanner library detects the SPANNER_EMULATOR_HOST
    /// environment variable and connects to the emulator when set, or
    /// production Spanner otherwise.
    ///
    /// The instance, database and `locations` table are created first if
    /// they don't exist.
    pub async fn from_config(config: &SpannerConfig) -> Result<Self> {
        auto_provision(config).await?;

        let database_path = config.database_path();

        match &config.emulator_host {
            Some(host) => tracing::info!("Connecting to Spanner emulator at: {}", host),
            None => tracing::info!("Connecting to production Spanner"),
        }

        // ClientConfig::default() picks up SPANNER_EMULATOR_HOST if set
        let client = Client::new(&database_path, ClientConfig::default())
            .await
            .context("Failed to create Spanner client")?;

        tracing::info!(
            "Successfully connected to Spanner database: {}",
            database_path
        );

        Ok(Self {
            inner: Arc::new(client),
        })
    }

    async fn query_locations(&self, statement: Statement) -> Result<Vec<Location>> {
        let mut tx = self.inner
            .single()
            .await
            .context("Failed to create read transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to query locations from Spanner")?;

        let mut locations = Vec::new();
        while let Some(row) = result_set.next().await? {
            locations.push(location_from_row(&row)?);
        }
        Ok(locations)
    }
}

fn location_from_row(row: &Row) -> Result<Location> {
    Ok(Location {
        id: row.column_by_name("id")?,
        name: row.column_by_name("name")?,
        latitude: row.column_by_name("latitude")?,
        longitude: row.column_by_name("longitude")?,
        description: row.column_by_name("description")?,
    })
}

#[async_trait]
impl LocationStore for SpannerStore {
    async fn list_all(&self) -> Result<Vec<Location>> {
        let statement = Statement::new(
            "SELECT id, name, latitude, longitude, description FROM locations ORDER BY id ASC",
        );

        let locations = self.query_locations(statement).await?;
        tracing::debug!("Listed {} locations", locations.len());
        Ok(locations)
    }

    /// Insert a location under `MAX(id) + 1`
    ///
    /// The read and the insert share one read-write transaction, so two
    /// concurrent creates cannot commit the same id; the loser is aborted
    /// and re-run by the client.
    async fn create(&self, candidate: NewLocation) -> Result<Location> {
        let result: Result<(_, i64), SpannerError> = self
            .inner
            .read_write_transaction(|tx| {
                let candidate = candidate.clone();
                Box::pin(async move {
                    let max_id: Option<i64> = {
                        let statement = Statement::new("SELECT MAX(id) AS max_id FROM locations");
                        let mut result_set = tx.query(statement).await?;
                        match result_set.next().await? {
                            Some(row) => row.column_by_name("max_id")?,
                            None => None,
                        }
                    };
                    let id = max_id.unwrap_or(0) + 1;

                    tx.buffer_write(vec![insert(
                        TABLE,
                        &COLUMNS,
                        &[
                            &id,
                            &candidate.name,
                            &candidate.latitude,
                            &candidate.longitude,
                            &candidate.description,
                        ],
                    )]);
                    Ok(id)
                })
            })
            .await;

        let (_, id) = result.context("Failed to insert location into Spanner")?;

        tracing::debug!("Created location with id: {}", id);
        Ok(Location::from_new(id, candidate))
    }

    /// On duplicate names the lowest id wins
    async fn find_by_name(&self, name: &str) -> Result<Option<Location>> {
        let mut statement = Statement::new(
            "SELECT id, name, latitude, longitude, description FROM locations \
             WHERE name = @name ORDER BY id ASC LIMIT 1",
        );
        statement.add_param("name", &name.to_string());

        let location = self.query_locations(statement).await?.into_iter().next();
        if location.is_none() {
            tracing::debug!("Location not found with name: {}", name);
        }
        Ok(location)
    }

    /// Run a lightweight `SELECT 1` to verify the connection is alive
    async fn health_check(&self) -> Result<()> {
        let statement = Statement::new("SELECT 1");

        let mut tx = self.inner
            .single()
            .await
            .context("Failed to create health check transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to execute health check query")?;

        if result_set.next().await?.is_some() {
            tracing::debug!("Health check query succeeded");
            Ok(())
        } else {
            Err(anyhow::anyhow!("Health check query returned no results"))
        }
    }
}

/// Automatically provision Spanner instance, database, and table
///
/// Checks whether the configured resources exist and creates the missing
/// ones, so a fresh emulator needs no manual setup.
async fn auto_provision(config: &SpannerConfig) -> Result<()> {
    tracing::info!("Starting auto-provisioning checks...");

    let admin_client = AdminClient::new(AdminClientConfig::default())
        .await
        .context("Failed to create Spanner admin client")?;

    let project_path = format!("projects/{}", config.project);
    let instance_path = format!("{}/instances/{}", project_path, config.instance);
    let database_path = config.database_path();

    ensure_instance_exists(&admin_client, config, &project_path, &instance_path).await?;
    ensure_database_exists(&admin_client, &instance_path, &database_path).await?;
    ensure_table_exists(&admin_client, &database_path).await?;

    tracing::info!("Auto-provisioning complete");
    Ok(())
}

/// Probe one provisioned resource and run `create` only when it is missing
async fn ensure_exists<P, C, F>(kind: &str, path: &str, probe: P, create: C) -> Result<()>
where
    P: Future<Output = Result<(), Status>>,
    C: FnOnce() -> F,
    F: Future<Output = Result<()>>,
{
    match probe.await {
        Ok(()) => {
            tracing::info!("Location {} already provisioned: {}", kind, path);
            Ok(())
        }
        Err(status) if status.code() == Code::NotFound => {
            tracing::info!("Location {} missing, provisioning: {}", kind, path);
            create().await?;
            tracing::info!("Location {} provisioned: {}", kind, path);
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!(
            "Failed to check {} existence: {}",
            kind,
            e.message()
        )),
    }
}

async fn ensure_instance_exists(
    admin_client: &AdminClient,
    config: &SpannerConfig,
    project_path: &str,
    instance_path: &str,
) -> Result<()> {
    let probe = async {
        admin_client
            .instance()
            .get_instance(
                GetInstanceRequest {
                    name: instance_path.to_string(),
                    field_mask: None,
                },
                None,
            )
            .await
            .map(|_| ())
    };

    ensure_exists("instance", instance_path, probe, move || async move {
        // The emulator only knows its own instance config
        let instance_config = match config.emulator_host {
            Some(_) => format!("{}/instanceConfigs/emulator-config", project_path),
            None => format!("{}/instanceConfigs/regional-us-central1", project_path),
        };

        let create_request = CreateInstanceRequest {
            parent: project_path.to_string(),
            instance_id: config.instance.clone(),
            instance: Some(Instance {
                name: instance_path.to_string(),
                config: instance_config,
                display_name: format!("{} campus locations", config.instance),
                node_count: 1,
                ..Default::default()
            }),
        };

        admin_client
            .instance()
            .create_instance(create_request, None)
            .await
            .context("Failed to start instance creation")?
            .wait(None)
            .await
            .context("Failed to create instance")?;
        Ok::<(), anyhow::Error>(())
    })
    .await
}

async fn ensure_database_exists(
    admin_client: &AdminClient,
    instance_path: &str,
    database_path: &str,
) -> Result<()> {
    let probe = async {
        admin_client
            .database()
            .get_database(
                GetDatabaseRequest {
                    name: database_path.to_string(),
                },
                None,
            )
            .await
            .map(|_| ())
    };

    ensure_exists("database", database_path, probe, move || async move {
        let database_id = database_path
            .rsplit('/')
            .next()
            .context("Invalid database path")?;

        let create_request = CreateDatabaseRequest {
            parent: instance_path.to_string(),
            create_statement: format!("CREATE DATABASE `{}`", database_id),
            extra_statements: vec![],
            encryption_config: None,
            database_dialect: 1, // GoogleSQL
            proto_descriptors: vec![],
        };

        admin_client
            .database()
            .create_database(create_request, None)
            .await
            .context("Failed to start database creation")?
            .wait(None)
            .await
            .context("Failed to create database")?;
        Ok::<(), anyhow::Error>(())
    })
    .await
}

/// Statements needed to bring `existing` DDL up to the locations schema
fn missing_ddl(existing: &[String]) -> Vec<String> {
    let has = |needle: &str| existing.iter().any(|stmt| stmt.contains(needle));

    let mut statements = Vec::new();
    if !has("CREATE TABLE locations") && !has("CREATE TABLE `locations`") {
        statements.push(CREATE_TABLE_DDL.trim().to_string());
    }
    if !has("locations_by_name") {
        statements.push(CREATE_NAME_INDEX_DDL.to_string());
    }
    statements
}

async fn ensure_table_exists(admin_client: &AdminClient, database_path: &str) -> Result<()> {
    let get_ddl_request = GetDatabaseDdlRequest {
        database: database_path.to_string(),
    };

    let ddl_response = admin_client
        .database()
        .get_database_ddl(get_ddl_request, None)
        .await
        .context("Failed to get database DDL")?;

    let statements = missing_ddl(&ddl_response.into_inner().statements);
    if statements.is_empty() {
        tracing::info!("Table 'locations' already exists");
        return Ok(());
    }

    tracing::info!("Applying {} schema statement(s) for 'locations'", statements.len());

    let update_request = UpdateDatabaseDdlRequest {
        database: database_path.to_string(),
        statements,
        operation_id: String::new(),
        proto_descriptors: vec![],
        throughput_mode: false,
    };

    let mut operation = admin_client
        .database()
        .update_database_ddl(update_request, None)
        .await
        .context("Failed to start table creation")?;

    operation
        .wait(None)
        .await
        .context("Failed to create table")?;

    tracing::info!("Table 'locations' created successfully");
    Ok(())
}
