use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::config::Config;
use crate::models::{Client, ExpenseTransaction, LedgerEntry, Project, WorkSession};
use crate::reconcile::StatsInputs;

// Must run before the first query of the transaction.
const SNAPSHOT_ISOLATION_SQL: &str = "SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY";

const CLIENTS_SQL: &str = r#"
    SELECT
        id::text AS id,
        COALESCE(name, '') AS display_name
    FROM clients
    ORDER BY name ASC
"#;

const PROJECTS_SQL: &str = r#"
    SELECT
        id::text AS id,
        COALESCE(name, '') AS display_name,
        COALESCE(client_id::text, '') AS client_id,
        COALESCE(client_label, '') AS client_display_label
    FROM projects
    ORDER BY name ASC
"#;

const LEDGER_ENTRIES_SQL: &str = r#"
    SELECT
        number::text AS number,
        COALESCE(kind, '') AS kind,
        COALESCE(client_name, '') AS client_display_name,
        COALESCE(title, '') AS title,
        COALESCE(status, '') AS status,
        COALESCE(total::float8, 0.0) AS total_amount
    FROM ledger_entries
    ORDER BY number ASC
"#;

const TRANSACTIONS_SQL: &str = r#"
    SELECT
        COALESCE(kind, '') AS kind,
        COALESCE(amount::float8, 0.0) AS amount,
        NULLIF(TRIM(invoice_number::text), '') AS linked_ledger_number
    FROM transactions
"#;

/// Read-only access to the dashboard's relational store
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new Database instance with a connection pool
    pub async fn new(config: &Config) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(config.database_url())
            .await?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }

    // Project operations
    pub async fn load_projects(&self) -> Result<Vec<Project>> {
        let projects = sqlx::query_as::<_, Project>(PROJECTS_SQL)
            .fetch_all(self.get_pool())
            .await?;

        Ok(projects)
    }

    /// Load the four relational collections in one REPEATABLE READ
    /// transaction, so every query sees the same committed state.
    pub async fn load_snapshot(&self) -> Result<Snapshot> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(SNAPSHOT_ISOLATION_SQL)
            .execute(&mut *tx)
            .await?;

        let clients = sqlx::query_as::<_, Client>(CLIENTS_SQL)
            .fetch_all(&mut *tx)
            .await?;

        let projects = sqlx::query_as::<_, Project>(PROJECTS_SQL)
            .fetch_all(&mut *tx)
            .await?;

        let ledger_entries = sqlx::query_as::<_, LedgerEntry>(LEDGER_ENTRIES_SQL)
            .fetch_all(&mut *tx)
            .await?;

        let expenses = sqlx::query_as::<_, ExpenseTransaction>(TRANSACTIONS_SQL)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(
            clients = clients.len(),
            projects = projects.len(),
            ledger_entries = ledger_entries.len(),
            transactions = expenses.len(),
            "loaded relational snapshot"
        );

        Ok(Snapshot {
            clients,
            projects,
            ledger_entries,
            expenses,
        })
    }
}

/// The relational half of the stats inputs; work sessions come from the
/// session store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub clients: Vec<Client>,
    pub projects: Vec<Project>,
    pub ledger_entries: Vec<LedgerEntry>,
    pub expenses: Vec<ExpenseTransaction>,
}

impl Snapshot {
    pub fn inputs<'a>(&'a self, sessions: &'a [WorkSession]) -> StatsInputs<'a> {
        StatsInputs {
            clients: &self.clients,
            projects: &self.projects,
            ledger_entries: &self.ledger_entries,
            expenses: &self.expenses,
            sessions,
        }
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }
}

/// Initialize the database connection pool
pub async fn init(config: &Config) -> Result<Database> {
    let db = Database::new(config).await?;

    Ok(db)
}
