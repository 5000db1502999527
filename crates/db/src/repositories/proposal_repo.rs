//! Repository for the `proposals` table.

use bidflow_core::filter::contains_pattern;
use bidflow_core::types::DbId;
use sqlx::PgPool;

use crate::models::proposal::{NewProposal, Proposal, ProposalChanges, ProposalFilter};
use crate::models::subtask::Subtask;
use crate::models::task::{Task, TaskDetail};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, site, client, client_name, quote_number, budget, description, \
                       business_unit, opportunity_status, resource_name, created_by, \
                       created_at, updated_at";

const TASK_COLUMNS: &str =
    "id, proposal_id, title, description, sort_order, created_at, updated_at";

const SUBTASK_COLUMNS: &str = "id, task_id, title, hours, sort_order, created_at, updated_at";

/// Provides CRUD operations for proposals, including the nested
/// proposal/task/subtask creation transaction.
pub struct ProposalRepo;

impl ProposalRepo {
    /// Insert a proposal and all nested tasks/subtasks in one
    /// transaction. Either every row commits or none do.
    ///
    /// `created_by` comes from the authenticated principal.
    pub async fn create_with_tasks(
        pool: &PgPool,
        created_by: DbId,
        input: &NewProposal,
    ) -> Result<(Proposal, Vec<TaskDetail>), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO proposals
                (name, site, client, client_name, quote_number, budget, description,
                 business_unit, opportunity_status, resource_name, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        let proposal = sqlx::query_as::<_, Proposal>(&query)
            .bind(&input.name)
            .bind(&input.site)
            .bind(&input.client)
            .bind(&input.client_name)
            .bind(&input.quote_number)
            .bind(input.budget)
            .bind(&input.description)
            .bind(&input.business_unit)
            .bind(input.opportunity_status.as_str())
            .bind(&input.resource_name)
            .bind(created_by)
            .fetch_one(&mut *tx)
            .await?;

        let task_query = format!(
            "INSERT INTO tasks (proposal_id, title, description, sort_order)
             VALUES ($1, $2, $3, $4)
             RETURNING {TASK_COLUMNS}"
        );
        let subtask_query = format!(
            "INSERT INTO subtasks (task_id, title, hours, sort_order)
             VALUES ($1, $2, $3, $4)
             RETURNING {SUBTASK_COLUMNS}"
        );

        let mut tasks = Vec::with_capacity(input.tasks.len());
        for new_task in &input.tasks {
            let task = sqlx::query_as::<_, Task>(&task_query)
                .bind(proposal.id)
                .bind(&new_task.title)
                .bind(&new_task.description)
                .bind(new_task.sort_order)
                .fetch_one(&mut *tx)
                .await?;

            let mut subtasks = Vec::with_capacity(new_task.subtasks.len());
            for new_subtask in &new_task.subtasks {
                let subtask = sqlx::query_as::<_, Subtask>(&subtask_query)
                    .bind(task.id)
                    .bind(&new_subtask.title)
                    .bind(new_subtask.hours)
                    .bind(new_subtask.sort_order)
                    .fetch_one(&mut *tx)
                    .await?;
                subtasks.push(subtask);
            }

            tasks.push(TaskDetail {
                task,
                subtasks: Some(subtasks),
                proposal: None,
            });
        }

        tx.commit().await?;
        Ok((proposal, tasks))
    }

    /// Find a proposal by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Proposal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM proposals WHERE id = $1");
        sqlx::query_as::<_, Proposal>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a proposal with the given ID exists. Used for
    /// reference checks before inserting child rows.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM proposals WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// List proposals matching every supplied filter, in insertion
    /// order. Substring filters match case-insensitively.
    pub async fn list(
        pool: &PgPool,
        filter: &ProposalFilter,
    ) -> Result<Vec<Proposal>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM proposals
             WHERE ($1::TEXT IS NULL OR name ILIKE $1)
               AND ($2::TEXT IS NULL OR client ILIKE $2)
               AND ($3::TEXT IS NULL OR client_name ILIKE $3)
               AND ($4::BIGINT IS NULL OR created_by = $4)
               AND ($5::TEXT IS NULL OR opportunity_status = $5)
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Proposal>(&query)
            .bind(filter.name.as_deref().map(contains_pattern))
            .bind(filter.client.as_deref().map(contains_pattern))
            .bind(filter.client_name.as_deref().map(contains_pattern))
            .bind(filter.created_by)
            .bind(&filter.opportunity_status)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update. Only non-`None` fields change; the
    /// row's `updated_at` is refreshed. Returns `None` if no row
    /// exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &ProposalChanges,
    ) -> Result<Option<Proposal>, sqlx::Error> {
        let query = format!(
            "UPDATE proposals SET
                name = COALESCE($2, name),
                site = COALESCE($3, site),
                client = COALESCE($4, client),
                quote_number = COALESCE($5, quote_number),
                client_name = COALESCE($6, client_name),
                budget = COALESCE($7, budget),
                description = COALESCE($8, description),
                created_by = COALESCE($9, created_by),
                business_unit = COALESCE($10, business_unit),
                opportunity_status = COALESCE($11, opportunity_status),
                resource_name = COALESCE($12, resource_name),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Proposal>(&query)
            .bind(id)
            .bind(&changes.name)
            .bind(&changes.site)
            .bind(&changes.client)
            .bind(&changes.quote_number)
            .bind(&changes.client_name)
            .bind(changes.budget)
            .bind(&changes.description)
            .bind(changes.created_by)
            .bind(&changes.business_unit)
            .bind(&changes.opportunity_status)
            .bind(&changes.resource_name)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a proposal. Tasks and subtasks go with it via
    /// `ON DELETE CASCADE`, atomically. Returns `true` if a row was
    /// removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM proposals WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
