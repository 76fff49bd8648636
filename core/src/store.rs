//! SQLite persistence for batch outcomes.
//!
//! RULE: only store.rs talks to the database. The pipeline itself never
//! persists anything; the orchestrator hands a finished report here.

use crate::{
    classifier::Priority,
    error::AnalyticsResult,
    pipeline::BatchReport,
    revenue_risk::RiskFormula,
};
use rusqlite::{params, Connection};

pub struct ResultStore {
    conn: Connection,
}

impl ResultStore {
    pub fn open(path: &str) -> AnalyticsResult<Self> {
        let conn = Connection::open(path)?;
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> AnalyticsResult<Self> {
        let conn = Connection::open(":memory:")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> AnalyticsResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_results.sql"))?;
        Ok(())
    }

    /// Register a new analysis run and return its id.
    pub fn create_run(
        &self,
        formula: RiskFormula,
        record_count: usize,
    ) -> AnalyticsResult<String> {
        let run_id = uuid::Uuid::new_v4().to_string();
        self.conn.execute(
            "INSERT INTO analysis_run
                 (run_id, engine_version, formula, started_at, record_count)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                run_id,
                env!("CARGO_PKG_VERSION"),
                formula.as_str(),
                chrono::Utc::now().to_rfc3339(),
                record_count as i64,
            ],
        )?;
        Ok(run_id)
    }

    /// Persist every enriched and rejected row of a finished batch.
    pub fn save_report(&self, run_id: &str, report: &BatchReport) -> AnalyticsResult<()> {
        for row in &report.enriched {
            self.conn.execute(
                "INSERT INTO staffing_result
                     (run_id, pharmacy_id, segment, net_prediction, gross_prediction,
                      actual_gross, gap, priority, revenue_at_risk, productivity_pct,
                      small_location)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    run_id,
                    row.record.id,
                    row.record.segment.key(),
                    row.net_prediction,
                    row.gross_prediction,
                    row.actual_gross,
                    row.gap,
                    row.priority.as_str(),
                    row.revenue_at_risk as i64,
                    row.productivity_pct,
                    row.small_location as i64,
                ],
            )?;
        }

        for rejected in &report.rejected {
            self.conn.execute(
                "INSERT INTO rejected_record (run_id, pharmacy_id, error)
                 VALUES (?1, ?2, ?3)",
                params![run_id, rejected.id, rejected.error],
            )?;
        }

        Ok(())
    }

    pub fn result_count(&self, run_id: &str) -> AnalyticsResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM staffing_result WHERE run_id = ?1",
            params![run_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    pub fn priority_count(&self, run_id: &str, priority: Priority) -> AnalyticsResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM staffing_result
             WHERE run_id = ?1 AND priority = ?2",
            params![run_id, priority.as_str()],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    pub fn rejected_count(&self, run_id: &str) -> AnalyticsResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM rejected_record WHERE run_id = ?1",
            params![run_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Total revenue at risk over the run's Urgent rows.
    pub fn total_revenue_at_risk(&self, run_id: &str) -> AnalyticsResult<i64> {
        let total = self.conn.query_row(
            "SELECT COALESCE(SUM(revenue_at_risk), 0) FROM staffing_result
             WHERE run_id = ?1 AND priority = 'urgent'",
            params![run_id],
            |row| row.get(0),
        )?;
        Ok(total)
    }
}
