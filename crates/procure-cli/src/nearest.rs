//! Lookup commands: nearest supplier for a warehouse and the error log.

use std::sync::{Mutex, PoisonError};

use procure_core::{find_nearest_supplier, ErrorLog, NearestSupplier};
use procure_db::PgSupplierDirectory;

/// Collects error-log entries during a lookup so the command can persist
/// them before the runtime shuts down.
#[derive(Debug, Default)]
struct PendingErrorLog {
    entries: Mutex<Vec<(String, String)>>,
}

impl ErrorLog for PendingErrorLog {
    fn log_error(&self, message: &str, category: &str) {
        tracing::error!(category, "{message}");
        if let Ok(mut entries) = self.entries.lock() {
            entries.push((category.to_owned(), message.to_owned()));
        }
    }
}

impl PendingErrorLog {
    /// Insert every collected entry. Failures are reported and skipped.
    async fn flush(self, pool: &sqlx::PgPool) -> usize {
        let entries = self
            .entries
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        let mut stored = 0;
        for (category, message) in &entries {
            match procure_db::insert_error_log(pool, category, message).await {
                Ok(_) => stored += 1,
                Err(e) => {
                    tracing::warn!(error = %e, category = %category, "failed to persist error log entry");
                }
            }
        }
        stored
    }
}

/// Print the nearest enabled supplier for `warehouse`.
///
/// A warehouse with no usable location, or no supplier with one, prints
/// `no supplier found` (or `null` with `--json`). Location problems are
/// written to the error log rather than failing the command.
///
/// # Errors
///
/// Returns an error only if the supplier list cannot be read.
pub(crate) async fn run_nearest(
    pool: &sqlx::PgPool,
    warehouse: &str,
    json: bool,
) -> anyhow::Result<()> {
    let directory = PgSupplierDirectory::new(pool.clone());
    let log = PendingErrorLog::default();

    let nearest = find_nearest_supplier(&directory, &log, warehouse).await;
    let stored = log.flush(pool).await;
    if stored > 0 {
        eprintln!("recorded {stored} location error(s); see `procure-cli errors`");
    }
    let nearest = nearest?;

    if json {
        println!("{}", serde_json::to_string_pretty(&nearest)?);
    } else {
        println!("{}", format_nearest(warehouse, nearest.as_ref()));
    }

    Ok(())
}

fn format_nearest(warehouse: &str, nearest: Option<&NearestSupplier>) -> String {
    match nearest {
        Some(n) => format!("{warehouse}: {} ({:.2} km)", n.name, n.distance),
        None => format!("{warehouse}: no supplier found"),
    }
}

pub(crate) async fn run_errors(pool: &sqlx::PgPool, limit: i64) -> anyhow::Result<()> {
    let rows = procure_db::list_recent_error_logs(pool, limit.clamp(1, 200)).await?;

    if rows.is_empty() {
        println!("no errors recorded");
        return Ok(());
    }

    let header = format!("{:<22}{:<34}MESSAGE", "WHEN", "CATEGORY");
    println!("{header}");
    for row in &rows {
        println!(
            "{:<22}{:<34}{}",
            row.created_at.format("%Y-%m-%d %H:%M:%S"),
            row.category,
            row.message
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_nearest_shows_name_and_rounded_distance() {
        let nearest = NearestSupplier {
            name: "Rhone Recycled Metals".to_string(),
            distance: 3.456_78,
        };
        assert_eq!(
            format_nearest("Stores - Lyon", Some(&nearest)),
            "Stores - Lyon: Rhone Recycled Metals (3.46 km)"
        );
    }

    #[test]
    fn pending_error_log_keeps_entries_in_order() {
        let log = PendingErrorLog::default();
        log.log_error("first", "Warehouse Location Parse Error");
        log.log_error("second", "Supplier Location Parse Error");

        let entries = log.entries.into_inner().expect("not poisoned");
        assert_eq!(
            entries,
            vec![
                (
                    "Warehouse Location Parse Error".to_string(),
                    "first".to_string()
                ),
                (
                    "Supplier Location Parse Error".to_string(),
                    "second".to_string()
                ),
            ]
        );
    }

    #[test]
    fn format_nearest_reports_missing_result() {
        assert_eq!(
            format_nearest("Transit - Unmapped", None),
            "Transit - Unmapped: no supplier found"
        );
    }
}
