//! Fire-and-forget diagnostic sink used by the nearest-supplier search.

/// Category for a warehouse whose location could not be resolved.
pub const WAREHOUSE_LOCATION_ERROR: &str = "Warehouse Location Parse Error";

/// Category for a supplier whose location could not be parsed.
pub const SUPPLIER_LOCATION_ERROR: &str = "Supplier Location Parse Error";

/// Receives diagnostics that must not interrupt the caller.
///
/// Implementations swallow their own failures.
pub trait ErrorLog {
    fn log_error(&self, message: &str, category: &str);
}

/// [`ErrorLog`] that only emits `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorLog;

impl ErrorLog for TracingErrorLog {
    fn log_error(&self, message: &str, category: &str) {
        tracing::error!(category, "{message}");
    }
}

impl<T: ErrorLog + ?Sized> ErrorLog for &T {
    fn log_error(&self, message: &str, category: &str) {
        (**self).log_error(message, category);
    }
}
