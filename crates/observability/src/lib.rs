//! Tracing and logging (shared setup).

/// Initialize process-wide observability in the given log format.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(format: LogFormat) {
    tracing::init(format);
}

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use self::tracing::LogFormat;

#[cfg(test)]
mod tests {
    #[test]
    fn init_accepts_every_format() {
        super::init(super::LogFormat::Json);
        super::init(super::LogFormat::Pretty);
    }
}
