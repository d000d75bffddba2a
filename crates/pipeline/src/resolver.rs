//! Natural-language to SQL resolution boundary.

/// Resolves a caller's question into a concrete SQL statement.
///
/// Resolution quality is a collaborator concern (a language model, a
/// template table, whatever); the pipeline only requires this narrow
/// interface, so its own logic stays testable without one.
pub trait QueryResolver: Send + Sync {
    /// The SQL to run for `question`, or `None` when the question cannot
    /// be translated against the available data.
    fn resolve(&self, question: &str) -> Option<String>;
}

impl<F> QueryResolver for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn resolve(&self, question: &str) -> Option<String> {
        self(question)
    }
}
