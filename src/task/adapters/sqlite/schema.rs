//! Diesel schema for task persistence.

diesel::table! {
    /// Pending tasks, the ordering domain.
    pending_tasks (id) {
        /// Task identifier (hyphenated UUID).
        id -> Text,
        /// Body text as stored; may predate normalization.
        body -> Text,
        /// Set when `body` was written already normalized.
        body_canonical -> Bool,
        /// Creation timestamp (RFC 3339).
        created_at -> Text,
        /// Estimated duration in seconds.
        estimated_seconds -> BigInt,
        /// Elapsed execution time in seconds.
        actual_seconds -> BigInt,
        /// Deadline date (`YYYY-MM-DD`).
        deadline -> Text,
        /// Position among pending tasks.
        sort_order -> BigInt,
    }
}

diesel::table! {
    /// Completed-task log.
    completed_tasks (id) {
        /// Task identifier (hyphenated UUID).
        id -> Text,
        /// Body text as stored.
        body -> Text,
        /// Set when `body` was written already normalized.
        body_canonical -> Bool,
        /// Creation timestamp (RFC 3339).
        created_at -> Text,
        /// Completion timestamp (RFC 3339).
        completed_at -> Text,
        /// Estimated duration in seconds.
        estimated_seconds -> BigInt,
        /// Elapsed execution time in seconds.
        actual_seconds -> BigInt,
        /// Deadline date (`YYYY-MM-DD`).
        deadline -> Text,
        /// Order value held when the task was completed.
        sort_order -> BigInt,
    }
}
