pub mod categories;
pub mod videos;

pub use categories::CategoryRepository;
pub use videos::{VideoFilter, VideoRepository};

/// Upper bound for a single pool call; a stuck store must not hold a
/// request handler indefinitely.
pub(crate) const QUERY_TIMEOUT: std::time::Duration = std::time::Duration::from_millis(10_000);
