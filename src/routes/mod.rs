pub mod categories;
pub mod featured;
pub mod search;
pub mod system;
pub mod videos;

pub use categories::{all_categories, create_category};
pub use featured::featured_content;
pub use search::search_videos;
pub use system::{health_check, root};
pub use videos::{create_video, get_video, increment_view_count, list_videos};
