pub mod grouping;
pub mod staff;
pub mod statistics;
pub mod taxonomy;

pub use grouping::{group_questions, keyword_match_subset, CategoryGroup};
pub use staff::StaffRoster;
pub use statistics::{aggregate_statistics, StatisticsOutput, StatisticsRow};
pub use taxonomy::{CategoryMap, CoarseCategoryMap, Taxonomy};
