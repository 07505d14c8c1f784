pub mod error;
pub mod tantivy;
pub mod traits;

pub use error::SearchError;
pub use self::tantivy::TantivyIndex;
pub use traits::{SearchHit, SearchIndex, SearchableDoc};
