pub mod extract;
pub mod gateway;
pub mod lookup;

pub use extract::{ExtractedInfo, OrderIdExtractor};
pub use gateway::{OrderDirectory, ReplyComposer};
pub use lookup::{match_order, LookupError, LookupResult};
