mod store;

pub use store::{CacheKey, CacheStore};
