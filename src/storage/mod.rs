//! Cloud Storage for Firebase bucket identifiers.
//!
//! # Examples
//!
//! ```rust
//! use firetor::storage::StorageBucket;
//!
//! let bucket = StorageBucket::parse("gs://my-project.appspot.com").unwrap();
//! assert_eq!(bucket.name(), "my-project.appspot.com");
//!
//! assert!(StorageBucket::parse("https://my-bucket").is_err());
//! ```

pub mod bucket;

pub use bucket::StorageBucket;
