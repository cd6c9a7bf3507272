//! Adapters for the signing client's outbound ports.

pub mod http;
pub mod notify;
pub mod storage;
pub mod time;
pub mod wallet;

pub use http::{ClientConfig, VerificationClient};
pub use notify::TracingNotifier;
pub use storage::{FileBackedKVStore, InMemoryKVStore};
pub use time::SystemTimeSource;
pub use wallet::LocalWallet;
