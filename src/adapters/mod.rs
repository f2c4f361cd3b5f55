// Adapters layer: concrete implementations of the domain ports for
// external systems (artifact stores over the filesystem and HTTP).

pub mod http_store;
pub mod local_store;

pub use http_store::HttpStore;
pub use local_store::LocalStore;
