pub mod config;
pub mod logging;

pub mod endpoint;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod link;
pub mod resolver;
pub mod retriever;
pub mod save;
pub mod session;
pub mod track;

pub use error::FetchError;
pub use fetcher::TrackFetcher;
pub use link::{LinkPattern, LinkReference, ResourceKind};
pub use save::{FileSink, SaveSink, SavedFile};
pub use session::{OperationState, Session};
pub use track::TrackMetadata;
