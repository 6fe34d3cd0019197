//! Application use cases (business logic orchestration).

mod execute_request;
mod open_collection;
mod save_collection;

pub use execute_request::{InFlightRequest, RequestStatus};
pub use open_collection::OpenCollection;
pub use save_collection::SaveCollection;
