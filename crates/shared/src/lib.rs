pub mod cache;
pub mod labels;
pub mod request_state;

pub use cache::{DEFAULT_PRELOAD_CAPACITY, PreloadCache};
pub use request_state::{RequestEvent, RequestState};
