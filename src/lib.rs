pub mod browser;
pub mod endpoint;
pub mod error;
pub mod site;
pub mod stabilize;

//  Re-export commonly used items
pub use browser::chrome::ChromeDriver;
pub use endpoint::{resolve_ws_url, DEFAULT_ENDPOINT};
pub use error::RunnerError;
pub use site::{Assistant, SiteDescriptor};
pub use stabilize::{await_response, StabilityTracker};
