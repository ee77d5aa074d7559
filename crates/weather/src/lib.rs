//! # HKO Weather
//!
//! Request dispatch for the Hong Kong Observatory open data weather API.
//!
//! A [`ToolRequest`] names a [`Capability`] and carries loosely typed
//! arguments. The [`Dispatcher`] resolves the capability against the static
//! endpoint catalog, picks the response language, issues a single GET against
//! HKO and hands back the parsed JSON.
//!
//! ```rust,no_run
//! use hko_weather_core::{Dispatcher, DispatcherConfig, ToolRequest, WeatherResult};
//!
//! # async fn example() -> WeatherResult<()> {
//! let dispatcher = Dispatcher::new(DispatcherConfig::default())?;
//!
//! let request = ToolRequest::new("current").with_argument("language", "tc");
//! let response = dispatcher.handle(request).await?;
//! println!("{}", response.data);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod format;
pub mod language;
pub mod transport;

pub use catalog::{lookup, Capability, EndpointSpec};
pub use config::DispatcherConfig;
pub use dispatcher::{Dispatcher, OutputFormat, ToolRequest, WeatherResponse};
pub use error::{UpstreamError, WeatherError, WeatherResult};
pub use language::{resolve, LanguageCode};
