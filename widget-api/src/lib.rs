//! Polling client for remote UI-automation widget servers
//!
//! A widget server exposes the UI elements of a running application over
//! HTTP. This crate locates widgets by filter and performs actions on them,
//! polling until the element is ready because UI state changes
//! asynchronously. It uses the private `http-client` crate for transport.
//!
//! ```rust,no_run
//! use widget_api::{Action, Filter, WidgetController};
//!
//! let controller = WidgetController::new("localhost", 9999);
//! let ok_button = Filter::new().with("id", "ok_button");
//!
//! controller.send_action_with_defaults(&ok_button, &Action::new().with("action", "press"))?;
//! # Ok::<(), widget_api::WidgetError>(())
//! ```
//!
//! Errors are only decided once polling gives up: a final 404 is
//! [`ErrorKind::WidgetNotFound`], a final 422 is
//! [`ErrorKind::ItemNotFoundInWidget`], everything else is
//! [`ErrorKind::Generic`].

pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod logging;
pub mod response;
pub mod wait;

pub use config::{ConfigError, ControllerConfig};
pub use controller::WidgetController;
pub use error::{ErrorKind, Result, WidgetError};
pub use filter::{Action, Filter};
pub use http_client::{HttpClient, ParamValue, Params, RawResponse, Transport, TransportError, Url};
pub use response::{is_success, Response};
pub use wait::{WaitError, WaitOptions};
