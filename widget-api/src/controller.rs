//! Widget lookup and actions over HTTP
//!
//! UI elements appear and disappear asynchronously, so every call polls the
//! server until it answers 200 or the timeout runs out. Failures seen while
//! polling are expected and ignored; only the last attempt decides which error
//! the caller gets.

use std::fmt;
use std::time::{Duration, Instant};

use http_client::{compose_uri, HttpClient, Params, RawResponse, Transport, TransportError, Url};
use tracing::{debug, trace, warn};

use crate::config::{ConfigError, ControllerConfig};
use crate::filter::{Action, Filter};
use crate::response::{is_success, Response};
use crate::wait::{self, WaitError, WaitOptions};
use crate::{Result, WidgetError};

/// Resource path for widget lookups and actions
pub const WIDGETS_PATH: &str = "/widgets";

/// Shortest timeout a single request is given, even when the deadline has
/// already passed
pub const MIN_REQUEST_TIMEOUT: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// What the most recent unsuccessful poll saw
#[derive(Debug)]
enum Attempt {
    Response(RawResponse),
    Failed(TransportError),
}

/// Client for one widget server
///
/// Holds only the server address, default wait options and the transport, so
/// one controller can be shared between threads; every call keeps its own
/// polling state.
///
/// # Example
/// ```rust,no_run
/// use std::time::Duration;
/// use widget_api::{Action, Filter, WidgetController};
///
/// let controller = WidgetController::new("localhost", 9999);
/// let filter = Filter::new().with("id", "ok_button");
///
/// let widget = controller.find(&filter, Duration::from_secs(5), Duration::from_millis(500))?;
/// println!("{}", widget.body());
///
/// controller.send_action(
///     &filter,
///     &Action::new().with("action", "press"),
///     Duration::from_secs(5),
///     Duration::from_millis(500),
/// )?;
/// # Ok::<(), widget_api::WidgetError>(())
/// ```
#[derive(Debug, Clone)]
pub struct WidgetController<T: Transport = HttpClient> {
    host: String,
    port: u16,
    wait_options: WaitOptions,
    transport: T,
}

impl WidgetController<HttpClient> {
    /// Create a controller talking to `host:port` over HTTP
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self::with_transport(host, port, HttpClient::new())
    }

    /// Create a controller from validated configuration
    pub fn from_config(config: &ControllerConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config.host.clone(), config.port).with_wait_options(config.wait_options()?))
    }
}

impl<T: Transport> WidgetController<T> {
    /// Create a controller with a custom transport
    pub fn with_transport(host: impl Into<String>, port: u16, transport: T) -> Self {
        Self {
            host: host.into(),
            port,
            wait_options: WaitOptions::default(),
            transport,
        }
    }

    /// Replace the options used by the `*_with_defaults` calls
    pub fn with_wait_options(mut self, wait_options: WaitOptions) -> Self {
        self.wait_options = wait_options;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn wait_options(&self) -> WaitOptions {
        self.wait_options
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Find a widget matching `filter`
    ///
    /// Polls `GET /widgets?<filter>` every `interval` until the server answers
    /// 200 or `timeout` elapses. After the timeout, a final 404 becomes
    /// [`WidgetError::WidgetNotFound`], a final 422 becomes
    /// [`WidgetError::ItemNotFoundInWidget`], and anything else
    /// [`WidgetError::Client`].
    pub fn find(&self, filter: &Filter, timeout: Duration, interval: Duration) -> Result<Response> {
        let uri = self.uri(filter.params())?;
        self.poll(Method::Get, &uri, timeout, interval)
    }

    /// Perform `action` on the widget matching `filter`
    ///
    /// Polls `POST /widgets?<filter+action>` with the same rules as
    /// [`find`](Self::find); action keys override filter keys. The action is
    /// re-sent on every attempt until one returns 200, so the server may see
    /// it more than once.
    pub fn send_action(
        &self,
        filter: &Filter,
        action: &Action,
        timeout: Duration,
        interval: Duration,
    ) -> Result<Response> {
        let uri = self.uri(&filter.merged_with(action))?;
        self.poll(Method::Post, &uri, timeout, interval)
    }

    /// [`find`](Self::find) with the controller's wait options
    pub fn find_with_defaults(&self, filter: &Filter) -> Result<Response> {
        let WaitOptions { timeout, interval } = self.wait_options;
        self.find(filter, timeout, interval)
    }

    /// [`send_action`](Self::send_action) with the controller's wait options
    pub fn send_action_with_defaults(&self, filter: &Filter, action: &Action) -> Result<Response> {
        let WaitOptions { timeout, interval } = self.wait_options;
        self.send_action(filter, action, timeout, interval)
    }

    fn uri(&self, params: &Params) -> Result<Url> {
        Ok(compose_uri(&self.host, self.port, WIDGETS_PATH, params)?)
    }

    fn poll(&self, method: Method, uri: &Url, timeout: Duration, interval: Duration) -> Result<Response> {
        let mut last: Option<Attempt> = None;
        let start = Instant::now();

        let outcome = wait::until(timeout, interval, || {
            let per_request = request_timeout(timeout.saturating_sub(start.elapsed()), interval);
            let result = match method {
                Method::Get => self.transport.get(uri, per_request),
                Method::Post => self.transport.post(uri, per_request),
            };

            match result {
                Ok(raw) if is_success(raw.status) => Some(Ok(Response::from_raw(raw))),
                Ok(raw) => {
                    trace!(%method, %uri, status = raw.status, "widget not ready");
                    last = Some(Attempt::Response(raw));
                    None
                }
                Err(err) if err.is_recoverable() => {
                    warn!(%method, %uri, error = %err, "request failed, still polling");
                    last = Some(Attempt::Failed(err));
                    None
                }
                Err(err) => Some(Err(WidgetError::Transport(err))),
            }
        });

        match outcome {
            Ok(result) => result,
            Err(WaitError::DeadlineExpired { attempts, elapsed }) => {
                let error = classify(last);
                debug!(%method, %uri, attempts, ?elapsed, error = %error, "gave up polling");
                Err(error)
            }
            Err(err @ WaitError::InvalidInterval) => Err(err.into()),
        }
    }
}

/// Timeout for one request: no longer than an interval or the time left
/// before the deadline, and never below [`MIN_REQUEST_TIMEOUT`]
fn request_timeout(remaining: Duration, interval: Duration) -> Duration {
    interval.min(remaining).max(MIN_REQUEST_TIMEOUT)
}

/// Turn the final unsuccessful attempt into the error the caller sees
fn classify(last: Option<Attempt>) -> WidgetError {
    match last {
        Some(Attempt::Response(raw)) => match raw.status {
            404 => WidgetError::WidgetNotFound { body: raw.body },
            422 => WidgetError::ItemNotFoundInWidget { body: raw.body },
            status => WidgetError::Client {
                status: Some(status),
                message: raw.body,
            },
        },
        Some(Attempt::Failed(err)) => WidgetError::Client {
            status: None,
            message: err.to_string(),
        },
        None => WidgetError::Client {
            status: None,
            message: "no response received".to_string(),
        },
    }
}
