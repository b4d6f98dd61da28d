//! Stable multi-line text form of an error value
//!
//! ```text
//! 2024-10-29T16:56:32.123Z / LMError
//! db timeout (db_timeout_01)
//! HTTP 503
//! Retry-After: 120
//! {"error":"unavailable"}
//! <previous error, rendered the same way>
//! ```

use serde_json::Value;

use crate::response::ResponseSnapshot;
use crate::value::ErrorValue;

/// Platform line separator
pub const EOL: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// Type identifier shown on the header line
pub const TYPE_NAME: &str = "LMError";

impl ErrorValue {
    /// Render the error and its chain
    ///
    /// The output depends only on the current state, so repeated calls agree
    /// until a previous error is linked. Every line, the last included, ends
    /// with [`EOL`].
    pub fn render(&self) -> String {
        let mut blocks = vec![self.render_header(), self.render_descriptor()];

        if let Some(response) = self.response() {
            blocks.push(render_response(response));
        }

        if let Some(previous) = self.previous() {
            blocks.push(render_previous(previous));
        }

        let mut text = blocks.join(EOL);
        text.push_str(EOL);
        text
    }

    fn render_header(&self) -> String {
        format!("{:.3} / {TYPE_NAME}", self.timestamp())
    }

    fn render_descriptor(&self) -> String {
        format!("{} ({})", self.message(), self.code())
    }
}

fn render_response(response: &ResponseSnapshot) -> String {
    let mut lines = vec![format!("HTTP {}", response.status_code())];

    for header in response.headers().unwrap_or_default() {
        lines.push(format!("{}: {}", header.name(), header.value()));
    }

    if let Some(body) = response.body() {
        lines.push(render_body(body));
    }

    lines.join(EOL)
}

fn render_body(body: &Value) -> String {
    body.to_string()
}

fn render_previous(previous: &(dyn std::error::Error + Send + Sync + 'static)) -> String {
    if let Some(value) = previous.downcast_ref::<ErrorValue>() {
        return value.render().trim_end().to_owned();
    }

    previous.to_string().trim_end().to_owned()
}
