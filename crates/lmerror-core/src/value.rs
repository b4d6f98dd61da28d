use std::sync::Arc;

use jiff::{SignedDuration, Timestamp};

use crate::descriptor::ErrorDescriptor;
use crate::error::{DescribedError, Error, Result};
use crate::response::ResponseSnapshot;

/// Shared handle to a prior error in the causal chain
pub type Previous = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Link state of an error value
///
/// `Unlinked -> Linked` is the only transition, and it happens at most once.
#[derive(Debug, Clone, Default)]
enum Link {
    #[default]
    Unlinked,
    Linked(Previous),
}

/// Validated error occurrence with optional response context and cause
///
/// All fields are fixed at construction. The one exception is
/// [`ErrorValue::add_previous`], which needs `&mut self` and is therefore only
/// usable while the value has a single owner, before it is shared.
#[derive(Debug, Clone)]
pub struct ErrorValue {
    descriptor: ErrorDescriptor,
    response: Option<ResponseSnapshot>,
    link: Link,
    timestamp: Timestamp,
}

impl ErrorValue {
    /// Assemble an error value from already validated parts
    ///
    /// The timestamp is taken at this instant.
    pub fn new(descriptor: ErrorDescriptor, response: Option<ResponseSnapshot>, previous: Option<Previous>) -> Self {
        Self {
            descriptor,
            response,
            link: previous.map_or(Link::Unlinked, Link::Linked),
            timestamp: Timestamp::now(),
        }
    }

    /// Link a prior error after construction
    ///
    /// On success the timestamp is regenerated and is strictly later than
    /// before. On failure nothing changes.
    ///
    /// # Errors
    ///
    /// `previous_exists` if a previous error is already linked
    pub fn add_previous(&mut self, previous: Previous) -> Result<()> {
        if matches!(self.link, Link::Linked(_)) {
            return Err(Error::PreviousExists);
        }

        self.link = Link::Linked(previous);
        self.timestamp = later_than(self.timestamp);

        Ok(())
    }

    pub const fn descriptor(&self) -> &ErrorDescriptor {
        &self.descriptor
    }

    /// Same string as `descriptor().message()`
    pub fn message(&self) -> &str {
        self.descriptor.message()
    }

    pub fn code(&self) -> &str {
        self.descriptor.code()
    }

    pub const fn response(&self) -> Option<&ResponseSnapshot> {
        self.response.as_ref()
    }

    pub fn previous(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match &self.link {
            Link::Unlinked => None,
            Link::Linked(previous) => Some(previous.as_ref()),
        }
    }

    /// Shared handle to the previous error, for linking it elsewhere
    pub fn previous_handle(&self) -> Option<&Previous> {
        match &self.link {
            Link::Unlinked => None,
            Link::Linked(previous) => Some(previous),
        }
    }

    /// Previous error, when it is itself an error value
    pub fn previous_value(&self) -> Option<&Self> {
        self.previous()?.downcast_ref::<Self>()
    }

    pub const fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

/// Current instant, pushed forward so it is at least one millisecond after `before`
fn later_than(before: Timestamp) -> Timestamp {
    let now = Timestamp::now();
    let floor = before.checked_add(SignedDuration::from_millis(1)).unwrap_or(now);
    now.max(floor)
}

impl std::fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

impl std::error::Error for ErrorValue {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        let previous: &(dyn std::error::Error + 'static) = self.previous()?;
        Some(previous)
    }
}

impl DescribedError for ErrorValue {
    fn code(&self) -> &str {
        self.descriptor.code()
    }

    fn message(&self) -> &str {
        self.descriptor.message()
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    fn value(message: &str, code: &str) -> ErrorValue {
        ErrorValue::new(ErrorDescriptor::new(message, code).unwrap(), None, None)
    }

    #[test]
    fn message_mirrors_descriptor() {
        let err = value("db timeout", "db_timeout_01");
        assert_eq!(err.message(), err.descriptor().message());
        assert_eq!(err.code(), "db_timeout_01");
        assert!(err.response().is_none());
        assert!(err.previous().is_none());
    }

    #[test]
    fn add_previous_links_and_advances_timestamp() {
        let mut err = value("outer", "outer_01");
        let before = err.timestamp();

        err.add_previous(Arc::new(value("inner", "inner_01"))).unwrap();

        assert!(err.timestamp() > before);
        assert_eq!(err.previous_value().unwrap().code(), "inner_01");
        assert!(err.source().is_some());
    }

    #[test]
    fn second_link_is_rejected_without_changes() {
        let mut err = value("outer", "outer_01");
        err.add_previous(Arc::new(value("first", "first_01"))).unwrap();
        let timestamp = err.timestamp();

        let result = err.add_previous(Arc::new(value("second", "second_01")));

        assert_eq!(result, Err(Error::PreviousExists));
        assert_eq!(err.timestamp(), timestamp);
        assert_eq!(err.previous_value().unwrap().code(), "first_01");
    }

    #[test]
    fn previous_given_at_construction_cannot_be_replaced() {
        let previous: Previous = Arc::new(std::io::Error::other("disk full"));
        let mut err = ErrorValue::new(ErrorDescriptor::new("outer", "outer_01").unwrap(), None, Some(previous));

        assert_eq!(err.add_previous(Arc::new(value("late", "late_01"))), Err(Error::PreviousExists));
        assert!(err.previous_value().is_none());
        assert_eq!(err.previous().unwrap().to_string(), "disk full");
    }

    #[test]
    fn shared_previous_is_not_copied() {
        let inner: Previous = Arc::new(value("inner", "inner_01"));
        let a = ErrorValue::new(ErrorDescriptor::new("a", "a").unwrap(), None, Some(Arc::clone(&inner)));
        let b = ErrorValue::new(ErrorDescriptor::new("b", "b").unwrap(), None, Some(Arc::clone(&inner)));

        assert!(Arc::ptr_eq(a.previous_handle().unwrap(), b.previous_handle().unwrap()));
        assert_eq!(Arc::strong_count(&inner), 3);
    }

    #[test]
    fn is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ErrorValue>();
    }
}
