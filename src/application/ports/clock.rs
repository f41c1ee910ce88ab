#[cfg(test)]
use mockall::automock;

/// Source of the wall-clock time stamped into serialized photos
#[cfg_attr(test, automock)]
pub trait Clock: Send + Sync {
    /// Current Unix time in milliseconds
    fn now_millis(&self) -> i64;
}
