#[cfg(test)]
use mockall::automock;

/// Decorative asset names handed out to generated pixel sprites
#[cfg_attr(test, automock)]
pub trait NamePool: Send + Sync {
    /// Name for the `index`-th sprite, cycling through the pool.
    /// `None` when the pool is empty.
    fn name_for(&self, index: usize) -> Option<String>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
