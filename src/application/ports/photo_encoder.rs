#[cfg(test)]
use mockall::automock;

use crate::domain::entities::Document;

/// Port for turning a photo back into the text the consumer accepts
#[cfg_attr(test, automock)]
pub trait PhotoEncoder: Send + Sync {
    fn encode(&self, document: &Document) -> String;
}
