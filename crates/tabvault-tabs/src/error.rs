//! Browser error types

use thiserror::Error;

use crate::browser::{GroupId, TabId, WindowId};

#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("Window not found: {0}")]
    WindowNotFound(WindowId),

    #[error("Tab not found: {0}")]
    TabNotFound(TabId),

    #[error("Tab group not found: {0}")]
    GroupNotFound(GroupId),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Browser API call failed: {0}")]
    Api(String),
}
