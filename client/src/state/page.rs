//! Render state shared by the page controllers.

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

/// What a page shows: a spinner, an error message, or its data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageState<T> {
    Loading,
    Error(String),
    Ready(T),
}

impl<T> PageState<T> {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            Self::Loading | Self::Ready(_) => None,
        }
    }

    #[must_use]
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            Self::Loading | Self::Error(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PageState<U> {
        match self {
            Self::Loading => PageState::Loading,
            Self::Error(message) => PageState::Error(message),
            Self::Ready(data) => PageState::Ready(f(data)),
        }
    }
}

impl<T> Default for PageState<T> {
    fn default() -> Self {
        Self::Loading
    }
}
