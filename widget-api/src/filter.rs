//! Widget filters and actions

use http_client::{ParamValue, Params};

/// Key/value criteria identifying a widget, e.g. `{id: "ok_button"}`
///
/// ```rust
/// use widget_api::{Action, Filter};
///
/// let filter = Filter::new().with("id", "btn1");
/// let action = Action::new().with("action", "press");
/// let params = filter.merged_with(&action);
/// assert_eq!(params.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter(Params);

/// Key/value description of what to do with a widget
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Action(Params);

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; a repeated key keeps the last value
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn params(&self) -> &Params {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Request parameters for `action` applied to this widget
    ///
    /// Returns a fresh mapping; on a key collision the action's value wins.
    pub fn merged_with(&self, action: &Action) -> Params {
        let mut merged = self.0.clone();
        merged.extend(action.0.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }
}

impl Action {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; a repeated key keeps the last value
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn params(&self) -> &Params {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Params> for Filter {
    fn from(params: Params) -> Self {
        Self(params)
    }
}

impl From<Params> for Action {
    fn from(params: Params) -> Self {
        Self(params)
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Filter {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Action {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
