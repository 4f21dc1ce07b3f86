//! View Data
//!
//! The JSON document every page handler renders: an optional alert plus the
//! page payload (`yield`). Form pages use [`FormView`] as their payload.

use serde::Serialize;

use crate::error::app_error::AppError;

/// Bootstrap-style alert levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    #[serde(rename = "danger")]
    Error,
    Warning,
    Info,
    Success,
}

/// Message shown above a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
}

impl Alert {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: AlertLevel::Error,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: AlertLevel::Success,
            message: message.into(),
        }
    }
}

impl From<&AppError> for Alert {
    /// `AppError` messages are already user-safe (private errors carry the generic text)
    fn from(err: &AppError) -> Self {
        Alert::error(err.message())
    }
}

/// Top-level structure views expect
#[derive(Debug, Clone, Serialize)]
pub struct ViewData<T> {
    pub alert: Option<Alert>,
    #[serde(rename = "yield")]
    pub payload: Option<T>,
}

impl<T> ViewData<T> {
    pub fn new(payload: T) -> Self {
        Self {
            alert: None,
            payload: Some(payload),
        }
    }

    pub fn with_alert(alert: Alert) -> Self {
        Self {
            alert: Some(alert),
            payload: None,
        }
    }

    /// Attach an alert, replacing any previous one
    pub fn alert(mut self, alert: Alert) -> Self {
        self.alert = Some(alert);
        self
    }

    /// Attach the public rendering of an error
    pub fn set_alert(&mut self, err: &AppError) {
        self.alert = Some(Alert::from(err));
    }
}

/// A form page: where it posts and which fields it has
#[derive(Debug, Clone, Serialize)]
pub struct FormView {
    pub action: String,
    pub method: &'static str,
    pub fields: Vec<FormField>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormField {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub label: &'static str,
    /// Previously submitted value; passwords are never echoed
    pub value: String,
}

impl FormView {
    /// Form posting to `action`
    pub fn post(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            method: "POST",
            fields: Vec::new(),
        }
    }

    pub fn field(
        mut self,
        name: &'static str,
        kind: &'static str,
        label: &'static str,
        value: impl Into<String>,
    ) -> Self {
        self.fields.push(FormField {
            name,
            kind,
            label,
            value: value.into(),
        });
        self
    }
}

impl<T> Default for ViewData<T> {
    fn default() -> Self {
        Self {
            alert: None,
            payload: None,
        }
    }
}
