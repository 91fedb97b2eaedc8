use auditguardian_core::error::CoreError;
use auditguardian_gateway::GatewayError;

/// Errors returned by screen controllers.
///
/// Every variant is terminal for the one action that produced it; none
/// leaves a controller in a Pending state.
#[derive(Debug, thiserror::Error)]
pub enum ScreenError {
    /// The action is already Pending; its trigger is disabled.
    #[error("'{action}' is already in progress on {screen}")]
    Busy {
        screen: &'static str,
        action: &'static str,
    },

    /// Client-side validation or a missing domain record.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The backend call failed. Screens treat every gateway failure alike.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// A route, section or record the screen does not know.
    #[error("Unknown {entity}: {id}")]
    NotFound { entity: &'static str, id: String },
}

impl ScreenError {
    pub(crate) fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Core(CoreError::Validation(message.into()))
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy { .. })
    }
}

/// Convenience alias for controller return values.
pub type ScreenResult<T> = Result<T, ScreenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_busy() {
        let err = ScreenError::Busy {
            screen: "policy_navigator",
            action: "ask",
        };
        assert_eq!(err.to_string(), "'ask' is already in progress on policy_navigator");
        assert!(err.is_busy());
    }

    #[test]
    fn core_errors_are_transparent() {
        let err: ScreenError = CoreError::Validation("File name must not be empty".into()).into();
        assert_eq!(err.to_string(), "Validation failed: File name must not be empty");
        assert!(!err.is_busy());
    }

    #[test]
    fn display_not_found() {
        assert_eq!(ScreenError::not_found("route", "/nope").to_string(), "Unknown route: /nope");
    }
}
