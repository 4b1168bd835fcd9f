//! Error handling types

use thiserror::Error;

/// Result type alias for resolution operations that can fail.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while wiring an object graph.
///
/// Every variant is a configuration-time failure: each surfaces from
/// [`Injector::build`](crate::Injector::build) synchronously and none is
/// retried internally. A failed build leaves the injector's already-resolved
/// singletons intact and reusable on a later call.
#[derive(Error, Debug)]
pub enum Error {
    /// The directly requested type has no registered descriptor.
    #[error("Type {type_name} is not injectable")]
    NotInjectable {
        /// Name of the requested type.
        type_name: &'static str,
    },

    /// A discovered dependency has no registered descriptor, reported
    /// together with the type that declared it.
    #[error("Dependency {dependency} of {requester} is not injectable")]
    DependencyNotInjectable {
        /// Name of the unregistered dependency.
        dependency: &'static str,
        /// Name of the type that declared the dependency.
        requester: &'static str,
    },

    /// The pending set stalled during construction: none of the remaining
    /// types has a fully resolved dependency list.
    #[error("Dependency cycle detected: Failed to resolve {pending}")]
    DependencyCycle {
        /// Stalled entries formatted as `Name (-> dep1,dep2,...)`, joined
        /// by `, `, in discovery order.
        pending: String,
    },

    /// Invariant violation inside the resolver.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the violated invariant.
        message: String,
    },
}

impl Error {
    /// Create an internal error.
    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_injectable_display() {
        let error = Error::NotInjectable { type_name: "String" };
        assert_eq!(format!("{error}"), "Type String is not injectable");
    }

    #[test]
    fn test_dependency_not_injectable_display() {
        let error = Error::DependencyNotInjectable {
            dependency: "u32",
            requester: "Config",
        };
        assert_eq!(format!("{error}"), "Dependency u32 of Config is not injectable");
    }

    #[test]
    fn test_dependency_cycle_display() {
        let error = Error::DependencyCycle {
            pending: "B (-> A), A (-> B)".to_string(),
        };
        assert_eq!(
            format!("{error}"),
            "Dependency cycle detected: Failed to resolve B (-> A), A (-> B)"
        );
    }

    #[test]
    fn test_internal_error() {
        let error = Error::internal("registry out of sync");
        match error {
            Error::Internal { message } => assert_eq!(message, "registry out of sync"),
            _ => panic!("Expected Internal error"),
        }
    }
}
