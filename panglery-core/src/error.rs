//! Error types for panglery.
//!
//! Every fallible operation returns [`PanglerError`]. The dispatcher never
//! logs or swallows an error; it hands it straight back to the caller.

use crate::id::PanglerId;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by registration, dispatch, binding and extraction.
#[derive(Error, Debug)]
pub enum PanglerError {
    /// A hook was registered without needs, modifies or conditions.
    #[error("tried to hook nothing")]
    EmptyHook,

    /// `trigger` was called without any fields.
    #[error("tried to trigger nothing")]
    EmptyTrigger,

    /// A bound pangler executed a hook after its instance was dropped.
    #[error("bound instance no longer exists")]
    InstanceGone,

    /// No bound pangler is cached for the instance and id.
    #[error("no bound pangler cached for id {0}")]
    NotBound(PanglerId),

    /// The bases of a class admit no consistent resolution order.
    #[error("cannot create a consistent resolution order for class {class}")]
    InconsistentHierarchy {
        /// Name of the class being built.
        class: String,
    },

    /// A field requested from an event is absent.
    #[error("missing event field: {0}")]
    MissingField(String),

    /// A field is present but has the wrong shape for the requested type.
    #[error("cannot extract event field {key}")]
    Extract {
        /// Name of the field.
        key: String,
        /// The underlying conversion error.
        #[source]
        source: serde_json::Error,
    },

    /// A handler body failed.
    #[error(transparent)]
    Handler(BoxError),
}

impl From<BoxError> for PanglerError {
    fn from(err: BoxError) -> Self {
        PanglerError::Handler(err)
    }
}
