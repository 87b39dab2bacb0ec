//! Route pipeline error types.

/// A directions response that does not have the shape the pipeline needs.
///
/// These are structural failures of caller-supplied data. They are never
/// retryable: the same input always fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInputError {
    /// The response is missing or is not a JSON object
    #[error("route response is missing")]
    MissingEnvelope,

    /// The response has no `data` object
    #[error("route response has no data")]
    MissingData,

    /// `data.routes` is absent or not an array
    #[error("route response has no routes")]
    MissingRoutes,

    /// A candidate has no usable `legs[0].duration.value`
    #[error("route {index} has no usable first-leg duration")]
    MissingDuration { index: usize },
}
