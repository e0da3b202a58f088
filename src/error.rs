/// Errors returned by the optimization engine.
///
/// Every variant except [`ObjectiveDimensionMismatch`](Error::ObjectiveDimensionMismatch),
/// [`ConstraintDimensionMismatch`](Error::ConstraintDimensionMismatch) and
/// [`Terminated`](Error::Terminated) is a configuration error raised
/// while building or initializing a [`Driver`](crate::Driver), never in the
/// middle of a run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when a lower bound is greater than its upper bound, or
    /// either bound is not finite.
    #[error(
        "invalid bounds at index {index}: low ({low}) must be finite and less than or equal to high ({high})"
    )]
    InvalidBounds {
        /// The offending dimension.
        index: usize,
        /// The lower bound value.
        low: f64,
        /// The upper bound value.
        high: f64,
    },

    /// Returned when the lower and upper bound arrays differ in length.
    #[error("bounds length mismatch: {lower} lower bounds but {upper} upper bounds")]
    BoundsLengthMismatch {
        /// Number of lower bounds.
        lower: usize,
        /// Number of upper bounds.
        upper: usize,
    },

    /// Returned when a problem declares zero decision variables.
    #[error("problem must have at least one decision variable")]
    ZeroVariables,

    /// Returned when a problem declares zero objectives.
    #[error("problem must have at least one objective")]
    ZeroObjectives,

    /// Returned when the declared number of variables disagrees with the bounds.
    #[error("dimension mismatch: problem declares {expected} variables but bounds have {got}")]
    DimensionMismatch {
        /// The declared number of variables.
        expected: usize,
        /// The number of bound pairs.
        got: usize,
    },

    /// Returned when an evaluation yields the wrong number of objective values.
    #[error("objective dimension mismatch: expected {expected} values, got {got}")]
    ObjectiveDimensionMismatch {
        /// The declared number of objectives.
        expected: usize,
        /// The number of values returned by the evaluation.
        got: usize,
    },

    /// Returned when an evaluation yields the wrong number of constraint values.
    #[error("constraint dimension mismatch: expected {expected} values, got {got}")]
    ConstraintDimensionMismatch {
        /// The declared number of constraints.
        expected: usize,
        /// The number of values returned by the evaluation.
        got: usize,
    },

    /// Returned when the population is too small for the chosen variation operator.
    #[error("population too small: operator requires at least {required} members, got {got}")]
    PopulationTooSmall {
        /// Minimum population size the operator needs.
        required: usize,
        /// The configured population size.
        got: usize,
    },

    /// Returned when an operator scalar is outside its valid range.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// The name of the parameter.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Returned when the generation limit is zero.
    #[error("max_generations must be at least 1")]
    ZeroGenerations,

    /// Returned when stepping a driver that already reached its generation limit.
    #[error("driver already terminated")]
    Terminated,
}

pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Returns `true` for errors caused by invalid problem or driver configuration.
    #[must_use]
    pub fn is_config(&self) -> bool {
        !matches!(
            self,
            Error::ObjectiveDimensionMismatch { .. }
                | Error::ConstraintDimensionMismatch { .. }
                | Error::Terminated
        )
    }
}
