use thiserror::Error;

/// Errors reported by the calikins library.
///
/// Configuration variants are fatal at initialization time: the machine must
/// refuse to start with a broken axis mapping or solver setup. The singular
/// matrix variants abort only the operation that raised them and never
/// produce a silently wrong result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalikinsError {
    #[error("Coordinates string contains no axis letters: {0:?}")]
    EmptyCoordinates(String),

    #[error("Coordinates string is longer than {1} characters: {0:?}")]
    CoordinatesTooLong(String, usize),

    #[error("Invalid axis letter {0:?} in coordinates string {1:?}")]
    InvalidAxisLetter(char, String),

    #[error("Joint limit must be between 1 and {1}, got {0}")]
    InvalidJointLimit(usize, usize),

    #[error("Coordinates {0:?} require more joints than the configured limit of {1}")]
    TooManyCoordinates(String, usize),

    #[error("Duplicate axis letter {0:?} not allowed in coordinates string {1:?}")]
    DuplicateAxisLetter(char, String),

    #[error("Kinematics needs X, Y, and Z coordinates, got {0:?}")]
    MissingLinearAxis(String),

    #[error("Joint slice holds {0} values but the mapping drives {1} joints")]
    JointCountMismatch(usize, usize),

    #[error("Invalid solver parameter: {0}")]
    InvalidSolverParameter(String),

    #[error("Matrix is singular (determinant is exactly zero) and cannot be inverted")]
    SingularMatrix,

    #[error("Jacobian is singular at the current iterate, inverse solve aborted")]
    SingularJacobian,
}
