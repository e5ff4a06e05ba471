/// Errors that can occur while clustering.
///
/// `InvalidArgument` is raised before any computation starts. The other two
/// variants mean the assignment solver broke its contract and are fatal.
#[derive(Debug, Clone, PartialEq)]
pub enum BalanceError {
    InvalidArgument(String),
    InvalidAssignment(String),
    BalanceInvariantViolation {
        cluster: usize,
        expected: usize,
        found: usize,
    },
}

impl std::fmt::Display for BalanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(s) => write!(f, "invalid argument: {}", s),
            Self::InvalidAssignment(s) => write!(f, "invalid assignment: {}", s),
            Self::BalanceInvariantViolation {
                cluster,
                expected,
                found,
            } => write!(
                f,
                "balance invariant violated: cluster {} holds {} points, expected {}",
                cluster, found, expected
            ),
        }
    }
}

impl std::error::Error for BalanceError {}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn display_names_the_cluster() {
        let e = BalanceError::BalanceInvariantViolation {
            cluster: 2,
            expected: 3,
            found: 4,
        };
        assert_eq!(
            e.to_string(),
            "balance invariant violated: cluster 2 holds 4 points, expected 3"
        );
    }
    #[test]
    fn display_prefixes_argument_errors() {
        let e = BalanceError::InvalidArgument("k = 0".into());
        assert_eq!(e.to_string(), "invalid argument: k = 0");
    }
}
