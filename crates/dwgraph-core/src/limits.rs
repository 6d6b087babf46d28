//! Input validation limits for graph names and edge weights

/// Maximum length for graph names (64 chars)
pub const MAX_GRAPH_NAME_LEN: usize = 64;

/// Validation error type
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    GraphNameTooLong { len: usize, max: usize },
    InvalidGraphNameChar(char),
    EmptyGraphName,
    NegativeWeight(f64),
    NonFiniteWeight(f64),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GraphNameTooLong { len, max } => {
                write!(f, "Graph name too long: {} chars (max {})", len, max)
            }
            Self::InvalidGraphNameChar(c) => {
                write!(f, "Graph name contains invalid character: {:?}", c)
            }
            Self::EmptyGraphName => write!(f, "Graph name cannot be empty"),
            Self::NegativeWeight(w) => write!(f, "Edge weight must be >= 0, got {}", w),
            Self::NonFiniteWeight(w) => write!(f, "Edge weight must be finite, got {}", w),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a graph name: non-empty, bounded, `[A-Za-z0-9_-]` only
pub fn validate_graph_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyGraphName);
    }
    let len = name.chars().count();
    if len > MAX_GRAPH_NAME_LEN {
        return Err(ValidationError::GraphNameTooLong {
            len,
            max: MAX_GRAPH_NAME_LEN,
        });
    }
    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
    {
        return Err(ValidationError::InvalidGraphNameChar(c));
    }
    Ok(())
}

/// Validate an edge weight: finite and non-negative
pub fn validate_weight(weight: f64) -> Result<(), ValidationError> {
    if !weight.is_finite() {
        return Err(ValidationError::NonFiniteWeight(weight));
    }
    if weight < 0.0 {
        return Err(ValidationError::NegativeWeight(weight));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_graph_names() {
        assert!(validate_graph_name("default").is_ok());
        assert!(validate_graph_name("road-network_2").is_ok());
    }

    #[test]
    fn test_invalid_graph_names() {
        assert_eq!(
            validate_graph_name(""),
            Err(ValidationError::EmptyGraphName)
        );
        assert_eq!(
            validate_graph_name("../etc"),
            Err(ValidationError::InvalidGraphNameChar('.'))
        );
        let long = "a".repeat(MAX_GRAPH_NAME_LEN + 1);
        assert!(matches!(
            validate_graph_name(&long),
            Err(ValidationError::GraphNameTooLong { .. })
        ));
    }

    #[test]
    fn test_weight_validation() {
        assert!(validate_weight(0.0).is_ok());
        assert!(validate_weight(2.5).is_ok());
        assert_eq!(
            validate_weight(-1.0),
            Err(ValidationError::NegativeWeight(-1.0))
        );
        assert!(matches!(
            validate_weight(f64::NAN),
            Err(ValidationError::NonFiniteWeight(_))
        ));
        assert!(validate_weight(f64::INFINITY).is_err());
    }
}
