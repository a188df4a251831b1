/// Maximum accepted query length, in characters.
pub const MAX_QUERY_CHARS: usize = 50;

/// Errors that can occur during query validation.
///
/// The messages are shown verbatim to the calling agent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryValidationError {
    #[error("Query kosong. Masukkan nama skill.")]
    Empty,

    #[error("Query terlalu panjang. Maksimal {max} karakter.")]
    TooLong { max: usize, actual: usize },

    #[error("Karakter tidak valid. Gunakan huruf, angka, spasi, atau tanda minus saja.")]
    InvalidCharacter { found: char },
}

/// Validates a free-text search query before it is sent upstream.
///
/// This function performs the following checks, in order:
/// 1. The query is not empty once surrounding whitespace is trimmed
/// 2. The untrimmed query is at most [`MAX_QUERY_CHARS`] characters long
/// 3. Every character is an ASCII letter, an ASCII digit, whitespace, or `-`
///
/// # Returns
///
/// * `Ok(&str)` - The query, unchanged
/// * `Err(QueryValidationError)` - The first violated constraint
///
/// # Examples
///
/// ```rust
/// use store_tools_mcp_server::core::security::validate_query;
///
/// assert!(validate_query("Fire Ball 3").is_ok());
/// assert!(validate_query("Fire@Ball").is_err());
/// ```
pub fn validate_query(query: &str) -> Result<&str, QueryValidationError> {
    if query.trim().is_empty() {
        return Err(QueryValidationError::Empty);
    }

    let length = query.chars().count();
    if length > MAX_QUERY_CHARS {
        return Err(QueryValidationError::TooLong {
            max: MAX_QUERY_CHARS,
            actual: length,
        });
    }

    if let Some(found) = query.chars().find(|c| !is_allowed(*c)) {
        return Err(QueryValidationError::InvalidCharacter { found });
    }

    Ok(query)
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || c.is_whitespace() || c == '-'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_rejected() {
        assert_eq!(validate_query(""), Err(QueryValidationError::Empty));
        assert_eq!(validate_query("   \t"), Err(QueryValidationError::Empty));
    }

    #[test]
    fn test_length_limit() {
        let at_limit = "a".repeat(MAX_QUERY_CHARS);
        assert!(validate_query(&at_limit).is_ok());

        let over = "a".repeat(MAX_QUERY_CHARS + 1);
        assert_eq!(
            validate_query(&over),
            Err(QueryValidationError::TooLong {
                max: 50,
                actual: 51
            })
        );
    }

    #[test]
    fn test_allowed_characters() {
        assert_eq!(validate_query("Fire Ball 3"), Ok("Fire Ball 3"));
        assert!(validate_query("Meteor-Breaker").is_ok());
    }

    #[test]
    fn test_invalid_characters() {
        assert_eq!(
            validate_query("Fire@Ball"),
            Err(QueryValidationError::InvalidCharacter { found: '@' })
        );
        assert!(validate_query("skill/../x").is_err());
        assert!(validate_query("Bola Api é").is_err());
    }

    #[test]
    fn test_messages_name_the_constraint() {
        let err = validate_query(&"x".repeat(60)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Query terlalu panjang. Maksimal 50 karakter."
        );
    }
}
