//! Validation errors for user-supplied form inputs.

/// A required input was empty or out of range. Forms check these before any
/// capability is invoked, so they never reach the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("content locator is empty")]
    EmptyLocator,
    #[error("endpoint is empty")]
    EmptyEndpoint,
    #[error("no file selected or file is empty")]
    EmptyFile,
    #[error("retention must be at least one minute")]
    ZeroRetention,
}

/// Trims `input` and rejects the all-whitespace case.
pub(crate) fn non_empty(input: &str, err: InputError) -> Result<String, InputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        Err(err)
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_trims() {
        assert_eq!(
            non_empty("  uhrp://abc  ", InputError::EmptyLocator).unwrap(),
            "uhrp://abc"
        );
    }

    #[test]
    fn non_empty_rejects_whitespace() {
        assert_eq!(
            non_empty(" \t\n", InputError::EmptyEndpoint),
            Err(InputError::EmptyEndpoint)
        );
        assert_eq!(non_empty("", InputError::EmptyLocator), Err(InputError::EmptyLocator));
    }
}
