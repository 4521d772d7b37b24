/// Error codes with category prefix
///
/// Categories:
/// - NET: Network connectivity errors
/// - API: PostgREST backend errors
/// - IO: File system operations (settings store)
/// - CFG: Configuration parsing/validation
/// - VAL: Input validation errors
/// - INT: Unexpected internal errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Network errors (NET001-NET099)
    /// Connection failed
    Net001,
    /// Request timeout
    Net002,

    // API errors (API001-API099)
    /// Rate limit exceeded
    Api001,
    /// Authentication failed
    Api002,
    /// Resource not found
    Api003,
    /// Server error (5xx)
    Api004,
    /// Rejected query or unreadable response
    Api005,

    // I/O errors (IO001-IO099)
    /// File not found or unreadable
    Io001,
    /// Permission denied
    Io002,
    /// Stored settings are corrupted
    Io003,

    // Config errors (CFG001-CFG099)
    /// Invalid config format
    Cfg001,
    /// Missing required field
    Cfg002,

    // Validation errors (VAL001-VAL099)
    /// Invalid argument
    Val001,

    // Internal errors (INT001-INT099)
    /// Unexpected internal error
    Int001,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 14] = [
        ErrorCode::Net001,
        ErrorCode::Net002,
        ErrorCode::Api001,
        ErrorCode::Api002,
        ErrorCode::Api003,
        ErrorCode::Api004,
        ErrorCode::Api005,
        ErrorCode::Io001,
        ErrorCode::Io002,
        ErrorCode::Io003,
        ErrorCode::Cfg001,
        ErrorCode::Cfg002,
        ErrorCode::Val001,
        ErrorCode::Int001,
    ];

    /// Returns the error code string (e.g., "NET001")
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Net001 => "NET001",
            ErrorCode::Net002 => "NET002",
            ErrorCode::Api001 => "API001",
            ErrorCode::Api002 => "API002",
            ErrorCode::Api003 => "API003",
            ErrorCode::Api004 => "API004",
            ErrorCode::Api005 => "API005",
            ErrorCode::Io001 => "IO001",
            ErrorCode::Io002 => "IO002",
            ErrorCode::Io003 => "IO003",
            ErrorCode::Cfg001 => "CFG001",
            ErrorCode::Cfg002 => "CFG002",
            ErrorCode::Val001 => "VAL001",
            ErrorCode::Int001 => "INT001",
        }
    }

    /// Returns the general cause description
    pub fn cause(&self) -> &'static str {
        match self {
            ErrorCode::Net001 => "Unable to establish network connection to the backend",
            ErrorCode::Net002 => "The request timed out while waiting for a response",
            ErrorCode::Api001 => "The backend rate limit has been exceeded",
            ErrorCode::Api002 => "Authentication failed or access denied",
            ErrorCode::Api003 => "The requested table or endpoint was not found",
            ErrorCode::Api004 => "The backend encountered an internal error",
            ErrorCode::Api005 => "The backend rejected the query or returned an unexpected body",
            ErrorCode::Io001 => "The settings file could not be read or written",
            ErrorCode::Io002 => "Permission denied when accessing the settings directory",
            ErrorCode::Io003 => "The stored settings file is not valid JSON",
            ErrorCode::Cfg001 => "The configuration file has an invalid format",
            ErrorCode::Cfg002 => "A required configuration value is missing",
            ErrorCode::Val001 => "An invalid argument was provided",
            ErrorCode::Int001 => "An unexpected internal error occurred",
        }
    }

    /// Returns remediation steps
    pub fn remediation(&self) -> &'static str {
        match self {
            ErrorCode::Net001 => "1. Check your internet connection\n2. Verify STASH_API_URL is correct\n3. Try again later if the backend is down",
            ErrorCode::Net002 => "1. Check your internet connection speed\n2. Raise [http] timeout_secs in config.toml\n3. The backend may be overloaded, try later",
            ErrorCode::Api001 => "1. Wait a few minutes before retrying\n2. Reduce the request frequency",
            ErrorCode::Api002 => "1. Run 'stash token set <TOKEN>' with a fresh token\n2. Check that STASH_ANON_KEY matches the project\n3. Ensure the token has not expired",
            ErrorCode::Api003 => "1. Verify STASH_API_URL points at the project root\n2. Check that the table is exposed by the API",
            ErrorCode::Api004 => "1. Wait a few minutes and retry\n2. Check the backend status page\n3. Report the issue if it persists",
            ErrorCode::Api005 => "1. Re-run with --verbose to see the backend message\n2. Check for updates to stash",
            ErrorCode::Io001 => "1. Verify the settings directory exists\n2. Set STASH_HOME to a writable directory",
            ErrorCode::Io002 => "1. Check directory permissions\n2. Verify ownership of ~/.stash",
            ErrorCode::Io003 => "1. Run 'stash token clear'\n2. Set the token again",
            ErrorCode::Cfg001 => "1. Check the config.toml syntax\n2. Compare against the documented keys",
            ErrorCode::Cfg002 => "1. Set STASH_API_URL and STASH_ANON_KEY\n2. Or add api_url and anon_key to config.toml",
            ErrorCode::Val001 => "1. Check the argument format\n2. Use 'stash --help' for usage information",
            ErrorCode::Int001 => "1. Try the operation again\n2. Report the issue with debug logs",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_error_codes_have_valid_string() {
        for code in ErrorCode::ALL {
            let s = code.as_str();
            assert!(
                s.len() >= 5 && s.len() <= 6,
                "Error code string should be 5-6 characters: {}",
                s
            );
        }
    }

    #[test]
    fn all_error_codes_have_cause_and_remediation() {
        for code in ErrorCode::ALL {
            assert!(!code.cause().is_empty(), "Cause missing for {:?}", code);
            assert!(
                !code.remediation().is_empty(),
                "Remediation missing for {:?}",
                code
            );
        }
    }

    #[test]
    fn error_code_format_matches_pattern() {
        let codes = [
            (ErrorCode::Net001, "NET"),
            (ErrorCode::Net002, "NET"),
            (ErrorCode::Api001, "API"),
            (ErrorCode::Api005, "API"),
            (ErrorCode::Io001, "IO0"),
            (ErrorCode::Io003, "IO0"),
            (ErrorCode::Cfg001, "CFG"),
            (ErrorCode::Cfg002, "CFG"),
            (ErrorCode::Val001, "VAL"),
            (ErrorCode::Int001, "INT"),
        ];

        for (code, expected_prefix) in codes {
            assert!(
                code.as_str().starts_with(expected_prefix),
                "Error code {} should start with {}",
                code.as_str(),
                expected_prefix
            );
        }
    }

    #[test]
    fn error_code_strings_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for code in ErrorCode::ALL {
            assert!(seen.insert(code.as_str()), "duplicate {}", code.as_str());
        }
    }
}
