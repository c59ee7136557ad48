/// A non-fatal problem found while reducing an OpenAPI document.
///
/// Issues never stop generation; the affected operation or response degrades
/// (unnamed body, skipped status code) and the issue is reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub location: String,
    pub kind: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(location: impl Into<String>, kind: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationIssue {
            location: location.into(),
            kind: kind.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.location, self.message)
    }
}

pub fn log_issues(issues: &[ValidationIssue]) {
    if issues.is_empty() {
        return;
    }
    tracing::warn!(count = issues.len(), "OpenAPI document has issues; affected mocks degrade");
    for issue in issues {
        tracing::warn!(
            kind = %issue.kind,
            location = %issue.location,
            "{}",
            issue.message
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let issue = ValidationIssue::new("/pets → get", "MissingOperationId", "no operationId");
        assert_eq!(issue.to_string(), "[MissingOperationId] /pets → get: no operationId");
    }
}
