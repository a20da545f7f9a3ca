/// Failure classes for one analysis request.
///
/// Every failure is terminal for its click cycle: the orchestrator converts
/// it to a panel message and waits for the next interaction. The response
/// body of a failed status is deliberately not inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeError {
    /// Request could not be sent or no response arrived.
    Network { reason: String },
    /// Backend answered with a non-success status.
    Backend { status: u16 },
    /// Backend answered 2xx but the body did not match the contract.
    Parse { reason: String },
}

impl AnalyzeError {
    /// Fixed user-facing message shown in the results panel.
    pub fn user_message(&self) -> &'static str {
        match self {
            AnalyzeError::Backend { .. } => "Server error or no response.",
            AnalyzeError::Network { .. } | AnalyzeError::Parse { .. } => {
                "Error fetching accessibility data."
            }
        }
    }
}

impl std::fmt::Display for AnalyzeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalyzeError::Network { reason } => write!(f, "network failure: {reason}"),
            AnalyzeError::Backend { status } => write!(f, "backend returned status {status}"),
            AnalyzeError::Parse { reason } => write!(f, "unparseable response: {reason}"),
        }
    }
}

impl std::error::Error for AnalyzeError {}
