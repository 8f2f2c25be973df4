/// Request-scoped context forwarded to every feature-source call.
///
/// Carries the identity and tracing information a concrete adapter needs
/// to authenticate outbound queries. Passed explicitly instead of living
/// in ambient global state so concurrent requests never share anything.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub trace_id: String,
    pub credentials: Option<String>,
}

impl RequestContext {
    pub fn new(trace_id: impl Into<String>) -> Self {
        Self {
            trace_id: trace_id.into(),
            credentials: None,
        }
    }

    pub fn with_credentials(mut self, credentials: impl Into<String>) -> Self {
        self.credentials = Some(credentials.into());
        self
    }
}
