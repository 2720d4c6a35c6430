use lampshop_auth::Subject;

/// Authenticated administrator for a request.
///
/// Inserted by the auth middleware; present on every protected route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminContext {
    subject: Subject,
}

impl AdminContext {
    pub fn new(subject: Subject) -> Self {
        Self { subject }
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }
}
