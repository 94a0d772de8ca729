use crate::ids::RuleId;

/// An already-loaded instruction document: a declared pattern field plus a
/// free-text body.
///
/// The pattern field is kept verbatim (e.g. `"*.py, *.ipynb"`); splitting and
/// validation happen when the registry compiles it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionDocument {
    id: Option<RuleId>,
    pattern_field: String,
    body: String,
}

impl InstructionDocument {
    #[must_use]
    pub fn new(
        id: impl Into<RuleId>,
        pattern_field: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            pattern_field: pattern_field.into(),
            body: body.into(),
        }
    }

    /// A document with no recorded origin. The registry names it by position.
    #[must_use]
    pub fn anonymous(pattern_field: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: None,
            pattern_field: pattern_field.into(),
            body: body.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> Option<&RuleId> {
        self.id.as_ref()
    }

    #[must_use]
    pub fn pattern_field(&self) -> &str {
        &self.pattern_field
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Consumes the document, resolving a missing id to its registration index.
    #[must_use]
    pub fn into_parts(self, index: usize) -> (RuleId, String, String) {
        let id = self.id.unwrap_or_else(|| RuleId::positional(index));
        (id, self.pattern_field, self.body)
    }
}

impl<P: Into<String>, B: Into<String>> From<(P, B)> for InstructionDocument {
    fn from((pattern_field, body): (P, B)) -> Self {
        Self::anonymous(pattern_field, body)
    }
}
