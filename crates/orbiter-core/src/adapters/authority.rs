use crate::domain::invariants::invariant_authority;
use crate::ports::outbound::AuthorityChecker;
use shared_types::OrbiterError;

/// Authority fixed at construction.
#[derive(Clone, Debug)]
pub struct StaticAuthority {
    authority: String,
}

impl StaticAuthority {
    pub fn new(authority: impl Into<String>) -> Self {
        Self {
            authority: authority.into(),
        }
    }
}

impl AuthorityChecker for StaticAuthority {
    fn require_authority(&self, signer: &str) -> Result<(), OrbiterError> {
        invariant_authority(signer, &self.authority)
    }

    fn authority(&self) -> &str {
        &self.authority
    }
}
