//! Deduplication state for one classification run.
//!
//! A label may list the same ingredient more than once, or list it under two
//! names that resolve to the same entry ("aqua, water"). Classification keeps
//! the first occurrence and drops later ones.
//!
//! ## What counts as "the same ingredient"
//!
//! Two checks run in order:
//!
//! - Token: the exact token string was already seen.
//! - Identity: the resolved canonical name (or, for unresolved tokens, the
//!   normalized token) was already claimed by an earlier token.
//!
//! A token dropped by the first check is not resolved at all, so repeated
//! tokens cost one hash lookup.

use std::collections::HashSet;

/// Seen-sets for one call to the classifier.
#[derive(Debug, Default)]
pub(crate) struct DedupState<'t> {
    seen_tokens: HashSet<&'t str>,
    seen_identities: HashSet<String>,
}

impl<'t> DedupState<'t> {
    /// Record `token`; `false` if it was already seen.
    pub(crate) fn first_sighting(&mut self, token: &'t str) -> bool {
        self.seen_tokens.insert(token)
    }

    /// Claim `identity` for the current token; `false` if an earlier token
    /// already owns it.
    pub(crate) fn claim_identity(&mut self, identity: &str) -> bool {
        if self.seen_identities.contains(identity) {
            return false;
        }
        self.seen_identities.insert(identity.to_string())
    }
}
