//! Agora Domain - entities and lifecycle rules
//!
//! The data model of the governance platform:
//! - Typed ULID identifiers per entity
//! - Users, notebooks, proposals, threaded comments
//! - The proposal lifecycle state machine
//! - Field-level validation
//!
//! This crate is deliberately free of storage and I/O concerns; the
//! repository seam lives in `agora-store` and the operations in
//! `agora-core`.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod comment;
pub mod id;
pub mod notebook;
pub mod proposal;
pub mod user;
pub mod validate;

// Re-exports for convenience
pub use comment::{Comment, NewComment};
pub use id::{CommentId, NotebookId, ParseIdError, ProposalId, UserId};
pub use notebook::{NewNotebook, Notebook};
pub use proposal::{NewProposal, Proposal, ProposalPatch, ProposalStatus};
pub use user::{NewUser, ProfilePatch, User};
pub use validate::DomainError;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_status() -> impl Strategy<Value = ProposalStatus> {
        prop_oneof![
            Just(ProposalStatus::Draft),
            Just(ProposalStatus::Active),
            Just(ProposalStatus::Passed),
            Just(ProposalStatus::Rejected),
            Just(ProposalStatus::Expired),
        ]
    }

    proptest! {
        // The graph never cycles: no transition returns to DRAFT, and no
        // legal step has a legal step back.
        #[test]
        fn transitions_never_cycle(a in any_status(), b in any_status()) {
            prop_assert!(!a.can_transition_to(ProposalStatus::Draft));
            if a.can_transition_to(b) {
                prop_assert!(!b.can_transition_to(a));
            }
        }

        // PASSED and REJECTED are only reachable out of ACTIVE.
        #[test]
        fn tally_outcomes_require_active(from in any_status()) {
            for target in [ProposalStatus::Passed, ProposalStatus::Rejected] {
                if from.can_transition_to(target) {
                    prop_assert_eq!(from, ProposalStatus::Active);
                }
            }
        }
    }
}
