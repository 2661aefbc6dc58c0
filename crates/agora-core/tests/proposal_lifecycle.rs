//! Lifecycle walkthroughs: authorship, activation, expiry, deletion, and
//! the concurrent-transition race.

use agora_core::{AuthContext, ErrorKind};
use agora_domain::{ProposalPatch, ProposalStatus};
use agora_test_utils::{draft_proposal, seeded_platform, sign_in};

#[tokio::test]
async fn full_lifecycle_walkthrough() {
    let (agora, _ada, ctx, nb) = seeded_platform().await;
    let (_grace, other_ctx) = sign_in(&agora, "grace").await;

    let proposal = agora
        .proposals()
        .create(&ctx, "Proposal A".to_string(), nb.id, 60.0, 5)
        .await
        .unwrap();
    assert_eq!(proposal.status, ProposalStatus::Draft);

    // A stranger cannot activate it.
    let err = agora
        .proposals()
        .activate(&other_ctx, proposal.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);

    // The author can.
    let active = agora.proposals().activate(&ctx, proposal.id).await.unwrap();
    assert_eq!(active.status, ProposalStatus::Active);

    // Once active, fields are frozen.
    let err = agora
        .proposals()
        .update(&ctx, proposal.id, ProposalPatch::new().with_title("renamed"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadRequest);

    // ...but the explicit expiry escape still works.
    let expired = agora
        .proposals()
        .update(
            &ctx,
            proposal.id,
            ProposalPatch::new().with_status(ProposalStatus::Expired),
        )
        .await
        .unwrap();
    assert_eq!(expired.status, ProposalStatus::Expired);

    // Terminal means terminal.
    let err = agora
        .proposals()
        .update(
            &ctx,
            proposal.id,
            ProposalPatch::new().with_status(ProposalStatus::Expired),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadRequest);
}

#[tokio::test]
async fn update_never_reaches_tally_outcomes() {
    let (agora, _user, ctx, nb) = seeded_platform().await;

    // From both non-terminal states, every status target except EXPIRED is
    // rejected; activation only happens through `activate`.
    for activate_first in [false, true] {
        let proposal = draft_proposal(&agora, &ctx, &nb, "Proposal A").await;
        let mut expected = ProposalStatus::Draft;
        if activate_first {
            agora.proposals().activate(&ctx, proposal.id).await.unwrap();
            expected = ProposalStatus::Active;
        }

        for target in [
            ProposalStatus::Draft,
            ProposalStatus::Active,
            ProposalStatus::Passed,
            ProposalStatus::Rejected,
        ] {
            let err = agora
                .proposals()
                .update(&ctx, proposal.id, ProposalPatch::new().with_status(target))
                .await
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::BadRequest, "{expected} -> {target}");
        }

        // None of the rejected attempts moved the proposal.
        let detail = agora.proposals().get(proposal.id).await.unwrap();
        assert_eq!(detail.proposal.status, expected);
    }
}

#[tokio::test]
async fn draft_fields_are_editable() {
    let (agora, _user, ctx, nb) = seeded_platform().await;
    let proposal = draft_proposal(&agora, &ctx, &nb, "Proposal A").await;

    let updated = agora
        .proposals()
        .update(
            &ctx,
            proposal.id,
            ProposalPatch::new()
                .with_title("Proposal A, refined")
                .with_threshold_pct(75.0)
                .with_quorum(9),
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "Proposal A, refined");
    assert_eq!(updated.threshold_pct, 75.0);
    assert_eq!(updated.quorum, 9);
    assert_eq!(updated.status, ProposalStatus::Draft);
}

#[tokio::test]
async fn empty_and_bundled_patches_are_rejected() {
    let (agora, _user, ctx, nb) = seeded_platform().await;
    let proposal = draft_proposal(&agora, &ctx, &nb, "Proposal A").await;

    let err = agora
        .proposals()
        .update(&ctx, proposal.id, ProposalPatch::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadRequest);

    agora.proposals().activate(&ctx, proposal.id).await.unwrap();

    // Expiry bundled with a field edit on a non-draft proposal.
    let err = agora
        .proposals()
        .update(
            &ctx,
            proposal.id,
            ProposalPatch::new()
                .with_status(ProposalStatus::Expired)
                .with_title("smuggled edit"),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadRequest);
}

#[tokio::test]
async fn validation_bounds_apply_on_create_and_update() {
    let (agora, _user, ctx, nb) = seeded_platform().await;

    let err = agora
        .proposals()
        .create(&ctx, "ab".to_string(), nb.id, 60.0, 5)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadRequest);

    let err = agora
        .proposals()
        .create(&ctx, "Proposal A".to_string(), nb.id, 101.0, 5)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadRequest);

    let err = agora
        .proposals()
        .create(&ctx, "Proposal A".to_string(), nb.id, 60.0, 0)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadRequest);

    let proposal = draft_proposal(&agora, &ctx, &nb, "Proposal A").await;
    let err = agora
        .proposals()
        .update(&ctx, proposal.id, ProposalPatch::new().with_quorum(0))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadRequest);
}

#[tokio::test]
async fn anonymous_callers_cannot_mutate() {
    let (agora, _user, ctx, nb) = seeded_platform().await;
    let proposal = draft_proposal(&agora, &ctx, &nb, "Proposal A").await;
    let anon = AuthContext::anonymous();

    let err = agora
        .proposals()
        .create(&anon, "Proposal B".to_string(), nb.id, 60.0, 5)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);

    let err = agora
        .proposals()
        .activate(&anon, proposal.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);

    let err = agora
        .proposals()
        .delete(&anon, proposal.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
}

#[tokio::test]
async fn only_drafts_can_be_deleted() {
    let (agora, _user, ctx, nb) = seeded_platform().await;
    let proposal = draft_proposal(&agora, &ctx, &nb, "Proposal A").await;

    agora.proposals().activate(&ctx, proposal.id).await.unwrap();

    let err = agora
        .proposals()
        .delete(&ctx, proposal.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadRequest);
}

#[tokio::test]
async fn concurrent_activation_has_one_winner() {
    let (agora, _user, ctx, nb) = seeded_platform().await;
    let proposal = draft_proposal(&agora, &ctx, &nb, "Proposal A").await;

    let (first, second) = tokio::join!(
        agora.proposals().activate(&ctx, proposal.id),
        agora.proposals().activate(&ctx, proposal.id),
    );

    let outcomes = [first, second];
    let wins = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(wins, 1, "exactly one activation must win");

    let loser = outcomes
        .iter()
        .find_map(|r| r.as_ref().err())
        .expect("one activation must lose");
    assert!(
        matches!(loser.kind(), ErrorKind::Conflict | ErrorKind::BadRequest),
        "loser must observe the race, got {loser}"
    );

    let detail = agora.proposals().get(proposal.id).await.unwrap();
    assert_eq!(detail.proposal.status, ProposalStatus::Active);
}

#[tokio::test]
async fn create_requires_existing_notebook() {
    let (agora, _user, ctx, _nb) = seeded_platform().await;

    let err = agora
        .proposals()
        .create(
            &ctx,
            "Proposal A".to_string(),
            agora_domain::NotebookId::new(),
            60.0,
            5,
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
