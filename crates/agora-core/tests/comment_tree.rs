//! Comment tree behavior: threading, cross-proposal guards, ownership,
//! and the transitive delete cascade.

use agora_core::ErrorKind;
use agora_domain::CommentId;
use agora_test_utils::{draft_proposal, seeded_platform, sign_in};

#[tokio::test]
async fn threads_nest_and_enrich() {
    let (agora, ada, ctx, nb) = seeded_platform().await;
    let proposal = draft_proposal(&agora, &ctx, &nb, "Proposal A").await;

    let root = agora
        .comments()
        .create(&ctx, proposal.id, None, "first!".to_string())
        .await
        .unwrap();
    assert_eq!(root.author.id, ada.id);
    assert_eq!(root.reply_count, 0);

    let reply = agora
        .comments()
        .create(
            &ctx,
            proposal.id,
            Some(root.comment.id),
            "replying".to_string(),
        )
        .await
        .unwrap();
    assert_eq!(reply.comment.parent_id, Some(root.comment.id));

    let thread = agora.comments().get(root.comment.id).await.unwrap();
    assert_eq!(thread.replies.len(), 1);
    assert_eq!(thread.replies[0].comment.id, reply.comment.id);

    // The proposal detail counts the direct reply on its top-level row.
    let detail = agora.proposals().get(proposal.id).await.unwrap();
    assert_eq!(detail.comments.len(), 1);
    assert_eq!(detail.comments[0].comment.id, root.comment.id);
    assert_eq!(detail.comments[0].reply_count, 1);
}

#[tokio::test]
async fn replies_list_oldest_first_in_threads() {
    let (agora, _ada, ctx, nb) = seeded_platform().await;
    let proposal = draft_proposal(&agora, &ctx, &nb, "Proposal A").await;

    let root = agora
        .comments()
        .create(&ctx, proposal.id, None, "root".to_string())
        .await
        .unwrap();
    let mut expected = Vec::new();
    for i in 0..4 {
        let reply = agora
            .comments()
            .create(&ctx, proposal.id, Some(root.comment.id), format!("r{i}"))
            .await
            .unwrap();
        expected.push(reply.comment.id);
    }

    let thread = agora.comments().get(root.comment.id).await.unwrap();
    let got: Vec<CommentId> = thread.replies.iter().map(|r| r.comment.id).collect();
    assert_eq!(got, expected);
}

#[tokio::test]
async fn cross_proposal_parent_is_rejected_and_persists_nothing() {
    let (agora, _ada, ctx, nb) = seeded_platform().await;
    let p1 = draft_proposal(&agora, &ctx, &nb, "Proposal A").await;
    let p2 = draft_proposal(&agora, &ctx, &nb, "Proposal B").await;

    let on_p1 = agora
        .comments()
        .create(&ctx, p1.id, None, "on p1".to_string())
        .await
        .unwrap();

    let err = agora
        .comments()
        .create(&ctx, p2.id, Some(on_p1.comment.id), "crossed".to_string())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadRequest);

    let page = agora
        .comments()
        .list_by_proposal(p2.id, None, None, None)
        .await
        .unwrap();
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn missing_references_are_not_found() {
    let (agora, _ada, ctx, nb) = seeded_platform().await;
    let proposal = draft_proposal(&agora, &ctx, &nb, "Proposal A").await;

    let err = agora
        .comments()
        .create(
            &ctx,
            agora_domain::ProposalId::new(),
            None,
            "void".to_string(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = agora
        .comments()
        .create(
            &ctx,
            proposal.id,
            Some(CommentId::new()),
            "orphan reply".to_string(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = agora.comments().get(CommentId::new()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn only_authors_touch_their_comments() {
    let (agora, _ada, ctx, nb) = seeded_platform().await;
    let (_grace, other_ctx) = sign_in(&agora, "grace").await;
    let proposal = draft_proposal(&agora, &ctx, &nb, "Proposal A").await;

    let comment = agora
        .comments()
        .create(&ctx, proposal.id, None, "mine".to_string())
        .await
        .unwrap();

    let err = agora
        .comments()
        .update(&other_ctx, comment.comment.id, "hijacked".to_string())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);

    let err = agora
        .comments()
        .delete(&other_ctx, comment.comment.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);

    let updated = agora
        .comments()
        .update(&ctx, comment.comment.id, "mine, edited".to_string())
        .await
        .unwrap();
    assert_eq!(updated.comment.content, "mine, edited");
}

#[tokio::test]
async fn delete_cascades_through_every_generation() {
    let (agora, _ada, ctx, nb) = seeded_platform().await;
    let proposal = draft_proposal(&agora, &ctx, &nb, "Proposal A").await;

    // root -> 2 children, each child -> 2 grandchildren
    let root = agora
        .comments()
        .create(&ctx, proposal.id, None, "root".to_string())
        .await
        .unwrap();
    let mut descendants = Vec::new();
    for c in 0..2 {
        let child = agora
            .comments()
            .create(&ctx, proposal.id, Some(root.comment.id), format!("c{c}"))
            .await
            .unwrap();
        for g in 0..2 {
            let grandchild = agora
                .comments()
                .create(
                    &ctx,
                    proposal.id,
                    Some(child.comment.id),
                    format!("c{c}g{g}"),
                )
                .await
                .unwrap();
            descendants.push(grandchild.comment.id);
        }
        descendants.push(child.comment.id);
    }
    let bystander = agora
        .comments()
        .create(&ctx, proposal.id, None, "unrelated".to_string())
        .await
        .unwrap();

    let deleted = agora.comments().delete(&ctx, root.comment.id).await.unwrap();
    assert_eq!(deleted.id, root.comment.id);

    for id in descendants {
        let err = agora.comments().get(id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
    assert!(agora.comments().get(bystander.comment.id).await.is_ok());
}

#[tokio::test]
async fn draft_delete_takes_the_whole_discussion_with_it() {
    let (agora, _ada, ctx, nb) = seeded_platform().await;
    let proposal = draft_proposal(&agora, &ctx, &nb, "Proposal A").await;

    let root = agora
        .comments()
        .create(&ctx, proposal.id, None, "root".to_string())
        .await
        .unwrap();
    let reply = agora
        .comments()
        .create(&ctx, proposal.id, Some(root.comment.id), "reply".to_string())
        .await
        .unwrap();
    let deep = agora
        .comments()
        .create(
            &ctx,
            proposal.id,
            Some(reply.comment.id),
            "deep".to_string(),
        )
        .await
        .unwrap();

    agora.proposals().delete(&ctx, proposal.id).await.unwrap();

    for id in [root.comment.id, reply.comment.id, deep.comment.id] {
        let err = agora.comments().get(id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
    let err = agora.proposals().get(proposal.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn content_bounds_are_enforced() {
    let (agora, _ada, ctx, nb) = seeded_platform().await;
    let proposal = draft_proposal(&agora, &ctx, &nb, "Proposal A").await;

    let err = agora
        .comments()
        .create(&ctx, proposal.id, None, String::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadRequest);

    let err = agora
        .comments()
        .create(&ctx, proposal.id, None, "x".repeat(10_001))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadRequest);
}
