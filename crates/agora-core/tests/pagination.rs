//! Cursor sweeps through the service listings: completeness, ordering,
//! and filter combinations.

use agora_core::ErrorKind;
use agora_domain::{ProposalId, ProposalStatus};
use agora_store::ProposalFilter;
use agora_test_utils::{seeded_platform, sign_in};

#[tokio::test]
async fn proposal_sweep_is_complete_and_ordered() {
    let (agora, _ada, ctx, nb) = seeded_platform().await;

    let mut newest_first = Vec::new();
    for i in 0..23 {
        let proposal = agora
            .proposals()
            .create(&ctx, format!("Proposal {i:02}"), nb.id, 60.0, 5)
            .await
            .unwrap();
        newest_first.push(proposal.id);
    }
    newest_first.reverse();

    let mut seen: Vec<ProposalId> = Vec::new();
    let mut cursor = None;
    loop {
        let page = agora
            .proposals()
            .list(ProposalFilter::any(), Some(5), cursor)
            .await
            .unwrap();
        assert!(page.items.len() <= 5, "page never exceeds the limit");
        seen.extend(page.items.iter().map(|s| s.proposal.id));
        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    assert_eq!(seen, newest_first);
}

#[tokio::test]
async fn filters_compose() {
    let (agora, ada, ctx, nb1) = seeded_platform().await;
    let (grace, other_ctx) = sign_in(&agora, "grace").await;
    let nb2 = agora_test_utils::notebook(&agora, &ctx, "nb2").await;

    let by_ada = agora
        .proposals()
        .create(&ctx, "Ada in nb1".to_string(), nb1.id, 60.0, 5)
        .await
        .unwrap();
    agora
        .proposals()
        .create(&other_ctx, "Grace in nb1".to_string(), nb1.id, 60.0, 5)
        .await
        .unwrap();
    let activated = agora
        .proposals()
        .create(&ctx, "Ada in nb2".to_string(), nb2.id, 60.0, 5)
        .await
        .unwrap();
    agora.proposals().activate(&ctx, activated.id).await.unwrap();

    let page = agora
        .proposals()
        .list(ProposalFilter::any().by_author(ada.id), None, None)
        .await
        .unwrap();
    assert_eq!(page.items.len(), 2);
    assert!(page.items.iter().all(|s| s.author.id == ada.id));

    let page = agora
        .proposals()
        .list(ProposalFilter::any().in_notebook(nb1.id), None, None)
        .await
        .unwrap();
    assert_eq!(page.items.len(), 2);
    assert!(page.items.iter().all(|s| s.notebook.id == nb1.id));

    let page = agora
        .proposals()
        .list(
            ProposalFilter::any()
                .by_author(ada.id)
                .with_status(ProposalStatus::Active),
            None,
            None,
        )
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].proposal.id, activated.id);

    let page = agora
        .proposals()
        .list(ProposalFilter::any().by_author(grace.id), None, None)
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
}

#[tokio::test]
async fn comment_pages_split_top_level_from_replies() {
    let (agora, _ada, ctx, nb) = seeded_platform().await;
    let proposal = agora_test_utils::draft_proposal(&agora, &ctx, &nb, "Proposal A").await;

    let root = agora
        .comments()
        .create(&ctx, proposal.id, None, "root".to_string())
        .await
        .unwrap();
    for i in 0..7 {
        agora
            .comments()
            .create(&ctx, proposal.id, None, format!("top {i}"))
            .await
            .unwrap();
        agora
            .comments()
            .create(&ctx, proposal.id, Some(root.comment.id), format!("reply {i}"))
            .await
            .unwrap();
    }

    // Top-level sweep: the root plus 7 others, replies invisible.
    let mut total = 0;
    let mut cursor = None;
    loop {
        let page = agora
            .comments()
            .list_by_proposal(proposal.id, None, Some(3), cursor)
            .await
            .unwrap();
        assert!(page.items.iter().all(|c| c.comment.parent_id.is_none()));
        total += page.items.len();
        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }
    assert_eq!(total, 8);

    // Reply listing sees exactly the replies.
    let replies = agora
        .comments()
        .list_by_proposal(proposal.id, Some(root.comment.id), None, None)
        .await
        .unwrap();
    assert_eq!(replies.items.len(), 7);
    assert!(replies
        .items
        .iter()
        .all(|c| c.comment.parent_id == Some(root.comment.id)));
}

#[tokio::test]
async fn limits_are_defaulted_and_capped() {
    let (agora, _ada, ctx, nb) = seeded_platform().await;
    for i in 0..3 {
        agora
            .proposals()
            .create(&ctx, format!("Proposal {i}"), nb.id, 60.0, 5)
            .await
            .unwrap();
    }

    // An absurd limit is capped, not honored.
    let page = agora
        .proposals()
        .list(ProposalFilter::any(), Some(1_000_000), None)
        .await
        .unwrap();
    assert_eq!(page.items.len(), 3);
    assert!(page.next_cursor.is_none());

    // Deleting nothing in between: a sweep with limit 1 terminates.
    let mut cursor = None;
    let mut rounds = 0;
    loop {
        let page = agora
            .proposals()
            .list(ProposalFilter::any(), Some(1), cursor)
            .await
            .unwrap();
        rounds += 1;
        assert!(rounds <= 4, "sweep must terminate");
        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }
    assert_eq!(rounds, 3);
}

#[tokio::test]
async fn stale_cursor_past_the_end_is_empty() {
    let (agora, _ada, ctx, nb) = seeded_platform().await;
    let first = agora
        .proposals()
        .create(&ctx, "Oldest".to_string(), nb.id, 60.0, 5)
        .await
        .unwrap();

    // Cursor at the oldest row: nothing lies below it.
    let page = agora
        .proposals()
        .list(ProposalFilter::any(), None, Some(first.id))
        .await
        .unwrap();
    assert!(page.items.is_empty());
    assert!(page.next_cursor.is_none());

    let err = agora
        .proposals()
        .get(agora_domain::ProposalId::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
