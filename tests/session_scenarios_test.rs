//! End-to-end session scenarios over the built-in corpus.

use verbos_reflexivos::core::{ClearTicket, CoreError, Corpus, Selection, Session, SessionConfig};
use verbos_reflexivos::types::{
    OutcomeKind, Phase, Side, TileId, MATCH_MESSAGE, MISMATCH_CLEAR_MS,
};

/// A playing session whose current round includes `key`.
fn session_dealing(key: &str) -> Session {
    for seed in 1..=500 {
        let mut session = Session::with_seed(Corpus::builtin(), seed);
        session.start_round().unwrap();
        if session.find_tile(key, Side::Source).is_some() {
            return session;
        }
    }
    panic!("no seed in range deals {key}");
}

fn ids(session: &Session, key: &str) -> (TileId, TileId) {
    let src = session.find_tile(key, Side::Source).unwrap().id;
    let tgt = session.find_tile(key, Side::Target).unwrap().id;
    (src, tgt)
}

/// Any dealt pair other than `key`.
fn other_key(session: &Session, key: &str) -> String {
    session
        .tiles()
        .iter()
        .find(|t| t.pair_key != key)
        .map(|t| t.pair_key.clone())
        .unwrap()
}

#[test]
fn session_starts_in_menu_without_tiles() {
    let session = Session::with_seed(Corpus::builtin(), 7);
    assert_eq!(session.phase(), Phase::Menu);
    assert_eq!(session.round(), 0);
    assert!(session.tiles().is_empty());
    assert_eq!(session.progress_percent(), 0);
}

#[test]
fn round_deals_eight_distinct_pairs() {
    let mut session = Session::with_seed(Corpus::builtin(), 7);
    let round = session.start_round().unwrap();
    assert_eq!(round, 1);
    assert_eq!(session.phase(), Phase::Playing);
    assert_eq!(session.tiles().len(), 16);
    assert_eq!(session.total_pairs(), 8);

    let mut keys: Vec<&str> = session.tiles().iter().map(|t| t.pair_key.as_str()).collect();
    keys.sort_unstable();
    keys.dedup();
    assert_eq!(keys.len(), 8);

    for key in keys {
        let src = session.find_tile(key, Side::Source).unwrap();
        let tgt = session.find_tile(key, Side::Target).unwrap();
        assert_eq!(src.text, key);
        assert_eq!(tgt.text, Corpus::builtin().find(key).unwrap().target);
    }

    let mut tile_ids: Vec<TileId> = session.tiles().iter().map(|t| t.id).collect();
    tile_ids.sort_unstable();
    tile_ids.dedup();
    assert_eq!(tile_ids.len(), 16);
}

#[test]
fn matching_sentarse_counts_progress() {
    let mut session = session_dealing("Sentarse");
    let (src, tgt) = ids(&session, "Sentarse");

    assert_eq!(session.select_tile(tgt), Selection::Pending);
    assert_eq!(session.pending(), &[tgt]);
    assert_eq!(
        session.select_tile(src),
        Selection::Matched {
            pair_key: "Sentarse".to_string(),
            finished: false
        }
    );

    assert!(session.is_matched("Sentarse"));
    assert!(session.pending().is_empty());
    assert_eq!(session.matched_count(), 1);
    assert_eq!(session.mistakes(), 0);
    assert_eq!(session.progress_percent(), 13);
    let outcome = session.last_outcome().unwrap();
    assert_eq!(outcome.kind, OutcomeKind::Match);
    assert_eq!(outcome.message, MATCH_MESSAGE);

    // Solved tiles can no longer be picked.
    assert_eq!(session.select_tile(src), Selection::Ignored);
    assert_eq!(session.select_tile(tgt), Selection::Ignored);
}

#[test]
fn mismatch_names_the_source_verb_and_clears_after_delay() {
    let mut session = session_dealing("Sentarse");
    let (src, _) = ids(&session, "Sentarse");
    let other = other_key(&session, "Sentarse");
    let (_, wrong) = ids(&session, &other);

    assert_eq!(session.select_tile(src), Selection::Pending);
    let sel = session.select_tile(wrong);
    let Selection::Mismatched { clear_after_ms, .. } = sel else {
        panic!("expected mismatch, got {sel:?}");
    };
    assert_eq!(clear_after_ms, MISMATCH_CLEAR_MS);
    assert_eq!(session.mistakes(), 1);
    assert_eq!(
        session.last_outcome().unwrap().message,
        "Not quite. Sentarse matches with its specific meaning."
    );

    // Both tiles stay highlighted until the delay elapses.
    assert_eq!(session.pending().len(), 2);
    assert!(!session.tick(MISMATCH_CLEAR_MS - 1));
    assert_eq!(session.pending().len(), 2);
    assert!(session.tick(1));
    assert!(session.pending().is_empty());
    assert!(!session.clear_scheduled());

    // Feedback outlives the highlight.
    assert_eq!(session.last_outcome().unwrap().kind, OutcomeKind::Mismatch);
}

#[test]
fn two_glosses_mismatch_uses_placeholder() {
    let mut session = Session::with_seed(Corpus::builtin(), 3);
    session.start_round().unwrap();
    let targets: Vec<TileId> = session
        .tiles()
        .iter()
        .filter(|t| t.side == Side::Target)
        .map(|t| t.id)
        .take(2)
        .collect();

    session.select_tile(targets[0]);
    session.select_tile(targets[1]);
    assert_eq!(
        session.last_outcome().unwrap().message,
        "Not quite. That verb matches with its specific meaning."
    );
}

#[test]
fn picking_during_mismatch_starts_a_new_pair() {
    let mut session = session_dealing("Sentarse");
    let (src, tgt) = ids(&session, "Sentarse");
    let other = other_key(&session, "Sentarse");
    let (other_src, _) = ids(&session, &other);

    session.select_tile(src);
    let Selection::Mismatched { ticket, .. } = session.select_tile(other_src) else {
        panic!("expected mismatch");
    };

    // A mismatched tile cannot be re-picked while it is shown.
    assert_eq!(session.select_tile(src), Selection::Ignored);

    assert_eq!(session.select_tile(tgt), Selection::Pending);
    assert_eq!(session.pending(), &[tgt]);
    assert!(!session.clear_scheduled());

    // The superseded timer must not wipe the new pick.
    assert!(!session.expire_clear(ticket));
    assert_eq!(session.pending(), &[tgt]);
    assert_eq!(session.mistakes(), 1);
}

#[test]
fn finishing_and_starting_next_set() {
    let mut session = Session::with_seed(Corpus::builtin(), 42);
    session.start_round().unwrap();

    let keys: Vec<String> = session
        .tiles()
        .iter()
        .filter(|t| t.side == Side::Source)
        .map(|t| t.pair_key.clone())
        .collect();
    for (i, key) in keys.iter().enumerate() {
        let (src, tgt) = ids(&session, key);
        session.select_tile(src);
        let sel = session.select_tile(tgt);
        assert_eq!(
            sel,
            Selection::Matched {
                pair_key: key.clone(),
                finished: i + 1 == keys.len()
            }
        );
    }

    assert_eq!(session.phase(), Phase::Finished);
    assert_eq!(session.progress_percent(), 100);
    assert_eq!(session.mistakes(), 0);

    let first_round_ids: Vec<TileId> = session.tiles().iter().map(|t| t.id).collect();
    assert_eq!(session.start_round().unwrap(), 2);
    assert_eq!(session.phase(), Phase::Playing);
    assert_eq!(session.matched_count(), 0);
    assert_eq!(session.progress_percent(), 0);
    assert!(session.last_outcome().is_none());

    // Ids from the previous round do not resolve any more.
    for id in first_round_ids {
        assert!(session.tile(id).is_none());
        assert_eq!(session.select_tile(id), Selection::Ignored);
    }
}

#[test]
fn new_round_drops_pending_clear() {
    let mut session = session_dealing("Sentarse");
    let (src, _) = ids(&session, "Sentarse");
    let other = other_key(&session, "Sentarse");
    let (other_src, _) = ids(&session, &other);

    session.select_tile(src);
    let Selection::Mismatched { ticket, .. } = session.select_tile(other_src) else {
        panic!("expected mismatch");
    };

    session.start_round().unwrap();
    let first = session.tiles()[0].id;
    session.select_tile(first);

    assert!(!session.clear_scheduled());
    assert!(!session.expire_clear(ticket));
    assert!(!session.tick(10 * MISMATCH_CLEAR_MS));
    assert_eq!(session.pending(), &[first]);
    assert_eq!(session.mistakes(), 0);
}

#[test]
fn stale_ticket_from_other_round_is_ignored() {
    let mut session = Session::with_seed(Corpus::builtin(), 5);
    session.start_round().unwrap();
    assert!(!session.expire_clear(ClearTicket {
        round: 99,
        mismatch: 1
    }));
}

#[test]
fn menu_and_back() {
    let mut session = Session::with_seed(Corpus::builtin(), 11);
    assert_eq!(session.select_tile(TileId::new(1, 0)), Selection::Ignored);

    session.start_round().unwrap();
    let id = session.tiles()[0].id;
    session.return_to_menu();
    assert_eq!(session.phase(), Phase::Menu);
    assert_eq!(session.select_tile(id), Selection::Ignored);

    session.start_round().unwrap();
    assert_eq!(session.phase(), Phase::Playing);
    assert_eq!(session.round(), 2);
}

#[test]
fn same_seed_deals_same_rounds() {
    let mut a = Session::with_seed(Corpus::builtin(), 2024);
    let mut b = Session::with_seed(Corpus::builtin(), 2024);
    for _ in 0..3 {
        a.start_round().unwrap();
        b.start_round().unwrap();
        assert_eq!(a.tiles(), b.tiles());
    }
}

#[test]
fn small_corpus_cannot_fill_round() {
    let corpus = Corpus::from_json_str(
        r#"[{"source": "Lavarse", "target": "To wash oneself"},
            {"source": "Ducharse", "target": "To shower"}]"#,
    )
    .unwrap();
    let mut session = Session::with_seed(corpus, 1);
    match session.start_round() {
        Err(CoreError::InsufficientCorpus {
            available,
            requested,
        }) => {
            assert_eq!(available, 2);
            assert_eq!(requested, 8);
        }
        other => panic!("expected InsufficientCorpus, got {other:?}"),
    }
    assert_eq!(session.phase(), Phase::Menu);
}

#[test]
fn zero_subset_is_rejected() {
    let config = SessionConfig {
        subset_size: 0,
        ..SessionConfig::default()
    };
    assert!(matches!(
        Session::new(Corpus::builtin(), config),
        Err(CoreError::EmptySubset)
    ));
}

#[test]
fn custom_delay_is_reported_with_mismatch() {
    let config = SessionConfig {
        subset_size: 2,
        mismatch_clear_ms: 250,
        seed: 9,
    };
    let mut session = Session::new(Corpus::builtin(), config).unwrap();
    session.start_round().unwrap();
    assert_eq!(session.tiles().len(), 4);

    let src = session
        .tiles()
        .iter()
        .find(|t| t.side == Side::Source)
        .unwrap()
        .clone();
    let wrong = session
        .tiles()
        .iter()
        .find(|t| t.side == Side::Target && t.pair_key != src.pair_key)
        .unwrap()
        .id;

    session.select_tile(src.id);
    assert!(matches!(
        session.select_tile(wrong),
        Selection::Mismatched {
            clear_after_ms: 250,
            ..
        }
    ));
    assert!(!session.tick(249));
    assert!(session.tick(1));
}
