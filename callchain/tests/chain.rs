//! Chain registration and execution against an action receiver.

use callchain::testing::{CountingCallable, RecordingCallable};
use callchain::{Arity, Callable, Callback, Chain, ChainError, Closure, Traced};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

mod common;
use common::{Action, Label, Mute, Noop, Params, Tagger, Tally};

fn params() -> Params {
    Params { id: 23 }
}

// ============================================================================
// add
// ============================================================================

#[test]
fn test_add_wraps_name_in_invocable_entry() {
    let mut chain = Chain::<Action, Params>::new();
    chain.add("symbolize!");

    let entry = chain.first().expect("entry registered");
    assert_eq!(entry.kind(), "named");
    assert_eq!(entry.name().map(|n| n.as_str()), Some("symbolize!"));
}

#[test]
fn test_add_includes_the_given_object() {
    let noop = Arc::new(Noop(0));
    let mut chain = Chain::<Action, Params>::new();
    chain.add(Arc::clone(&noop));

    let entry = chain.first().unwrap();
    assert_eq!(entry.callback(), &Callback::from(noop));
}

#[test]
fn test_add_includes_the_given_name() {
    let mut chain = Chain::<Action, Params>::new();
    chain.add("upcase");
    assert_eq!(chain.first().unwrap().callback(), &Callback::named("upcase"));
}

#[test]
fn test_add_guarantees_unique_names() {
    let mut chain = Chain::<Action, Params>::new();
    chain.add("upcase");
    chain.add("upcase");
    assert_eq!(chain.len(), 1);
}

#[test]
fn test_add_includes_the_given_closure() {
    let closure = Closure::<Action, Params>::nullary(|_: &mut Action| ());
    let mut chain = Chain::<Action, Params>::new();
    chain.add(closure.clone());
    assert_eq!(chain.first().unwrap().callback(), &Callback::from(closure));
}

#[test]
fn test_distinct_objects_are_not_duplicates() {
    let mut chain = Chain::<Action, Params>::new();
    chain
        .add(Callback::object(Noop(0)))
        .add(Callback::object(Noop(0)));
    assert_eq!(chain.len(), 2);
}

#[test]
fn test_add_multiple_kinds_at_once() {
    let callbacks: Vec<Callback<Action, Params>> = vec![
        "upcase".into(),
        Callback::object(Noop(0)),
        Closure::nullary(|_: &mut Action| ()).into(),
    ];
    let mut chain = Chain::<Action, Params>::new();
    chain.add_all(callbacks);

    assert_eq!(chain.len(), 3);
    let kinds: Vec<_> = chain.iter().map(|entry| entry.kind()).collect();
    assert_eq!(kinds, ["named", "object", "closure"]);
}

#[test]
fn test_all_included_callbacks_are_invocable() {
    let mut chain = Chain::<Action, Params>::new();
    chain.add_all::<[Callback<Action, Params>; 3]>([
        "authenticate!".into(),
        Callback::object(Noop(0)),
        Closure::nullary(|action: &mut Action| action.logger.push("closure".into())).into(),
    ]);

    let mut action = Action::default();
    for entry in &chain {
        entry.invoke(&mut action, &params()).unwrap();
    }
    assert_eq!(action.logger, ["authenticate!", "closure"]);
}

#[test]
fn test_shared_handle_is_a_duplicate() {
    let audit: Arc<dyn Callable<Params>> = Arc::new(Noop(1));
    let mut chain = Chain::<Action, Params>::new();
    chain
        .add(Callback::shared(Arc::clone(&audit)))
        .add(Callback::shared(audit))
        .add(Callback::object(Noop(1)));
    assert_eq!(chain.len(), 2);
}

#[test]
fn test_value_equal_objects_are_duplicates() {
    let mut chain = Chain::<Action, Params>::new();
    chain
        .add(Callback::object(Label("audit")))
        .add(Callback::object(Label("audit")))
        .add(Callback::object(Label("metrics")));
    assert_eq!(chain.len(), 2);

    // a label never equals an object of another type
    chain.add(Callback::object(Noop(0)));
    assert_eq!(chain.len(), 3);
}

// ============================================================================
// run
// ============================================================================

#[test]
fn test_run_executes_named_operations() {
    let mut chain = Chain::<Action, Params>::new();
    chain.add_all(["authenticate!", "set_article"]);

    let mut action = Action::default();
    chain.run(&mut action, &params()).unwrap();

    assert_eq!(action.logger, ["authenticate!", "set_article: 23"]);
}

#[test]
fn test_run_executes_closures() {
    let mut chain = Chain::<Action, Params>::new();
    chain
        .add_fn(|action: &mut Action| action.logger.push("authenticate!".into()))
        .add_fn_with_args(|action: &mut Action, params: &Params| {
            action.logger.push(format!("set_article: {}", params.id))
        });

    let mut action = Action::default();
    chain.run(&mut action, &params()).unwrap();

    assert_eq!(action.logger, ["authenticate!", "set_article: 23"]);
}

#[test]
fn test_nullary_closures_ignore_arguments() {
    let mut chain = Chain::<Action, Params>::new();
    chain
        .add_fn(|action: &mut Action| action.logger.push("first".into()))
        .add_fn(|action: &mut Action| action.logger.push("second".into()));

    let mut action = Action::default();
    chain.run(&mut action, &Params { id: 1 }).unwrap();
    chain.run(&mut action, &Params { id: 2 }).unwrap();

    assert_eq!(action.logger, ["first", "second", "first", "second"]);
}

#[test]
fn test_objects_follow_their_arity() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let bare = Tagger {
        tag: "bare",
        arity: Arity::Nullary,
        log: log.clone(),
    };
    let with_id = Tagger {
        tag: "with_id",
        arity: Arity::Unary,
        log: log.clone(),
    };

    let mut chain = Chain::<Action, Params>::new();
    chain
        .add(Callback::object(bare))
        .add(Callback::object(with_id));

    let mut action = Action::default();
    chain.run(&mut action, &params()).unwrap();

    assert_eq!(*log.lock().unwrap(), ["bare", "with_id: 23"]);
    assert!(action.logger.is_empty(), "objects never see the receiver");
}

#[test]
fn test_mixed_kinds_run_in_registration_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let log_clone = log.clone();

    let mut chain = Chain::<Action, Params>::new();
    chain
        .add("authenticate!")
        .add(Callback::object(Tagger {
            tag: "object",
            arity: Arity::Nullary,
            log: log.clone(),
        }))
        .add_fn(move |action: &mut Action| {
            // the object ran before this closure
            let seen = log_clone.lock().unwrap().len();
            action.logger.push(format!("closure after {seen}"));
        })
        .add("set_article");

    let mut action = Action::default();
    chain.run(&mut action, &params()).unwrap();

    assert_eq!(
        action.logger,
        ["authenticate!", "closure after 1", "set_article: 23"]
    );
}

#[test]
fn test_unary_recorder_sees_run_arguments() {
    let recorder = RecordingCallable::with_args("audit");
    let log = recorder.clone();

    let mut chain = Chain::<Action, Params>::new();
    chain
        .add(Callback::object(recorder))
        .add(Callback::object(log.sibling("bare", Arity::Nullary)));
    chain.run(&mut Action::default(), &params()).unwrap();

    assert_eq!(log.calls(), ["audit: Params { id: 23 }", "bare"]);
}

#[test]
fn test_counter_reset_between_runs() {
    let counter = Arc::new(CountingCallable::new());
    let mut chain = Chain::<Action, Params>::new();
    chain.add(Arc::clone(&counter));

    chain.run(&mut Action::default(), &params()).unwrap();
    chain.run(&mut Action::default(), &params()).unwrap();
    assert_eq!(counter.count(), 2);

    counter.reset();
    chain.run(&mut Action::default(), &params()).unwrap();
    assert_eq!(counter.count(), 1);
}

// ============================================================================
// failures
// ============================================================================

#[test]
fn test_unresolved_name_aborts_run() {
    let mut chain = Chain::<Action, Params>::new();
    chain
        .add("authenticate!")
        .add("load_comments")
        .add("set_article");

    let mut action = Action::default();
    let err = chain.run(&mut action, &params()).unwrap_err();

    match err {
        ChainError::UnresolvedOperation { name, receiver } => {
            assert_eq!(name, "load_comments");
            assert!(receiver.ends_with("Action"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(action.logger, ["authenticate!"]);
}

#[test]
fn test_check_reports_unresolved_names_without_running() {
    let mut chain = Chain::<Action, Params>::new();
    chain.add("authenticate!").add("set_article");

    let action = Action::default();
    assert!(chain.check(&action).is_ok());

    chain.add("missing");
    assert!(matches!(
        chain.check(&action),
        Err(ChainError::UnresolvedOperation { .. })
    ));
    assert!(action.logger.is_empty());
}

#[test]
fn test_object_without_entry_point_fails_at_run() {
    let mut chain = Chain::<Action, Params>::new();
    chain.add(Callback::object(Mute));
    assert_eq!(chain.len(), 1);

    let err = chain.run(&mut Action::default(), &params()).unwrap_err();
    assert!(matches!(
        err,
        ChainError::NotCallable {
            arity: Arity::Unary,
            ..
        }
    ));
}

#[test]
fn test_callback_failure_propagates_unchanged() {
    let count = Arc::new(AtomicUsize::new(0));

    let mut chain = Chain::<Action, Params>::new();
    chain.add("authenticate!").add("forbid").add(Callback::object(Tally {
        count: count.clone(),
    }));

    let mut action = Action::default();
    let err = chain.run(&mut action, &params()).unwrap_err();

    assert!(!err.is_dispatch());
    assert_eq!(err.to_string(), "forbidden");
    assert_eq!(
        err.into_callback_error().map(|e| e.to_string()).as_deref(),
        Some("forbidden")
    );
    assert_eq!(count.load(Ordering::SeqCst), 0, "tally must not run");
    assert_eq!(action.logger, ["authenticate!"]);
}

#[test]
fn test_nested_chain_error_is_not_rewrapped() {
    let inner = Arc::new({
        let mut chain = Chain::<Action, Params>::new();
        chain.add("nope");
        chain
    });

    let mut outer = Chain::<Action, Params>::new();
    outer.add_fn_with_args(move |action: &mut Action, params: &Params| {
        inner.run(action, params)
    });

    let err = outer.run(&mut Action::default(), &params()).unwrap_err();
    assert!(matches!(err, ChainError::UnresolvedOperation { .. }));
}

// ============================================================================
// instrumentation
// ============================================================================

#[test]
fn test_traced_object_keeps_arity() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let traced = Traced::new(
        Tagger {
            tag: "traced",
            arity: Arity::Unary,
            log: log.clone(),
        },
        "tagger",
    );

    let mut chain = Chain::<Action, Params>::new();
    chain.add(Callback::object(traced));
    assert_eq!(chain.first().and_then(|e| e.arity()), Some(Arity::Unary));

    chain.run(&mut Action::default(), &params()).unwrap();
    assert_eq!(*log.lock().unwrap(), ["traced: 23"]);
}
