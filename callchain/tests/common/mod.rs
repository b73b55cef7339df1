#![allow(dead_code)]

use callchain::{Arity, Callable, CallbackResult, Operation, Receiver};
use std::{
    any::Any,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

// ============================================================================
// Receiver
// ============================================================================

#[derive(Clone, Debug)]
pub struct Params {
    pub id: u64,
}

/// A web action with private steps, resolved by name.
#[derive(Debug, Default)]
pub struct Action {
    pub logger: Vec<String>,
}

impl Action {
    fn authenticate(&mut self) {
        self.logger.push("authenticate!".to_string());
    }

    fn set_article(&mut self, params: &Params) {
        self.logger.push(format!("set_article: {}", params.id));
    }

    fn forbid(&mut self) -> CallbackResult {
        Err("forbidden".into())
    }
}

impl Receiver<Params> for Action {
    fn resolve(&self, name: &str) -> Option<Operation<Self, Params>> {
        match name {
            "authenticate!" => Some(Operation::Nullary(|action| {
                action.authenticate();
                Ok(())
            })),
            "set_article" => Some(Operation::Unary(|action, params| {
                action.set_article(params);
                Ok(())
            })),
            "forbid" => Some(Operation::Nullary(Action::forbid)),
            _ => None,
        }
    }
}

// ============================================================================
// Callable objects
// ============================================================================

/// A callable object with an empty body.
pub struct Noop(pub u8);

impl Callable<Params> for Noop {
    fn call(&self) -> CallbackResult {
        Ok(())
    }
}

/// Appends a tag to a shared log, optionally with the article id.
pub struct Tagger {
    pub tag: &'static str,
    pub arity: Arity,
    pub log: Arc<Mutex<Vec<String>>>,
}

impl Callable<Params> for Tagger {
    fn arity(&self) -> Arity {
        self.arity
    }

    fn call(&self) -> CallbackResult {
        self.log.lock().unwrap().push(self.tag.to_string());
        Ok(())
    }

    fn call_with(&self, params: &Params) -> CallbackResult {
        self.log
            .lock()
            .unwrap()
            .push(format!("{}: {}", self.tag, params.id));
        Ok(())
    }
}

/// Declares one argument but never implements `call_with`.
pub struct Mute;

impl Callable<Params> for Mute {
    fn arity(&self) -> Arity {
        Arity::Unary
    }
}

/// Counts invocations.
pub struct Tally {
    pub count: Arc<AtomicUsize>,
}

impl Callable<Params> for Tally {
    fn call(&self) -> CallbackResult {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Compares by value: two labels with the same text are one callback.
#[derive(Debug, PartialEq)]
pub struct Label(pub &'static str);

impl Callable<Params> for Label {
    fn call(&self) -> CallbackResult {
        Ok(())
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }

    fn same_callable(&self, other: &dyn Callable<Params>) -> bool {
        other
            .as_any()
            .and_then(|other| other.downcast_ref::<Self>())
            .is_some_and(|other| other == self)
    }
}
