use std::sync::{Arc, Mutex};

use super::{Context, Middleware};
use crate::error::HandlerError;

/// Callback invoked once a chain finishes, with the error if one was forwarded
pub type Done<'a> = &'a (dyn Fn(Option<HandlerError>) + Send + Sync);

/// The continuation handed to every chain member.
///
/// It is consumed by value, so a member can invoke it at most once: either
/// [`run`](Next::run) to hand control to the rest of the chain, or
/// [`fail`](Next::fail) to skip the rest and report an error.
pub struct Next<'a> {
    rest: &'a [Arc<dyn Middleware>],
    done: Done<'a>,
}

impl<'a> Next<'a> {
    pub fn new(rest: &'a [Arc<dyn Middleware>], done: Done<'a>) -> Self {
        Self { rest, done }
    }

    /// A continuation with no members left, which only reports to `done`
    pub fn terminal(done: Done<'a>) -> Self {
        Self::new(&[], done)
    }

    /// Number of chain members still to run
    pub fn remaining(&self) -> usize {
        self.rest.len()
    }

    /// Continue with the next member, or report success when none are left
    pub async fn run(self, ctx: &mut Context) {
        match self.rest.split_first() {
            Some((head, rest)) => head.handle(ctx, Next::new(rest, self.done)).await,
            None => (self.done)(None),
        }
    }

    /// Stop the chain and forward `error`
    pub fn fail(self, error: HandlerError) {
        (self.done)(Some(error))
    }
}

/// How a chain ended when no error was forwarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Every member handed control on
    Completed,
    /// A member returned without calling its continuation
    Halted,
}

/// An ordered middleware pipeline registered for one or more methods
pub struct Chain {
    members: Vec<Arc<dyn Middleware>>,
}

impl std::fmt::Debug for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chain").field("len", &self.members.len()).finish()
    }
}

impl Chain {
    pub(crate) fn new(members: Vec<Arc<dyn Middleware>>) -> Self {
        Self { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Drive the chain for one request.
    ///
    /// Returns the first error forwarded through a continuation.
    pub async fn run(&self, ctx: &mut Context) -> Result<Flow, HandlerError> {
        let outcome: Mutex<Option<Option<HandlerError>>> = Mutex::new(None);
        let done = |error: Option<HandlerError>| {
            if let Ok(mut slot) = outcome.lock() {
                if slot.is_none() {
                    *slot = Some(error);
                }
            }
        };

        Next::new(&self.members, &done).run(ctx).await;

        match outcome.into_inner().ok().flatten() {
            Some(None) => Ok(Flow::Completed),
            Some(Some(error)) => Err(error),
            None => Ok(Flow::Halted),
        }
    }
}
