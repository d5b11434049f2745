use std::fmt;

use crate::identity::TypeIdentity;

/// A teardown callback, optionally tied to the interface whose component it
/// disposes of.
pub struct DeferredAction {
    owner: Option<TypeIdentity>,
    action: Box<dyn FnOnce()>,
}

impl DeferredAction {
    pub fn new(action: impl FnOnce() + 'static) -> Self {
        Self { owner: None, action: Box::new(action) }
    }

    /// An action that is dropped unrun if `owner` is detached first.
    pub fn owned_by(owner: TypeIdentity, action: impl FnOnce() + 'static) -> Self {
        Self { owner: Some(owner), action: Box::new(action) }
    }

    pub fn owner(&self) -> Option<TypeIdentity> {
        self.owner
    }

    fn run(self) {
        (self.action)()
    }
}

impl fmt::Debug for DeferredAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredAction")
            .field("owner", &self.owner)
            .finish_non_exhaustive()
    }
}

/// Teardown callbacks, run last-registered-first.
#[derive(Debug, Default)]
pub struct DeferredActionStack {
    actions: Vec<DeferredAction>,
}

impl DeferredActionStack {
    pub fn new() -> Self {
        Self { actions: Vec::new() }
    }

    pub fn push(&mut self, action: DeferredAction) {
        self.actions.push(action);
    }

    /// Removes, without running, every action owned by `owner`. The caller
    /// decides when the returned actions are dropped.
    pub fn take_owned(&mut self, owner: &TypeIdentity) -> Vec<DeferredAction> {
        let (taken, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.actions)
            .into_iter()
            .partition(|action| action.owner.as_ref() == Some(owner));
        self.actions = kept;
        taken
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Runs every action in reverse registration order, leaving the stack
    /// empty. Returns the number of actions run.
    pub fn run_all(&mut self) -> usize {
        self.run_all_with(|_| {})
    }

    /// Like [`run_all`](Self::run_all), calling `before` on each action just
    /// before it runs.
    pub fn run_all_with(&mut self, mut before: impl FnMut(&DeferredAction)) -> usize {
        let mut ran = 0;
        while let Some(action) = self.actions.pop() {
            before(&action);
            action.run();
            ran += 1;
        }
        ran
    }
}
