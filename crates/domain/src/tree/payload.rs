//! Payload arenas shared by the nodes of one or more trees

use crate::auth::Auth;
use crate::environment::Variable;
use crate::request::Request;
use crate::store::Arena;

use super::node::{CollectionNode, NewNode};

/// Names, requests, auths and variable lists addressed by slot.
///
/// Nodes hold slot numbers only, so removing a node never moves another
/// node's payload.
#[derive(Debug, Clone, Default)]
pub struct Payloads {
    names: Arena<String>,
    requests: Arena<Request>,
    auths: Arena<Auth>,
    variables: Arena<Vec<Variable>>,
}

impl Payloads {
    /// Creates empty arenas.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            names: Arena::new(),
            requests: Arena::new(),
            auths: Arena::new(),
            variables: Arena::new(),
        }
    }

    /// Stores a name and returns its slot.
    pub fn add_name(&mut self, name: impl Into<String>) -> usize {
        self.names.insert(name.into())
    }

    /// Stores a request and returns its slot.
    pub fn add_request(&mut self, request: Request) -> usize {
        self.requests.insert(request)
    }

    /// Stores an auth and returns its slot.
    pub fn add_auth(&mut self, auth: Auth) -> usize {
        self.auths.insert(auth)
    }

    /// Stores a variable list and returns its slot.
    pub fn add_variables(&mut self, variables: Vec<Variable>) -> usize {
        self.variables.insert(variables)
    }

    /// Name in `slot`, if alive.
    #[must_use]
    pub fn name(&self, slot: usize) -> Option<&str> {
        self.names.get(slot).map(String::as_str)
    }

    /// Request in `slot`, if alive.
    #[must_use]
    pub fn request(&self, slot: usize) -> Option<&Request> {
        self.requests.get(slot)
    }

    /// Mutable request in `slot`, if alive.
    pub fn request_mut(&mut self, slot: usize) -> Option<&mut Request> {
        self.requests.get_mut(slot)
    }

    /// Auth in `slot`, if alive.
    #[must_use]
    pub fn auth(&self, slot: usize) -> Option<&Auth> {
        self.auths.get(slot)
    }

    /// Mutable auth in `slot`, if alive.
    pub fn auth_mut(&mut self, slot: usize) -> Option<&mut Auth> {
        self.auths.get_mut(slot)
    }

    /// Variables in `slot`, if alive.
    #[must_use]
    pub fn variables(&self, slot: usize) -> Option<&[Variable]> {
        self.variables.get(slot).map(Vec::as_slice)
    }

    /// Arena of names.
    #[must_use]
    pub const fn names(&self) -> &Arena<String> {
        &self.names
    }

    /// Arena of requests.
    #[must_use]
    pub const fn requests(&self) -> &Arena<Request> {
        &self.requests
    }

    /// Arena of auths.
    #[must_use]
    pub const fn auths(&self) -> &Arena<Auth> {
        &self.auths
    }

    /// Arena of variable lists.
    #[must_use]
    pub const fn variable_lists(&self) -> &Arena<Vec<Variable>> {
        &self.variables
    }

    /// Allocates the slots for a new node's payload.
    pub(crate) fn store(&mut self, node: NewNode) -> Slots {
        Slots {
            name: node.name.map(|n| self.add_name(n)),
            request: node.request.map(|r| self.add_request(r)),
            auth: node.auth.map(|a| self.add_auth(a)),
            variables: (!node.variables.is_empty()).then(|| self.add_variables(node.variables)),
        }
    }

    /// Marks every payload slot of `node` dead.
    pub(crate) fn release(&mut self, node: &CollectionNode) {
        if let Some(slot) = node.name {
            self.names.erase(slot);
        }
        if let Some(slot) = node.request {
            self.requests.erase(slot);
        }
        if let Some(slot) = node.auth {
            self.auths.erase(slot);
        }
        if let Some(slot) = node.variables {
            self.variables.erase(slot);
        }
    }
}

/// Slots allocated for one node.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Slots {
    pub(crate) name: Option<usize>,
    pub(crate) request: Option<usize>,
    pub(crate) auth: Option<usize>,
    pub(crate) variables: Option<usize>,
}
