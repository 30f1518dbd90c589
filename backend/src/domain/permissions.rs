//! Access rules guarding snippet mutation.
//!
//! Each rule answers two questions: may this request proceed at all
//! ([`AccessRule::has_permission`]), and may it touch this particular object
//! ([`AccessRule::has_object_permission`]). A [`Policy`] ANDs its rules and
//! turns a refusal into `unauthorized` for anonymous requesters or
//! `forbidden` for everyone else.

use std::fmt;
use std::str::FromStr;

use super::{Error, Requester, UserId};

/// Request method as seen by access rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessMethod {
    Get,
    Head,
    Options,
    Post,
    Put,
    Patch,
    Delete,
    /// Any verb not listed above. Never considered safe.
    Other,
}

impl AccessMethod {
    /// `GET`, `HEAD` and `OPTIONS` only read state.
    pub fn is_safe(self) -> bool {
        matches!(self, Self::Get | Self::Head | Self::Options)
    }
}

impl FromStr for AccessMethod {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_uppercase().as_str() {
            "GET" => Self::Get,
            "HEAD" => Self::Head,
            "OPTIONS" => Self::Options,
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "PATCH" => Self::Patch,
            "DELETE" => Self::Delete,
            _ => Self::Other,
        })
    }
}

impl fmt::Display for AccessMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Other => "OTHER",
        };
        f.write_str(name)
    }
}

/// A single permission predicate. Both checks allow by default.
pub trait AccessRule: Send + Sync {
    fn has_permission(&self, _method: AccessMethod, _requester: &Requester) -> bool {
        true
    }

    fn has_object_permission(
        &self,
        _method: AccessMethod,
        _requester: &Requester,
        _owner: &UserId,
    ) -> bool {
        true
    }
}

/// Writes need an authenticated requester; reads are open to everyone.
#[derive(Debug, Default, Clone, Copy)]
pub struct IsAuthenticatedOrReadOnly;

impl AccessRule for IsAuthenticatedOrReadOnly {
    fn has_permission(&self, method: AccessMethod, requester: &Requester) -> bool {
        method.is_safe() || requester.is_authenticated()
    }
}

/// Writes need the requester to be the object's owner.
#[derive(Debug, Default, Clone, Copy)]
pub struct IsOwnerOrReadOnly;

impl AccessRule for IsOwnerOrReadOnly {
    fn has_object_permission(
        &self,
        method: AccessMethod,
        requester: &Requester,
        owner: &UserId,
    ) -> bool {
        method.is_safe() || requester.user_id() == Some(owner)
    }
}

/// Conjunction of access rules.
///
/// # Examples
/// ```
/// use backend::domain::{AccessMethod, Policy, Requester, UserId};
///
/// let policy = Policy::snippets();
/// let owner = UserId::random();
/// let requester = Requester::User(owner.clone());
///
/// assert!(policy.check_request(AccessMethod::Patch, &requester).is_ok());
/// assert!(policy.check_object(AccessMethod::Patch, &requester, &owner).is_ok());
/// assert!(policy
///     .check_object(AccessMethod::Delete, &requester, &UserId::random())
///     .is_err());
/// ```
pub struct Policy {
    rules: Vec<Box<dyn AccessRule>>,
}

impl Policy {
    pub fn new(rules: Vec<Box<dyn AccessRule>>) -> Self {
        Self { rules }
    }

    /// Rules applied to the snippet collection.
    pub fn snippets() -> Self {
        Self::new(vec![
            Box::new(IsAuthenticatedOrReadOnly),
            Box::new(IsOwnerOrReadOnly),
        ])
    }

    /// Request-level check, run before any object is loaded.
    pub fn check_request(&self, method: AccessMethod, requester: &Requester) -> Result<(), Error> {
        if self
            .rules
            .iter()
            .all(|rule| rule.has_permission(method, requester))
        {
            Ok(())
        } else {
            Err(denied(requester))
        }
    }

    /// Object-level check, run once the target has been loaded.
    pub fn check_object(
        &self,
        method: AccessMethod,
        requester: &Requester,
        owner: &UserId,
    ) -> Result<(), Error> {
        if self
            .rules
            .iter()
            .all(|rule| rule.has_object_permission(method, requester, owner))
        {
            Ok(())
        } else {
            Err(denied(requester))
        }
    }
}

impl fmt::Debug for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Policy")
            .field("rules", &self.rules.len())
            .finish()
    }
}

fn denied(requester: &Requester) -> Error {
    if requester.is_authenticated() {
        Error::forbidden("you do not have permission to perform this action")
    } else {
        Error::unauthorized("authentication credentials were not provided")
    }
}
