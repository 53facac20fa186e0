//! Ordered-set delta codec.
//!
//! Vote lists and multisignature membership travel as signed tokens:
//! `"+X"` adds member X, `"-X"` removes it. [`merge`] applies a token list
//! against a current set, [`reverse`] produces the exact inverse diff used
//! to roll back unconfirmed state when a transaction leaves the pool.

use super::errors::DiffConflict;
use std::fmt;

/// The sign of a set edit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DiffAction {
    /// Insert the member. The default when a token carries no sign.
    #[default]
    Add,
    /// Remove the member.
    Remove,
}

impl fmt::Display for DiffAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffAction::Add => f.write_str("+"),
            DiffAction::Remove => f.write_str("-"),
        }
    }
}

/// A single signed edit against a relation set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiffToken {
    /// `+member`
    Add(String),
    /// `-member`
    Remove(String),
}

impl DiffToken {
    /// Parse the wire form. A leading `+`/`-` selects the action; a bare
    /// member defaults to an add.
    pub fn parse(token: &str) -> Self {
        if let Some(member) = token.strip_prefix('+') {
            DiffToken::Add(member.to_string())
        } else if let Some(member) = token.strip_prefix('-') {
            DiffToken::Remove(member.to_string())
        } else {
            DiffToken::Add(token.to_string())
        }
    }

    /// The member this token edits.
    pub fn member(&self) -> &str {
        match self {
            DiffToken::Add(m) | DiffToken::Remove(m) => m,
        }
    }

    /// The sign of this token.
    pub fn action(&self) -> DiffAction {
        match self {
            DiffToken::Add(_) => DiffAction::Add,
            DiffToken::Remove(_) => DiffAction::Remove,
        }
    }

    /// The token that undoes this one.
    pub fn reversed(&self) -> Self {
        match self {
            DiffToken::Add(m) => DiffToken::Remove(m.clone()),
            DiffToken::Remove(m) => DiffToken::Add(m.clone()),
        }
    }
}

impl fmt::Display for DiffToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.action(), self.member())
    }
}

/// Apply `diff` to `source`, token by token.
///
/// Adding a present member or removing an absent one fails the whole merge
/// with [`DiffConflict`]. An empty result normalizes to `None` ("no relation
/// rows"), never an empty-but-present set.
pub fn merge(source: Option<&[String]>, diff: &[DiffToken]) -> Result<Option<Vec<String>>, DiffConflict> {
    let mut result: Vec<String> = source.map(<[String]>::to_vec).unwrap_or_default();

    for token in diff {
        match token {
            DiffToken::Add(member) => {
                if result.iter().any(|m| m == member) {
                    return Err(DiffConflict {
                        action: DiffAction::Add,
                        member: member.clone(),
                    });
                }
                result.push(member.clone());
            }
            DiffToken::Remove(member) => {
                let Some(index) = result.iter().position(|m| m == member) else {
                    return Err(DiffConflict {
                        action: DiffAction::Remove,
                        member: member.clone(),
                    });
                };
                result.remove(index);
            }
        }
    }

    Ok(if result.is_empty() { None } else { Some(result) })
}

/// Flip every token's sign, producing the diff that undoes `diff`.
pub fn reverse(diff: &[DiffToken]) -> Vec<DiffToken> {
    diff.iter().map(DiffToken::reversed).collect()
}
