//! Set-storage eligibility analysis
//!
//! Rules may be kept in a hash set only when doing so cannot change what an
//! enforcer concludes from them. That holds when the matcher says nothing
//! more than "every request field equals the policy field of the same name"
//! and no role hierarchy can relate two different rules.
//!
//! The matcher is checked structurally against the grammar
//!
//! ```text
//! matcher ::= clause ("&&" clause)*
//! clause  ::= "r." field "==" "p." field
//! ```
//!
//! where every request field appears in exactly one clause. Anything else
//! (other operators, literals, parentheses, function calls) is ineligible.

use crate::storage::StorageMode;
use core::fmt;

/// Why a model cannot use set storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ineligibility {
    /// No request assertion named `r`
    MissingRequest,
    /// The `r` assertion has no fields
    EmptyRequest,
    /// No matcher assertion named `m`
    MissingMatcher,
    /// A role definition section exists
    RoleSectionPresent,
    /// The matcher is not a plain conjunction of field equalities
    MatcherNotFieldEquality,
}

impl fmt::Display for Ineligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRequest => write!(f, "request definition `r` is missing"),
            Self::EmptyRequest => write!(f, "request definition `r` has no fields"),
            Self::MissingMatcher => write!(f, "matcher `m` is missing"),
            Self::RoleSectionPresent => write!(f, "a role definition section is present"),
            Self::MatcherNotFieldEquality => write!(
                f,
                "matcher is not a conjunction of `r.<field> == p.<field>` clauses"
            ),
        }
    }
}

/// Decide whether set storage is safe.
///
/// `request_tokens` are the namespaced tokens of the `r` assertion
/// (`r_sub`, `r_obj`, ...); `matcher` is the comment-free text of `m`.
pub fn check(
    request_tokens: Option<&[String]>,
    matcher: Option<&str>,
    has_role_section: bool,
) -> Result<(), Ineligibility> {
    let tokens = request_tokens.ok_or(Ineligibility::MissingRequest)?;
    if tokens.is_empty() {
        return Err(Ineligibility::EmptyRequest);
    }
    let matcher = matcher.ok_or(Ineligibility::MissingMatcher)?;
    if has_role_section {
        return Err(Ineligibility::RoleSectionPresent);
    }

    let fields: Vec<&str> = tokens
        .iter()
        .map(|token| token.strip_prefix("r_").unwrap_or(token))
        .collect();
    if is_field_equality_conjunction(matcher, &fields) {
        Ok(())
    } else {
        Err(Ineligibility::MatcherNotFieldEquality)
    }
}

/// Storage mode implied by [`check`]
#[must_use]
pub fn select_mode(
    request_tokens: Option<&[String]>,
    matcher: Option<&str>,
    has_role_section: bool,
) -> StorageMode {
    match check(request_tokens, matcher, has_role_section) {
        Ok(()) => StorageMode::Set,
        Err(_) => StorageMode::Ordered,
    }
}

/// Whether `matcher` is exactly `r.f == p.f && ...` over `fields`, each once
#[must_use]
pub fn is_field_equality_conjunction(matcher: &str, fields: &[&str]) -> bool {
    if fields.is_empty() {
        return false;
    }

    let mut pending: Vec<&str> = fields.to_vec();
    let mut tokens = tokenize(matcher).into_iter();

    loop {
        let field = match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(Token::Ident(left)), Some(Token::Equal), Some(Token::Ident(right))) => {
                match (field_of(left, "r."), field_of(right, "p.")) {
                    (Some(l), Some(r)) if l == r => l,
                    _ => return false,
                }
            }
            _ => return false,
        };

        match pending.iter().position(|pending_field| *pending_field == field) {
            Some(index) => {
                pending.swap_remove(index);
            }
            None => return false,
        }

        match tokens.next() {
            None => break,
            Some(Token::And) => continue,
            Some(_) => return false,
        }
    }

    pending.is_empty()
}

fn field_of<'a>(ident: &'a str, prefix: &str) -> Option<&'a str> {
    ident
        .strip_prefix(prefix)
        .filter(|field| !field.is_empty() && !field.contains('.'))
}

// ===== TOKENIZER =====

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Ident(&'a str),
    Equal,
    And,
    Other,
}

fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(start, ch)) = chars.peek() {
        match ch {
            c if c.is_whitespace() => {
                chars.next();
            }
            '=' | '&' => {
                chars.next();
                if chars.peek().map(|&(_, next)| next) == Some(ch) {
                    chars.next();
                    tokens.push(if ch == '=' { Token::Equal } else { Token::And });
                } else {
                    tokens.push(Token::Other);
                }
            }
            c if c.is_alphanumeric() || c == '_' || c == '.' => {
                let mut end = start;
                while let Some(&(index, c)) = chars.peek() {
                    if c.is_alphanumeric() || c == '_' || c == '.' {
                        end = index + c.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(&input[start..end]));
            }
            _ => {
                chars.next();
                tokens.push(Token::Other);
            }
        }
    }

    tokens
}
