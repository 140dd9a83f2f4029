// Player name canonicalization and reconciliation.
//
// The historical table keys pitchers by a fixed-shape identifier: up to five
// characters of the surname, two given-name initials, and a two-digit numeral
// that disambiguates players sharing the same stem ("martipe01", "martipe02").
// Free-text cohort names are folded into the same shape here, then reconciled
// against the set of identifiers actually present in the dataset.

use std::collections::HashSet;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("cannot canonicalize an empty name")]
    Empty,

    #[error("token `{token}` in name `{name}` is too short to canonicalize")]
    ShortToken { name: String, token: String },

    #[error("identifier `{0}` does not end in a two-digit numeral")]
    BadSuffix(String),
}

// ---------------------------------------------------------------------------
// Canonicalization
// ---------------------------------------------------------------------------

/// Fold a free-text name ("Clayton Kershaw") into the dataset's identifier
/// shape ("kershcl01").
///
/// The surname stem comes from the last whitespace token, truncated to five
/// characters; a surname apostrophe drops the character after the leading
/// letter, so "O'Leary" stems as "olear". The two initials come from the
/// first token: for an initials-form given name ("A.J.") the letters either
/// side of the first period, otherwise its first two characters. Every
/// canonicalized name starts life with the "01" numeral; `reconcile` settles
/// the real one.
pub fn canonicalize(full_name: &str) -> Result<String, NameError> {
    let lowered = full_name.to_lowercase();
    let tokens: Vec<&str> = lowered.split_whitespace().collect();
    let (Some(&given), Some(&surname)) = (tokens.first(), tokens.last()) else {
        return Err(NameError::Empty);
    };

    let stem = surname_stem(full_name, surname)?;
    let initials = given_initials(full_name, given)?;
    Ok(format!("{stem}{initials}01"))
}

/// Canonicalize a whole cohort list, preserving order.
pub fn canonicalize_all(names: &[String]) -> Result<Vec<String>, NameError> {
    names.iter().map(|n| canonicalize(n)).collect()
}

fn surname_stem(name: &str, token: &str) -> Result<String, NameError> {
    let mut chars: Vec<char> = token.chars().collect();
    if chars.contains(&'\'') {
        if chars.len() < 2 {
            return Err(short_token(name, token));
        }
        chars.remove(1);
    }
    chars.truncate(5);
    if chars.is_empty() {
        return Err(short_token(name, token));
    }
    Ok(chars.into_iter().collect())
}

fn given_initials(name: &str, token: &str) -> Result<String, NameError> {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() < 2 {
        return Err(short_token(name, token));
    }
    if chars[1] == '.' {
        // Initials form: "a.j." yields the letters either side of the period.
        match chars.get(2) {
            Some(c) => Ok(format!("{}{}", chars[0], c)),
            None => Err(short_token(name, token)),
        }
    } else {
        Ok(chars[..2].iter().collect())
    }
}

fn short_token(name: &str, token: &str) -> NameError {
    NameError::ShortToken {
        name: name.to_string(),
        token: token.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

/// Outcome of reconciling a batch of canonical names against a reference set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Final identifier for each candidate, in input order.
    pub resolved: Vec<String>,
    /// Names whose numeral search overflowed; reset to "01" and accepted so
    /// the batch terminates, but not actually present in the reference.
    pub unresolved: Vec<String>,
}

/// Match each candidate identifier against the reference set by walking its
/// trailing numeral upward ("01", "02", ...) until a member of the set is
/// found.
///
/// The accepted set starts as a copy of `reference` and grows monotonically:
/// a candidate that overflows past "99" is reset to "01", recorded as
/// unresolved, and added to the accepted set so the search terminates and
/// later duplicates of the same stem land on it. The overflow reset is an
/// escape hatch, not a correctness guarantee.
pub fn reconcile(
    candidates: &[String],
    reference: &HashSet<String>,
) -> Result<Reconciliation, NameError> {
    let mut accepted: HashSet<String> = reference.iter().cloned().collect();
    let mut resolved = Vec::with_capacity(candidates.len());
    let mut unresolved = Vec::new();

    for candidate in candidates {
        let mut name = candidate.clone();
        while !accepted.contains(&name) {
            let (stem, numeral) = split_suffix(&name)?;
            if numeral >= 99 {
                name = format!("{stem}01");
                unresolved.push(name.clone());
                accepted.insert(name.clone());
            } else {
                name = format!("{stem}{:02}", numeral + 1);
            }
        }
        resolved.push(name);
    }

    Ok(Reconciliation {
        resolved,
        unresolved,
    })
}

fn split_suffix(name: &str) -> Result<(&str, u32), NameError> {
    if name.len() < 2 || !name.is_char_boundary(name.len() - 2) {
        return Err(NameError::BadSuffix(name.to_string()));
    }
    let (stem, suffix) = name.split_at(name.len() - 2);
    if !suffix.chars().all(|c| c.is_ascii_digit()) {
        return Err(NameError::BadSuffix(name.to_string()));
    }
    let numeral = suffix
        .parse::<u32>()
        .map_err(|_| NameError::BadSuffix(name.to_string()))?;
    Ok((stem, numeral))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
