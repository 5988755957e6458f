//! Reversible pseudonymization of personal names.
//!
//! Before any student text is sent to an external AI provider, identifying
//! names are replaced by fixed placeholder tokens (`[ESTUDANTE]` for the
//! primary subject, `[<LABEL>]` for caller-chosen extra subjects). After the
//! provider responds, the same mapping is applied in reverse. The name map is
//! built per call and discarded — nothing is persisted here.
//!
//! Matching rules, in one place:
//!
//! * case-insensitive, exact phrase, all occurrences;
//! * word-boundary safe — a name never matches inside a longer word
//!   ("Ana" must not fire inside "banana" or "análise");
//! * the primary subject's first name is replaced on its own only when it is
//!   longer than 3 characters, because short first names collide with common
//!   Portuguese words far too often;
//! * empty or whitespace-only names are a no-op, never an error.
//!
//! Word boundaries are decided with an explicit character scan
//! (`char::is_alphabetic` on the neighbours) rather than regex `\b`, so the
//! behaviour with accented Portuguese names is the same everywhere and easy
//! to verify.
//!
//! The reverse direction is plain literal substitution: tokens are
//! unambiguous, so no boundary logic applies. Round-tripping is *not*
//! guaranteed against adversarial input that already contains a literal
//! `[ESTUDANTE]` — an accepted limitation of the scheme.
//!
//! ```rust
//! use incluia_privacy::{anonymize, deanonymize, NameMap};
//!
//! let masked = anonymize("Pedro tem TDAH.", Some("Pedro Henrique"), &NameMap::new());
//! assert_eq!(masked, "[ESTUDANTE] tem TDAH.");
//!
//! let restored = deanonymize(&masked, Some("Pedro Henrique"), &NameMap::new());
//! assert_eq!(restored, "Pedro Henrique tem TDAH.");
//! ```

use std::collections::BTreeMap;

/// Token standing in for the primary subject.
pub const STUDENT_TOKEN: &str = "[ESTUDANTE]";

/// First names this short are never replaced on their own; only the full
/// name is. Tuned constant — do not "improve" it.
const MIN_FIRST_NAME_CHARS: usize = 4;

/// Additional subjects: label → real name. Labels are used verbatim inside
/// the square-bracket token. `BTreeMap` keeps replacement order
/// deterministic.
pub type NameMap = BTreeMap<String, String>;

/// Strip identifying names from `text` before it crosses the trust boundary.
///
/// `primary` is the student's full name as registered; `additional` carries
/// any further subjects (e.g. `"RESPONSAVEL"` → guardian's name). Blank
/// names are skipped silently.
pub fn anonymize(text: &str, primary: Option<&str>, additional: &NameMap) -> String {
    let mut out = text.to_owned();

    if let Some(full) = primary.map(str::trim).filter(|s| !s.is_empty()) {
        out = replace_whole_word_ci(&out, full, STUDENT_TOKEN);

        // Lone first-name occurrences, unless the first name is too short
        // or the registered name was a single word already handled above.
        if let Some(first) = full.split_whitespace().next() {
            if first != full && first.chars().count() >= MIN_FIRST_NAME_CHARS {
                out = replace_whole_word_ci(&out, first, STUDENT_TOKEN);
            }
        }
    }

    for (label, name) in additional {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        out = replace_whole_word_ci(&out, name, &format!("[{label}]"));
    }

    out
}

/// Restore real names in a provider response.
///
/// Pure literal substitution: `[ESTUDANTE]` becomes the trimmed primary name
/// when one is given (tokens are left intact otherwise — no guessing), and
/// each `[<LABEL>]` present in `additional` becomes its mapped name.
pub fn deanonymize(text: &str, primary: Option<&str>, additional: &NameMap) -> String {
    let mut out = text.to_owned();

    if let Some(name) = primary.map(str::trim).filter(|s| !s.is_empty()) {
        out = out.replace(STUDENT_TOKEN, name);
    }

    for (label, name) in additional {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        out = out.replace(&format!("[{label}]"), name);
    }

    out
}

/// Replace every whole-word, case-insensitive occurrence of `name` in `text`
/// with `token`.
///
/// Single forward scan over the characters of `text`; each position is
/// checked at most once against `name`, so documents of tens of kilobytes
/// with thousands of repeated occurrences stay cheap.
fn replace_whole_word_ci(text: &str, name: &str, token: &str) -> String {
    let name: Vec<char> = name.trim().chars().collect();
    if name.is_empty() {
        return text.to_owned();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        if is_boundary_before(&chars, i) && matches_at(&chars, i, &name) {
            let end = i + name.len();
            if is_boundary_after(&chars, end) {
                out.push_str(token);
                i = end;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }

    out
}

fn is_boundary_before(chars: &[char], idx: usize) -> bool {
    idx == 0 || !chars[idx - 1].is_alphabetic()
}

fn is_boundary_after(chars: &[char], idx: usize) -> bool {
    idx >= chars.len() || !chars[idx].is_alphabetic()
}

fn matches_at(chars: &[char], start: usize, name: &[char]) -> bool {
    if start + name.len() > chars.len() {
        return false;
    }
    chars[start..start + name.len()]
        .iter()
        .zip(name)
        .all(|(a, b)| chars_eq_ci(*a, *b))
}

fn chars_eq_ci(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}
