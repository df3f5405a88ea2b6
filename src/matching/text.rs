//! Tolerant free-text answer matching.

/// Check whether a generated answer matches the oracle answer.
///
/// Both sides are lowercased and a single trailing period is stripped from
/// the generated answer. After normalization the answers match if any of the
/// following hold:
///
/// - exact equality
/// - the oracle is `"yes"` or `"no"` and the generated answer starts with it
/// - the generated answer is `"more "` + oracle (`"more blue"` for `"blue"`)
/// - the generated answer is `"larger"` and the oracle is `"bigger"`
/// - either side equals `"top "` + the other (`"top left"` for `"left"`)
///
/// No other normalization is applied, so `"no idea"` matches the oracle
/// `"no"` via the prefix rule. A generated answer shorter than a prefix can
/// never match it but never panics.
#[must_use]
pub fn fuzzy_match(generated: &str, oracle: &str) -> bool {
    let oracle = oracle.to_lowercase();
    let mut generated = generated.to_lowercase();
    if generated.ends_with('.') {
        generated.pop();
    }

    if generated == oracle {
        return true;
    }
    if oracle == "yes" && generated.starts_with("yes") {
        return true;
    }
    if oracle == "no" && generated.starts_with("no") {
        return true;
    }
    if generated == format!("more {oracle}") {
        return true;
    }
    if generated == "larger" && oracle == "bigger" {
        return true;
    }
    if generated == format!("top {oracle}") || oracle == format!("top {generated}") {
        return true;
    }
    false
}
