//! Forename token similarity.
//!
//! Forenames are compared as bags of tokens so that word order and
//! abbreviation ("J. Robert" vs "John Robert") do not dominate the score.

/// Split a forename into lowercase tokens on whitespace and punctuation
#[must_use]
pub fn tokenize(forename: &str) -> Vec<String> {
    forename
        .split(|c: char| c.is_whitespace() || matches!(c, '.' | ',' | '-' | '(' | ')'))
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// A single-letter token matches any token starting with that letter
fn tokens_match(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    let is_initial = |t: &str| t.chars().count() == 1;
    match (is_initial(a), is_initial(b)) {
        (true, false) => b.starts_with(a),
        (false, true) => a.starts_with(b),
        _ => false,
    }
}

/// Dice coefficient over forename tokens, pairing each token at most once.
///
/// Returns NaN when neither side has any tokens and 0.0 when only one does.
#[must_use]
pub fn token_similarity(a: &str, b: &str) -> f64 {
    let a_tokens = tokenize(a);
    let b_tokens = tokenize(b);

    match (a_tokens.is_empty(), b_tokens.is_empty()) {
        (true, true) => return f64::NAN,
        (true, false) | (false, true) => return 0.0,
        (false, false) => {}
    }

    // Exact matches claim partners first so an initial cannot steal a full token
    let mut used = vec![false; b_tokens.len()];
    let mut a_matched = vec![false; a_tokens.len()];
    let mut matched = 0usize;

    for (i, token) in a_tokens.iter().enumerate() {
        if let Some(j) = (0..b_tokens.len()).find(|&j| !used[j] && b_tokens[j] == *token) {
            used[j] = true;
            a_matched[i] = true;
            matched += 1;
        }
    }
    for (i, token) in a_tokens.iter().enumerate() {
        if a_matched[i] {
            continue;
        }
        if let Some(j) =
            (0..b_tokens.len()).find(|&j| !used[j] && tokens_match(token, &b_tokens[j]))
        {
            used[j] = true;
            matched += 1;
        }
    }

    // Token counts are tiny, so the usize to f64 conversion is exact
    #[allow(clippy::cast_precision_loss)]
    {
        (2 * matched) as f64 / (a_tokens.len() + b_tokens.len()) as f64
    }
}
