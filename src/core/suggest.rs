//! Near-miss suggestions for marker names
//!
//! When a requested marker does not resolve, the checker compares it against
//! the tags that do exist and flags close matches, catching the
//! missing-or-extra-character typos that otherwise silently take the
//! "no marker yet" path. Advisory only: suggestions never affect the
//! structured result or the exit status.

/// Find existing names within `max_distance` edits of `requested`.
///
/// Results are ordered by (distance, lexical) so ties between equally close
/// candidates resolve deterministically. Exact matches are excluded; if one
/// existed, resolution would have succeeded.
pub fn suggest_similar(requested: &str, candidates: &[String], max_distance: usize) -> Vec<String> {
  let mut matches: Vec<(usize, String)> = candidates
    .iter()
    .filter_map(|candidate| {
      let dist = levenshtein(requested, candidate);
      (dist > 0 && dist <= max_distance).then(|| (dist, candidate.clone()))
    })
    .collect();

  matches.sort();
  matches.into_iter().map(|(_, name)| name).collect()
}

/// Simple Levenshtein distance implementation.
fn levenshtein(a: &str, b: &str) -> usize {
  let a_chars: Vec<char> = a.chars().collect();
  let b_chars: Vec<char> = b.chars().collect();
  let a_len = a_chars.len();
  let b_len = b_chars.len();

  if a_len == 0 {
    return b_len;
  }
  if b_len == 0 {
    return a_len;
  }

  let mut matrix = vec![vec![0usize; b_len + 1]; a_len + 1];

  for (i, row) in matrix.iter_mut().enumerate() {
    row[0] = i;
  }
  for j in 0..=b_len {
    matrix[0][j] = j;
  }

  for i in 1..=a_len {
    for j in 1..=b_len {
      let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { 1 };
      matrix[i][j] = (matrix[i - 1][j] + 1)
        .min(matrix[i][j - 1] + 1)
        .min(matrix[i - 1][j - 1] + cost);
    }
  }

  matrix[a_len][b_len]
}
