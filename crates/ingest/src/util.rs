use std::collections::BTreeSet;

/// Indel (insert/delete-only) edit distance using the two-row O(min(m,n))
/// space algorithm.
fn indel_distance(s1: &str, s2: &str) -> usize {
    let a = s1.as_bytes();
    let b = s2.as_bytes();
    let (m, n) = (a.len(), b.len());

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Keep the shorter string in the inner loop to minimise allocation.
    let (a, b, m, n) = if m <= n { (a, b, m, n) } else { (b, a, n, m) };

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0usize; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            curr[j] = if a[i - 1] == b[j - 1] {
                prev[j - 1]
            } else {
                (prev[j] + 1).min(curr[j - 1] + 1)
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Normalised indel similarity in [0, 100].
fn ratio(s1: &str, s2: &str) -> f64 {
    let total = s1.len() + s2.len();
    if total == 0 {
        return 100.0;
    }
    100.0 * (total - indel_distance(s1, s2)) as f64 / total as f64
}

/// Token-set similarity in [0, 100]: insensitive to token order and to one
/// side's tokens being a subset of the other's.
///
/// Both strings are split into unique sorted tokens; the score is the best
/// pairwise ratio among the token intersection and the intersection extended
/// with each side's leftover tokens. A shared-token subset therefore scores
/// a clean 100 even when the longer side carries extra words.
pub(crate) fn token_set_ratio(s1: &str, s2: &str) -> f64 {
    let t1: BTreeSet<&str> = s1.split_whitespace().collect();
    let t2: BTreeSet<&str> = s2.split_whitespace().collect();
    if t1.is_empty() || t2.is_empty() {
        return 0.0;
    }

    let diff1: Vec<&str> = t1.difference(&t2).copied().collect();
    let diff2: Vec<&str> = t2.difference(&t1).copied().collect();
    let sect = t1.intersection(&t2).copied().collect::<Vec<_>>().join(" ");

    let combined1 = join_tokens(&sect, &diff1);
    let combined2 = join_tokens(&sect, &diff2);

    [
        ratio(&sect, &combined1),
        ratio(&sect, &combined2),
        ratio(&combined1, &combined2),
    ]
    .into_iter()
    .fold(0.0_f64, f64::max)
}

fn join_tokens(sect: &str, diff: &[&str]) -> String {
    if diff.is_empty() {
        sect.to_string()
    } else if sect.is_empty() {
        diff.join(" ")
    } else {
        format!("{sect} {}", diff.join(" "))
    }
}
