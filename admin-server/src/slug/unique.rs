use std::collections::HashSet;

/// Return `candidate`, or the first free `candidate-N` (N = 2, 3, ...)
///
/// Comparison is case-insensitive. `current` is the slug the entity already
/// owns when editing; it never counts as taken. An empty candidate stays empty.
/// Probing is linear, so at most `existing.len() + 1` candidates are tried.
pub fn resolve_unique<I, S>(candidate: &str, existing: I, current: Option<&str>) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if candidate.is_empty() {
        return String::new();
    }

    let taken: HashSet<String> = existing
        .into_iter()
        .map(|s| s.as_ref().to_lowercase())
        .collect();
    let current = current.map(str::to_lowercase);
    let is_taken = |slug: &str| {
        let lower = slug.to_lowercase();
        taken.contains(&lower) && current.as_deref() != Some(lower.as_str())
    };

    if !is_taken(candidate) {
        return candidate.to_string();
    }

    let mut suffix: u64 = 2;
    loop {
        let next = format!("{candidate}-{suffix}");
        if !is_taken(&next) {
            return next;
        }
        suffix += 1;
    }
}
