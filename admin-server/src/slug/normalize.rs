use unicode_normalization::UnicodeNormalization;

/// Lowercase with Turkish casing: `İ` → `i`, `I` → `ı`
fn push_lowercase_tr(c: char, out: &mut String) {
    match c {
        'İ' => out.push('i'),
        'I' => out.push('ı'),
        _ => out.extend(c.to_lowercase()),
    }
}

/// ASCII stand-ins for Turkish letters without a plain decomposition
fn fold_turkish(c: char) -> char {
    match c {
        'ı' => 'i',
        'ğ' => 'g',
        'ü' => 'u',
        'ş' => 's',
        'ö' => 'o',
        'ç' => 'c',
        _ => c,
    }
}

fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

/// Map free text to a URL-safe slug
///
/// Total: never fails, and input without any usable character yields an
/// empty string. Applying it twice gives the same result as applying it once.
///
/// ```
/// use admin_server::slug::normalize;
///
/// assert_eq!(normalize("Çocuk Kitapları"), "cocuk-kitaplari");
/// assert_eq!(normalize("  İNDİRİM  -- Ürünleri! "), "indirim-urunleri");
/// ```
pub fn normalize(input: &str) -> String {
    let mut lowered = String::with_capacity(input.len());
    for c in input.chars() {
        push_lowercase_tr(c, &mut lowered);
    }

    let folded: String = lowered
        .chars()
        .map(fold_turkish)
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    let mut slug = String::with_capacity(folded.len());
    let mut in_whitespace = false;
    for c in folded.trim().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            slug.push(c);
        }
    }

    collapse_hyphens(&slug)
}

/// Collapse `-` runs and trim hyphens from both ends
fn collapse_hyphens(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c == '-' && (out.is_empty() || out.ends_with('-')) {
            continue;
        }
        out.push(c);
    }
    if out.ends_with('-') {
        out.pop();
    }
    out
}

/// `^[a-z0-9]+(-[a-z0-9]+)*$`
pub fn is_valid(slug: &str) -> bool {
    !slug.is_empty()
        && slug.split('-').all(|part| {
            !part.is_empty()
                && part
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        })
}
