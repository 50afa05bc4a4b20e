/// Component name normalisation.
///
/// Tag names in Vue templates are usually written in kebab-case
/// (`<my-button>`) while the script side binds them in PascalCase
/// (`import MyButton from ...`).  Both sides are pushed through
/// [`normalize_component_name`] before they are compared.

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Convert a raw token into its canonical component name.
///
/// Every hyphen run followed by a word character is removed and that
/// character is upper-cased; then the first character of the result is
/// upper-cased.  `"my-button"` becomes `"MyButton"`, `"icon"` becomes
/// `"Icon"`.  Applying the function twice gives the same result as
/// applying it once.
pub fn normalize_component_name(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '-' {
            let mut j = i;
            while j < chars.len() && chars[j] == '-' {
                j += 1;
            }
            if j < chars.len() && is_word_char(chars[j]) {
                out.extend(chars[j].to_uppercase());
                i = j + 1;
            } else {
                // Hyphens not followed by a word character are kept.
                out.extend(&chars[i..j]);
                i = j;
            }
            continue;
        }
        out.push(chars[i]);
        i += 1;
    }

    let mut rest = out.chars();
    match rest.next() {
        Some(first) => first.to_uppercase().chain(rest).collect(),
        None => out,
    }
}
