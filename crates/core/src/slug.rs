//! URL-safe slug generation for packages and articles.
//!
//! Slugs are always recomputed from the current title on create and update,
//! never preserved from a prior value.

/// Generate a URL-safe slug from a title.
///
/// Lowercases, strips Latin diacritics, replaces every other non-alphanumeric
/// character with a hyphen, collapses consecutive hyphens, and trims
/// leading/trailing hyphens.
pub fn generate_slug(title: &str) -> String {
    let folded: String = title
        .to_lowercase()
        .chars()
        .map(|c| fold_diacritic(c).unwrap_or(c))
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();

    // Collapse consecutive hyphens.
    let mut result = String::with_capacity(folded.len());
    let mut prev_hyphen = false;
    for c in folded.chars() {
        if c == '-' {
            if !prev_hyphen {
                result.push('-');
            }
            prev_hyphen = true;
        } else {
            result.push(c);
            prev_hyphen = false;
        }
    }

    result.trim_matches('-').to_string()
}

/// Map a lowercase Latin-1 accented character to its ASCII base letter.
///
/// Covers the accented characters that appear in Portuguese and Spanish
/// content (the site's primary languages). Anything else passes through.
fn fold_diacritic(c: char) -> Option<char> {
    let base = match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        'ý' | 'ÿ' => 'y',
        _ => return None,
    };
    Some(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_title() {
        assert_eq!(generate_slug("Paris Getaway"), "paris-getaway");
    }

    #[test]
    fn test_diacritics_stripped() {
        assert_eq!(generate_slug("São Paulo Férias"), "sao-paulo-ferias");
        assert_eq!(generate_slug("Excursión a La Coruña"), "excursion-a-la-coruna");
    }

    #[test]
    fn test_special_characters_collapse() {
        assert_eq!(generate_slug("Beach & Sun -- 2024!"), "beach-sun-2024");
    }

    #[test]
    fn test_leading_trailing_hyphens_trimmed() {
        assert_eq!(generate_slug("  ¡Hola!  "), "hola");
    }

    #[test]
    fn test_empty_title_yields_empty_slug() {
        assert_eq!(generate_slug(""), "");
        assert_eq!(generate_slug("!!!"), "");
    }
}
