/// Separator placed between words of a slug
const SEPARATOR: char = '-';

/// Derive a URL-safe, lowercase, hyphenated identifier from a display name.
///
/// Letters and digits survive, accented Latin letters are folded to ASCII,
/// whitespace, `-` and `_` collapse into a single `-`, and everything else
/// (apostrophes, punctuation, symbols) is dropped.
pub fn derive_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;

    for ch in name.chars() {
        if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_separator = true;
        } else if ch.is_ascii_alphanumeric() {
            push_word_char(&mut slug, &mut pending_separator, ch.to_ascii_lowercase());
        } else if ch == '@' {
            // "a@b" reads as "a-at-b"
            pending_separator = true;
            push_word_char(&mut slug, &mut pending_separator, 'a');
            push_word_char(&mut slug, &mut pending_separator, 't');
            pending_separator = true;
        } else {
            for folded in fold_latin(ch).chars() {
                push_word_char(&mut slug, &mut pending_separator, folded);
            }
        }
    }

    slug
}

/// Whether `value` is already in canonical slug form
pub fn is_slug(value: &str) -> bool {
    !value.is_empty() && derive_slug(value) == value
}

fn push_word_char(slug: &mut String, pending_separator: &mut bool, ch: char) {
    if *pending_separator && !slug.is_empty() {
        slug.push(SEPARATOR);
    }
    *pending_separator = false;
    slug.push(ch);
}

/// ASCII folding for the Latin letters catalogue names commonly carry.
/// Anything not listed is dropped.
fn fold_latin(ch: char) -> &'static str {
    match ch {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' | 'Ā' => "a",
        'æ' | 'Æ' => "ae",
        'ç' | 'ć' | 'č' | 'Ç' | 'Ć' | 'Č' => "c",
        'ď' | 'đ' | 'Ď' | 'Đ' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ę' | 'ě' | 'È' | 'É' | 'Ê' | 'Ë' | 'Ē' | 'Ę' | 'Ě' => "e",
        'ğ' | 'Ğ' => "g",
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'ı' | 'Ì' | 'Í' | 'Î' | 'Ï' | 'Ī' | 'İ' => "i",
        'ł' | 'Ł' => "l",
        'ñ' | 'ń' | 'ň' | 'Ñ' | 'Ń' | 'Ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' | 'Ō' => "o",
        'œ' | 'Œ' => "oe",
        'ř' | 'Ř' => "r",
        'ś' | 'š' | 'ş' | 'Ś' | 'Š' | 'Ş' => "s",
        'ß' => "ss",
        'ť' | 'ţ' | 'Ť' | 'Ţ' => "t",
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'Ù' | 'Ú' | 'Û' | 'Ü' | 'Ū' | 'Ů' => "u",
        'ý' | 'ÿ' | 'Ý' | 'Ÿ' => "y",
        'ź' | 'ż' | 'ž' | 'Ź' | 'Ż' | 'Ž' => "z",
        _ => "",
    }
}
