//! Display name to identifier normalization

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Convert a display name into a camel-case identifier.
///
/// Accents are stripped first (`estación` gives `estacion`). Words break on
/// any non-alphanumeric character, on lower-to-upper transitions, before the
/// last capital of an acronym (`XMLHttp` gives `XML` and `Http`) and between
/// letters and digits, except that ordinals such as `1st` or `4TH` stay one
/// word. Apostrophes are removed so contractions stay one word.
///
/// ```
/// use dataset_query::schema::to_camel_case;
///
/// assert_eq!(to_camel_case("Station ID"), "stationId");
/// assert_eq!(to_camel_case("available_bike_stands"), "availableBikeStands");
/// ```
pub fn to_camel_case(display: &str) -> String {
    let mut out = String::with_capacity(display.len());

    for (i, word) in split_words(display).iter().enumerate() {
        let lower = word.to_lowercase();
        if i == 0 {
            out.push_str(&lower);
            continue;
        }
        let mut chars = lower.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }

    out
}

/// Split a display name into words
pub fn split_words(display: &str) -> Vec<String> {
    let cleaned: String = deburr(display)
        .chars()
        .filter(|c| *c != '\'' && *c != '\u{2019}')
        .collect();

    let mut words = Vec::new();
    for chunk in cleaned.split(|c: char| !c.is_alphanumeric()) {
        split_chunk(chunk, &mut words);
    }
    words
}

/// Strip diacritics and expand the Latin letters that have no decomposition
pub fn deburr(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.nfd().filter(|c| !is_combining_mark(*c)) {
        match c {
            'ß' => out.push_str("ss"),
            'æ' => out.push_str("ae"),
            'Æ' => out.push_str("Ae"),
            'œ' => out.push_str("oe"),
            'Œ' => out.push_str("Oe"),
            'þ' => out.push_str("th"),
            'Þ' => out.push_str("Th"),
            'ø' => out.push('o'),
            'Ø' => out.push('O'),
            'đ' | 'ð' => out.push('d'),
            'Đ' | 'Ð' => out.push('D'),
            'ł' => out.push('l'),
            'Ł' => out.push('L'),
            'ı' => out.push('i'),
            _ => out.push(c),
        }
    }
    out
}

fn split_chunk(chunk: &str, words: &mut Vec<String>) {
    let chars: Vec<char> = chunk.chars().collect();
    let mut current = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if let Some(&prev) = i.checked_sub(1).and_then(|p| chars.get(p)) {
            let next = chars.get(i + 1).copied();
            if is_boundary(prev, c, next) && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        }

        if let Some(len) = ordinal_len(&chars[i..]) {
            current.extend(&chars[i..i + len]);
            i += len;
            continue;
        }

        current.push(c);
        i += 1;
    }

    if !current.is_empty() {
        words.push(current);
    }
}

/// Length of an ordinal (`1st`, `22ND`, `4th`) at the start of `chars`
///
/// The suffix must agree with the last digit and be followed by the end of
/// the chunk or a change of case.
fn ordinal_len(chars: &[char]) -> Option<usize> {
    let digits = chars.iter().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let suffix = chars.get(digits..digits + 2)?;
    let lower = suffix.iter().all(char::is_ascii_lowercase);
    let upper = suffix.iter().all(char::is_ascii_uppercase);
    if !lower && !upper {
        return None;
    }

    let expected = match chars[digits - 1] {
        '1' => "st",
        '2' => "nd",
        '3' => "rd",
        _ => "th",
    };
    let found: String = suffix.iter().map(char::to_ascii_lowercase).collect();
    if found != expected {
        return None;
    }

    let ends_word = match chars.get(digits + 2) {
        None => true,
        Some(c) if lower => c.is_uppercase(),
        Some(c) => c.is_lowercase(),
    };
    ends_word.then_some(digits + 2)
}

fn is_boundary(prev: char, c: char, next: Option<char>) -> bool {
    let lower_to_upper = prev.is_lowercase() && c.is_uppercase();
    let acronym_end =
        prev.is_uppercase() && c.is_uppercase() && next.is_some_and(char::is_lowercase);
    let digit_edge = prev.is_numeric() != c.is_numeric();

    lower_to_upper || acronym_end || digit_edge
}
