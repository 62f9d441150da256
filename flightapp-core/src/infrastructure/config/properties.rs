// flightapp-core/src/infrastructure/config/properties.rs
//
// Reader for Java-style `.properties` files: `key=value`, `key: value` or
// `key value`, `#`/`!` comments, backslash continuations and escapes
// (`\\`, `\=`, `\:`, `\t`, `\uXXXX`, ...) in both keys and values.

use std::collections::HashMap;
use std::iter::Peekable;
use std::str::Chars;

pub fn parse_properties(content: &str) -> HashMap<String, String> {
    let mut props = HashMap::new();
    let mut lines = content.lines();

    while let Some(line) = lines.next() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        // Join continuation lines before splitting key from value.
        let mut logical = trimmed.to_string();
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some(next) => logical.push_str(next.trim_start()),
                None => break,
            }
        }

        let (key, value) = split_entry(&logical);
        props.insert(key, value);
    }

    props
}

/// An odd number of trailing backslashes means the last one escapes the newline.
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// The key ends at the first unescaped `=`, `:` or whitespace. One separator
/// and the whitespace around it are skipped before the value.
fn split_entry(line: &str) -> (String, String) {
    let mut chars = line.chars().peekable();
    let mut key = String::new();
    let mut separator_seen = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => push_escaped(&mut key, &mut chars),
            '=' | ':' => {
                separator_seen = true;
                break;
            }
            c if c.is_whitespace() => break,
            c => key.push(c),
        }
    }

    skip_whitespace(&mut chars);
    if !separator_seen && matches!(chars.peek(), Some('=') | Some(':')) {
        chars.next();
    }
    skip_whitespace(&mut chars);

    let mut value = String::new();
    while let Some(c) = chars.next() {
        match c {
            '\\' => push_escaped(&mut value, &mut chars),
            c => value.push(c),
        }
    }
    (key, value)
}

fn skip_whitespace(chars: &mut Peekable<Chars<'_>>) {
    while chars.next_if(|c| c.is_whitespace()).is_some() {}
}

/// Decodes the character following a backslash. Unknown escapes stand for
/// the character itself; a dangling backslash is dropped.
fn push_escaped(out: &mut String, chars: &mut Peekable<Chars<'_>>) {
    match chars.next() {
        Some('t') => out.push('\t'),
        Some('n') => out.push('\n'),
        Some('r') => out.push('\r'),
        Some('f') => out.push('\u{c}'),
        Some('u') => push_unicode(out, chars),
        Some(other) => out.push(other),
        None => {}
    }
}

fn take_hex4(chars: &mut Peekable<Chars<'_>>) -> Option<u16> {
    let digits: String = chars.clone().take(4).collect();
    if digits.len() != 4 {
        return None;
    }
    let unit = u16::from_str_radix(&digits, 16).ok()?;
    chars.nth(3);
    Some(unit)
}

fn push_unicode(out: &mut String, chars: &mut Peekable<Chars<'_>>) {
    let Some(unit) = take_hex4(chars) else {
        // Malformed: keep the text as written.
        out.push('u');
        return;
    };

    let mut units = vec![unit];
    if (0xD800..=0xDBFF).contains(&unit) {
        // High surrogate: the low half follows as its own `\uXXXX`.
        let mut ahead = chars.clone();
        if ahead.next() == Some('\\') && ahead.next() == Some('u') {
            if let Some(low) = take_hex4(&mut ahead) {
                if (0xDC00..=0xDFFF).contains(&low) {
                    units.push(low);
                    *chars = ahead;
                }
            }
        }
    }

    out.extend(char::decode_utf16(units).map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separators_and_comments() {
        let props = parse_properties(
            "# connection\n\
             ! legacy comment\n\
             \n\
             flightapp.server_url = example.database.windows.net\n\
             flightapp.database_name:flights\n\
             flightapp.username admin\n",
        );
        assert_eq!(props.len(), 3);
        assert_eq!(props["flightapp.server_url"], "example.database.windows.net");
        assert_eq!(props["flightapp.database_name"], "flights");
        assert_eq!(props["flightapp.username"], "admin");
    }

    #[test]
    fn test_value_keeps_inner_separators() {
        let props = parse_properties("flightapp.password=p@ss=word:1 2\n");
        assert_eq!(props["flightapp.password"], "p@ss=word:1 2");
    }

    #[test]
    fn test_continuation_lines() {
        let props = parse_properties("flightapp.server_url=example.\\\n    database.windows.net\n");
        assert_eq!(props["flightapp.server_url"], "example.database.windows.net");
    }

    #[test]
    fn test_escaped_backslash_is_not_a_continuation() {
        let props = parse_properties("a=C:\\\\\nb=2\n");
        assert_eq!(props["a"], "C:\\");
        assert_eq!(props["b"], "2");
    }

    #[test]
    fn test_escapes_in_values() {
        let props = parse_properties(
            "flightapp.password=pa\\\\ss\n\
             flightapp.username=a\\=b\n\
             tabbed=x\\ty\n\
             accent=caf\\u00e9\n\
             emoji=\\uD83D\\uDE00\n\
             broken=\\uZZ\n",
        );
        assert_eq!(props["flightapp.password"], "pa\\ss");
        assert_eq!(props["flightapp.username"], "a=b");
        assert_eq!(props["tabbed"], "x\ty");
        assert_eq!(props["accent"], "caf\u{e9}");
        assert_eq!(props["emoji"], "\u{1F600}");
        assert_eq!(props["broken"], "uZZ");
    }

    #[test]
    fn test_escaped_separators_belong_to_the_key() {
        let props = parse_properties("k\\:ey=v\nwith\\ space = w\nk\\=2:x\n");
        assert_eq!(props["k:ey"], "v");
        assert_eq!(props["with space"], "w");
        assert_eq!(props["k=2"], "x");
    }

    #[test]
    fn test_only_one_separator_is_skipped() {
        let props = parse_properties("key = =value\nbare\n");
        assert_eq!(props["key"], "=value");
        assert_eq!(props["bare"], "");
    }

    #[test]
    fn test_later_keys_win_and_empty_values_are_kept() {
        let props = parse_properties("k=1\nk=2\nempty=\n");
        assert_eq!(props["k"], "2");
        assert_eq!(props["empty"], "");
    }
}
