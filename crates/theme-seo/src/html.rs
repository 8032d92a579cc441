//! HTML text helpers.

/// Escape text for use in HTML content or attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum StripState {
    Text,
    Tag(Option<char>),
    Comment,
}

/// Remove HTML tags and comments, keeping text content.
///
/// Entities are left as written. A `<` followed by whitespace (or at the
/// end of input) is text, not the start of a tag.
pub fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut state = StripState::Text;
    let mut rest = input;

    while let Some(c) = rest.chars().next() {
        let len = c.len_utf8();
        match state {
            StripState::Text => {
                if c == '<' {
                    let next = rest[len..].chars().next();
                    if next.map_or(true, char::is_whitespace) {
                        out.push(c);
                    } else if rest.starts_with("<!--") {
                        state = StripState::Comment;
                        rest = &rest[4..];
                        continue;
                    } else {
                        state = StripState::Tag(None);
                    }
                } else {
                    out.push(c);
                }
            }
            StripState::Tag(quote) => match (quote, c) {
                (None, '"') | (None, '\'') => state = StripState::Tag(Some(c)),
                (Some(q), _) if q == c => state = StripState::Tag(None),
                (None, '>') => state = StripState::Text,
                _ => {}
            },
            StripState::Comment => {
                if rest.starts_with("-->") {
                    state = StripState::Text;
                    rest = &rest[3..];
                    continue;
                }
            }
        }
        rest = &rest[len..];
    }

    out
}
