/// Escapes a utility token so it can be used verbatim after `.` in a class
/// selector.
pub fn escape_selector(class: &str) -> String {
    let mut escaped = String::with_capacity(class.len() * 2);

    for (idx, ch) in class.chars().enumerate() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            ':' => escaped.push_str("\\:"),
            '/' => escaped.push_str("\\/"),
            '[' => escaped.push_str("\\["),
            ']' => escaped.push_str("\\]"),
            '(' => escaped.push_str("\\("),
            ')' => escaped.push_str("\\)"),
            '&' => escaped.push_str("\\&"),
            '>' => escaped.push_str("\\>"),
            '<' => escaped.push_str("\\<"),
            '+' => escaped.push_str("\\+"),
            '~' => escaped.push_str("\\~"),
            ',' => escaped.push_str("\\,"),
            '%' => escaped.push_str("\\%"),
            '=' => escaped.push_str("\\="),
            '!' => escaped.push_str("\\!"),
            '*' => escaped.push_str("\\*"),
            '@' => escaped.push_str("\\@"),
            '#' => escaped.push_str("\\#"),
            '$' => escaped.push_str("\\$"),
            '?' => escaped.push_str("\\?"),
            '\'' => escaped.push_str("\\'"),
            '"' => escaped.push_str("\\\""),
            '.' => escaped.push_str("\\."),
            ' ' => escaped.push_str("\\ "),
            '0'..='9' if idx == 0 => {
                escaped.push_str(&format!("\\3{} ", ch));
            }
            _ => escaped.push(ch),
        }
    }

    escaped
}
