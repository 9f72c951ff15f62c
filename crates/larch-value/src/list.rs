/// Splits `text` into list elements. Elements are separated by runs of
/// whitespace; a braced group `{...}` forms one element with the outer braces
/// stripped and nested braces preserved. Returns `None` when braces are
/// unbalanced.
pub(crate) fn split_list(text: &str) -> Option<Vec<String>> {
    let mut elements = Vec::new();
    let mut chars = text.chars().peekable();

    loop {
        while matches!(chars.peek(), Some(c) if c.is_whitespace()) {
            chars.next();
        }
        let Some(&first) = chars.peek() else {
            return Some(elements);
        };

        let mut element = String::new();
        if first == '{' {
            chars.next();
            let mut depth = 1usize;
            loop {
                let c = chars.next()?; // unbalanced: ran out inside a group
                match c {
                    '{' => depth += 1,
                    '}' => {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    }
                    _ => {}
                }
                element.push(c);
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                if c == '}' {
                    return None; // stray close brace
                }
                element.push(c);
                chars.next();
            }
        }
        elements.push(element);
    }
}
