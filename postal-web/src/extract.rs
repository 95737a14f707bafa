//! Markup to plain text for address matching.
//!
//! A tolerant scanner rather than a DOM parser. Quoted attribute values may
//! contain `>`. Only `&amp; &lt; &gt; &quot; &apos; &nbsp;` and numeric
//! references are decoded; any other named entity stays as written.

/// Elements whose content never reaches the text output.
const DROPPED: &[&str] = &["head", "noscript", "script", "style", "template"];

/// Elements that start a new line.
const BLOCK: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "br", "caption", "dd", "div", "dl", "dt",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hr", "html", "li", "main", "nav", "ol", "p", "pre", "section", "table", "tbody",
    "td", "tfoot", "th", "thead", "title", "tr", "ul",
];

/// Plain text of an HTML document, one line per block.
///
/// ```
/// use postal_web::html_to_text;
///
/// let html = "<html><head><title>x</title></head><body>\
///             <p>Acme &amp; Sons</p><p>1 Main St<br>Dover, DE 19901</p></body></html>";
/// assert_eq!(html_to_text(html), "Acme & Sons\n1 Main St\nDover, DE 19901");
/// ```
pub fn html_to_text(html: &str) -> String {
    let mut raw = String::with_capacity(html.len() / 2);
    let mut rest = html;

    while let Some(lt) = rest.find('<') {
        push_decoded(&mut raw, &rest[..lt]);
        rest = &rest[lt..];

        if let Some(after) = rest.strip_prefix("<!--") {
            rest = after.find("-->").map_or("", |end| &after[end + 3..]);
            continue;
        }

        // A bare '<' in text, e.g. "a < b".
        let opens_tag = rest[1..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?'));
        if !opens_tag {
            raw.push('<');
            rest = &rest[1..];
            continue;
        }

        let Some(gt) = tag_end(rest) else {
            rest = "";
            break;
        };
        let tag = &rest[1..gt];
        rest = &rest[gt + 1..];

        let closing = tag.starts_with('/');
        let name = tag_name(tag);
        if !closing && !tag.ends_with('/') && DROPPED.contains(&name.as_str()) {
            rest = skip_element(rest, &name);
            raw.push('\n');
            continue;
        }
        if BLOCK.contains(&name.as_str()) {
            raw.push('\n');
        }
    }
    push_decoded(&mut raw, rest);

    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Offset of the `>` closing the tag that opens `rest`.
fn tag_end(rest: &str) -> Option<usize> {
    let mut quote = None;
    let mut prev = '<';
    for (i, c) in rest.char_indices().skip(1) {
        match (quote, c) {
            // Only values right after `=` are quoted; a stray apostrophe is text.
            (None, '"' | '\'') if prev == '=' => quote = Some(c),
            (Some(q), c) if c == q => quote = None,
            (None, '>') => return Some(i),
            _ => {}
        }
        if !c.is_whitespace() {
            prev = c;
        }
    }
    None
}

fn tag_name(tag: &str) -> String {
    tag.trim_start_matches('/')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Everything after the matching `</name>`, or nothing if it never closes.
fn skip_element<'a>(rest: &'a str, name: &str) -> &'a str {
    // ASCII lowercasing keeps byte offsets stable.
    let lower = rest.to_ascii_lowercase();
    let needle = format!("</{name}");
    let Some(close) = lower.find(&needle) else {
        return "";
    };
    match rest[close..].find('>') {
        Some(gt) => &rest[close + gt + 1..],
        None => "",
    }
}

fn push_decoded(out: &mut String, text: &str) {
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&rest[1..semi]).map(|c| (c, semi)));
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            let num = entity.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripts_styles_and_comments_are_dropped() {
        let html = r#"<body><script type="text/javascript">var zip = "12345";</script>
            <STYLE>p { color: red }</STYLE><!-- 99 Old Road, Reno, NV 89501 -->
            <p>Visible</p><noscript>enable js</noscript></body>"#;
        assert_eq!(html_to_text(html), "Visible");
    }

    #[test]
    fn blocks_become_lines_and_inline_tags_vanish() {
        let html = "<div>One <b>bold</b> <a href=\"/x\">link</a></div><div>Two</div>\
                    <ul><li>a</li><li>b</li></ul>";
        assert_eq!(html_to_text(html), "One bold link\nTwo\na\nb");
    }

    #[test]
    fn adjacent_blocks_do_not_fuse() {
        assert_eq!(html_to_text("<td>Suite 5</td><td>Boise</td>"), "Suite 5\nBoise");
        assert_eq!(html_to_text("Street<br/>City"), "Street\nCity");
    }

    #[test]
    fn entities_are_decoded() {
        let html = "<p>A&amp;B &lt;tag&gt; &quot;q&quot; it&apos;s&nbsp;ok &#35;7 &#x41;</p>";
        assert_eq!(html_to_text(html), "A&B <tag> \"q\" it's ok #7 A");
    }

    #[test]
    fn unknown_entities_and_stray_ampersands_stay_literal() {
        assert_eq!(html_to_text("<p>R&D &copy; &bogus</p>"), "R&D &copy; &bogus");
    }

    #[test]
    fn bare_angle_brackets_in_text_survive() {
        assert_eq!(html_to_text("<p>1 < 2</p>"), "1 < 2");
    }

    #[test]
    fn doctype_and_unclosed_dropped_elements() {
        assert_eq!(html_to_text("<!DOCTYPE html><p>Hi</p><script>never closed"), "Hi");
    }

    #[test]
    fn angle_brackets_inside_quoted_attributes_do_not_end_the_tag() {
        let html = r#"<a title="a>b" href='/x?y>z'>Suite 5</a><p data-x = "1>0">Boise</p>"#;
        assert_eq!(html_to_text(html), "Suite 5\nBoise");
    }

    #[test]
    fn stray_apostrophe_in_a_tag_does_not_swallow_the_page() {
        assert_eq!(html_to_text("<p class=it's>Boise</p>"), "Boise");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(html_to_text("just   words\n\n here"), "just words\nhere");
    }
}
