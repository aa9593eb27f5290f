use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

/// Render entry Markdown to an HTML fragment.
///
/// Raw HTML in the source is shown as text, and links or images with
/// schemes other than http(s), mailto (links only) or relative paths are
/// neutralised.
pub fn render_markdown_html(content: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);

    let parser = Parser::new_ext(content, options).map(|event| match event {
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: sanitize_destination(dest_url, true, "#"),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: sanitize_destination(dest_url, false, ""),
            title,
            id,
        }),
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut output = String::new();
    html::push_html(&mut output, parser);
    output
}

fn sanitize_destination<'a>(
    dest_url: CowStr<'a>,
    allow_mailto: bool,
    replacement: &'static str,
) -> CowStr<'a> {
    if is_safe_destination(&dest_url, allow_mailto) {
        dest_url
    } else {
        CowStr::Borrowed(replacement)
    }
}

fn is_safe_destination(value: &str, allow_mailto: bool) -> bool {
    let lower = value.trim().to_ascii_lowercase();
    if lower.is_empty() {
        return true;
    }
    if lower.starts_with("//") {
        return false;
    }
    if lower.starts_with('#')
        || lower.starts_with('/')
        || lower.starts_with("./")
        || lower.starts_with("../")
        || lower.starts_with("http://")
        || lower.starts_with("https://")
        || (allow_mailto && lower.starts_with("mailto:"))
    {
        return true;
    }

    // Anything else with a scheme (javascript:, data:, ...) is rejected
    !lower.contains(':')
}
