//! Server-side HTML pages
//!
//! Every page goes through [`layout`], which adds the sidebar with the
//! search box and navigation links. All interpolated text is escaped.

use std::fmt::Write;

use encyclopedia_core::ValidationErrors;

const STYLE: &str = r#"
body { margin: 0; font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; display: flex; }
nav.sidebar { width: 220px; min-height: 100vh; background: #f0f0f0; padding: 20px; box-sizing: border-box; }
nav.sidebar h2 { margin-top: 0; }
nav.sidebar input[type=search] { width: 100%; box-sizing: border-box; }
nav.sidebar ul { list-style: none; padding: 0; }
nav.sidebar li { margin: 6px 0; }
main { flex: 1; padding: 20px 40px; max-width: 900px; }
.errors { color: #a00; }
.notice { background: #fff4d6; border: 1px solid #e0c060; padding: 10px; }
textarea { width: 100%; min-height: 320px; font-family: monospace; }
input.title { width: 100%; }
"#;

/// Wrap `body` in the shared page chrome
pub fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
<nav class="sidebar">
<h2>Wiki</h2>
<form action="/search" method="get">
<input type="search" name="q" placeholder="Search Encyclopedia" aria-label="Search">
</form>
<ul>
<li><a href="/">Home</a></li>
<li><a href="/newpage">Create New Page</a></li>
<li><a href="/randomarticle">Random Page</a></li>
</ul>
</nav>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape_html(title),
    )
}

pub fn index(titles: &[String]) -> String {
    let mut body = String::from("<h1>All Pages</h1>\n");
    if titles.is_empty() {
        body.push_str(r#"<p>No entries yet. <a href="/newpage">Create the first one.</a></p>"#);
    } else {
        body.push_str(&title_list(titles));
    }
    layout("Encyclopedia", &body)
}

pub fn article(title: &str, content_html: &str) -> String {
    let body = format!(
        "{content_html}\n<p><a href=\"{edit}\">Edit this page</a></p>",
        edit = edit_href(title),
    );
    layout(title, &body)
}

pub fn not_found(title: &str) -> String {
    let body = format!(
        "<h1>Page Not Found</h1>\n<p>There is no entry titled <strong>{title}</strong>.</p>\n\
         <p><a href=\"/newpage\">Create a new page</a></p>",
        title = escape_html(title),
    );
    layout("Page Not Found", &body)
}

pub fn search_results(term: &str, matches: &[String]) -> String {
    let mut body = format!(
        "<h1>Search Results</h1>\n<p>Results for <strong>{}</strong>:</p>\n",
        escape_html(term)
    );
    if matches.is_empty() {
        body.push_str("<p>No results.</p>");
    } else {
        body.push_str(&title_list(matches));
    }
    layout("Search Results", &body)
}

/// Values and problems to show in the create form
#[derive(Debug, Default)]
pub struct NewPageView<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub errors: Option<&'a ValidationErrors>,
    /// Stored title that clashes with the submitted one
    pub existing: Option<&'a str>,
}

pub fn new_page(view: &NewPageView<'_>) -> String {
    let mut body = String::from("<h1>Create New Page</h1>\n");
    if let Some(existing) = view.existing {
        let _ = write!(
            body,
            "<div class=\"notice\">An entry titled <a href=\"{href}\">{title}</a> already exists. \
             <a href=\"{edit}\">Edit it instead?</a></div>\n",
            href = wiki_href(existing),
            title = escape_html(existing),
            edit = edit_href(existing),
        );
    }
    let _ = write!(
        body,
        "<form action=\"/newpage\" method=\"post\">\n\
         {title_errors}<p><input class=\"title\" type=\"text\" name=\"title\" value=\"{title}\" placeholder=\"Title of the entry\"></p>\n\
         {content_errors}<p><textarea name=\"content\" placeholder=\"Write your complete Markdown text here\">{content}</textarea></p>\n\
         <p><button type=\"submit\">Save</button></p>\n</form>",
        title_errors = field_errors(view.errors, "title"),
        title = escape_html(view.title),
        content_errors = field_errors(view.errors, "content"),
        content = escape_html(view.content),
    );
    layout("Create New Page", &body)
}

pub fn edit_page(title: &str, content: &str, errors: Option<&ValidationErrors>) -> String {
    let body = format!(
        "<h1>Edit {heading}</h1>\n<form action=\"{action}\" method=\"post\">\n\
         {content_errors}<p><textarea name=\"content\">{content}</textarea></p>\n\
         <p><button type=\"submit\">Save</button> <a href=\"{back}\">Cancel</a></p>\n</form>",
        heading = escape_html(title),
        action = edit_href(title),
        content_errors = field_errors(errors, "content"),
        content = escape_html(content),
        back = wiki_href(title),
    );
    layout(&format!("Edit {title}"), &body)
}

/// A page holding one heading and one message
pub fn message(heading: &str, text: &str) -> String {
    let body = format!(
        "<h1>{}</h1>\n<p>{}</p>",
        escape_html(heading),
        escape_html(text)
    );
    layout(heading, &body)
}

pub fn wiki_href(title: &str) -> String {
    format!("/wiki/{}", urlencoding::encode(title))
}

pub fn edit_href(title: &str) -> String {
    format!("/editpage/{}", urlencoding::encode(title))
}

fn title_list(titles: &[String]) -> String {
    let mut list = String::from("<ul>\n");
    for title in titles {
        let _ = writeln!(
            list,
            "<li><a href=\"{}\">{}</a></li>",
            wiki_href(title),
            escape_html(title)
        );
    }
    list.push_str("</ul>");
    list
}

fn field_errors(errors: Option<&ValidationErrors>, field: &str) -> String {
    let Some(errors) = errors else {
        return String::new();
    };
    errors
        .for_field(field)
        .map(|e| format!("<p class=\"errors\">{}</p>\n", escape_html(&e.to_string())))
        .collect()
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
