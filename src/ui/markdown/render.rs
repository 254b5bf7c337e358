use pulldown_cmark::{html, Options, Parser};

/// GitHub-flavored extensions bot replies rely on.
pub(super) fn markdown_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

/// Unsanitized HTML for a Markdown body; raw HTML is passed through.
pub(super) fn markdown_to_html(text: &str) -> String {
    let parser = Parser::new_ext(text, markdown_options());
    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
