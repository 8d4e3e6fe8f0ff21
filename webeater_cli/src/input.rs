/// Per request flags and the url they apply to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Request {
    pub url: String,
    pub json: bool,
    pub content_only: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Quit,
    Empty,
    Invalid(String),
    Fetch(Request),
}

pub fn is_valid_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Interpret one line of the interactive prompt.
///
/// `q` quits. A url may be prefixed with `j!` for JSON output, `c!` for
/// content only, or `jc!` / `cj!` for both.
pub fn parse_input(line: &str) -> Input {
    let mut rest = line.trim();
    if rest.eq_ignore_ascii_case("q") {
        return Input::Quit;
    }

    let mut request = Request::default();

    if let Some(stripped) = strip_flag(rest, "j!") {
        request.json = true;
        rest = stripped;
    }
    if let Some(stripped) = strip_flag(rest, "c!") {
        request.content_only = true;
        rest = stripped;
    }
    if let Some(stripped) = strip_flag(rest, "jc!").or_else(|| strip_flag(rest, "cj!")) {
        request.json = true;
        request.content_only = true;
        rest = stripped;
    }

    if rest.is_empty() {
        return Input::Empty;
    }
    if !is_valid_url(rest) {
        return Input::Invalid(rest.to_owned());
    }

    request.url = rest.to_owned();
    Input::Fetch(request)
}

fn strip_flag<'a>(input: &'a str, flag: &str) -> Option<&'a str> {
    let prefix = input.get(..flag.len())?;
    if prefix.eq_ignore_ascii_case(flag) {
        Some(input[flag.len()..].trim_start())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_input, Input, Request};

    fn fetch(url: &str, json: bool, content_only: bool) -> Input {
        Input::Fetch(Request {
            url: url.into(),
            json,
            content_only,
        })
    }

    #[test]
    fn quit_and_empty() {
        assert_eq!(parse_input("q"), Input::Quit);
        assert_eq!(parse_input(" Q \n"), Input::Quit);
        assert_eq!(parse_input(""), Input::Empty);
        assert_eq!(parse_input("   "), Input::Empty);
        assert_eq!(parse_input("j!"), Input::Empty);
    }

    #[test]
    fn plain_url() {
        assert_eq!(
            parse_input("https://example.com\n"),
            fetch("https://example.com", false, false)
        );
    }

    #[test]
    fn flags() {
        assert_eq!(
            parse_input("j! https://example.com"),
            fetch("https://example.com", true, false)
        );
        assert_eq!(
            parse_input("C!http://example.com"),
            fetch("http://example.com", false, true)
        );
        assert_eq!(
            parse_input("jc! https://example.com"),
            fetch("https://example.com", true, true)
        );
        assert_eq!(
            parse_input("cj!https://example.com"),
            fetch("https://example.com", true, true)
        );
        assert_eq!(
            parse_input("j!c! https://example.com"),
            fetch("https://example.com", true, true)
        );
    }

    #[test]
    fn invalid_url() {
        assert_eq!(
            parse_input("example.com"),
            Input::Invalid("example.com".into())
        );
        assert_eq!(
            parse_input("j! ftp://example.com"),
            Input::Invalid("ftp://example.com".into())
        );
    }
}
