/// Trims surrounding whitespace and drops every `<` and `>`.
///
/// `None` stands for a value that was not a string and yields an empty
/// string. Other HTML-significant characters (`&`, quotes) pass through.
/// Whitespace uncovered by the bracket removal is trimmed as well, which keeps
/// `sanitize(sanitize(x)) == sanitize(x)`.
pub fn sanitize(input: Option<&str>) -> String {
    let Some(s) = input else {
        return String::new();
    };
    let stripped: String = s.trim().chars().filter(|c| !matches!(c, '<' | '>')).collect();
    stripped.trim().to_string()
}
