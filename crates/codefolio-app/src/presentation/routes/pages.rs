use axum::extract::Query;
use axum::response::Html;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PageParams {
    message: Option<String>,
}

pub async fn success(Query(params): Query<PageParams>) -> Html<String> {
    render("Success", params.message.as_deref().unwrap_or("Done"))
}

pub async fn error(Query(params): Query<PageParams>) -> Html<String> {
    render(
        "Error",
        params.message.as_deref().unwrap_or("Something went wrong"),
    )
}

fn render(title: &str, message: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body style=\"font-family:sans-serif;text-align:center;margin-top:4rem\">\n\
         <h1>{title}</h1>\n<p>{message}</p>\n</body>\n</html>\n",
        title = title,
        message = escape_html(message),
    ))
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<script>alert('x')</script> & \"y\""),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; &quot;y&quot;"
        );
    }
}
