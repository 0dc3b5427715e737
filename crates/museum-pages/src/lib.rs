//! HTML page rendering for the museum catalog.
//!
//! Turns [`museum_core`] records and graphs into complete HTML documents.
//! Pure synchronous string building; no HTTP or database dependencies. Every
//! piece of catalog text passes through [`escape`] before it reaches markup.
//!
//! # Quick start
//!
//! ```no_run
//! use museum_core::model::Museum;
//!
//! let museums: Vec<Museum> = vec![];
//! let html = museum_pages::museums_list(&museums);
//! assert!(html.starts_with("<!DOCTYPE html>"));
//! ```

mod exhibits;
mod museums;
mod persons;

use chrono::NaiveDate;

pub use exhibits::{exhibit_form, exhibits_index};
pub use museums::{museum_detail, museum_form, museums_list};
pub use persons::{person_detail, person_form, persons_list};

const STYLESHEET: &str =
  "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";

// ─── Escaping ─────────────────────────────────────────────────────────────────

/// Escape text for use in element content and double-quoted attributes.
pub fn escape(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for c in s.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      _ => out.push(c),
    }
  }
  out
}

pub(crate) fn format_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

// ─── Layout ───────────────────────────────────────────────────────────────────

/// Wrap `body` in the shared document shell with navigation.
pub(crate) fn layout(title: &str, body: &str) -> String {
  format!(
    "<!DOCTYPE html>\n\
     <html lang=\"en\">\n\
     <head>\n\
     <meta charset=\"utf-8\">\n\
     <title>{title}</title>\n\
     <link rel=\"stylesheet\" href=\"{STYLESHEET}\">\n\
     </head>\n\
     <body>\n\
     <nav class=\"navbar navbar-expand bg-body-tertiary mb-4\"><div class=\"container\">\n\
     <a class=\"navbar-brand\" href=\"/\">Exhibits</a>\n\
     <a class=\"nav-link\" href=\"/museums\">Museums</a>\n\
     <a class=\"nav-link ms-3\" href=\"/persons\">Persons</a>\n\
     </div></nav>\n\
     <main class=\"container\">\n\
     <h1>{title}</h1>\n\
     {body}\
     </main>\n\
     </body>\n\
     </html>\n",
    title = escape(title),
  )
}

/// A page carrying only a status message, used for 4xx/5xx responses.
pub fn error_page(title: &str, message: &str) -> String {
  layout(
    title,
    &format!("<p class=\"alert alert-danger\">{}</p>\n", escape(message)),
  )
}

// ─── Form fragments ───────────────────────────────────────────────────────────

pub(crate) fn text_input(name: &str, label: &str) -> String {
  format!(
    "<div class=\"mb-3\"><label class=\"form-label\" for=\"{name}\">{label}</label>\
     <input class=\"form-control\" type=\"text\" id=\"{name}\" name=\"{name}\" required></div>\n"
  )
}

pub(crate) fn date_input(name: &str, label: &str, required: bool) -> String {
  let required = if required { " required" } else { "" };
  format!(
    "<div class=\"mb-3\"><label class=\"form-label\" for=\"{name}\">{label}</label>\
     <input class=\"form-control\" type=\"date\" id=\"{name}\" name=\"{name}\"{required}></div>\n"
  )
}

/// A `<select>`; `multiple` renders a multi-select whose values repeat the key.
pub(crate) fn select<'a>(
  name: &str,
  label: &str,
  multiple: bool,
  options: impl IntoIterator<Item = (i64, &'a str)>,
) -> String {
  let mut out = format!(
    "<div class=\"mb-3\"><label class=\"form-label\" for=\"{name}\">{label}</label>\
     <select class=\"form-select\" id=\"{name}\" name=\"{name}\"{}>\n",
    if multiple { " multiple" } else { " required" },
  );
  for (id, text) in options {
    out.push_str(&format!("<option value=\"{id}\">{}</option>\n", escape(text)));
  }
  out.push_str("</select></div>\n");
  out
}

pub(crate) fn form(action: &str, fields: &[String]) -> String {
  let mut out = format!("<form method=\"post\" action=\"{action}\">\n");
  for f in fields {
    out.push_str(f);
  }
  out.push_str("<button class=\"btn btn-primary\" type=\"submit\">Create</button>\n</form>\n");
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn escapes_markup() {
    assert_eq!(
      escape("<b>\"Tom\" & 'Jerry'</b>"),
      "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
    );
    assert_eq!(escape("plain"), "plain");
  }

  #[test]
  fn layout_escapes_title() {
    let html = layout("<x>", "");
    assert!(html.contains("<title>&lt;x&gt;</title>"));
    assert!(!html.contains("<title><x>"));
  }

  #[test]
  fn multi_select_has_no_required() {
    let html = select("persons", "Persons", true, [(1, "A"), (2, "B")]);
    assert!(html.contains(" multiple"));
    assert!(!html.contains("required"));
    assert!(html.contains("<option value=\"2\">B</option>"));
  }

  #[test]
  fn error_page_escapes_message() {
    let html = error_page("Bad Request", "date <script>");
    assert!(html.contains("date &lt;script&gt;"));
  }
}
