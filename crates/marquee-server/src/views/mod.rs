//! Server-side HTML rendering with Tera
//!
//! Templates live in `templates/` and are loaded once at startup. Every
//! `*.html.tera` template is autoescaped.

pub mod cast;
pub mod celebrities;
pub mod movies;
pub mod users;

use crate::error::AppError;
use axum::http::StatusCode;
use axum::response::Html;
use marquee_core::FieldErrors;
use serde::Serialize;
use tera::{Context, Tera};

const TEMPLATE_GLOB: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*.html.tera");

/// Loaded page templates
pub struct Views {
    tera: Tera,
}

impl Views {
    pub fn load() -> Result<Self, tera::Error> {
        let mut tera = Tera::new(TEMPLATE_GLOB)?;
        tera.autoescape_on(vec![".html.tera"]);
        tracing::info!("Loaded {} templates", tera.get_template_names().count());
        Ok(Self { tera })
    }

    pub(crate) fn render(&self, template: &str, context: &Context) -> Result<Html<String>, AppError> {
        Ok(Html(self.tera.render(template, context)?))
    }
}

/// Context with the page title set
pub(crate) fn context(title: &str) -> Context {
    let mut context = Context::new();
    context.insert("title", title);
    context
}

/// Context for a form page: title, fields and the error summary
pub(crate) fn form_context(title: &str, fields: &[Field<'_>], errors: &FieldErrors) -> Context {
    let mut context = context(title);
    context.insert("fields", fields);
    context.insert("errors", errors);
    context
}

/// One form control as the `field.html.tera` partial expects it
#[derive(Debug, Serialize)]
pub(crate) struct Field<'a> {
    name: &'a str,
    label: &'a str,
    kind: &'static str,
    value: &'a str,
    error: Option<&'a str>,
    options: Vec<Choice<'a>>,
}

#[derive(Debug, Serialize)]
struct Choice<'a> {
    value: &'a str,
    text: &'a str,
    selected: bool,
}

impl<'a> Field<'a> {
    fn new(
        kind: &'static str,
        name: &'a str,
        label: &'a str,
        value: &'a str,
        errors: &'a FieldErrors,
    ) -> Self {
        Self {
            name,
            label,
            kind,
            value,
            error: errors.get(name),
            options: Vec::new(),
        }
    }

    pub(crate) fn text(name: &'a str, label: &'a str, value: &'a str, errors: &'a FieldErrors) -> Self {
        Self::new("text", name, label, value, errors)
    }

    pub(crate) fn textarea(
        name: &'a str,
        label: &'a str,
        value: &'a str,
        errors: &'a FieldErrors,
    ) -> Self {
        Self::new("textarea", name, label, value, errors)
    }

    /// Password inputs never echo a value back
    pub(crate) fn password(name: &'a str, label: &'a str, errors: &'a FieldErrors) -> Self {
        Self::new("password", name, label, "", errors)
    }

    /// A `<select>` over `(value, text)` options
    pub(crate) fn select<I>(
        name: &'a str,
        label: &'a str,
        options: I,
        selected: &'a str,
        errors: &'a FieldErrors,
    ) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut field = Self::new("select", name, label, selected, errors);
        field.options = options
            .into_iter()
            .map(|(value, text)| Choice {
                value,
                text,
                selected: value == selected,
            })
            .collect();
        field
    }
}

pub fn home(views: &Views) -> Result<Html<String>, AppError> {
    views.render("home.html.tera", &context("Home"))
}

pub fn error_page(views: &Views, status: StatusCode, message: &str) -> Result<Html<String>, AppError> {
    let mut context = context(status.canonical_reason().unwrap_or("Error"));
    context.insert("status_code", &status.as_u16());
    context.insert("message", message);
    views.render("error.html.tera", &context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_load() {
        let views = Views::load().unwrap();
        let page = home(&views).unwrap().0;
        assert!(page.contains("<title>Home | Marquee</title>"));
    }

    #[test]
    fn test_values_are_escaped() {
        let views = Views::load().unwrap();
        let page = error_page(&views, StatusCode::NOT_FOUND, "<script>alert(1)</script>")
            .unwrap()
            .0;
        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_field_error_rendered_next_to_input() {
        let views = Views::load().unwrap();
        let errors = FieldErrors::single("title", "title is required");
        let fields = [
            Field::text("title", "Title", "", &errors),
            Field::text("genre", "Genre", "Drama", &errors),
        ];

        let page = views
            .render("movies/new.html.tera", &form_context("New movie", &fields, &errors))
            .unwrap()
            .0;

        assert!(page.contains("<span class=\"error\">title is required</span>"));
        assert!(page.contains("value=\"Drama\""));
        assert_eq!(page.matches("title is required").count(), 2);
    }

    #[test]
    fn test_select_marks_current_choice() {
        let errors = FieldErrors::new();
        let field = Field::select("movie", "Movie", [("a", "Alien"), ("h", "Heat")], "h", &errors);
        assert!(!field.options[0].selected);
        assert!(field.options[1].selected);
        assert_eq!(field.error, None);
    }
}
