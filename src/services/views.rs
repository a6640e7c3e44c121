use axum::response::Html;
use serde::Serialize;
use tera::{Context, Tera};

use crate::models::errors::AppError;
use crate::models::quote::Quote;
use crate::utils::forms::join_tags;

const TEMPLATES: [(&str, &str); 8] = [
    ("base.html", include_str!("../../templates/base.html")),
    ("quote_card.html", include_str!("../../templates/quote_card.html")),
    ("home.html", include_str!("../../templates/home.html")),
    ("quotes.html", include_str!("../../templates/quotes.html")),
    ("quote_form.html", include_str!("../../templates/quote_form.html")),
    ("login.html", include_str!("../../templates/login.html")),
    ("register.html", include_str!("../../templates/register.html")),
    ("error.html", include_str!("../../templates/error.html")),
];

/// Navigation state every full page needs. Anonymous and signed-in visitors
/// share one layout; only the action links differ.
#[derive(Debug, Clone, Copy)]
pub struct Nav<'a> {
    pub authenticated: bool,
    pub current_path: &'a str,
}

impl<'a> Nav<'a> {
    pub fn new(authenticated: bool, current_path: &'a str) -> Self {
        Self {
            authenticated,
            current_path,
        }
    }
}

/// Field values shown in the create/edit form.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct QuoteFormValues {
    pub text: String,
    pub author: String,
    /// Comma-separated, exactly as the input shows it
    pub tags: String,
}

impl From<&Quote> for QuoteFormValues {
    fn from(quote: &Quote) -> Self {
        Self {
            text: quote.text.clone(),
            author: quote.author.clone(),
            tags: join_tags(&quote.tags),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuoteFormView {
    pub heading: &'static str,
    pub subheading: &'static str,
    pub form_action: String,
    pub editing: bool,
    pub form: QuoteFormValues,
    pub error: Option<String>,
}

impl QuoteFormView {
    pub fn create(form: QuoteFormValues, error: Option<String>) -> Self {
        Self {
            heading: "Add New Quote",
            subheading: "Share your favorite quote with the world",
            form_action: "/quotes/new".to_string(),
            editing: false,
            form,
            error,
        }
    }

    pub fn edit(form_action: String, form: QuoteFormValues, error: Option<String>) -> Self {
        Self {
            heading: "Edit Quote",
            subheading: "Update your quote details",
            form_action,
            editing: true,
            form,
            error,
        }
    }
}

/// Tera renderer with every template compiled into the binary.
pub struct Views {
    tera: Tera,
}

impl Views {
    pub fn new() -> Result<Self, AppError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.to_vec())?;
        Ok(Self { tera })
    }

    pub fn render(&self, template: &str, context: &Context) -> Result<Html<String>, AppError> {
        self.tera.render(template, context).map(Html).map_err(|e| {
            let error = AppError::from(e);
            tracing::error!("Failed to render {}: {}", template, error);
            error
        })
    }

    fn page_context(nav: Nav<'_>) -> Context {
        let mut context = Context::new();
        context.insert("authenticated", &nav.authenticated);
        context.insert("current_path", nav.current_path);
        context.insert("error", &Option::<String>::None);
        context
    }

    pub fn home(
        &self,
        nav: Nav<'_>,
        quote: Option<&Quote>,
        error: Option<&str>,
    ) -> Result<Html<String>, AppError> {
        let mut context = Self::page_context(nav);
        context.insert("quote", &quote);
        context.insert("error", &error);
        self.render("home.html", &context)
    }

    /// Bare card markup swapped in by the refresh button.
    pub fn quote_card(&self, quote: Option<&Quote>, error: Option<&str>) -> Result<Html<String>, AppError> {
        let mut context = Context::new();
        context.insert("quote", &quote);
        context.insert("error", &error);
        self.render("quote_card.html", &context)
    }

    pub fn quote_list(&self, nav: Nav<'_>, quotes: &[Quote]) -> Result<Html<String>, AppError> {
        let mut context = Self::page_context(nav);
        context.insert("quotes", quotes);
        self.render("quotes.html", &context)
    }

    pub fn quote_form(&self, nav: Nav<'_>, view: &QuoteFormView) -> Result<Html<String>, AppError> {
        let mut context = Self::page_context(nav);
        context.insert("heading", view.heading);
        context.insert("subheading", view.subheading);
        context.insert("form_action", &view.form_action);
        context.insert("editing", &view.editing);
        context.insert("form", &view.form);
        context.insert("error", &view.error);
        self.render("quote_form.html", &context)
    }

    pub fn login(&self, nav: Nav<'_>, email: &str, error: Option<&str>) -> Result<Html<String>, AppError> {
        let mut context = Self::page_context(nav);
        context.insert("email", email);
        context.insert("error", &error);
        self.render("login.html", &context)
    }

    pub fn register(
        &self,
        nav: Nav<'_>,
        username: &str,
        email: &str,
        error: Option<&str>,
    ) -> Result<Html<String>, AppError> {
        let mut context = Self::page_context(nav);
        context.insert("username", username);
        context.insert("email", email);
        context.insert("error", &error);
        self.render("register.html", &context)
    }

    pub fn error_page(
        &self,
        nav: Nav<'_>,
        message: &str,
        back_href: &str,
        back_label: &str,
    ) -> Result<Html<String>, AppError> {
        let mut context = Self::page_context(nav);
        context.insert("message", message);
        context.insert("back_href", back_href);
        context.insert("back_label", back_label);
        self.render("error.html", &context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_quote() -> Quote {
        Quote {
            id: "1".to_string(),
            text: "Be kind.".to_string(),
            author: "Anon".to_string(),
            tags: vec!["kindness".to_string(), "life".to_string()],
        }
    }

    #[test]
    fn test_templates_compile() {
        assert!(Views::new().is_ok());
    }

    #[test]
    fn test_navigation_depends_on_authentication() {
        let views = Views::new().unwrap();

        let anonymous = views.home(Nav::new(false, "/"), Some(&sample_quote()), None).unwrap().0;
        assert!(anonymous.contains("href=\"/auth/login\""));
        assert!(!anonymous.contains("action=\"/logout\""));

        let signed_in = views.home(Nav::new(true, "/"), Some(&sample_quote()), None).unwrap().0;
        assert!(signed_in.contains("action=\"/logout\""));
        assert!(!signed_in.contains("href=\"/auth/login\""));
    }

    #[test]
    fn test_quote_card_escapes_text() {
        let views = Views::new().unwrap();
        let mut quote = sample_quote();
        quote.text = "<script>alert(1)</script>".to_string();

        let html = views.quote_card(Some(&quote), None).unwrap().0;
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("#kindness"));
    }

    #[test]
    fn test_quote_card_without_quote_shows_error() {
        let views = Views::new().unwrap();
        let html = views.quote_card(None, Some("Failed to fetch quote")).unwrap().0;
        assert!(html.contains("Failed to fetch quote"));
    }

    #[test]
    fn test_form_values_from_quote() {
        let values = QuoteFormValues::from(&sample_quote());
        assert_eq!(values.text, "Be kind.");
        assert_eq!(values.author, "Anon");
        assert_eq!(values.tags, "kindness, life");
    }

    #[test]
    fn test_quote_form_labels() {
        let views = Views::new().unwrap();

        let create = QuoteFormView::create(QuoteFormValues::default(), None);
        let html = views.quote_form(Nav::new(true, "/quotes/new"), &create).unwrap().0;
        assert!(html.contains("Create Quote"));
        assert!(!html.contains("alert-error"));

        let edit = QuoteFormView::edit(
            "/quotes/1/edit".to_string(),
            QuoteFormValues::from(&sample_quote()),
            Some("Failed to save quote".to_string()),
        );
        let html = views.quote_form(Nav::new(true, "/quotes/1/edit"), &edit).unwrap().0;
        assert!(html.contains("Update Quote"));
        assert!(html.contains("Failed to save quote"));
    }

    #[test]
    fn test_register_submit_is_enabled_without_script() {
        let views = Views::new().unwrap();
        let html = views.register(Nav::new(false, "/auth/register"), "", "", None).unwrap().0;
        assert!(html.contains("<button type=\"submit\" id=\"register-submit\" class=\"button\">"));
        assert!(html.contains("submit.disabled = true;"));
    }

    #[test]
    fn test_empty_list() {
        let views = Views::new().unwrap();
        let html = views.quote_list(Nav::new(true, "/quotes"), &[]).unwrap().0;
        assert!(html.contains("No quotes yet."));
    }
}
