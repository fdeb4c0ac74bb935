//! Views and the rendering seam.
//!
//! Handlers describe a page as a [`View`] plus a serializable context; a
//! [`Renderer`] turns that into HTML. [`HtmlRenderer`] is a small built-in
//! renderer so the server works without a template engine.

use contactbook_core::{Contact, ValidationErrors};
use serde::Serialize;
use serde_json::Value;

use crate::forms::{ContactForm, UpdateForm};
use crate::{Error, Result};

// ============================================================================
// View
// ============================================================================

/// A named page of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Landing page.
    Home,
    /// Static about page.
    About,
    /// All contacts.
    ContactList,
    /// Empty (or rejected) add form.
    AddContact,
    /// Pre-filled (or rejected) edit form.
    EditContact,
    /// One contact.
    ContactDetail,
    /// Lookup miss.
    NotFound,
}

impl View {
    /// Template name of the view.
    pub fn name(&self) -> &'static str {
        match self {
            View::Home => "index",
            View::About => "about",
            View::ContactList => "contact",
            View::AddContact => "add-contact",
            View::EditContact => "edit-contact",
            View::ContactDetail => "detail",
            View::NotFound => "not-found",
        }
    }

    /// Page title of the view.
    pub fn title(&self) -> &'static str {
        match self {
            View::Home => "Home",
            View::About => "About",
            View::ContactList => "Contacts",
            View::AddContact => "Add Contact",
            View::EditContact => "Edit Contact",
            View::ContactDetail => "Contact Detail",
            View::NotFound => "Not Found",
        }
    }
}

// ============================================================================
// Contexts
// ============================================================================

/// Context of [`View::ContactList`].
#[derive(Debug, Serialize)]
pub struct ListContext {
    /// Contacts to show.
    pub contacts: Vec<Contact>,
}

/// Context of [`View::AddContact`].
#[derive(Debug, Default, Serialize)]
pub struct AddContext {
    /// Rule failures from the last submission.
    pub errors: ValidationErrors,
    /// The rejected submission, echoed back.
    pub contact: Option<ContactForm>,
}

/// Context of [`View::EditContact`].
#[derive(Debug, Serialize)]
pub struct EditContext {
    /// Rule failures from the last submission.
    pub errors: ValidationErrors,
    /// Current (or rejected) values of the form.
    pub contact: UpdateForm,
}

/// Context of [`View::ContactDetail`].
#[derive(Debug, Serialize)]
pub struct DetailContext {
    /// The contact to show.
    pub contact: Contact,
}

/// Context of [`View::NotFound`].
#[derive(Debug, Serialize)]
pub struct NotFoundContext {
    /// What could not be found.
    pub message: String,
}

// ============================================================================
// Page and Renderer
// ============================================================================

/// Everything a renderer needs to produce one page.
#[derive(Debug, Clone)]
pub struct Page {
    /// Which view to render.
    pub view: View,
    /// The session's pending flash message, consumed for this page.
    pub flash: Option<String>,
    /// View-specific data.
    pub context: Value,
}

impl Page {
    /// Build a page for `view` from a serializable context.
    pub fn new(view: View, context: impl Serialize) -> Result<Self> {
        let context = serde_json::to_value(context).map_err(contactbook_core::Error::from)?;
        Ok(Self {
            view,
            flash: None,
            context,
        })
    }

    /// Attach the flash message to show on this page.
    pub fn with_flash(mut self, flash: Option<String>) -> Self {
        self.flash = flash;
        self
    }
}

/// Renders a [`Page`] to an HTML document.
pub trait Renderer: Send + Sync + 'static {
    /// Render `page`.
    fn render(&self, page: &Page) -> Result<String>;
}

// ============================================================================
// HtmlRenderer
// ============================================================================

/// Minimal built-in renderer producing plain semantic HTML.
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, page: &Page) -> Result<String> {
        let ctx = &page.context;
        let body = match page.view {
            View::Home => "<h1>Contactbook</h1>\n<p>Keep track of names, phone numbers, and emails.</p>\n"
                .to_string(),
            View::About => "<h1>About</h1>\n<p>A small server-rendered contact manager.</p>\n"
                .to_string(),
            View::ContactList => render_list(ctx),
            View::AddContact => render_form(ctx, "/contact", false),
            View::EditContact => render_form(ctx, "/contact?_method=PUT", true),
            View::ContactDetail => render_detail(ctx)?,
            View::NotFound => format!(
                "<h1>Not Found</h1>\n<p>{}</p>\n<p><a href=\"/contact\">Back to contacts</a></p>\n",
                escape(field(ctx, "message"))
            ),
        };
        Ok(render_layout(page, &body))
    }
}

fn render_layout(page: &Page, body: &str) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape(page.view.title())));
    html.push_str("</head>\n<body>\n<nav><a href=\"/\">Home</a> <a href=\"/about\">About</a> <a href=\"/contact\">Contact</a></nav>\n");
    html.push_str(&format!("<main data-view=\"{}\">\n", page.view.name()));
    if let Some(flash) = &page.flash {
        html.push_str(&format!(
            "<div class=\"flash\" role=\"alert\">{}</div>\n",
            escape(flash)
        ));
    }
    html.push_str(body);
    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_list(ctx: &Value) -> String {
    let mut html = String::from("<h1>Contacts</h1>\n<p><a href=\"/contact/add\">Add contact</a></p>\n");
    let contacts = ctx
        .get("contacts")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    if contacts.is_empty() {
        html.push_str("<p class=\"empty\">No contacts yet.</p>\n");
        return html;
    }
    html.push_str("<table>\n<tr><th>#</th><th>Name</th><th>Phone</th><th></th></tr>\n");
    for (i, contact) in contacts.iter().enumerate() {
        let name = field(contact, "name");
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td><a href=\"/contact/{}\">Detail</a></td></tr>\n",
            i + 1,
            escape(name),
            escape(field(contact, "phone")),
            encode_segment(name),
        ));
    }
    html.push_str("</table>\n");
    html
}

fn render_form(ctx: &Value, action: &str, editing: bool) -> String {
    let contact = ctx.get("contact").unwrap_or(&Value::Null);
    let heading = if editing { "Edit Contact" } else { "Add Contact" };
    let mut html = format!("<h1>{heading}</h1>\n");

    let errors = ctx
        .get("errors")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    if !errors.is_empty() {
        html.push_str("<ul class=\"errors\">\n");
        for error in errors {
            html.push_str(&format!(
                "<li data-field=\"{}\">{}</li>\n",
                escape(field(error, "field")),
                escape(field(error, "message"))
            ));
        }
        html.push_str("</ul>\n");
    }

    html.push_str(&format!("<form method=\"post\" action=\"{action}\">\n"));
    if editing {
        html.push_str(&format!(
            "<input type=\"hidden\" name=\"id\" value=\"{}\">\n<input type=\"hidden\" name=\"oldName\" value=\"{}\">\n",
            escape(field(contact, "id")),
            escape(field(contact, "oldName"))
        ));
    }
    for (name, label, kind) in [
        ("name", "Name", "text"),
        ("email", "Email", "email"),
        ("phone", "Phone", "text"),
    ] {
        html.push_str(&format!(
            "<label>{label} <input type=\"{kind}\" name=\"{name}\" value=\"{}\" required></label>\n",
            escape(field(contact, name))
        ));
    }
    let submit = if editing { "Save changes" } else { "Add contact" };
    html.push_str(&format!("<button type=\"submit\">{submit}</button>\n</form>\n"));
    html
}

fn render_detail(ctx: &Value) -> Result<String> {
    let contact = ctx
        .get("contact")
        .filter(|c| c.is_object())
        .ok_or_else(|| Error::render("detail view needs a contact"))?;
    let name = field(contact, "name");
    Ok(format!(
        "<h1>{name}</h1>\n<dl>\n<dt>Phone</dt><dd>{phone}</dd>\n<dt>Email</dt><dd>{email}</dd>\n</dl>\n\
         <p><a href=\"/contact/edit/{path}\">Edit</a></p>\n\
         <form method=\"post\" action=\"/contact?_method=DELETE\">\n\
         <input type=\"hidden\" name=\"name\" value=\"{name}\">\n\
         <button type=\"submit\">Delete</button>\n</form>\n\
         <p><a href=\"/contact\">Back to contacts</a></p>\n",
        name = escape(name),
        phone = escape(field(contact, "phone")),
        email = escape(field(contact, "email")),
        path = encode_segment(name),
    ))
}

fn field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("")
}

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Percent-encode a single URL path segment.
pub fn encode_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
