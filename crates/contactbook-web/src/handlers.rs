//! Route handlers.
//!
//! Write endpoints validate, then either re-render their form with every
//! rule failure (status 200) or mutate the store, leave a flash message, and
//! redirect to the contact list. Read endpoints fetch and render; a lookup
//! miss renders the not-found page with status 404.

use axum::Extension;
use axum::extract::{Form, Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use contactbook_core::validation::{Field, NAME_TAKEN};
use contactbook_core::{ContactId, NameCheck, ValidationErrors, validate_contact};
use http::StatusCode;
use serde::Serialize;

use crate::flash::FLASH_KEY;
use crate::forms::{ContactForm, DeleteForm, UpdateForm};
use crate::server::AppState;
use crate::session::SessionId;
use crate::views::{
    AddContext, DetailContext, EditContext, ListContext, NotFoundContext, Page, View,
};
use crate::Result;

/// Flash message after a successful create.
pub const MSG_CREATED: &str = "Contact added successfully!";
/// Flash message after a successful delete.
pub const MSG_DELETED: &str = "Contact deleted successfully!";
/// Flash message after a successful update.
pub const MSG_UPDATED: &str = "Contact updated successfully!";

const CONTACT_LIST_PATH: &str = "/contact";

// ============================================================================
// Rendering helpers
// ============================================================================

impl AppState {
    /// Render `view` for `session`, consuming its pending flash message.
    ///
    /// A message taken for a page that then fails to render is put back, so
    /// the next successful page still shows it.
    async fn render(
        &self,
        session: SessionId,
        status: StatusCode,
        view: View,
        context: impl Serialize,
    ) -> Result<Response> {
        let flash = self.flash.consume(session, FLASH_KEY).await;
        let rendered = Page::new(view, context)
            .and_then(|page| self.renderer.render(&page.with_flash(flash.clone())));
        match rendered {
            Ok(html) => Ok((status, Html(html)).into_response()),
            Err(e) => {
                if let Some(message) = flash {
                    self.flash.set(session, FLASH_KEY, message).await;
                }
                Err(e)
            }
        }
    }

    async fn not_found(&self, session: SessionId, message: String) -> Result<Response> {
        self.render(
            session,
            StatusCode::NOT_FOUND,
            View::NotFound,
            NotFoundContext { message },
        )
        .await
    }

    async fn redirect_with_flash(&self, session: SessionId, message: &str) -> Response {
        self.flash.set(session, FLASH_KEY, message).await;
        Redirect::to(CONTACT_LIST_PATH).into_response()
    }
}

fn name_taken() -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.push(Field::Name, NAME_TAKEN);
    errors
}

// ============================================================================
// Static pages
// ============================================================================

/// `GET /`
pub async fn home(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Result<Response> {
    state
        .render(session, StatusCode::OK, View::Home, serde_json::json!({}))
        .await
}

/// `GET /about`
pub async fn about(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Result<Response> {
    state
        .render(session, StatusCode::OK, View::About, serde_json::json!({}))
        .await
}

/// Any route that does not exist.
pub async fn not_found(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Result<Response> {
    state.not_found(session, "Page not found.".to_string()).await
}

// ============================================================================
// Contacts
// ============================================================================

/// `GET /contact`
pub async fn list_contacts(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Result<Response> {
    let contacts = state.store.list_all().await?;
    state
        .render(
            session,
            StatusCode::OK,
            View::ContactList,
            ListContext { contacts },
        )
        .await
}

/// `GET /contact/add`
pub async fn add_contact_form(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Result<Response> {
    state
        .render(
            session,
            StatusCode::OK,
            View::AddContact,
            AddContext::default(),
        )
        .await
}

/// `POST /contact`
pub async fn create_contact(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Form(form): Form<ContactForm>,
) -> Result<Response> {
    let fields = form.to_fields();
    let errors = validate_contact(state.store.as_ref(), &fields, NameCheck::Create).await?;
    if !errors.is_empty() {
        tracing::warn!(name = %fields.name, failures = errors.len(), "Rejected new contact");
        return render_add_form(&state, session, errors, form).await;
    }

    match state.store.insert(fields).await {
        Ok(contact) => {
            tracing::info!(id = %contact.id, name = %contact.name, "Contact created");
            Ok(state.redirect_with_flash(session, MSG_CREATED).await)
        }
        Err(contactbook_core::Error::DuplicateName { .. }) => {
            render_add_form(&state, session, name_taken(), form).await
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create contact");
            Err(e.into())
        }
    }
}

async fn render_add_form(
    state: &AppState,
    session: SessionId,
    errors: ValidationErrors,
    form: ContactForm,
) -> Result<Response> {
    let context = AddContext {
        errors,
        contact: Some(form),
    };
    state
        .render(session, StatusCode::OK, View::AddContact, context)
        .await
}

/// `DELETE /contact`
pub async fn delete_contact(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Form(form): Form<DeleteForm>,
) -> Result<Response> {
    if !state.store.delete_by_name(&form.name).await? {
        tracing::warn!(name = %form.name, "Delete of unknown contact");
        return state
            .not_found(session, format!("No contact named '{}'.", form.name))
            .await;
    }
    tracing::info!(name = %form.name, "Contact deleted");
    Ok(state.redirect_with_flash(session, MSG_DELETED).await)
}

/// `GET /contact/edit/{name}`
pub async fn edit_contact_form(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Path(name): Path<String>,
) -> Result<Response> {
    let Some(contact) = state.store.find_by_name(&name).await? else {
        return state
            .not_found(session, format!("No contact named '{name}'."))
            .await;
    };
    let context = EditContext {
        errors: ValidationErrors::new(),
        contact: UpdateForm::from(&contact),
    };
    state
        .render(session, StatusCode::OK, View::EditContact, context)
        .await
}

/// `PUT /contact`
pub async fn update_contact(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Form(form): Form<UpdateForm>,
) -> Result<Response> {
    let fields = form.to_fields();
    let check = NameCheck::Rename {
        old_name: &form.old_name,
    };
    let errors = validate_contact(state.store.as_ref(), &fields, check).await?;
    if !errors.is_empty() {
        tracing::warn!(id = %form.id, failures = errors.len(), "Rejected contact update");
        return render_edit_form(&state, session, errors, form).await;
    }

    let Ok(id) = form.id.parse::<ContactId>() else {
        return state
            .not_found(session, format!("No contact with id '{}'.", form.id))
            .await;
    };

    match state.store.update_by_id(id, fields).await {
        Ok(true) => {
            tracing::info!(%id, name = %form.name, "Contact updated");
            Ok(state.redirect_with_flash(session, MSG_UPDATED).await)
        }
        Ok(false) => {
            state
                .not_found(session, format!("No contact with id '{id}'."))
                .await
        }
        Err(contactbook_core::Error::DuplicateName { .. }) => {
            render_edit_form(&state, session, name_taken(), form).await
        }
        Err(e) => {
            tracing::error!(error = %e, %id, "Failed to update contact");
            Err(e.into())
        }
    }
}

async fn render_edit_form(
    state: &AppState,
    session: SessionId,
    errors: ValidationErrors,
    form: UpdateForm,
) -> Result<Response> {
    let context = EditContext {
        errors,
        contact: form,
    };
    state
        .render(session, StatusCode::OK, View::EditContact, context)
        .await
}

/// `GET /contact/{name}`
pub async fn contact_detail(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Path(name): Path<String>,
) -> Result<Response> {
    match state.store.find_by_name(&name).await? {
        Some(contact) => {
            state
                .render(
                    session,
                    StatusCode::OK,
                    View::ContactDetail,
                    DetailContext { contact },
                )
                .await
        }
        None => {
            state
                .not_found(session, format!("No contact named '{name}'."))
                .await
        }
    }
}
