//! "Manage Contacts" page state
//!
//! Holds the contact store, the initial-load state, the inline editor and
//! the last alert. Mutating methods take `&mut self`, so one page cannot
//! run two saves at once. `Editor::saving` only drives the submit label.

use super::api::ContactsBackend;
use super::store::ContactStore;
use crate::contract::{Contact, ContactForm};
use crate::domain::normalizer::normalize_full_name;
use std::fmt::Write as _;

pub const PAGE_TITLE: &str = "Manage Contacts";
pub const ADD_ACTION: &str = "Add Contact";
pub const EMPTY_STATE: &str = "No contacts yet. Click “Add Contact”.";
pub const NAME_REQUIRED: &str = "Name is required.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    NotStarted,
    Loading,
    Loaded,
}

/// Editable form fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Phone,
}

/// Inline add/edit card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    editing: Option<Contact>,
    pub form: ContactForm,
    pub error: Option<String>,
    pub saving: bool,
}

impl Editor {
    fn new(editing: Option<Contact>) -> Self {
        let form = editing.as_ref().map(ContactForm::from).unwrap_or_default();
        Self {
            editing,
            form,
            error: None,
            saving: false,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn title(&self) -> &'static str {
        if self.is_editing() {
            "Edit Contact"
        } else {
            "Add Contact"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match (self.saving, self.is_editing()) {
            (true, _) => "Saving…",
            (false, true) => "Save",
            (false, false) => "Create",
        }
    }
}

/// Result of a delete request from the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// No row with that id
    Unknown,
    /// The user declined the confirmation
    Cancelled,
    Deleted,
    /// The server call failed and the list was restored
    RolledBack,
}

pub struct ContactsPage<B> {
    backend: B,
    store: ContactStore,
    load: LoadState,
    load_error: Option<String>,
    editor: Option<Editor>,
    alert: Option<String>,
}

impl<B: ContactsBackend> ContactsPage<B> {
    pub fn new(backend: B) -> Self {
        Self::with_store(backend, ContactStore::new())
    }

    /// Page over an existing store handle
    pub fn with_store(backend: B, store: ContactStore) -> Self {
        Self {
            backend,
            store,
            load: LoadState::NotStarted,
            load_error: None,
            editor: None,
            alert: None,
        }
    }

    pub fn store(&self) -> &ContactStore {
        &self.store
    }

    pub fn load_state(&self) -> LoadState {
        self.load
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn editor(&self) -> Option<&Editor> {
        self.editor.as_ref()
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Initial load. Runs once per page; later calls return `false` and do
    /// nothing. A failure empties the list and sets the banner.
    pub async fn mount(&mut self) -> bool {
        if self.load != LoadState::NotStarted {
            return false;
        }
        self.load = LoadState::Loading;
        self.load_error = None;

        match self.backend.list().await {
            Ok(rows) => self.store.replace_all(rows),
            Err(e) => {
                tracing::warn!(error = %e, "initial contacts load failed");
                self.store.replace_all(Vec::new());
                self.load_error = Some(format!("Failed to load contacts: {e}"));
            }
        }

        self.load = LoadState::Loaded;
        true
    }

    pub fn open_add(&mut self) {
        self.editor = Some(Editor::new(None));
    }

    /// Open the editor prefilled from the row with `id`; false if there is none
    pub fn open_edit(&mut self, id: &str) -> bool {
        match self.store.get(id) {
            Some(contact) => {
                self.editor = Some(Editor::new(Some(contact)));
                true
            }
            None => false,
        }
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        let value = value.into();
        match field {
            Field::Name => editor.form.name = value,
            Field::Email => editor.form.email = Some(value),
            Field::Phone => editor.form.phone = Some(value),
        }
    }

    pub fn cancel_editor(&mut self) {
        self.editor = None;
    }

    /// Create or update from the editor. On success the editor closes and
    /// the saved contact is returned; otherwise the editor shows the error.
    pub async fn submit(&mut self) -> Option<Contact> {
        let editor = self.editor.as_mut()?;
        editor.error = None;

        let Some(name) = normalize_full_name(&editor.form.name) else {
            editor.error = Some(NAME_REQUIRED.to_string());
            return None;
        };
        let form = ContactForm {
            name,
            email: editor.form.email.clone(),
            phone: editor.form.phone.clone(),
        };
        let editing_id = editor.editing.as_ref().map(|c| c.id.clone());
        editor.saving = true;

        let result = match editing_id {
            Some(id) => self.backend.update(&id, &form).await.map(|updated| {
                self.store.replace(updated.clone());
                updated
            }),
            None => self.backend.create(&form).await.map(|created| {
                self.store.prepend(created.clone());
                created
            }),
        };

        match result {
            Ok(saved) => {
                self.editor = None;
                Some(saved)
            }
            Err(e) => {
                tracing::warn!(error = %e, "saving contact failed");
                if let Some(editor) = self.editor.as_mut() {
                    editor.error = Some(format!("Failed to save: {e}"));
                    editor.saving = false;
                }
                None
            }
        }
    }

    /// Delete a row after `confirm` accepts the prompt. The row disappears
    /// before the server answers and comes back if the call fails.
    pub async fn delete(&mut self, id: &str, confirm: impl FnOnce(&str) -> bool) -> DeleteOutcome {
        let Some(contact) = self.store.get(id) else {
            return DeleteOutcome::Unknown;
        };
        let label = if contact.name.is_empty() {
            &contact.id
        } else {
            &contact.name
        };
        if !confirm(&format!("Delete \"{label}\"?")) {
            return DeleteOutcome::Cancelled;
        }

        let snapshot = self.store.remove(id);
        match self.backend.delete(id).await {
            Ok(()) => DeleteOutcome::Deleted,
            Err(e) => {
                tracing::warn!(id, error = %e, "delete failed, restoring list");
                self.alert = Some(format!("Failed to delete: {e}"));
                self.store.restore(snapshot);
                DeleteOutcome::RolledBack
            }
        }
    }

    /// Table cells (name, email, phone); absent values show as `-`
    pub fn table_rows(&self) -> Vec<[String; 3]> {
        fn cell(value: Option<&str>) -> String {
            match value {
                Some(v) if !v.is_empty() => v.to_string(),
                _ => "-".to_string(),
            }
        }

        self.store
            .rows()
            .iter()
            .map(|c| {
                [
                    cell(Some(&c.name)),
                    cell(c.email.as_deref()),
                    cell(c.phone.as_deref()),
                ]
            })
            .collect()
    }

    /// Plain-text rendering of the page
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{PAGE_TITLE}  [{ADD_ACTION}]");

        if let Some(banner) = &self.load_error {
            let _ = writeln!(out, "! {banner}");
        }
        if let Some(alert) = &self.alert {
            let _ = writeln!(out, "! {alert}");
        }

        if let Some(editor) = &self.editor {
            let _ = writeln!(out, "\n== {} ==", editor.title());
            if let Some(error) = &editor.error {
                let _ = writeln!(out, "! {error}");
            }
            let _ = writeln!(out, "  Full name: {}", editor.form.name);
            let _ = writeln!(out, "  Email:     {}", editor.form.email.as_deref().unwrap_or(""));
            let _ = writeln!(out, "  Phone:     {}", editor.form.phone.as_deref().unwrap_or(""));
            let _ = writeln!(out, "  [{}] [Cancel]", editor.submit_label());
        }

        out.push('\n');
        if self.load != LoadState::Loaded {
            out.push_str("Loading…\n");
            return out;
        }

        let rows = self.table_rows();
        if rows.is_empty() {
            let _ = writeln!(out, "{EMPTY_STATE}");
            return out;
        }

        let header = ["Name", "Email", "Phone"].map(String::from);
        let mut widths = header.clone().map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        for row in std::iter::once(&header).chain(rows.iter()) {
            let line = row
                .iter()
                .zip(widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join(" | ");
            let _ = writeln!(out, "{}", line.trim_end());
        }
        out
    }
}
