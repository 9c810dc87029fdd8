//! Catalogue screen: lists books and drives create/delete.
//!
//! The displayed list only ever changes by re-fetching after a mutation
//! succeeds; nothing is updated optimistically.

use std::str::FromStr;

use bookstore_app::modules::books::models::{Book, CreateBook};
use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Style},
};

use crate::api::BooksApi;

pub const LOAD_FAILED: &str = "Failed to load books";
pub const ADD_FAILED: &str = "Failed to add book";
pub const DELETE_FAILED: &str = "Failed to delete book";

/// Prompt shown before a delete is issued.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this book?";

/// Field of the add-book form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Description,
    Price,
    Quantity,
    ImageUrl,
}

impl FromStr for DraftField {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "title" => Ok(Self::Title),
            "description" => Ok(Self::Description),
            "price" => Ok(Self::Price),
            "quantity" => Ok(Self::Quantity),
            "imageUrl" | "image_url" | "image-url" => Ok(Self::ImageUrl),
            other => Err(format!("unknown book field '{other}'")),
        }
    }
}

/// Text typed into the add-book form, not yet submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub description: String,
    pub price: String,
    pub quantity: String,
    pub image_url: String,
}

impl BookDraft {
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Title => self.title = value,
            DraftField::Description => self.description = value,
            DraftField::Price => self.price = value,
            DraftField::Quantity => self.quantity = value,
            DraftField::ImageUrl => self.image_url = value,
        }
    }

    /// Convert the form text into a create request. A number that does not
    /// parse is left out, so the server reports it as missing. Quantity reads
    /// the leading integer, so "5.7" and "12abc" become 5 and 12.
    pub fn to_request(&self) -> CreateBook {
        CreateBook {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            price: self
                .price
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|p| p.is_finite()),
            quantity: leading_integer(&self.quantity),
            image_url: Some(self.image_url.clone()),
        }
    }
}

fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let sign_len = usize::from(text.starts_with(['+', '-']));
    let digits_len = text[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len() - sign_len);

    text[..sign_len + digits_len].parse().ok()
}

/// State of the catalogue screen.
#[derive(Debug)]
pub struct CatalogueView<A> {
    api: A,
    books: Vec<Book>,
    draft: BookDraft,
    show_add_form: bool,
    loading: bool,
    error: Option<String>,
}

impl<A: BooksApi> CatalogueView<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            books: Vec::new(),
            draft: BookDraft::default(),
            show_add_form: false,
            loading: false,
            error: None,
        }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn draft(&self) -> &BookDraft {
        &self.draft
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_add_form_open(&self) -> bool {
        self.show_add_form
    }

    /// First load of the screen.
    pub async fn mount(&mut self) {
        self.refresh().await;
    }

    /// Re-fetch the book list. On failure the previous list stays displayed.
    pub async fn refresh(&mut self) {
        match self.api.list_books().await {
            Ok(books) => self.books = books,
            Err(e) => {
                tracing::error!(error = %e, "error fetching books");
                self.error = Some(LOAD_FAILED.to_string());
            }
        }
    }

    pub fn open_add_form(&mut self) {
        self.show_add_form = true;
    }

    pub fn close_add_form(&mut self) {
        self.show_add_form = false;
    }

    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    /// Submit the draft. Success clears the draft, closes the form and
    /// refreshes; failure keeps both as they were.
    pub async fn submit(&mut self) {
        self.loading = true;
        self.error = None;

        let request = self.draft.to_request();
        match self.api.create_book(&request).await {
            Ok(book) => {
                tracing::info!(book_id = %book.id, "book added");
                self.draft = BookDraft::default();
                self.show_add_form = false;
                self.refresh().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "error adding book");
                self.error = Some(ADD_FAILED.to_string());
            }
        }

        self.loading = false;
    }

    /// Delete the book with `id` once `confirm` agrees. Returns whether a
    /// delete request was issued.
    pub async fn delete<F>(&mut self, id: &str, confirm: F) -> bool
    where
        F: FnOnce(&str) -> bool,
    {
        if !confirm(DELETE_PROMPT) {
            return false;
        }

        match self.api.delete_book(id).await {
            Ok(_) => self.refresh().await,
            Err(e) => {
                tracing::error!(error = %e, book_id = id, "error deleting book");
                self.error = Some(DELETE_FAILED.to_string());
            }
        }

        true
    }

    /// Render the screen as text: error banner, then one row per book.
    pub fn render(&self) -> String {
        let mut out = String::from("Book Catalogue\n");

        if let Some(error) = &self.error {
            out.push_str(&format!("[!] {error}\n"));
        }

        if self.books.is_empty() {
            out.push_str("No books in the catalogue.\n");
            return out;
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Title", "Description", "Price", "In Stock", "Image"]);
        for book in &self.books {
            builder.push_record([
                book.id.clone(),
                book.title.clone(),
                book.description.clone(),
                format!("${:.2}", book.price),
                book.quantity.to_string(),
                book.image_url.clone(),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.modify(Columns::new(3..5), Alignment::right());

        out.push_str(&table.to_string());
        out.push('\n');
        out
    }
}
