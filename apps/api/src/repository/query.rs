//! Typed filter, sort and update builders.
//!
//! Every field the service ever filters, sorts or writes by name is a
//! [`Field`] variant, so a misspelt key is a compile error instead of a query
//! that silently matches nothing.

use mongodb::bson::{doc, oid::ObjectId, Bson, Document};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    Name,
    Role,
    Prompt,
    PromptRule,
    UpdatedBy,
    UpdatedAt,
    CreatedAt,
    ColdCallGeneratedAt,
}

impl Field {
    pub const fn as_str(self) -> &'static str {
        match self {
            Field::Id => "_id",
            Field::Name => "name",
            Field::Role => "role",
            Field::Prompt => "prompt",
            Field::PromptRule => "prompt_rule",
            Field::UpdatedBy => "updated_by",
            Field::UpdatedAt => "updated_at",
            Field::CreatedAt => "created_at",
            Field::ColdCallGeneratedAt => "ai_output.coldcalls.generatedat",
        }
    }
}

/// Equality filter. An empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter(Document);

impl Filter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_id(id: ObjectId) -> Self {
        Self::all().and(Field::Id, id)
    }

    pub fn eq(field: Field, value: impl Into<Bson>) -> Self {
        Self::all().and(field, value)
    }

    pub fn and(mut self, field: Field, value: impl Into<Bson>) -> Self {
        self.0.insert(field.as_str(), value.into());
        self
    }

    pub fn into_document(self) -> Document {
        self.0
    }
}

/// Newest-first ordering on one field. Every listing sorts this way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: Field,
}

impl Sort {
    pub fn descending(field: Field) -> Self {
        Self { field }
    }

    pub fn into_document(self) -> Document {
        doc! { self.field.as_str(): -1 }
    }
}

/// A `$set` update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    set: Document,
}

impl Update {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: Field, value: impl Into<Bson>) -> Self {
        self.set.insert(field.as_str(), value.into());
        self
    }

    pub fn into_document(self) -> Document {
        doc! { "$set": self.set }
    }
}
