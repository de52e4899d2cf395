//! Single-document and bulk mutation operations
//!
//! Control flow for the checked paths: perform the atomic store mutation
//! (which always overwrites), capture the pre-write snapshot the store
//! returns, then decide whether to accept the write or compensate by
//! restoring the prior snapshot. The compensation is guarded on the etag
//! this call just wrote, so it never clobbers a later concurrent write.

use serde_json::Value;

use crate::document::{etag_of, etag_str_of, id_key, Document, Etag, ETAG_FIELD, ID_FIELD};
use crate::observability::Logger;
use crate::store::{DocumentStore, WriteModel};

use super::errors::{RepoError, RepoResult};
use super::result::{BulkOperationResult, OperationResult, StatusCode, VersionToken};

/// Optimistic-concurrency document repository over an injected store handle.
///
/// Holds no state of its own; the caller owns the store's lifecycle.
pub struct DocumentRepository<'a, S: DocumentStore> {
    store: &'a S,
}

impl<'a, S: DocumentStore> DocumentRepository<'a, S> {
    /// Creates a repository over the given store handle
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Reads the current version token of a document, if any.
    pub fn get_document_etag(&self, collection: &str, id: &Value) -> RepoResult<Option<Etag>> {
        let document = self.store.find_by_id(collection, id)?;
        Ok(document.as_ref().and_then(etag_of))
    }

    /// Replaces or patches the document with identity `id`.
    ///
    /// With `patching` set, `content` is merged into the existing document
    /// and a missing document yields `NOT_FOUND` (a patch cannot create);
    /// otherwise the document is fully replaced, created when absent.
    /// With `check_etag` set and a pre-existing document, the caller's
    /// `request_etag` is verified against the pre-write version and the
    /// prior state is restored on mismatch.
    pub fn upsert_document(
        &self,
        collection: &str,
        id: &Value,
        content: Value,
        request_etag: Option<&str>,
        patching: bool,
        check_etag: bool,
    ) -> RepoResult<OperationResult> {
        let mut content = as_object(content)?;

        let new_etag = Etag::new();
        content.insert(ETAG_FIELD.to_string(), new_etag.to_value());
        content.insert(ID_FIELD.to_string(), id.clone());

        let old = if patching {
            // matching-only: a missing document stays missing
            self.store.patch_or_upsert(collection, id, &content, false)?
        } else {
            self.store.replace_or_upsert(collection, id, content, true)?
        };

        match (patching, old) {
            (true, None) => Ok(OperationResult::status_only(StatusCode::NotFound)),
            (_, Some(old)) if check_etag => self.optimistic_check_etag(
                collection,
                old,
                Some(new_etag),
                request_etag,
                StatusCode::Ok,
                false,
            ),
            (_, Some(old)) => {
                let current = self.store.find_by_id(collection, id)?;
                Ok(OperationResult {
                    status: StatusCode::Ok,
                    etag: Some(new_etag.into()),
                    old: Some(old),
                    new: current,
                })
            }
            (false, None) => {
                let current = self.store.find_by_id(collection, id)?;
                Ok(OperationResult {
                    status: StatusCode::Created,
                    etag: Some(new_etag.into()),
                    old: None,
                    new: current,
                })
            }
        }
    }

    /// Full-document upsert where the identity comes from the content
    /// itself; a fresh identity is assigned when the content has none.
    ///
    /// A missing body (`null`) creates an empty document.
    pub fn upsert_document_post(
        &self,
        collection: &str,
        content: Value,
        request_etag: Option<&str>,
        check_etag: bool,
    ) -> RepoResult<OperationResult> {
        let mut content = match content {
            Value::Null => Document::new(),
            other => as_object(other)?,
        };

        let new_etag = Etag::new();
        content.insert(ETAG_FIELD.to_string(), new_etag.to_value());

        let id = match content.get(ID_FIELD) {
            Some(id) => id.clone(),
            None => {
                let id = Value::String(Etag::new().to_string());
                content.insert(ID_FIELD.to_string(), id.clone());
                id
            }
        };

        let old = self.store.replace_or_upsert(collection, &id, content, true)?;

        match old {
            None => {
                let current = self.store.find_by_id(collection, &id)?;
                Ok(OperationResult {
                    status: StatusCode::Created,
                    etag: Some(new_etag.into()),
                    old: None,
                    new: current,
                })
            }
            Some(old) if check_etag => self.optimistic_check_etag(
                collection,
                old,
                Some(new_etag),
                request_etag,
                StatusCode::Ok,
                false,
            ),
            Some(old) => {
                let current = self.store.find_by_id(collection, &id)?;
                Ok(OperationResult {
                    status: StatusCode::Ok,
                    etag: Some(new_etag.into()),
                    old: Some(old),
                    new: current,
                })
            }
        }
    }

    /// Removes the document with identity `id`, verifying the caller's
    /// version first when `check_etag` is set (the removed snapshot is
    /// re-inserted on mismatch).
    pub fn delete_document(
        &self,
        collection: &str,
        id: &Value,
        request_etag: Option<&str>,
        check_etag: bool,
    ) -> RepoResult<OperationResult> {
        let old = self.store.find_and_delete(collection, id)?;

        match old {
            None => Ok(OperationResult::status_only(StatusCode::NotFound)),
            Some(old) if check_etag => self.optimistic_check_etag(
                collection,
                old,
                None,
                request_etag,
                StatusCode::NoContent,
                true,
            ),
            Some(_) => Ok(OperationResult::status_only(StatusCode::NoContent)),
        }
    }

    /// Upserts a batch of documents in one bulk write. Every document in
    /// the batch is stamped with one shared fresh etag (a batch-level
    /// version marker); documents without an identity get a fresh one.
    /// Bulk writes never check etags.
    pub fn bulk_upsert_documents_post(
        &self,
        collection: &str,
        documents: Vec<Value>,
    ) -> RepoResult<BulkOperationResult> {
        if documents.is_empty() {
            return Err(RepoError::EmptyBulk);
        }

        let new_etag = Etag::new();

        let mut models = Vec::with_capacity(documents.len());
        for document in documents {
            let mut document = as_object(document)?;
            document.insert(ETAG_FIELD.to_string(), new_etag.to_value());

            let id = match document.get(ID_FIELD) {
                Some(id) => id.clone(),
                None => {
                    let id = Value::String(Etag::new().to_string());
                    document.insert(ID_FIELD.to_string(), id.clone());
                    id
                }
            };
            models.push(WriteModel::UpsertOne { id, document });
        }

        let summary = self.store.bulk_write(collection, &models)?;
        Logger::info(
            "bulk_upsert",
            &[
                ("collection", collection),
                ("inserted", &summary.inserted.to_string()),
                ("matched", &summary.matched.to_string()),
            ],
        );

        Ok(BulkOperationResult {
            status: StatusCode::Ok,
            etag: Some(new_etag),
            summary,
        })
    }

    /// Deletes every document matching `filter` in one bulk write.
    pub fn bulk_delete_documents(
        &self,
        collection: &str,
        filter: Value,
    ) -> RepoResult<BulkOperationResult> {
        let filter = as_object(filter)?;

        let summary = self
            .store
            .bulk_write(collection, &[WriteModel::DeleteMany { filter }])?;
        Logger::info(
            "bulk_delete",
            &[
                ("collection", collection),
                ("deleted", &summary.deleted.to_string()),
            ],
        );

        Ok(BulkOperationResult {
            status: StatusCode::Ok,
            etag: None,
            summary,
        })
    }

    /// Patches every document matching `filter` in one bulk write, with
    /// upsert disabled: no document is ever created by this path.
    pub fn bulk_patch_documents(
        &self,
        collection: &str,
        filter: Value,
        patch: Value,
    ) -> RepoResult<BulkOperationResult> {
        let filter = as_object(filter)?;
        let patch = as_object(patch)?;

        let summary = self
            .store
            .bulk_write(collection, &[WriteModel::UpdateMany { filter, patch }])?;
        Logger::info(
            "bulk_patch",
            &[
                ("collection", collection),
                ("matched", &summary.matched.to_string()),
                ("modified", &summary.modified.to_string()),
            ],
        );

        Ok(BulkOperationResult {
            status: StatusCode::Ok,
            etag: None,
            summary,
        })
    }

    /// Shared optimistic check, run after the write already happened.
    ///
    /// `old` is the pre-write snapshot; `new_etag` is the token this call
    /// just wrote (absent in deleting mode, where nothing was written).
    fn optimistic_check_etag(
        &self,
        collection: &str,
        old: Document,
        new_etag: Option<Etag>,
        request_etag: Option<&str>,
        success: StatusCode,
        deleting: bool,
    ) -> RepoResult<OperationResult> {
        let id = old.get(ID_FIELD).cloned().unwrap_or(Value::Null);
        // comparison runs on the string rendering so foreign version tokens
        // still compare; the result surfaces them the same way
        let old_etag = etag_str_of(&old);

        // versioned resource but the precondition was omitted entirely
        if old_etag.is_some() && request_etag.is_none() {
            Logger::warn(
                "document_conflict",
                &[
                    ("collection", collection),
                    ("id", &id_key(&id)),
                    ("reason", "precondition_omitted"),
                ],
            );
            self.restore(collection, &id, &old, new_etag, deleting)?;
            return Ok(OperationResult {
                status: StatusCode::Conflict,
                etag: VersionToken::of(&old),
                old: Some(old),
                new: None,
            });
        }

        if request_etag == old_etag.as_deref() {
            let current = self.store.find_by_id(collection, &id)?;
            Ok(OperationResult {
                status: success,
                etag: new_etag.map(Into::into),
                old: Some(old),
                new: current,
            })
        } else {
            Logger::warn(
                "document_conflict",
                &[
                    ("collection", collection),
                    ("id", &id_key(&id)),
                    ("reason", "stale_version"),
                ],
            );
            self.restore(collection, &id, &old, new_etag, deleting)?;
            Ok(OperationResult {
                status: StatusCode::PreconditionFailed,
                etag: VersionToken::of(&old),
                old: Some(old),
                new: None,
            })
        }
    }

    /// Compensates a write that failed its optimistic check.
    ///
    /// Deleting: the document is gone, so the removed snapshot is
    /// re-inserted unchanged. Otherwise: the transient write is replaced by
    /// the prior snapshot, guarded on the document still carrying the etag
    /// this call issued; if a third writer got there first the restore is a
    /// no-op and that writer's state stands.
    fn restore(
        &self,
        collection: &str,
        id: &Value,
        old: &Document,
        new_etag: Option<Etag>,
        deleting: bool,
    ) -> RepoResult<()> {
        let restored = if deleting {
            self.store
                .replace_or_upsert(collection, id, old.clone(), true)?;
            true
        } else if let Some(new_etag) = new_etag {
            self.store
                .replace_if_etag_matches(collection, id, &new_etag.to_value(), old.clone())?
        } else {
            false
        };

        Logger::warn(
            "document_restore",
            &[
                ("collection", collection),
                ("id", &id_key(id)),
                ("restored", if restored { "true" } else { "false" }),
            ],
        );
        Ok(())
    }
}

/// Requires document content to be a JSON object; rejected before any store
/// call is attempted.
fn as_object(content: Value) -> RepoResult<Document> {
    match content {
        Value::Object(map) => Ok(map),
        other => Err(RepoError::InvalidContent(format!(
            "expected a JSON object, got {}",
            type_name(&other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
