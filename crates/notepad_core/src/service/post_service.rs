//! Notepad use-case service.
//!
//! # Responsibility
//! - Compose a post from user input, store it and export it as text.
//! - Reconstruct listed rows into posts for callers that need them.
//!
//! # Invariants
//! - A post is exported only after it was inserted successfully.
//! - A failed export still reports the id of the row already stored.
//! - Service APIs never bypass the store contract.

use crate::export::{export_file_name, export_post};
use crate::model::intake::Intake;
use crate::model::post::{Post, PostError};
use crate::registry::{PostRegistry, RegistryError};
use crate::repo::post_repo::{PostFilter, PostId, PostStore, StoreError, StoredRow};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

/// Service error for notepad use-cases.
#[derive(Debug)]
pub enum NotepadError {
    Registry(RegistryError),
    Post(PostError),
    Store(StoreError),
    /// Row `id` is stored but its text export at `path` failed.
    Export {
        id: PostId,
        path: PathBuf,
        source: io::Error,
    },
}

impl Display for NotepadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Registry(err) => write!(f, "{err}"),
            Self::Post(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Export { id, path, source } => write!(
                f,
                "post {id} was saved but exporting it to `{}` failed: {source}",
                path.display()
            ),
        }
    }
}

impl Error for NotepadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Registry(err) => Some(err),
            Self::Post(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Export { source, .. } => Some(source),
        }
    }
}

impl From<RegistryError> for NotepadError {
    fn from(value: RegistryError) -> Self {
        Self::Registry(value)
    }
}

impl From<PostError> for NotepadError {
    fn from(value: PostError) -> Self {
        Self::Post(value)
    }
}

impl From<StoreError> for NotepadError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Outcome of saving one post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPost {
    pub id: PostId,
    pub export_path: PathBuf,
}

/// Service facade over a post store, a registry and an export directory.
pub struct NotepadService<S: PostStore> {
    store: S,
    registry: PostRegistry,
    export_dir: PathBuf,
}

impl<S: PostStore> NotepadService<S> {
    pub fn new(store: S, registry: PostRegistry, export_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            registry,
            export_dir: export_dir.into(),
        }
    }

    pub fn registry(&self) -> &PostRegistry {
        &self.registry
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// Fresh, empty post of the named variant.
    pub fn create_post(&self, type_name: &str) -> Result<Box<dyn Post>, NotepadError> {
        Ok(self.registry.create(type_name)?)
    }

    /// Creates a post, fills it from `intake`, then saves it.
    pub fn compose(
        &self,
        type_name: &str,
        intake: &mut dyn Intake,
    ) -> Result<SavedPost, NotepadError> {
        let mut post = self.create_post(type_name)?;
        post.read_from_console(intake)?;
        self.save_post(post.as_ref())
    }

    /// Inserts `post` into the store and writes its text export.
    ///
    /// # Errors
    /// - `NotepadError::Export` carries the assigned id when only the export
    ///   failed; the row stays stored.
    pub fn save_post(&self, post: &dyn Post) -> Result<SavedPost, NotepadError> {
        let id = self.store.insert(post)?;
        let export_path = export_post(post, &self.export_dir).map_err(|source| {
            error!(
                "event=post_save module=service status=error type={} id={} error={}",
                post.type_name(),
                id,
                source
            );
            NotepadError::Export {
                id,
                path: self.export_dir.join(export_file_name(post)),
                source,
            }
        })?;

        info!(
            "event=post_save module=service status=ok type={} id={}",
            post.type_name(),
            id
        );
        Ok(SavedPost { id, export_path })
    }

    pub fn get_post(&self, id: PostId) -> Result<Option<Box<dyn Post>>, NotepadError> {
        Ok(self.store.find_by_id(id)?)
    }

    /// Raw rows, newest first.
    pub fn list_rows(&self, filter: &PostFilter) -> Result<Vec<StoredRow>, NotepadError> {
        Ok(self.store.find_many(filter)?)
    }

    /// Listed rows turned back into posts through the registry.
    pub fn list_posts(
        &self,
        filter: &PostFilter,
    ) -> Result<Vec<(PostId, Box<dyn Post>)>, NotepadError> {
        let rows = self.list_rows(filter)?;
        let mut posts = Vec::with_capacity(rows.len());
        for stored in rows {
            let type_name = stored.type_name().unwrap_or_default();
            let mut post = self.registry.create(type_name)?;
            post.load_row(&stored.columns)?;
            posts.push((stored.id, post));
        }
        Ok(posts)
    }
}
