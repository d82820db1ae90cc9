//! Document Store
//!
//! CRUD over users and posts, backed by one database file.
//!
//! ## Responsibilities
//! - Load the full dataset, mutate it in memory, save the full dataset
//! - Check that a post's author exists when the post is created
//! - Serialize read-modify-write cycles within the process

use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use crate::config::Config;
use crate::error::{ChirpError, Result};
use crate::model::{Dataset, Post, User};
use crate::storage::DatabaseFile;

/// The document store
///
/// ## Concurrency Model: Single-Writer / Multiple-Reader (SWMR)
///
/// - **Writes** (create/update/delete): hold `lock` for writing across the
///   whole load → mutate → save cycle, so two overlapping writers cannot
///   drop each other's changes.
/// - **Reads** (get_user/get_posts/load): hold `lock` for reading, so they
///   never observe a file that a writer has truncated but not yet refilled.
///
/// The lock only covers this process. Two processes pointed at the same
/// file can still lose updates.
///
/// Nothing is cached: every call re-reads the file.
pub struct DocumentStore {
    /// Store configuration
    config: Config,

    /// Database file location
    file: DatabaseFile,

    /// Guards the load-mutate-save cycle
    lock: RwLock<()>,
}

impl DocumentStore {
    /// Create a store for the database file named in `config`
    ///
    /// Does not touch the file. Call `ensure_initialized` before first use.
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;

        let file = DatabaseFile::new(&config.db_path, config.sync_on_write);

        Ok(Self {
            config,
            file,
            lock: RwLock::new(()),
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified database file
    pub fn open_path(path: impl Into<PathBuf>) -> Result<Self> {
        let config = Config::builder().db_path(path).build();
        Self::open(config)
    }

    /// Make sure the database file holds a readable dataset
    ///
    /// A missing or unparsable file is replaced with an empty dataset.
    /// Returns `true` when the file was (re)initialized.
    pub fn ensure_initialized(&self) -> Result<bool> {
        let _guard = self.lock.write();

        match self.file.load() {
            Ok(_) => Ok(false),
            Err(ChirpError::CorruptData(reason)) => {
                tracing::warn!(
                    "Database file {} is unparsable ({}), reinitializing",
                    self.path().display(),
                    reason
                );
                self.file.save(&Dataset::new())?;
                Ok(true)
            }
            Err(e) => {
                tracing::debug!("Creating database file {} ({})", self.path().display(), e);
                self.file.save(&Dataset::new())?;
                Ok(true)
            }
        }
    }

    /// Read a snapshot of the whole dataset
    pub fn load(&self) -> Result<Dataset> {
        let _guard = self.lock.read();
        self.file.load()
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Create a user, replacing any existing user with the same email
    pub fn create_user(&self, email: &str, password: &str, name: &str, age: i64) -> Result<User> {
        let user = User::new(email, password, name, age);

        self.mutate(|dataset| {
            if dataset.users.insert(email.to_string(), user.clone()).is_some() {
                tracing::debug!("Overwrote user {}", email);
            } else {
                tracing::debug!("Created user {}", email);
            }
            Ok(user)
        })
    }

    /// Replace a user's password, name and age
    ///
    /// Fails with `UserNotFound` (and writes nothing) if the user is absent.
    pub fn update_user(&self, email: &str, password: &str, name: &str, age: i64) -> Result<User> {
        self.mutate(|dataset| {
            let user = dataset
                .users
                .get_mut(email)
                .ok_or_else(|| ChirpError::user_not_found(email))?;

            user.apply_update(password.to_string(), name.to_string(), age);
            tracing::debug!("Updated user {}", email);
            Ok(user.clone())
        })
    }

    /// Get a user by email
    pub fn get_user(&self, email: &str) -> Result<User> {
        self.load()?
            .users
            .remove(email)
            .ok_or_else(|| ChirpError::user_not_found(email))
    }

    /// Delete a user. Deleting a missing user is not an error.
    ///
    /// The user's posts are left in place.
    pub fn delete_user(&self, email: &str) -> Result<()> {
        self.mutate_if(|dataset| {
            let removed = dataset.users.remove(email).is_some();
            if removed {
                tracing::debug!("Deleted user {}", email);
            }
            removed
        })
    }

    // =========================================================================
    // Posts
    // =========================================================================

    /// Create a post for an existing user
    pub fn create_post(&self, user_email: &str, text: &str) -> Result<Post> {
        self.mutate(|dataset| {
            if !dataset.users.contains_key(user_email) {
                return Err(ChirpError::user_not_found(user_email));
            }

            let post = Post::new(user_email, text);
            dataset.posts.insert(post.id.clone(), post.clone());
            tracing::debug!("Created post {} for {}", post.id, user_email);
            Ok(post)
        })
    }

    /// All posts written by `user_email`, in no particular order
    pub fn get_posts(&self, user_email: &str) -> Result<Vec<Post>> {
        Ok(self.load()?.posts_by(user_email))
    }

    /// Delete a post by id. Deleting a missing post is not an error.
    pub fn delete_post(&self, id: &str) -> Result<()> {
        self.mutate_if(|dataset| {
            let removed = dataset.posts.remove(id).is_some();
            if removed {
                tracing::debug!("Deleted post {}", id);
            }
            removed
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the database file path
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Run one load → mutate → save cycle under the write lock
    ///
    /// If `apply` fails, nothing is saved.
    fn mutate<T>(&self, apply: impl FnOnce(&mut Dataset) -> Result<T>) -> Result<T> {
        let _guard = self.lock.write();

        let mut dataset = self.file.load()?;
        let value = apply(&mut dataset)?;
        self.file.save(&dataset)?;

        Ok(value)
    }

    /// Like `mutate`, but only saves when `apply` reports a change
    fn mutate_if(&self, apply: impl FnOnce(&mut Dataset) -> bool) -> Result<()> {
        let _guard = self.lock.write();

        let mut dataset = self.file.load()?;
        if apply(&mut dataset) {
            self.file.save(&dataset)?;
        }

        Ok(())
    }
}
