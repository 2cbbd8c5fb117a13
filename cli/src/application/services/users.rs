//! Application service — basic-auth user management.

use anyhow::{Context, Result};

use crate::application::ports::{PasswordHasher, UserStore};
use crate::domain::error::UserError;
use crate::domain::users::{HtpasswdFile, validate_user_name};

/// User names in file order.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn list_users(store: &impl UserStore) -> Result<Vec<String>> {
    let file = HtpasswdFile::parse(&store.read()?);
    Ok(file.users().into_iter().map(str::to_owned).collect())
}

/// Hash `password` and append `name`.
///
/// The duplicate check runs before hashing, so an existing user leaves the
/// file untouched and never spawns the hasher.
///
/// # Errors
///
/// Returns `UserError::InvalidName`, `UserError::AlreadyExists`, or an error
/// from hashing or writing.
pub async fn add_user(
    store: &impl UserStore,
    hasher: &impl PasswordHasher,
    name: &str,
    password: &str,
) -> Result<()> {
    validate_user_name(name)?;
    let mut file = HtpasswdFile::parse(&store.read()?);
    if file.contains(name) {
        return Err(UserError::AlreadyExists(name.to_string()).into());
    }
    let hash = hasher.hash(password).await.context("hashing password")?;
    file.add(name, &hash)?;
    store.write(&file.render())?;
    tracing::info!(user = name, path = %store.path().display(), "user added");
    Ok(())
}

/// Remove `name` from the file.
///
/// # Errors
///
/// Returns `UserError::NotFound` if absent, or an error from reading/writing.
pub fn remove_user(store: &impl UserStore, name: &str) -> Result<()> {
    let mut file = HtpasswdFile::parse(&store.read()?);
    file.remove(name)?;
    store.write(&file.render())?;
    tracing::info!(user = name, path = %store.path().display(), "user removed");
    Ok(())
}
