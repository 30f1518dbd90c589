//! Read-only account directory: users with Argon2id password hashes, and groups.
//!
//! Accounts are loaded once at startup from a JSON document of the form
//!
//! ```json
//! {
//!   "users": [{"id": "…uuid…", "username": "alice", "password": "s3cret"}],
//!   "groups": [{"id": 1, "name": "staff"}]
//! }
//! ```
//!
//! Plain-text passwords are hashed while loading and dropped afterwards.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::ports::{
    GroupRepository, GroupRepositoryError, UserAccount, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Group, GroupId, GroupValidationError, HashedPassword, PasswordHashError, User, UserId,
    UserValidationError, Username,
};

/// Id of the account created by [`MemoryAccountDirectory::development`].
pub const DEVELOPMENT_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

/// Errors raised while loading the accounts document.
#[derive(Debug, Error)]
pub enum AccountSeedError {
    #[error("failed to read accounts file at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("accounts file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid user {username:?}: {source}")]
    InvalidUser {
        username: String,
        #[source]
        source: UserValidationError,
    },
    #[error("user {0:?} must have a non-empty password")]
    EmptyPassword(String),
    #[error("could not hash the password of user {username:?}: {source}")]
    Hash {
        username: String,
        #[source]
        source: PasswordHashError,
    },
    #[error("invalid group {id}: {source}")]
    InvalidGroup {
        id: i64,
        #[source]
        source: GroupValidationError,
    },
    #[error("duplicate username {0:?}")]
    DuplicateUsername(String),
    #[error("duplicate user id {0}")]
    DuplicateUserId(Uuid),
    #[error("duplicate group id {0}")]
    DuplicateGroup(i64),
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountSeed {
    #[serde(default)]
    pub users: Vec<UserSeed>,
    #[serde(default)]
    pub groups: Vec<GroupSeed>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserSeed {
    /// Generated when absent.
    #[serde(default)]
    pub id: Option<Uuid>,
    pub username: String,
    pub password: Zeroizing<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupSeed {
    pub id: i64,
    pub name: String,
}

impl AccountSeed {
    pub fn from_json(contents: &str) -> Result<Self, AccountSeedError> {
        Ok(serde_json::from_str(contents)?)
    }
}

/// Immutable in-memory [`UserRepository`] and [`GroupRepository`].
#[derive(Debug, Default)]
pub struct MemoryAccountDirectory {
    accounts: BTreeMap<String, UserAccount>,
    usernames: HashMap<UserId, String>,
    groups: BTreeMap<GroupId, Group>,
}

impl MemoryAccountDirectory {
    /// Validate a seed document and build the directory.
    pub fn from_seed(seed: AccountSeed) -> Result<Self, AccountSeedError> {
        let mut directory = Self::default();
        for entry in seed.users {
            let invalid = |source| AccountSeedError::InvalidUser {
                username: entry.username.clone(),
                source,
            };
            let username = Username::new(entry.username.as_str()).map_err(invalid)?;
            if entry.password.is_empty() {
                return Err(AccountSeedError::EmptyPassword(entry.username));
            }
            let uuid = entry.id.unwrap_or_else(Uuid::new_v4);
            let id = UserId::from_uuid(uuid);
            if directory.usernames.contains_key(&id) {
                return Err(AccountSeedError::DuplicateUserId(uuid));
            }
            if directory.accounts.contains_key(username.as_ref()) {
                return Err(AccountSeedError::DuplicateUsername(entry.username));
            }
            let password = HashedPassword::derive(entry.password.as_str()).map_err(|source| {
                AccountSeedError::Hash {
                    username: entry.username.clone(),
                    source,
                }
            })?;
            let account = UserAccount {
                user: User::new(id.clone(), username.clone()),
                password,
            };
            directory.usernames.insert(id, username.to_string());
            directory.accounts.insert(username.to_string(), account);
        }
        for entry in seed.groups {
            let invalid = |source| AccountSeedError::InvalidGroup {
                id: entry.id,
                source,
            };
            let id = GroupId::new(entry.id).map_err(invalid)?;
            let group = Group::new(id, entry.name).map_err(invalid)?;
            if directory.groups.insert(id, group).is_some() {
                return Err(AccountSeedError::DuplicateGroup(entry.id));
            }
        }
        Ok(directory)
    }

    /// Read and validate the accounts document at `path`.
    pub fn load(path: &Path) -> Result<Self, AccountSeedError> {
        let read_error = |source| AccountSeedError::Read {
            path: path.to_path_buf(),
            source,
        };
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let file_name = path.file_name().ok_or_else(|| {
            read_error(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "accounts path must be a file",
            ))
        })?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
        let contents = dir.read_to_string(Path::new(file_name)).map_err(read_error)?;
        Self::from_seed(AccountSeed::from_json(&contents)?)
    }

    /// Single `admin` / `password` account for local development.
    pub fn development() -> Result<Self, AccountSeedError> {
        let id = Uuid::parse_str(DEVELOPMENT_USER_ID).unwrap_or_else(|_| Uuid::new_v4());
        Self::from_seed(AccountSeed {
            users: vec![UserSeed {
                id: Some(id),
                username: "admin".to_owned(),
                password: Zeroizing::new("password".to_owned()),
            }],
            groups: Vec::new(),
        })
    }

    pub fn user_count(&self) -> usize {
        self.accounts.len()
    }
}

#[async_trait]
impl UserRepository for MemoryAccountDirectory {
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self
            .accounts
            .values()
            .map(|account| account.user.clone())
            .collect())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .usernames
            .get(id)
            .and_then(|username| self.accounts.get(username))
            .map(|account| account.user.clone()))
    }

    async fn find_account(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        Ok(self.accounts.get(username).cloned())
    }
}

#[async_trait]
impl GroupRepository for MemoryAccountDirectory {
    async fn list(&self) -> Result<Vec<Group>, GroupRepositoryError> {
        Ok(self.groups.values().cloned().collect())
    }

    async fn find_by_id(&self, id: GroupId) -> Result<Option<Group>, GroupRepositoryError> {
        Ok(self.groups.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rstest::rstest;

    use super::*;

    const SEED: &str = r#"{
        "users": [
            {"id": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "username": "zed", "password": "z"},
            {"username": "ada", "password": "lovelace"}
        ],
        "groups": [{"id": 2, "name": "editors"}, {"id": 1, "name": "staff"}]
    }"#;

    #[rstest]
    #[tokio::test]
    async fn seed_builds_sorted_directory() {
        let directory =
            MemoryAccountDirectory::from_seed(AccountSeed::from_json(SEED).expect("json"))
                .expect("valid seed");

        let names: Vec<String> = UserRepository::list(&directory)
            .await
            .expect("users")
            .iter()
            .map(|user| user.username().to_string())
            .collect();
        assert_eq!(names, vec!["ada", "zed"]);

        let groups: Vec<i64> = GroupRepository::list(&directory)
            .await
            .expect("groups")
            .iter()
            .map(|group| group.id().get())
            .collect();
        assert_eq!(groups, vec![1, 2]);

        let zed = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("id");
        let found = UserRepository::find_by_id(&directory, &zed)
            .await
            .expect("lookup")
            .expect("zed exists");
        assert_eq!(found.username().as_ref(), "zed");
    }

    #[rstest]
    #[tokio::test]
    async fn passwords_are_hashed() {
        let directory =
            MemoryAccountDirectory::from_seed(AccountSeed::from_json(SEED).expect("json"))
                .expect("valid seed");
        let account = directory
            .find_account("ada")
            .await
            .expect("lookup")
            .expect("ada exists");
        assert!(account.password.as_phc().starts_with("$argon2id$"));
        assert!(!account.password.as_phc().contains("lovelace"));
        assert!(account.password.verify("lovelace"));
        assert!(!account.password.verify("z"));
    }

    #[rstest]
    #[case(r#"{"users": [{"username": "a b", "password": "x"}]}"#, "invalid user")]
    #[case(r#"{"users": [{"username": "a", "password": ""}]}"#, "non-empty password")]
    #[case(
        r#"{"users": [{"username": "a", "password": "x"}, {"username": "a", "password": "y"}]}"#,
        "duplicate username"
    )]
    #[case(r#"{"groups": [{"id": 0, "name": "x"}]}"#, "invalid group")]
    #[case(
        r#"{"groups": [{"id": 1, "name": "x"}, {"id": 1, "name": "y"}]}"#,
        "duplicate group"
    )]
    #[case(r#"{"admins": []}"#, "not valid JSON")]
    fn rejects_invalid_seeds(#[case] json: &str, #[case] expected: &str) {
        let err = AccountSeed::from_json(json)
            .and_then(MemoryAccountDirectory::from_seed)
            .expect_err("invalid seed");
        assert!(
            err.to_string().contains(expected),
            "{err} should mention {expected}"
        );
    }

    #[rstest]
    fn loads_accounts_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(SEED.as_bytes()).expect("write seed");

        let directory = MemoryAccountDirectory::load(file.path()).expect("load");
        assert_eq!(directory.user_count(), 2);
    }

    #[rstest]
    fn missing_file_reports_path() {
        let err = MemoryAccountDirectory::load(Path::new("/nonexistent/accounts.json"))
            .expect_err("missing file");
        assert!(matches!(err, AccountSeedError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/accounts.json"));
    }

    #[rstest]
    #[tokio::test]
    async fn development_directory_has_admin() {
        let directory = MemoryAccountDirectory::development().expect("development accounts");
        let account = directory
            .find_account("admin")
            .await
            .expect("lookup")
            .expect("admin exists");
        assert_eq!(account.user.id().as_ref(), DEVELOPMENT_USER_ID);
        assert!(account.password.verify("password"));
    }
}
