//! # テスト用モックリポジトリ
//!
//! ユースケース・ハンドラーテストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! tripnote-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tripnote_domain::{
    auth::AccessToken,
    note::{Note, NoteId},
    packing_list::{PackingListItem, PackingListItemId},
    user::{User, UserId, Username},
};

use crate::{
    error::InfraError,
    repository::{NoteRepository, PackingListRepository, UserRepository},
};

// ===== MockUserRepository =====

/// テスト用のモック UserRepository
#[derive(Clone, Default)]
pub struct MockUserRepository {
    users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn add_user(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn insert(&self, user: &User) -> Result<(), InfraError> {
        let mut users = self.users.lock().unwrap();
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, InfraError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username() == username)
            .cloned())
    }

    async fn find_by_access_token(
        &self,
        access_token: &AccessToken,
    ) -> Result<Option<User>, InfraError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.access_token() == access_token)
            .cloned())
    }
}

// ===== MockNoteRepository =====

#[derive(Clone, Default)]
pub struct MockNoteRepository {
    notes: Arc<Mutex<Vec<Note>>>,
}

impl MockNoteRepository {
    pub fn new() -> Self {
        Self {
            notes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn add_note(&self, note: Note) {
        self.notes.lock().unwrap().push(note);
    }
}

#[async_trait]
impl NoteRepository for MockNoteRepository {
    async fn insert(&self, note: &Note) -> Result<(), InfraError> {
        let mut notes = self.notes.lock().unwrap();
        notes.push(note.clone());
        Ok(())
    }

    async fn find_all_by_owner(&self, owner_id: &UserId) -> Result<Vec<Note>, InfraError> {
        let mut notes: Vec<Note> = self
            .notes
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.owner_id() == owner_id)
            .cloned()
            .collect();
        // 実装と同じく作成日時の降順
        notes.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(notes)
    }

    async fn find_owned(
        &self,
        id: &NoteId,
        owner_id: &UserId,
    ) -> Result<Option<Note>, InfraError> {
        Ok(self
            .notes
            .lock()
            .unwrap()
            .iter()
            .find(|n| n.id() == id && n.owner_id() == owner_id)
            .cloned())
    }

    async fn delete_owned(
        &self,
        id: &NoteId,
        owner_id: &UserId,
    ) -> Result<Option<Note>, InfraError> {
        let mut notes = self.notes.lock().unwrap();
        let pos = notes
            .iter()
            .position(|n| n.id() == id && n.owner_id() == owner_id);
        Ok(pos.map(|pos| notes.remove(pos)))
    }

    async fn update_owned(&self, note: &Note) -> Result<bool, InfraError> {
        let mut notes = self.notes.lock().unwrap();
        match notes
            .iter()
            .position(|n| n.id() == note.id() && n.owner_id() == note.owner_id())
        {
            Some(pos) => {
                notes[pos] = note.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ===== MockPackingListRepository =====

#[derive(Clone, Default)]
pub struct MockPackingListRepository {
    items: Arc<Mutex<Vec<PackingListItem>>>,
}

impl MockPackingListRepository {
    pub fn new() -> Self {
        Self {
            items: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn add_item(&self, item: PackingListItem) {
        self.items.lock().unwrap().push(item);
    }
}

#[async_trait]
impl PackingListRepository for MockPackingListRepository {
    async fn insert(&self, item: &PackingListItem) -> Result<(), InfraError> {
        let mut items = self.items.lock().unwrap();
        items.push(item.clone());
        Ok(())
    }

    async fn find_all_by_owner(
        &self,
        owner_id: &UserId,
    ) -> Result<Vec<PackingListItem>, InfraError> {
        let mut items: Vec<PackingListItem> = self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.owner_id() == owner_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(items)
    }

    async fn find_owned(
        &self,
        id: &PackingListItemId,
        owner_id: &UserId,
    ) -> Result<Option<PackingListItem>, InfraError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.id() == id && i.owner_id() == owner_id)
            .cloned())
    }

    async fn delete_owned(
        &self,
        id: &PackingListItemId,
        owner_id: &UserId,
    ) -> Result<Option<PackingListItem>, InfraError> {
        let mut items = self.items.lock().unwrap();
        let pos = items
            .iter()
            .position(|i| i.id() == id && i.owner_id() == owner_id);
        Ok(pos.map(|pos| items.remove(pos)))
    }

    async fn update_owned(&self, item: &PackingListItem) -> Result<bool, InfraError> {
        let mut items = self.items.lock().unwrap();
        match items
            .iter()
            .position(|i| i.id() == item.id() && i.owner_id() == item.owner_id())
        {
            Some(pos) => {
                items[pos] = item.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
