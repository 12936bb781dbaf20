//! # ノートユースケース
//!
//! ノートの一覧・作成・更新・削除のビジネスロジックを実装する。
//!
//! ## 所有者スコープ
//!
//! すべての操作は認証済みユーザーの ID でスコープされる。
//! 所有者はハンドラが認証結果から渡すものであり、
//! クライアント入力から受け取ることはない。

use std::sync::Arc;

use async_trait::async_trait;
use tripnote_domain::{
    DomainError,
    clock::Clock,
    note::{Note, NoteId, NoteTag},
    user::UserId,
    value_objects::{Heading, Message},
};
use tripnote_infra::repository::NoteRepository;

use crate::error::ApiError;

/// ノート部分更新の入力
///
/// `None` のフィールドは変更しない。
#[derive(Debug, Default)]
pub struct UpdateNoteInput {
    pub heading: Option<String>,
    pub message: Option<String>,
    pub tag: Option<String>,
}

/// ノートユースケーストレイト
#[async_trait]
pub trait NoteUseCase: Send + Sync {
    /// 所有するノートの一覧を作成日時の降順で取得する
    async fn list(&self, owner_id: &UserId) -> Result<Vec<Note>, ApiError>;

    /// ノートを作成する
    async fn create(
        &self,
        owner_id: UserId,
        heading: &str,
        message: &str,
        tag: &str,
    ) -> Result<Note, ApiError>;

    /// ノートを部分更新する
    ///
    /// 存在しない、または所有者が異なる場合は `NotFound`。
    async fn update(
        &self,
        id: NoteId,
        owner_id: &UserId,
        input: UpdateNoteInput,
    ) -> Result<Note, ApiError>;

    /// ノートを削除し、削除したノートを返す
    ///
    /// 存在しない、または所有者が異なる場合は `NotFound`。
    async fn delete(&self, id: NoteId, owner_id: &UserId) -> Result<Note, ApiError>;
}

/// ノートユースケースの実装
pub struct NoteUseCaseImpl {
    note_repository: Arc<dyn NoteRepository>,
    clock: Arc<dyn Clock>,
}

impl NoteUseCaseImpl {
    /// 新しいユースケースインスタンスを作成
    pub fn new(note_repository: Arc<dyn NoteRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            note_repository,
            clock,
        }
    }

    fn not_found(id: &NoteId) -> ApiError {
        DomainError::NotFound {
            entity_type: "Note",
            id: id.to_string(),
        }
        .into()
    }
}

#[async_trait]
impl NoteUseCase for NoteUseCaseImpl {
    async fn list(&self, owner_id: &UserId) -> Result<Vec<Note>, ApiError> {
        Ok(self.note_repository.find_all_by_owner(owner_id).await?)
    }

    async fn create(
        &self,
        owner_id: UserId,
        heading: &str,
        message: &str,
        tag: &str,
    ) -> Result<Note, ApiError> {
        let heading = Heading::new(heading)?;
        let message = Message::new(message)?;
        let tag: NoteTag = tag.parse()?;

        let note = Note::new(
            NoteId::new(),
            owner_id,
            heading,
            message,
            tag,
            self.clock.now(),
        );

        self.note_repository.insert(&note).await?;

        Ok(note)
    }

    async fn update(
        &self,
        id: NoteId,
        owner_id: &UserId,
        input: UpdateNoteInput,
    ) -> Result<Note, ApiError> {
        let mut note = self
            .note_repository
            .find_owned(&id, owner_id)
            .await?
            .ok_or_else(|| Self::not_found(&id))?;

        let now = self.clock.now();

        if let Some(heading) = input.heading {
            note = note.with_heading(Heading::new(heading)?, now);
        }
        if let Some(message) = input.message {
            note = note.with_message(Message::new(message)?, now);
        }
        if let Some(tag) = input.tag {
            note = note.with_tag(tag.parse()?, now);
        }

        // 取得と更新の間に削除された場合も NotFound
        if !self.note_repository.update_owned(&note).await? {
            return Err(Self::not_found(&id));
        }

        Ok(note)
    }

    async fn delete(&self, id: NoteId, owner_id: &UserId) -> Result<Note, ApiError> {
        self.note_repository
            .delete_owned(&id, owner_id)
            .await?
            .ok_or_else(|| Self::not_found(&id))
    }
}

#[cfg(test)]
mod tests {
    use tripnote_domain::clock::FixedClock;
    use tripnote_infra::mock::MockNoteRepository;

    use super::*;

    fn fixed_clock(timestamp: i64) -> Arc<FixedClock> {
        Arc::new(FixedClock::new(
            chrono::DateTime::from_timestamp(timestamp, 0).unwrap(),
        ))
    }

    fn create_sut(repo: MockNoteRepository) -> NoteUseCaseImpl {
        NoteUseCaseImpl::new(Arc::new(repo), fixed_clock(1_700_000_000))
    }

    #[tokio::test]
    async fn test_create_所有者は呼び出し元から渡される() {
        // Given
        let owner_id = UserId::new();
        let sut = create_sut(MockNoteRepository::new());

        // When
        let note = sut
            .create(owner_id.clone(), "Trip", "Remember passport", "travel")
            .await
            .unwrap();

        // Then
        assert_eq!(note.owner_id(), &owner_id);
        assert_eq!(note.tag(), NoteTag::Travel);
    }

    #[tokio::test]
    async fn test_create_不正なタグはバリデーションエラー() {
        // Given
        let sut = create_sut(MockNoteRepository::new());

        // When
        let result = sut
            .create(UserId::new(), "Trip", "Remember passport", "invalid")
            .await;

        // Then
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_短すぎる本文はバリデーションエラー() {
        // Given
        let sut = create_sut(MockNoteRepository::new());

        // When: 本文は 5 文字以上
        let result = sut.create(UserId::new(), "Trip", "abcd", "travel").await;

        // Then
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_作成日時の降順で返る() {
        // Given: 作成時刻の異なる 2 件
        let owner_id = UserId::new();
        let repo = MockNoteRepository::new();

        let older = NoteUseCaseImpl::new(Arc::new(repo.clone()), fixed_clock(1_700_000_000))
            .create(owner_id.clone(), "Older", "first note", "other")
            .await
            .unwrap();
        let newer = NoteUseCaseImpl::new(Arc::new(repo.clone()), fixed_clock(1_700_001_000))
            .create(owner_id.clone(), "Newer", "second note", "other")
            .await
            .unwrap();

        let sut = create_sut(repo);

        // When
        let notes = sut.list(&owner_id).await.unwrap();

        // Then
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].id(), newer.id());
        assert_eq!(notes[1].id(), older.id());
    }

    #[tokio::test]
    async fn test_list_他ユーザーのノートは含まれない() {
        // Given
        let owner_id = UserId::new();
        let other_id = UserId::new();
        let repo = MockNoteRepository::new();
        let sut = create_sut(repo);

        sut.create(other_id, "Other", "not my note", "work")
            .await
            .unwrap();

        // When
        let notes = sut.list(&owner_id).await.unwrap();

        // Then
        assert!(notes.is_empty());
    }

    #[tokio::test]
    async fn test_update_指定フィールドのみ変更される() {
        // Given
        let owner_id = UserId::new();
        let sut = create_sut(MockNoteRepository::new());
        let note = sut
            .create(owner_id.clone(), "Trip", "Remember passport", "travel")
            .await
            .unwrap();

        // When: 見出しだけ更新
        let updated = sut
            .update(
                note.id().clone(),
                &owner_id,
                UpdateNoteInput {
                    heading: Some("Packing".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        // Then
        assert_eq!(updated.heading().as_str(), "Packing");
        assert_eq!(updated.message().as_str(), "Remember passport");
        assert_eq!(updated.tag(), NoteTag::Travel);
    }

    #[tokio::test]
    async fn test_update_他ユーザーのノートはnotfound() {
        // Given
        let owner_id = UserId::new();
        let attacker_id = UserId::new();
        let sut = create_sut(MockNoteRepository::new());
        let note = sut
            .create(owner_id, "Trip", "Remember passport", "travel")
            .await
            .unwrap();

        // When: 別ユーザーとして更新を試みる
        let result = sut
            .update(
                note.id().clone(),
                &attacker_id,
                UpdateNoteInput {
                    heading: Some("Hacked".to_string()),
                    ..Default::default()
                },
            )
            .await;

        // Then: 存在しない場合と同じエラー
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_削除したノートを返す() {
        // Given
        let owner_id = UserId::new();
        let sut = create_sut(MockNoteRepository::new());
        let note = sut
            .create(owner_id.clone(), "Trip", "Remember passport", "travel")
            .await
            .unwrap();

        // When
        let deleted = sut.delete(note.id().clone(), &owner_id).await.unwrap();

        // Then: 削除後は一覧から消えている
        assert_eq!(deleted.id(), note.id());
        assert!(sut.list(&owner_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_他ユーザーのノートはnotfoundで削除されない() {
        // Given
        let owner_id = UserId::new();
        let attacker_id = UserId::new();
        let sut = create_sut(MockNoteRepository::new());
        let note = sut
            .create(owner_id.clone(), "Trip", "Remember passport", "travel")
            .await
            .unwrap();

        // When
        let result = sut.delete(note.id().clone(), &attacker_id).await;

        // Then: エラーかつレコードは残っている
        assert!(matches!(result, Err(ApiError::NotFound(_))));
        assert_eq!(sut.list(&owner_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_存在しないノートはnotfound() {
        // Given
        let sut = create_sut(MockNoteRepository::new());

        // When
        let result = sut.delete(NoteId::new(), &UserId::new()).await;

        // Then
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }
}
