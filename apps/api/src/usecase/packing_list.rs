//! # 持ち物リストユースケース
//!
//! 持ち物リストアイテムの一覧・作成・更新・削除・完了状態変更の
//! ビジネスロジックを実装する。
//!
//! 所有者スコープの扱いは [`super::note`] と同じ。

use std::sync::Arc;

use async_trait::async_trait;
use tripnote_domain::{
    DomainError,
    clock::Clock,
    packing_list::{PackingListItem, PackingListItemId},
    user::UserId,
    value_objects::{Heading, Message},
};
use tripnote_infra::repository::PackingListRepository;

use crate::error::ApiError;

/// アイテム部分更新の入力
///
/// `None` のフィールドは変更しない。
#[derive(Debug, Default)]
pub struct UpdatePackingListItemInput {
    pub heading: Option<String>,
    pub message: Option<String>,
    pub is_completed: Option<bool>,
}

/// 持ち物リストユースケーストレイト
#[async_trait]
pub trait PackingListUseCase: Send + Sync {
    /// 所有するアイテムの一覧を作成日時の降順で取得する
    async fn list(&self, owner_id: &UserId) -> Result<Vec<PackingListItem>, ApiError>;

    /// アイテムを作成する（作成時は未完了）
    async fn create(
        &self,
        owner_id: UserId,
        heading: &str,
        message: &str,
    ) -> Result<PackingListItem, ApiError>;

    /// アイテムを部分更新する
    ///
    /// 存在しない、または所有者が異なる場合は `NotFound`。
    async fn update(
        &self,
        id: PackingListItemId,
        owner_id: &UserId,
        input: UpdatePackingListItemInput,
    ) -> Result<PackingListItem, ApiError>;

    /// 完了状態を変更する
    async fn set_completed(
        &self,
        id: PackingListItemId,
        owner_id: &UserId,
        is_completed: bool,
    ) -> Result<PackingListItem, ApiError>;

    /// アイテムを削除し、削除したアイテムを返す
    async fn delete(
        &self,
        id: PackingListItemId,
        owner_id: &UserId,
    ) -> Result<PackingListItem, ApiError>;
}

/// 持ち物リストユースケースの実装
pub struct PackingListUseCaseImpl {
    packing_list_repository: Arc<dyn PackingListRepository>,
    clock: Arc<dyn Clock>,
}

impl PackingListUseCaseImpl {
    /// 新しいユースケースインスタンスを作成
    pub fn new(
        packing_list_repository: Arc<dyn PackingListRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            packing_list_repository,
            clock,
        }
    }

    fn not_found(id: &PackingListItemId) -> ApiError {
        DomainError::NotFound {
            entity_type: "PackingListItem",
            id: id.to_string(),
        }
        .into()
    }

    /// 所有者スコープで更新を書き戻す共通処理
    async fn write_back(&self, item: PackingListItem) -> Result<PackingListItem, ApiError> {
        if !self.packing_list_repository.update_owned(&item).await? {
            return Err(Self::not_found(item.id()));
        }
        Ok(item)
    }
}

#[async_trait]
impl PackingListUseCase for PackingListUseCaseImpl {
    async fn list(&self, owner_id: &UserId) -> Result<Vec<PackingListItem>, ApiError> {
        Ok(self
            .packing_list_repository
            .find_all_by_owner(owner_id)
            .await?)
    }

    async fn create(
        &self,
        owner_id: UserId,
        heading: &str,
        message: &str,
    ) -> Result<PackingListItem, ApiError> {
        let heading = Heading::new(heading)?;
        let message = Message::new(message)?;

        let item = PackingListItem::new(
            PackingListItemId::new(),
            owner_id,
            heading,
            message,
            self.clock.now(),
        );

        self.packing_list_repository.insert(&item).await?;

        Ok(item)
    }

    async fn update(
        &self,
        id: PackingListItemId,
        owner_id: &UserId,
        input: UpdatePackingListItemInput,
    ) -> Result<PackingListItem, ApiError> {
        let mut item = self
            .packing_list_repository
            .find_owned(&id, owner_id)
            .await?
            .ok_or_else(|| Self::not_found(&id))?;

        let now = self.clock.now();

        if let Some(heading) = input.heading {
            item = item.with_heading(Heading::new(heading)?, now);
        }
        if let Some(message) = input.message {
            item = item.with_message(Message::new(message)?, now);
        }
        if let Some(is_completed) = input.is_completed {
            item = item.with_completed(is_completed, now);
        }

        self.write_back(item).await
    }

    async fn set_completed(
        &self,
        id: PackingListItemId,
        owner_id: &UserId,
        is_completed: bool,
    ) -> Result<PackingListItem, ApiError> {
        let item = self
            .packing_list_repository
            .find_owned(&id, owner_id)
            .await?
            .ok_or_else(|| Self::not_found(&id))?
            .with_completed(is_completed, self.clock.now());

        self.write_back(item).await
    }

    async fn delete(
        &self,
        id: PackingListItemId,
        owner_id: &UserId,
    ) -> Result<PackingListItem, ApiError> {
        self.packing_list_repository
            .delete_owned(&id, owner_id)
            .await?
            .ok_or_else(|| Self::not_found(&id))
    }
}

#[cfg(test)]
mod tests {
    use tripnote_domain::clock::FixedClock;
    use tripnote_infra::mock::MockPackingListRepository;

    use super::*;

    fn fixed_clock(timestamp: i64) -> Arc<FixedClock> {
        Arc::new(FixedClock::new(
            chrono::DateTime::from_timestamp(timestamp, 0).unwrap(),
        ))
    }

    fn create_sut(repo: MockPackingListRepository) -> PackingListUseCaseImpl {
        PackingListUseCaseImpl::new(Arc::new(repo), fixed_clock(1_700_000_000))
    }

    #[tokio::test]
    async fn test_create_新規アイテムは未完了で所有者は呼び出し元() {
        // Given
        let owner_id = UserId::new();
        let sut = create_sut(MockPackingListRepository::new());

        // When
        let item = sut
            .create(owner_id.clone(), "パスポート", "有効期限を確認する")
            .await
            .unwrap();

        // Then
        assert!(!item.is_completed());
        assert_eq!(item.owner_id(), &owner_id);
    }

    #[tokio::test]
    async fn test_create_長すぎる見出しはバリデーションエラー() {
        // Given
        let sut = create_sut(MockPackingListRepository::new());

        // When: 見出しは 50 文字以内
        let result = sut
            .create(UserId::new(), &"あ".repeat(51), "有効期限を確認する")
            .await;

        // Then
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_作成日時の降順で返る() {
        // Given
        let owner_id = UserId::new();
        let repo = MockPackingListRepository::new();

        let older = PackingListUseCaseImpl::new(Arc::new(repo.clone()), fixed_clock(1_700_000_000))
            .create(owner_id.clone(), "古いアイテム", "最初に追加した")
            .await
            .unwrap();
        let newer = PackingListUseCaseImpl::new(Arc::new(repo.clone()), fixed_clock(1_700_001_000))
            .create(owner_id.clone(), "新しいアイテム", "あとから追加した")
            .await
            .unwrap();

        let sut = create_sut(repo);

        // When
        let items = sut.list(&owner_id).await.unwrap();

        // Then
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id(), newer.id());
        assert_eq!(items[1].id(), older.id());
    }

    #[tokio::test]
    async fn test_set_completed_完了にして戻せる() {
        // Given
        let owner_id = UserId::new();
        let sut = create_sut(MockPackingListRepository::new());
        let item = sut
            .create(owner_id.clone(), "パスポート", "有効期限を確認する")
            .await
            .unwrap();

        // When / Then
        let completed = sut
            .set_completed(item.id().clone(), &owner_id, true)
            .await
            .unwrap();
        assert!(completed.is_completed());

        let reverted = sut
            .set_completed(item.id().clone(), &owner_id, false)
            .await
            .unwrap();
        assert!(!reverted.is_completed());
    }

    #[tokio::test]
    async fn test_set_completed_他ユーザーのアイテムはnotfound() {
        // Given
        let owner_id = UserId::new();
        let attacker_id = UserId::new();
        let sut = create_sut(MockPackingListRepository::new());
        let item = sut
            .create(owner_id, "パスポート", "有効期限を確認する")
            .await
            .unwrap();

        // When
        let result = sut.set_completed(item.id().clone(), &attacker_id, true).await;

        // Then
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_完了状態も部分更新できる() {
        // Given
        let owner_id = UserId::new();
        let sut = create_sut(MockPackingListRepository::new());
        let item = sut
            .create(owner_id.clone(), "パスポート", "有効期限を確認する")
            .await
            .unwrap();

        // When
        let updated = sut
            .update(
                item.id().clone(),
                &owner_id,
                UpdatePackingListItemInput {
                    heading: Some("充電器".to_string()),
                    is_completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        // Then: 指定しなかった本文は変わらない
        assert_eq!(updated.heading().as_str(), "充電器");
        assert_eq!(updated.message().as_str(), "有効期限を確認する");
        assert!(updated.is_completed());
    }

    #[tokio::test]
    async fn test_delete_他ユーザーのアイテムはnotfoundで削除されない() {
        // Given
        let owner_id = UserId::new();
        let attacker_id = UserId::new();
        let sut = create_sut(MockPackingListRepository::new());
        let item = sut
            .create(owner_id.clone(), "パスポート", "有効期限を確認する")
            .await
            .unwrap();

        // When
        let result = sut.delete(item.id().clone(), &attacker_id).await;

        // Then
        assert!(matches!(result, Err(ApiError::NotFound(_))));
        assert_eq!(sut.list(&owner_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_削除したアイテムを返す() {
        // Given
        let owner_id = UserId::new();
        let sut = create_sut(MockPackingListRepository::new());
        let item = sut
            .create(owner_id.clone(), "パスポート", "有効期限を確認する")
            .await
            .unwrap();

        // When
        let deleted = sut.delete(item.id().clone(), &owner_id).await.unwrap();

        // Then
        assert_eq!(deleted.id(), item.id());
        assert!(sut.list(&owner_id).await.unwrap().is_empty());
    }
}
