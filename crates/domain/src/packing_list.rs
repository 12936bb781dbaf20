//! # 持ち物リスト
//!
//! 持ち物リストアイテムのエンティティを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 要件 |
//! |---|------------|------|
//! | [`PackingListItem`] | 持ち物アイテム | ちょうど一人のユーザーに所有される |
//!
//! 所有権の扱いは [`crate::note`] と同じ: `owner_id` は弱参照であり、
//! ユーザー削除時のカスケード削除は行わない。

use chrono::{DateTime, Utc};

use crate::{
    user::UserId,
    value_objects::{Heading, Message},
};

define_uuid_id! {
    /// 持ち物アイテム ID（一意識別子）
    pub struct PackingListItemId;
}

/// 持ち物リストアイテムエンティティ
///
/// 旅行の持ち物ひとつを表現する。作成時は未完了（`is_completed = false`）。
///
/// # 不変条件
///
/// - すべてのアイテムはちょうど一人のユーザーに所有される
/// - 読み取り・更新・削除は所有者スコープでのみ行われる
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackingListItem {
    id: PackingListItemId,
    owner_id: UserId,
    heading: Heading,
    message: Message,
    is_completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PackingListItem {
    /// 新しいアイテムを作成する
    ///
    /// # 不変条件
    ///
    /// - 作成時の `is_completed` は false
    /// - `owner_id` は必ず認証済みユーザーの ID であること
    pub fn new(
        id: PackingListItemId,
        owner_id: UserId,
        heading: Heading,
        message: Message,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_id,
            heading,
            message,
            is_completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// 既存のデータからアイテムを復元する（データベースから取得時）
    pub fn from_db(
        id: PackingListItemId,
        owner_id: UserId,
        heading: Heading,
        message: Message,
        is_completed: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_id,
            heading,
            message,
            is_completed,
            created_at,
            updated_at,
        }
    }

    // Getter メソッド

    pub fn id(&self) -> &PackingListItemId {
        &self.id
    }

    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    pub fn heading(&self) -> &Heading {
        &self.heading
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // 部分更新メソッド

    /// 見出しを変更した新しいインスタンスを返す
    pub fn with_heading(self, heading: Heading, now: DateTime<Utc>) -> Self {
        Self {
            heading,
            updated_at: now,
            ..self
        }
    }

    /// 本文を変更した新しいインスタンスを返す
    pub fn with_message(self, message: Message, now: DateTime<Utc>) -> Self {
        Self {
            message,
            updated_at: now,
            ..self
        }
    }

    /// 完了状態を変更した新しいインスタンスを返す
    pub fn with_completed(self, is_completed: bool, now: DateTime<Utc>) -> Self {
        Self {
            is_completed,
            updated_at: now,
            ..self
        }
    }
}
