//! # ノート
//!
//! ノートエンティティとそれに関連する値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 要件 |
//! |---|------------|------|
//! | [`Note`] | ノート | ちょうど一人のユーザーに所有される |
//! | [`NoteTag`] | タグ | 固定セットからひとつ選択 |
//!
//! ## 所有権
//!
//! `owner_id` は弱参照（外部キー）であり、User がメモリ上で Note を
//! 保持するわけではない。ユーザー削除時のカスケード削除は行わない。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::{
    DomainError,
    user::UserId,
    value_objects::{Heading, Message},
};

define_uuid_id! {
    /// ノート ID（一意識別子）
    ///
    /// UUID v7 を使用し、生成順にソート可能。
    pub struct NoteId;
}

/// ノートのタグ
///
/// 固定セットからひとつ選択する列挙型。
/// ワイヤ上のフィールド名は `tags` だが、値は常にひとつ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NoteTag {
    /// 仕事
    Work,
    /// プライベート
    Personal,
    /// 旅行
    Travel,
    /// 買い物
    Shopping,
    /// その他
    Other,
}

impl std::str::FromStr for NoteTag {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "work" => Ok(Self::Work),
            "personal" => Ok(Self::Personal),
            "travel" => Ok(Self::Travel),
            "shopping" => Ok(Self::Shopping),
            "other" => Ok(Self::Other),
            _ => Err(DomainError::Validation(format!("不正なタグ: {}", s))),
        }
    }
}

/// ノートエンティティ
///
/// ユーザーが作成するメモを表現する。
///
/// # 不変条件
///
/// - すべてのノートはちょうど一人のユーザーに所有される
/// - 読み取り・更新・削除は所有者スコープでのみ行われる
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    id: NoteId,
    owner_id: UserId,
    heading: Heading,
    message: Message,
    tag: NoteTag,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Note {
    /// 新しいノートを作成する
    ///
    /// # 不変条件
    ///
    /// `owner_id` は必ず認証済みユーザーの ID であること。
    /// クライアント入力から所有者を受け取ってはならない。
    pub fn new(
        id: NoteId,
        owner_id: UserId,
        heading: Heading,
        message: Message,
        tag: NoteTag,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_id,
            heading,
            message,
            tag,
            created_at: now,
            updated_at: now,
        }
    }

    /// 既存のデータからノートを復元する（データベースから取得時）
    pub fn from_db(
        id: NoteId,
        owner_id: UserId,
        heading: Heading,
        message: Message,
        tag: NoteTag,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_id,
            heading,
            message,
            tag,
            created_at,
            updated_at,
        }
    }

    // Getter メソッド

    pub fn id(&self) -> &NoteId {
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

    pub fn tag(&self) -> NoteTag {
        self.tag
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // 部分更新メソッド（指定されたフィールドのみ差し替える）

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

    /// タグを変更した新しいインスタンスを返す
    pub fn with_tag(self, tag: NoteTag, now: DateTime<Utc>) -> Self {
        Self {
            tag,
            updated_at: now,
            ..self
        }
    }
}
