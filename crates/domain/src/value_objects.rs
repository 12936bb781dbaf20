//! # 共通値オブジェクト
//!
//! 複数のエンティティで共有される値オブジェクトを定義する。
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: プリミティブ型をラップし、型安全性を確保
//! - **バリデーション**: 生成時に検証し、不正な値の存在を型レベルで排除
//! - **不変性**: 一度作成したら変更不可
//!
//! ## 含まれる型
//!
//! | 型 | ラップ対象 | 用途 |
//! |---|-----------|------|
//! | [`Heading`] | `String` | ノート / 持ち物リストの見出し（1〜50 文字） |
//! | [`Message`] | `String` | ノート / 持ち物リストの本文（5〜2000 文字） |

// =========================================================================
// Heading（見出し）
// =========================================================================

define_validated_string! {
    /// 見出し（値オブジェクト)
    ///
    /// ノートと持ち物リストの両方で使用する。
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - 最大 50 文字
    pub struct Heading {
        label: "見出し",
        max_length: 50,
    }
}

// =========================================================================
// Message（本文）
// =========================================================================

define_validated_string! {
    /// 本文（値オブジェクト）
    ///
    /// # バリデーション
    ///
    /// - 最小 5 文字
    /// - 最大 2000 文字
    pub struct Message {
        label: "本文",
        min_length: 5,
        max_length: 2000,
    }
}

// =========================================================================
// テスト
// =========================================================================
