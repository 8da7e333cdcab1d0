//! Infrastructure 層
//!
//! - `channel`: ConnectionChannel の具体的な実装
//! - `dto`: HTTP レスポンスのデータ転送オブジェクト

pub mod channel;
pub mod dto;
