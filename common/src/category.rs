//! 書類区分（カテゴリ）モジュール
//!
//! サーバーは区分を短縮コード（`L`）と旧形式の長い名前（`LAND_BUILDING`）の
//! どちらでも返す。入力境界で両方を同じ `Category` に解決し、
//! 内部ロジックは `Category` だけを扱う。

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;

/// 書類区分（10種）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    LandBuilding,   // 土地・建物
    ListedStock,    // 株式
    Deposit,        // 預貯金
    Passbook,       // 通帳
    LifeInsurance,  // 保険
    Debt,           // 債務
    FuneralExpense, // 葬式費用
    OtherProperty,  // その他
    ProcedureDoc,   // 手続き
    Unknown,        // 不明
}

lazy_static::lazy_static! {
    /// 短縮コード・旧形式コード → 区分
    static ref CODE_TABLE: HashMap<&'static str, Category> = {
        let mut table = HashMap::new();
        for category in Category::ALL {
            table.insert(category.code(), category);
            table.insert(category.legacy_alias(), category);
        }
        table
    };
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::LandBuilding,
        Category::ListedStock,
        Category::Deposit,
        Category::Passbook,
        Category::LifeInsurance,
        Category::Debt,
        Category::FuneralExpense,
        Category::OtherProperty,
        Category::ProcedureDoc,
        Category::Unknown,
    ];

    /// 短縮コード
    pub fn code(&self) -> &'static str {
        match self {
            Category::LandBuilding => "L",
            Category::ListedStock => "S",
            Category::Deposit => "D",
            Category::Passbook => "T",
            Category::LifeInsurance => "I",
            Category::Debt => "C",
            Category::FuneralExpense => "F",
            Category::OtherProperty => "O",
            Category::ProcedureDoc => "P",
            Category::Unknown => "U",
        }
    }

    /// 旧形式コード
    pub fn legacy_alias(&self) -> &'static str {
        match self {
            Category::LandBuilding => "LAND_BUILDING",
            Category::ListedStock => "LISTED_STOCK",
            Category::Deposit => "DEPOSIT",
            Category::Passbook => "PASSBOOK",
            Category::LifeInsurance => "LIFE_INSURANCE",
            Category::Debt => "DEBT",
            Category::FuneralExpense => "FUNERAL_EXPENSE",
            Category::OtherProperty => "OTHER_PROPERTY",
            Category::ProcedureDoc => "PROCEDURE_DOC",
            Category::Unknown => "UNKNOWN",
        }
    }

    /// 表示名
    pub fn label(&self) -> &'static str {
        match self {
            Category::LandBuilding => "土地・建物",
            Category::ListedStock => "株式",
            Category::Deposit => "預貯金",
            Category::Passbook => "通帳",
            Category::LifeInsurance => "保険",
            Category::Debt => "債務",
            Category::FuneralExpense => "葬式費用",
            Category::OtherProperty => "その他",
            Category::ProcedureDoc => "手続き",
            Category::Unknown => "不明",
        }
    }

    /// 短縮コード・旧形式コードのどちらからでも解決
    pub fn from_code(code: &str) -> Option<Self> {
        CODE_TABLE.get(code).copied()
    }

    /// 未知のコードはエラー（CLI引数など、利用者が指定する値用）
    pub fn parse_strict(code: &str) -> Result<Self> {
        Self::from_code(code).ok_or_else(|| Error::InvalidCategory(code.to_string()))
    }
}

impl std::str::FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_strict(s)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// ワイヤ上の区分コード
///
/// 未知のコードはエラーにせず、そのまま保持して表示名としても使う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryCode {
    Known(Category),
    Unrecognized(String),
}

impl CategoryCode {
    pub fn parse(raw: &str) -> Self {
        match Category::from_code(raw) {
            Some(category) => CategoryCode::Known(category),
            None => CategoryCode::Unrecognized(raw.to_string()),
        }
    }

    pub fn category(&self) -> Option<Category> {
        match self {
            CategoryCode::Known(category) => Some(*category),
            CategoryCode::Unrecognized(_) => None,
        }
    }

    /// 送信時の表記（既知の区分は短縮コードに正規化）
    pub fn as_wire(&self) -> &str {
        match self {
            CategoryCode::Known(category) => category.code(),
            CategoryCode::Unrecognized(raw) => raw,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CategoryCode::Known(category) => category.label(),
            CategoryCode::Unrecognized(raw) => raw,
        }
    }
}

impl Default for CategoryCode {
    fn default() -> Self {
        CategoryCode::Known(Category::Unknown)
    }
}

impl From<Category> for CategoryCode {
    fn from(category: Category) -> Self {
        CategoryCode::Known(category)
    }
}

impl Serialize for CategoryCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for CategoryCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        // 文字列以外が来ても失敗させない
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::String(raw) => CategoryCode::parse(&raw),
            serde_json::Value::Null => CategoryCode::default(),
            other => CategoryCode::Unrecognized(other.to_string()),
        })
    }
}

/// コードから表示名を取得（未知のコードはそのまま返す）
pub fn resolve_label(code: &str) -> &str {
    match Category::from_code(code) {
        Some(category) => category.label(),
        None => code,
    }
}
