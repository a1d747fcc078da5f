use chrono::NaiveDateTime;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sqlx::FromRow;

/// 存放位置
///
/// 数据库中为 PostgreSQL 枚举 `storagelocation`（大写标签），
/// JSON 中为整数编码 0..3。
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "storagelocation", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StorageLocation {
    Fridge,
    Freezer,
    Pantry,
    SpiceRack,
}

impl StorageLocation {
    pub fn code(self) -> u8 {
        match self {
            Self::Fridge => 0,
            Self::Freezer => 1,
            Self::Pantry => 2,
            Self::SpiceRack => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Fridge),
            1 => Some(Self::Freezer),
            2 => Some(Self::Pantry),
            3 => Some(Self::SpiceRack),
            _ => None,
        }
    }
}

impl Serialize for StorageLocation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for StorageLocation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        Self::from_code(code).ok_or_else(|| {
            de::Error::invalid_value(de::Unexpected::Unsigned(code.into()), &"a storage location code 0..=3")
        })
    }
}

/// 库存项 (PantryItem)
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct PantryItem {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub storage_location: StorageLocation,
    pub date_added: NaiveDateTime,
    pub use_by: NaiveDateTime,
}

impl PantryItem {
    /// 复制本库存项并替换数量，用于记录实际消耗
    pub fn with_quantity(&self, quantity: f64) -> Self {
        Self {
            quantity,
            ..self.clone()
        }
    }
}
