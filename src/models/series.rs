use serde::{Deserialize, Serialize};

/// 系列列表中的一项
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesSummary {
    #[serde(deserialize_with = "deserialize_id")]
    pub series_id: String,
    #[serde(default)]
    pub series_name: String,
    #[serde(default, deserialize_with = "deserialize_id")]
    pub is_attempted: String,
}

impl SeriesSummary {
    /// 是否已作答
    pub fn attempted(&self) -> bool {
        self.is_attempted == "1"
    }
}

/// 系列列表响应
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeriesList {
    #[serde(default)]
    pub data: Vec<SeriesSummary>,
}

// 上游的 ID 有时是字符串，有时是整数
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer identifier")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_mixed_id_types() {
        let list: SeriesList = serde_json::from_value(json!({
            "data": [
                {"series_id": 615, "series_name": "Mock 1", "is_attempted": "1"},
                {"series_id": "616", "series_name": "Mock 2", "is_attempted": 0},
                {"series_id": "617", "is_attempted": null}
            ]
        }))
        .unwrap();

        assert_eq!(list.data.len(), 3);
        assert_eq!(list.data[0].series_id, "615");
        assert!(list.data[0].attempted());
        assert!(!list.data[1].attempted());
        assert_eq!(list.data[2].series_name, "");
    }
}
