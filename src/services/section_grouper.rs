//! 章节分组服务 - 业务能力层

use crate::models::{QuestionRecord, SectionGroup};
use std::collections::HashMap;

/// 按章节分组后的题目，保持章节首次出现的顺序
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionGroups {
    order: Vec<String>,
    groups: HashMap<String, SectionGroup>,
}

impl SectionGroups {
    /// 按章节 ID 查找
    pub fn get(&self, section_id: &str) -> Option<&SectionGroup> {
        self.groups.get(section_id)
    }

    /// 按首次出现顺序遍历 (章节 ID, 分组)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SectionGroup)> {
        self.order
            .iter()
            .filter_map(|id| self.groups.get(id).map(|group| (id.as_str(), group)))
    }

    /// 章节 ID，按首次出现顺序
    pub fn section_ids(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// 按 `section_id` 分组
///
/// 章节名取该章节第一道题的 `section_name`，为空时退化为章节 ID；
/// 每个分组内的题目保持原始顺序。
pub fn group_by_section(records: &[QuestionRecord]) -> SectionGroups {
    let mut sections = SectionGroups::default();

    for record in records {
        let section_id = record.section_id.clone();
        if !sections.groups.contains_key(&section_id) {
            let name = if record.section_name.is_empty() {
                section_id.clone()
            } else {
                record.section_name.clone()
            };
            sections.order.push(section_id.clone());
            sections.groups.insert(
                section_id.clone(),
                SectionGroup {
                    name,
                    questions: Vec::new(),
                },
            );
        }

        if let Some(group) = sections.groups.get_mut(&section_id) {
            group.questions.push(record.clone());
        }
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(question_id: &str, section_id: &str, section_name: &str) -> QuestionRecord {
        QuestionRecord {
            question_id: question_id.to_string(),
            section_id: section_id.to_string(),
            section_name: section_name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_groups_preserve_first_seen_order() {
        let records = vec![
            record("q0", "1", "English"),
            record("q1", "2", "Maths"),
            record("q2", "1", "English"),
        ];

        let sections = group_by_section(&records);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections.section_ids(), &["1".to_string(), "2".to_string()]);

        let first = sections.get("1").unwrap();
        assert_eq!(first.name, "English");
        let ids: Vec<_> = first.questions.iter().map(|q| q.question_id.as_str()).collect();
        assert_eq!(ids, vec!["q0", "q2"]);

        let names: Vec<_> = sections.iter().map(|(_, g)| g.name.as_str()).collect();
        assert_eq!(names, vec!["English", "Maths"]);
    }

    #[test]
    fn test_missing_name_falls_back_to_id() {
        let sections = group_by_section(&[record("q0", "77", ""), record("q1", "", "")]);
        assert_eq!(sections.get("77").unwrap().name, "77");
        assert_eq!(sections.get("").unwrap().name, "");
    }

    #[test]
    fn test_empty_input() {
        assert!(group_by_section(&[]).is_empty());
    }
}
