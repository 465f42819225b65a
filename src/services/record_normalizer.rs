//! 题目规范化服务 - 业务能力层
//!
//! 遍历恢复出的 JSON 树，按语言解析每道题的字段，产出扁平的 `QuestionRecord` 列表。
//!
//! 负载结构：
//! ```text
//! { "data": [ { "section_id", "section_name", "all_questions": { <topic>: [ question, .. ] } } ] }
//! ```
//! 缺失或为 null 的字段一律按空值处理，不会让单道题失败。

use crate::models::{option_label, Lang, OptionEntry, QuestionRecord};
use crate::services::field_extractor::{parse_html_field, FieldContent};
use serde_json::Value;
use tracing::debug;

/// 每道题最多的选项槽位
pub const OPTION_SLOTS: usize = 5;

/// 答案序号字段。答案序号与语言无关，上游只在英文字段里维护，
/// 所以无论导出哪种语言都从这里读取。
pub const ANSWER_KEY_FIELD: &str = "answer_en";

/// 规范化整棵 JSON 树
///
/// # 参数
/// - `raw_json`: 恢复出的负载
/// - `lang`: 目标语言
///
/// # 返回
/// 按 章节 → 主题 → 题目 顺序展开的题目记录；同样的输入总是得到同样的输出
pub fn process_data(raw_json: &Value, lang: Lang) -> Vec<QuestionRecord> {
    let mut records = Vec::new();

    for section in array_items(raw_json.get("data")) {
        let section_id = first_present(section, &["section_id", "sec_id"]).unwrap_or_default();
        let section_name = first_present(section, &["section_name", "sec_name"])
            .unwrap_or_else(|| section_id.clone());

        // 主题分组的键没有语义，只展开它的值
        let question_lists: Vec<&Value> = match section.get("all_questions") {
            Some(Value::Object(topics)) => topics.values().collect(),
            Some(Value::Array(lists)) => lists.iter().collect(),
            _ => Vec::new(),
        };

        let questions = question_lists
            .into_iter()
            .flat_map(|list| array_items(Some(list)))
            .filter(|question| question.is_object());

        for question in questions {
            records.push(normalize_question(question, lang, &section_id, &section_name));
        }
    }

    debug!("规范化完成: {} 道题 (语言: {})", records.len(), lang);
    records
}

/// 规范化单道题
fn normalize_question(
    question: &Value,
    lang: Lang,
    section_id: &str,
    section_name: &str,
) -> QuestionRecord {
    let code = lang.code();

    let stem = html_field(question, &format!("question_{}", code));

    let options: Vec<OptionEntry> = (1..=OPTION_SLOTS)
        .map(|slot| html_field(question, &format!("option_{}_{}", code, slot)))
        .filter(|field| !field.is_empty())
        .map(|field| OptionEntry {
            text: field.text,
            images: field.images,
        })
        .collect();

    let (answer_index, answer_text) = resolve_answer(question, lang, options.len());

    let solution = html_field(question, &format!("solution_{}", code));

    QuestionRecord {
        question_id: field_string(question, "qid").unwrap_or_default(),
        section_id: section_id.to_string(),
        section_name: section_name.to_string(),
        topic_id: field_string(question, "topic_id").unwrap_or_default(),
        question_text: stem.text,
        question_images: stem.images,
        options,
        answer_index,
        answer_text,
        solution_text: solution.text,
        solution_images: solution.images,
    }
}

/// 解析答案
///
/// 答案序号是合法的 1 起始序号且不超过选项数时，返回下标和选项标签；
/// 否则把目标语言的答案字段（没有则用序号字段原值）当作 HTML 解析成文本。
pub fn resolve_answer(question: &Value, lang: Lang, option_count: usize) -> (Option<usize>, String) {
    // 数字 0 与缺失同等对待
    if question.get(ANSWER_KEY_FIELD).and_then(Value::as_i64) == Some(0) {
        return (None, String::new());
    }

    let raw_key = match field_string(question, ANSWER_KEY_FIELD) {
        Some(raw) => raw,
        None => return (None, String::new()),
    };

    if let Ok(choice) = raw_key.trim().parse::<i64>() {
        if choice >= 1 && (choice as usize) <= option_count {
            let index = (choice - 1) as usize;
            return (Some(index), option_label(index));
        }
    }

    let answer_html = field_string(question, &format!("answer_{}", lang.code())).unwrap_or(raw_key);
    (None, parse_html_field(Some(&answer_html)).text)
}

fn html_field(question: &Value, key: &str) -> FieldContent {
    parse_html_field(field_string(question, key).as_deref())
}

/// 读取字段为字符串
///
/// 数字会被转成字符串；缺失、null、空字符串以及其它类型返回 `None`。
fn field_string(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// 依次尝试多个字段名，返回第一个有值的
fn first_present(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| field_string(value, key))
}

fn array_items(value: Option<&Value>) -> impl Iterator<Item = &Value> {
    value
        .and_then(Value::as_array)
        .map(|items| items.as_slice())
        .unwrap_or_default()
        .iter()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(question: Value) -> Value {
        json!({
            "data": [{
                "section_id": 11,
                "section_name": "Reasoning",
                "all_questions": {"topic-a": [question]}
            }]
        })
    }

    #[test]
    fn test_numeric_answer_resolves_to_label() {
        let raw = payload(json!({
            "qid": 501,
            "topic_id": "9",
            "question_en": "<p>Pick one</p>",
            "option_en_1": "<p>A</p>",
            "option_en_2": "<p>B</p>",
            "option_en_3": "<p>C</p>",
            "option_en_4": "<p>D</p>",
            "answer_en": "2",
            "solution_en": "<p>Because B</p>"
        }));

        let records = process_data(&raw, Lang::English);
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.question_id, "501");
        assert_eq!(record.section_id, "11");
        assert_eq!(record.section_name, "Reasoning");
        assert_eq!(record.topic_id, "9");
        assert_eq!(record.options.len(), 4);
        assert_eq!(record.answer_index, Some(1));
        assert_eq!(record.answer_text, "b");
        assert_eq!(record.solution_text, "Because B");
    }

    #[test]
    fn test_html_answer_falls_back_to_text() {
        let raw = payload(json!({
            "question_en": "Explain",
            "answer_en": "<p>The <b>capital</b> is Delhi</p>"
        }));

        let record = &process_data(&raw, Lang::English)[0];
        assert_eq!(record.answer_index, None);
        assert_eq!(record.answer_text, "The capital is Delhi");
    }

    #[test]
    fn test_out_of_range_answer_uses_language_field() {
        let raw = payload(json!({
            "question_hi": "<p>प्रश्न</p>",
            "option_hi_1": "एक",
            "option_hi_2": "दो",
            "answer_en": "4",
            "answer_hi": "<p>उत्तर</p>"
        }));

        let record = &process_data(&raw, Lang::Hindi)[0];
        assert_eq!(record.answer_index, None);
        assert_eq!(record.answer_text, "उत्तर");
    }

    #[test]
    fn test_answer_key_always_read_from_english_field() {
        let raw = payload(json!({
            "question_hi": "प्रश्न",
            "option_hi_1": "एक",
            "option_hi_2": "दो",
            "answer_en": "1",
            "answer_hi": "2"
        }));

        let record = &process_data(&raw, Lang::Hindi)[0];
        assert_eq!(record.answer_index, Some(0));
        assert_eq!(record.answer_text, "a");
    }

    #[test]
    fn test_missing_answer_is_empty() {
        let raw = payload(json!({"question_en": "Q", "answer_en": null}));
        let record = &process_data(&raw, Lang::English)[0];
        assert_eq!(record.answer_index, None);
        assert_eq!(record.answer_text, "");
    }

    #[test]
    fn test_numeric_zero_answer_is_empty() {
        let raw = payload(json!({
            "question_en": "Q",
            "option_en_1": "x",
            "answer_en": 0,
            "answer_hi": "<p>शून्य</p>"
        }));

        let record = &process_data(&raw, Lang::English)[0];
        assert_eq!(record.answer_index, None);
        assert_eq!(record.answer_text, "");
    }

    #[test]
    fn test_empty_option_slots_are_skipped() {
        let raw = payload(json!({
            "option_en_1": "<p>first</p>",
            "option_en_2": "",
            "option_en_3": "<p>   </p>",
            "option_en_4": "<img src='/four.png'>",
            "option_en_5": null,
            "answer_en": "2"
        }));

        let record = &process_data(&raw, Lang::English)[0];
        assert_eq!(
            record.options,
            vec![
                OptionEntry {
                    text: "first".to_string(),
                    images: vec![]
                },
                OptionEntry {
                    text: String::new(),
                    images: vec!["/four.png".to_string()]
                },
            ]
        );
        // 序号 2 对应压缩后的第二个选项
        assert_eq!(record.answer_index, Some(1));
        assert_eq!(record.answer_text, "b");
    }

    #[test]
    fn test_blank_record_is_still_emitted() {
        let raw = payload(json!({}));
        let records = process_data(&raw, Lang::Hindi);
        assert_eq!(records.len(), 1);
        assert!(records[0].is_blank());
    }

    #[test]
    fn test_section_fallback_fields() {
        let raw = json!({
            "data": [
                {"sec_id": "s1", "sec_name": "Maths", "all_questions": {"t": [{}]}},
                {"sec_id": 42, "all_questions": {"t": [{}]}},
                {"all_questions": {"t": [{}]}}
            ]
        });

        let records = process_data(&raw, Lang::English);
        assert_eq!(records.len(), 3);
        assert_eq!((records[0].section_id.as_str(), records[0].section_name.as_str()), ("s1", "Maths"));
        assert_eq!((records[1].section_id.as_str(), records[1].section_name.as_str()), ("42", "42"));
        assert_eq!((records[2].section_id.as_str(), records[2].section_name.as_str()), ("", ""));
    }

    #[test]
    fn test_topics_are_flattened_in_order() {
        let raw = json!({
            "data": [{
                "section_id": "1",
                "all_questions": {
                    "t1": [{"qid": "a"}, {"qid": "b"}],
                    "t2": [{"qid": "c"}]
                }
            }]
        });

        let ids: Vec<_> = process_data(&raw, Lang::English)
            .into_iter()
            .map(|r| r.question_id)
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_non_object_entries_are_skipped() {
        let raw = json!({
            "data": [{
                "section_id": "1",
                "all_questions": {"t": [{"qid": "a", "question_en": "Q"}, null, 5, "stray"]}
            }]
        });

        let records = process_data(&raw, Lang::English);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].question_id, "a");
    }

    #[test]
    fn test_missing_data_yields_nothing() {
        assert!(process_data(&json!({}), Lang::English).is_empty());
        assert!(process_data(&json!({"data": "oops"}), Lang::English).is_empty());
    }

    #[test]
    fn test_idempotent() {
        let raw = payload(json!({
            "question_en": "<p>Q<img src='/q.png'></p>",
            "option_en_1": "x",
            "answer_en": "1"
        }));
        assert_eq!(
            process_data(&raw, Lang::English),
            process_data(&raw, Lang::English)
        );
    }
}
