use serde::Serialize;

/// 选项标签，按位置依次为 a..e
pub const OPTION_LABELS: [&str; 5] = ["a", "b", "c", "d", "e"];

/// 获取指定位置的选项标签，超出五个标签时退化为 1 起始的序号
pub fn option_label(index: usize) -> String {
    OPTION_LABELS
        .get(index)
        .map(|label| label.to_string())
        .unwrap_or_else(|| (index + 1).to_string())
}

/// 单个选项
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct OptionEntry {
    pub text: String,
    pub images: Vec<String>,
}

/// 规范化后的题目记录
///
/// 由 `record_normalizer` 从恢复出的 JSON 树一次性构造，之后只读。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct QuestionRecord {
    pub question_id: String,
    /// 章节 ID，缺失时为空字符串
    pub section_id: String,
    pub section_name: String,
    pub topic_id: String,

    pub question_text: String,
    /// 题干图片，按文档中出现的顺序
    pub question_images: Vec<String>,

    /// 只保留有文字或图片的选项
    pub options: Vec<OptionEntry>,

    /// 答案在 `options` 中的下标（0 起始），只有答案是合法序号时才有值
    pub answer_index: Option<usize>,
    /// 有 `answer_index` 时为选项标签，否则为答案 HTML 的纯文本
    pub answer_text: String,

    pub solution_text: String,
    pub solution_images: Vec<String>,
}

impl QuestionRecord {
    /// 题干既没有文字也没有图片
    pub fn is_blank(&self) -> bool {
        self.question_text.is_empty() && self.question_images.is_empty()
    }
}

/// 章节分组
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionGroup {
    pub name: String,
    pub questions: Vec<QuestionRecord>,
}
