use thiserror::Error;

/// 应用程序错误类型
///
/// 字段级异常（缺字段、HTML 畸形、单张图片失败）在各自的服务内部被吸收，
/// 不会出现在这里；这里只有会终止一次导出的错误。
#[derive(Debug, Error)]
pub enum AppError {
    /// 所有 JSON 恢复策略均失败
    #[error("负载解析错误: {0}")]
    Recovery(#[from] RecoveryError),
    /// 输入文件缺失或缺少远程标识
    #[error("数据源不可用: {0}")]
    SourceUnavailable(#[from] SourceError),
    /// 远程负载请求失败
    #[error("上游请求失败: {0}")]
    UpstreamFetch(#[from] UpstreamError),
    /// 过滤后没有任何题目
    #[error("没有可导出的题目: {context}")]
    NoContent { context: String },
    /// 文档序列化失败
    #[error("文档生成失败: {0}")]
    Document(String),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 写入输出文件失败
    #[error("文件错误 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 负载恢复失败
///
/// `attempts` 按尝试顺序记录每个策略的名称和失败原因，
/// `source` 是第一个策略（直接解析）的原始错误。
#[derive(Debug, Error)]
#[error("所有 JSON 恢复策略均失败 (共 {} 种): {source}", .attempts.len())]
pub struct RecoveryError {
    pub attempts: Vec<StrategyFailure>,
    #[source]
    pub source: serde_json::Error,
}

/// 单个恢复策略的失败记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyFailure {
    pub strategy: &'static str,
    pub message: String,
}

/// 数据源不可用
#[derive(Debug, Error)]
pub enum SourceError {
    /// 配置的静态输入文件不存在
    #[error("输入文件不存在: {path}")]
    InputFileMissing { path: String },
    /// 读取静态输入文件失败
    #[error("读取输入文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 未使用静态输入时必须提供系列 ID
    #[error("未配置输入文件时必须提供 series_id")]
    MissingIdentifier,
}

/// 上游请求错误
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// 网络请求失败（连接、超时、读取响应体）
    #[error("请求失败 ({url}): {source}")]
    RequestFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// 上游返回非 2xx 状态码
    #[error("上游返回错误状态 ({url}): {status}")]
    BadStatus { url: String, status: u16 },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 不支持的语言代码
    #[error("不支持的语言: {code}")]
    UnsupportedLanguage { code: String },
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 配置文件读取或解析失败
    #[error("配置文件无效 ({path}): {message}")]
    InvalidFile { path: String, message: String },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建"无内容"错误
    pub fn no_content(context: impl Into<String>) -> Self {
        AppError::NoContent {
            context: context.into(),
        }
    }

    /// 创建文件写入错误
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }

    /// 是否为"无内容"错误（调用方据此展示与网络错误不同的提示）
    pub fn is_no_content(&self) -> bool {
        matches!(self, AppError::NoContent { .. })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
