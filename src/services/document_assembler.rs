//! 文档组装服务 - 业务能力层
//!
//! 每道题依次输出：题干、选项 (a)..(e)、答案、解析，各块的图片紧跟在文字后面，
//! 最后分页。是否过滤题目由调用方决定，这里只渲染收到的列表。

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::{write_docx, DocBlock, HttpFetcher};
use crate::models::{option_label, QuestionRecord};
use crate::services::image_fetcher::{ImageFetcher, ImageOutcome};
use std::time::Duration;
use tracing::info;

/// 组装计划：写入指令和图片统计
#[derive(Debug, Default)]
pub struct AssemblyPlan {
    pub blocks: Vec<DocBlock>,
    pub images_embedded: usize,
    pub images_omitted: usize,
}

impl AssemblyPlan {
    fn text(&mut self, text: String) {
        self.blocks.push(DocBlock::Text(text));
    }

    fn images(&mut self, outcomes: Vec<ImageOutcome>) {
        for outcome in outcomes {
            match outcome {
                ImageOutcome::Embedded { image, .. } => {
                    self.images_embedded += 1;
                    self.blocks.push(DocBlock::Image(image));
                }
                ImageOutcome::Omitted { .. } => self.images_omitted += 1,
            }
        }
    }
}

/// 文档组装服务
pub struct DocumentAssembler<'a> {
    fetcher: &'a HttpFetcher,
    image_timeout: Duration,
    image_fetch_concurrency: usize,
    image_width_inches: f32,
}

impl<'a> DocumentAssembler<'a> {
    /// 创建新的文档组装服务
    pub fn new(fetcher: &'a HttpFetcher, config: &Config) -> Self {
        Self {
            fetcher,
            image_timeout: Duration::from_secs(config.image_timeout_secs),
            image_fetch_concurrency: config.image_fetch_concurrency,
            image_width_inches: config.image_width_inches,
        }
    }

    /// 生成 DOCX
    ///
    /// # 参数
    /// - `records`: 已过滤的题目
    /// - `base_url`: 解析 `/` 开头图片地址用的站点地址
    ///
    /// # 返回
    /// DOCX 字节；图片失败不会导致错误，只有文档序列化失败才会返回错误
    pub async fn create_docx(
        &self,
        records: &[QuestionRecord],
        base_url: Option<&str>,
    ) -> AppResult<Vec<u8>> {
        let plan = self.plan(records, base_url).await;

        info!(
            "📄 文档组装完成: {} 道题, 图片成功 {}, 省略 {}",
            records.len(),
            plan.images_embedded,
            plan.images_omitted
        );

        write_docx(&plan.blocks, self.image_width_inches)
    }

    /// 生成写入指令（会下载图片）
    pub async fn plan(&self, records: &[QuestionRecord], base_url: Option<&str>) -> AssemblyPlan {
        let images = ImageFetcher::new(
            self.fetcher,
            base_url.map(str::to_string),
            self.image_timeout,
            self.image_fetch_concurrency,
        );
        let mut plan = AssemblyPlan::default();

        for record in records {
            plan.text(format!("[Q] {}", record.question_text));
            plan.images(images.fetch_all(&record.question_images).await);

            for (idx, option) in record.options.iter().enumerate() {
                plan.text(format!("({}) {}", option_label(idx), option.text));
                plan.images(images.fetch_all(&option.images).await);
            }

            plan.text(format!("[ANS] {}", record.answer_text));

            plan.text(format!("[SOL] {}", record.solution_text));
            plan.images(images.fetch_all(&record.solution_images).await);

            plan.blocks.push(DocBlock::PageBreak);
        }

        plan
    }
}
