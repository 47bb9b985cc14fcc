//! Instruction template for filename synthesis.
//!
//! The template carries the deployment's naming rules (first line when it is
//! representative, court case numbers for judgments, the enterprise-name
//! field of business-registration records, and a manifest override that
//! disables both detectors). These rules are instructions to the remote
//! model; nothing in this crate evaluates them.
//!
//! Callers can override the default via
//! [`crate::config::SummarizerConfig::prompt_template`].

/// Placeholder replaced by the extracted page text.
pub const CONTENT_PLACEHOLDER: &str = "{content}";

/// Default naming instructions, in the deployment's language.
pub const DEFAULT_NAMING_PROMPT: &str = r#"请根据以下PDF文档第一页内容，生成一个简洁、有意义的文件名。
要求：
1. 包含文档核心主题
2. 包含关键日期或编号(如有)
3. 使用中文
4. 长度不超过30个字符
5. 如果第一行内容可以体现文件内容，请直接使用第一行文字作为文件名
6. 如果前6行内容中出现判决书、裁定书、裁决书或类似字眼，你需要按照该方式生成文件名，具体案号在文本中会有显示：（2021）浙0110民初1234号民事判决书
7. 如果文本中出现核准开业登记通知书、个体户机读档案或类似字眼，你需要在文本中找到“企业名称：”字眼，并将“企业名称：”后属于企业名称的部分列为文件名，如：“企业名称:佛山市禅城区潮牌网红服装商行(个体工商户)”的文件名为“佛山市禅城区潮牌网红服装商行(个体工商户)”
8. 如果文本前三行内容包含材料清单字眼，则无需考虑后面出现的判决书、裁定书、裁决书、核准开业登记通知书、个体户机读档案或类似字眼

文档内容：
{content}

请直接返回文件名，不要包含其他说明。"#;

/// Substitute the document text into an instruction template.
///
/// A template without the placeholder gets the text appended after a blank
/// line so a hand-written override can never silently drop the document.
pub fn render_naming_prompt(template: &str, content: &str) -> String {
    if template.contains(CONTENT_PLACEHOLDER) {
        template.replace(CONTENT_PLACEHOLDER, content)
    } else {
        format!("{template}\n\n{content}")
    }
}
