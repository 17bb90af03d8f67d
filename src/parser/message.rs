use crate::feed::models::SparkCategory;
use crate::ledger::models::DebtCategory;
use crate::parser::regex::RegexPatterns;
use log::debug;

/// 从聊天消息解析出的操作
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedMessage {
    SaveDebt {
        id: Option<String>, // 有编号时为编辑
        name: String,
        total: String,      // 原始文本，由账本宽松解析
        paid: String,
        category: DebtCategory,
    },
    DeleteDebt {
        id: String,
    },
    Repayment {
        creditor: String,
        amount: String,
    },
    Post {
        category: SparkCategory,
        content: String,
    },
    Reply {
        spark_id: String,
        text: String,
    },
}

#[derive(Clone, Debug)]
pub struct MessageParser {
    patterns: &'static RegexPatterns,
}

impl MessageParser {
    pub fn new() -> Self {
        Self {
            patterns: RegexPatterns::get_instance(),
        }
    }

    pub fn parse(&self, text: &str) -> Option<ParsedMessage> {
        let text = text.trim();
        debug!("Parsing message: {text}");

        // 删除要先于新增判断
        if let Some(caps) = self.patterns.delete_debt_regex.captures(text) {
            let id = caps.get(1)?.as_str().to_string();
            debug!("Delete debt: {id}");
            return Some(ParsedMessage::DeleteDebt { id });
        }

        if self.patterns.debt_regex.is_match(text) {
            return self.parse_debt(text);
        }

        if let Some(caps) = self.patterns.repayment_regex.captures(text) {
            let creditor = caps.get(1)?.as_str().trim().to_string();
            let amount = caps.get(2)?.as_str().to_string();
            debug!("Repayment: {creditor} {amount}");
            return Some(ParsedMessage::Repayment { creditor, amount });
        }

        if let Some(caps) = self.patterns.spark_regex.captures(text) {
            let category = caps.get(1)?.as_str().parse::<SparkCategory>().ok()?;
            let content = caps.get(2)?.as_str().trim().to_string();
            debug!("Spark post in {}", category.label());
            return Some(ParsedMessage::Post { category, content });
        }

        if let Some(caps) = self.patterns.reply_regex.captures(text) {
            let spark_id = caps.get(1)?.as_str().to_string();
            let text = caps.get(2)?.as_str().trim().to_string();
            debug!("Reply to spark {spark_id}");
            return Some(ParsedMessage::Reply { spark_id, text });
        }

        None
    }

    fn parse_debt(&self, text: &str) -> Option<ParsedMessage> {
        let name = self
            .patterns
            .debt_regex
            .captures(text)?
            .get(1)?
            .as_str()
            .trim()
            .to_string();

        let total = self.capture_raw(&self.patterns.debt_total_regex, text);
        let paid = self.capture_raw(&self.patterns.debt_paid_regex, text);

        // 未标注类型时默认为银行
        let category = self
            .patterns
            .debt_category_regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<DebtCategory>().ok())
            .unwrap_or(DebtCategory::Bank);

        let id = self
            .patterns
            .debt_id_regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string());

        debug!("Debt form: name={name}, total={total}, paid={paid}, id={id:?}");

        Some(ParsedMessage::SaveDebt {
            id,
            name,
            total,
            paid,
            category,
        })
    }

    fn capture_raw(&self, regex: &regex::Regex, text: &str) -> String {
        regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }

    /// 检查消息是否是本机器人识别的格式
    pub fn is_ledger_message(&self, text: &str) -> bool {
        self.parse(text).is_some()
    }
}

impl Default for MessageParser {
    fn default() -> Self {
        Self::new()
    }
}
