use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug)]
pub struct RegexPatterns {
    pub leading_number_regex: Regex,
    pub debt_regex: Regex,
    pub debt_total_regex: Regex,
    pub debt_paid_regex: Regex,
    pub debt_category_regex: Regex,
    pub debt_id_regex: Regex,
    pub delete_debt_regex: Regex,
    pub repayment_regex: Regex,
    pub spark_regex: Regex,
    pub reply_regex: Regex,
}

impl RegexPatterns {
    pub fn new() -> Self {
        Self {
            // 开头的数字部分，例如 "1200.5元" 中的 1200.5
            leading_number_regex: Regex::new(r"^\s*[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").unwrap(),
            // 匹配债务名称 #债务 名称（到下一个 # 为止），命令标签必须在消息开头
            debt_regex: Regex::new(r"^#债务[ \t]+([^#\n]*)").unwrap(),
            // 匹配 #总额 金额，金额原样保留，解析在账本里做
            debt_total_regex: Regex::new(r"#总额[ \t]*([^#\s]*)").unwrap(),
            // 匹配 #已还 金额
            debt_paid_regex: Regex::new(r"#已还[ \t]*([^#\s]*)").unwrap(),
            // 匹配债务类型 #银行 #网贷 #个人
            debt_category_regex: Regex::new(r"#(银行|网贷|个人)").unwrap(),
            // 匹配编辑目标 #编号 id
            debt_id_regex: Regex::new(r"#编号[ \t]+(\S+)").unwrap(),
            // 匹配删除 #删除债务 id
            delete_debt_regex: Regex::new(r"^#删除债务[ \t]+(\S+)").unwrap(),
            // 匹配还款 #还款 机构名称 金额（金额为最后一段）
            repayment_regex: Regex::new(r"^#还款[ \t]+(.+?)[ \t]+(\S+)[ \t]*$").unwrap(),
            // 匹配发帖 #故事 内容 或 #心情 内容
            spark_regex: Regex::new(r"^#(故事|心情)\s+((?s:.+))$").unwrap(),
            // 匹配回复 #回复 帖子id 内容
            reply_regex: Regex::new(r"^#回复[ \t]+(\S+)\s+((?s:.+))$").unwrap(),
        }
    }

    pub fn get_instance() -> &'static Self {
        static INSTANCE: OnceLock<RegexPatterns> = OnceLock::new();
        INSTANCE.get_or_init(RegexPatterns::new)
    }
}

impl Default for RegexPatterns {
    fn default() -> Self {
        Self::new()
    }
}
